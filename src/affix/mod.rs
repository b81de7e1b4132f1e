pub mod engine;
pub mod parser;
pub mod rule;

// Re-export the main types for convenience
pub use engine::{apply_prefix, apply_suffix, expand, expand_with, StandaloneConvention};
pub use parser::{open_affix_file, parse_affix_rules, parse_affix_rules_strict, AffixParser};
pub use rule::{AffixKind, AffixRule, Condition, RuleRole, RuleTable, RuleVariant};
