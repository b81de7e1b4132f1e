use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

/// Which end of a word an affix rule works on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum_macros::Display)]
pub enum AffixKind {
    #[strum(serialize = "PFX")]
    Prefix,
    #[strum(serialize = "SFX")]
    Suffix,
}

impl AffixKind {
    /// Parse the `PFX`/`SFX` tag at the start of an affix line.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "PFX" => Some(AffixKind::Prefix),
            "SFX" => Some(AffixKind::Suffix),
            _ => None,
        }
    }

    /// Anchor a raw hunspell condition to the end of the word this kind affects.
    pub fn anchor(&self, condition: &str) -> String {
        match self {
            AffixKind::Prefix => format!("^{condition}"),
            AffixKind::Suffix => format!("{condition}$"),
        }
    }
}

/// How the expansion engine treats a rule, fixed when the rule is built.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RuleRole {
    StandaloneLeading,
    StandaloneTrailing,
    CombinableLeading,
    CombinableTrailing,
}

impl RuleRole {
    pub fn from_parts(kind: AffixKind, combinable: bool) -> Self {
        match (kind, combinable) {
            (AffixKind::Prefix, false) => RuleRole::StandaloneLeading,
            (AffixKind::Suffix, false) => RuleRole::StandaloneTrailing,
            (AffixKind::Prefix, true) => RuleRole::CombinableLeading,
            (AffixKind::Suffix, true) => RuleRole::CombinableTrailing,
        }
    }
}

/// Anchored pattern a word must match for a variant to apply.
#[derive(Clone)]
pub struct Condition {
    source: String,
    regex: Regex,
}

impl Condition {
    /// Compile an already anchored pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            source: pattern.to_string(),
            regex: Regex::new(pattern)?,
        })
    }

    /// Compile a raw hunspell condition, anchoring it for `kind`.
    pub fn anchored(kind: AffixKind, raw: &str) -> Result<Self, regex::Error> {
        Self::new(&kind.anchor(raw))
    }

    pub fn matches(&self, word: &str) -> bool {
        self.regex.is_match(word)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Condition").field(&self.source).finish()
    }
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleVariant {
    pub strip: String,
    pub add: String,
    pub condition: Condition,
}

impl RuleVariant {
    pub fn new(strip: impl Into<String>, add: impl Into<String>, condition: Condition) -> Self {
        Self {
            strip: strip.into(),
            add: add.into(),
            condition,
        }
    }
}

/// One `PFX`/`SFX` block from an affix file.
#[derive(Debug, Clone, PartialEq)]
pub struct AffixRule {
    pub kind: AffixKind,
    pub combinable: bool,
    pub role: RuleRole,
    pub declared_variants: usize,
    pub variants: Vec<RuleVariant>,
}

impl AffixRule {
    pub fn new(kind: AffixKind, combinable: bool, declared_variants: usize) -> Self {
        Self {
            kind,
            combinable,
            role: RuleRole::from_parts(kind, combinable),
            declared_variants,
            variants: Vec::with_capacity(declared_variants),
        }
    }

    /// Build a rule whose declared count matches the given variants.
    pub fn with_variants(kind: AffixKind, combinable: bool, variants: Vec<RuleVariant>) -> Self {
        let mut rule = Self::new(kind, combinable, variants.len());
        rule.variants = variants;
        rule
    }

    pub fn push_variant(&mut self, variant: RuleVariant) {
        self.variants.push(variant);
    }

    /// First variant whose condition matches `word`, in file order.
    pub fn matching_variant(&self, word: &str) -> Option<&RuleVariant> {
        self.variants.iter().find(|v| v.condition.matches(word))
    }

    pub fn is_complete(&self) -> bool {
        self.variants.len() == self.declared_variants
    }
}

/// Rules keyed by their flag identifier.
pub type RuleTable = BTreeMap<String, AffixRule>;
