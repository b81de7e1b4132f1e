use super::rule::{AffixRule, RuleRole};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which end standalone (non cross-product) rules are attached to.
///
/// `Swapped` reproduces the historical randword output: standalone prefix
/// rules are applied at the end of the word and standalone suffix rules at
/// the start. `Direct` attaches each rule at its own end.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StandaloneConvention {
    #[default]
    Swapped,
    Direct,
}

/// Expand `base` with the default [`StandaloneConvention`].
pub fn expand(base: &str, rules: &[&AffixRule]) -> Vec<String> {
    expand_with(base, rules, StandaloneConvention::default())
}

/// Every surface form reachable from `base` through `rules`.
///
/// Output order is: standalone leading rules, standalone trailing rules,
/// then the base word, combinable prefixes, and the combinable suffixes
/// applied over those. Duplicates are kept so that the random pick is
/// weighted by how many rules produce a form.
pub fn expand_with(
    base: &str,
    rules: &[&AffixRule],
    convention: StandaloneConvention,
) -> Vec<String> {
    let mut complete = Vec::new();
    let mut partial = vec![base.to_string()];

    let with_role = |role: RuleRole| rules.iter().copied().filter(move |r| r.role == role);

    for rule in with_role(RuleRole::StandaloneLeading) {
        complete.push(match convention {
            StandaloneConvention::Swapped => apply_suffix(base, rule),
            StandaloneConvention::Direct => apply_prefix(base, rule),
        });
    }
    for rule in with_role(RuleRole::StandaloneTrailing) {
        complete.push(match convention {
            StandaloneConvention::Swapped => apply_prefix(base, rule),
            StandaloneConvention::Direct => apply_suffix(base, rule),
        });
    }

    partial.extend(with_role(RuleRole::CombinableLeading).map(|rule| apply_prefix(base, rule)));

    // Single pass over the base and its prefixed forms, not a closure.
    let stems = partial.len();
    for i in 0..stems {
        for rule in with_role(RuleRole::CombinableTrailing) {
            let word = apply_suffix(&partial[i], rule);
            partial.push(word);
        }
    }

    complete.extend(partial);
    complete
}

/// Apply the first matching variant of `rule` at the start of `word`.
pub fn apply_prefix(word: &str, rule: &AffixRule) -> String {
    match rule.matching_variant(word) {
        Some(variant) => {
            let rest = drop_leading(word, variant.strip.chars().count());
            format!("{}{}", variant.add, rest)
        }
        None => word.to_string(),
    }
}

/// Apply the first matching variant of `rule` at the end of `word`.
pub fn apply_suffix(word: &str, rule: &AffixRule) -> String {
    match rule.matching_variant(word) {
        Some(variant) => {
            let rest = drop_trailing(word, variant.strip.chars().count());
            format!("{}{}", rest, variant.add)
        }
        None => word.to_string(),
    }
}

fn drop_leading(word: &str, n: usize) -> &str {
    match word.char_indices().nth(n) {
        Some((idx, _)) => &word[idx..],
        None => "",
    }
}

fn drop_trailing(word: &str, n: usize) -> &str {
    if n == 0 {
        return word;
    }
    match word.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &word[..idx],
        None => "",
    }
}
