use crate::error::{RandwordError, Result};
use std::collections::BTreeSet;

/// One `base/flags` line from a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFormRecord {
    pub base: String,
    pub flags: BTreeSet<String>,
}

impl WordFormRecord {
    /// Parse a dictionary line. Each flag character is one rule identifier;
    /// anything after whitespace in the flag field is a morphological field
    /// and is ignored.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end();
        let (base, flags) = line.split_once('/').unwrap_or((line, ""));

        if base.trim_matches('"').trim().is_empty() {
            return Err(RandwordError::invalid_dictionary(format!(
                "empty word in line {line:?}"
            )));
        }
        if base.contains(char::is_whitespace) {
            return Err(RandwordError::invalid_dictionary(format!(
                "word contains whitespace in line {line:?}"
            )));
        }

        let flags = flags
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .chars()
            .map(String::from)
            .collect();

        Ok(Self {
            base: base.to_string(),
            flags,
        })
    }

    /// The base word without surrounding double quotes.
    pub fn word(&self) -> &str {
        self.base.trim_matches('"')
    }
}
