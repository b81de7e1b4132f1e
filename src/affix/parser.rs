use super::rule::{AffixKind, AffixRule, Condition, RuleTable, RuleVariant};
use crate::error::{RandwordError, Result};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Hunspell writes `0` for an empty strip or add field.
const EMPTY_FIELD: &str = "0";

/// Condition used when a variant line leaves it out.
const MATCH_ANY: &str = ".";

/// Parse `PFX`/`SFX` blocks, skipping malformed lines with a warning.
pub fn parse_affix_rules<R: BufRead>(reader: R) -> Result<RuleTable> {
    AffixParser::lenient().parse(reader)
}

/// Parse `PFX`/`SFX` blocks, failing on the first malformed line.
pub fn parse_affix_rules_strict<R: BufRead>(reader: R) -> Result<RuleTable> {
    AffixParser::strict().parse(reader)
}

/// Open an `.aff` file for [`parse_affix_rules`].
pub fn open_affix_file<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| RandwordError::file_access(path, e))?;
    Ok(BufReader::new(file))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AffixParser {
    strict: bool,
}

/// The block currently being filled with variant lines.
struct OpenBlock {
    id: String,
    kind: AffixKind,
    remaining: usize,
}

impl AffixParser {
    pub fn lenient() -> Self {
        Self { strict: false }
    }

    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn parse<R: BufRead>(&self, mut reader: R) -> Result<RuleTable> {
        let mut table = RuleTable::new();
        let mut open: Option<OpenBlock> = None;
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;

            // Affix files are often latin-1; only the rule lines need to be text.
            let line = String::from_utf8_lossy(&buf);
            if !is_rule_line(&line) {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 2 {
                self.malformed(line_no, "rule line has no identifier".to_string())?;
                continue;
            }

            if let Some(block) = open.as_mut() {
                if fields[1] == block.id {
                    block.remaining -= 1;
                    let (id, kind) = (block.id.clone(), block.kind);
                    if block.remaining == 0 {
                        open = None;
                    }
                    match parse_variant(kind, &fields) {
                        Ok(variant) => {
                            if let Some(rule) = table.get_mut(&id) {
                                rule.push_variant(variant);
                            }
                        }
                        Err(reason) => self.malformed(line_no, reason)?,
                    }
                    continue;
                }

                self.malformed(
                    line_no,
                    format!(
                        "rule {} still expects {} variant(s) but found a line for {}",
                        block.id, block.remaining, fields[1]
                    ),
                )?;
                open = None;
            }

            match parse_header(&fields) {
                Ok((id, rule)) => {
                    if rule.declared_variants > 0 {
                        open = Some(OpenBlock {
                            id: id.clone(),
                            kind: rule.kind,
                            remaining: rule.declared_variants,
                        });
                    }
                    if table.insert(id.clone(), rule).is_some() {
                        debug!("affix rule {id} redefined at line {line_no}");
                    }
                }
                Err(reason) => self.malformed(line_no, reason)?,
            }
        }

        if let Some(block) = open {
            self.malformed(
                line_no,
                format!(
                    "input ended with {} variant(s) of rule {} missing",
                    block.remaining, block.id
                ),
            )?;
        }

        debug!("parsed {} affix rules", table.len());
        Ok(table)
    }

    fn malformed(&self, line: usize, reason: String) -> Result<()> {
        if self.strict {
            return Err(RandwordError::MalformedAffixFile { line, reason });
        }
        warn!("skipping affix line {line}: {reason}");
        Ok(())
    }
}

fn is_rule_line(line: &str) -> bool {
    matches!(line.get(..3), Some("PFX") | Some("SFX"))
        && line[3..].starts_with(char::is_whitespace)
}

fn parse_header(fields: &[&str]) -> std::result::Result<(String, AffixRule), String> {
    if fields.len() < 4 {
        return Err(format!("header needs 4 fields, found {}", fields.len()));
    }
    let kind = AffixKind::from_tag(fields[0])
        .ok_or_else(|| format!("unknown affix kind {}", fields[0]))?;
    let count = fields[3]
        .parse::<usize>()
        .map_err(|_| format!("variant count {:?} is not a number", fields[3]))?;
    let combinable = fields[2] == "Y";

    Ok((fields[1].to_string(), AffixRule::new(kind, combinable, count)))
}

fn parse_variant(kind: AffixKind, fields: &[&str]) -> std::result::Result<RuleVariant, String> {
    if fields.len() < 4 {
        return Err(format!("variant needs at least 4 fields, found {}", fields.len()));
    }
    let strip = empty_if_zero(fields[2]);
    // Continuation classes (`s/XY`) are not applied.
    let add = empty_if_zero(fields[3].split('/').next().unwrap_or_default());
    let raw_condition = fields.get(4).copied().unwrap_or(MATCH_ANY);
    let condition = Condition::anchored(kind, raw_condition)
        .map_err(|e| format!("bad condition {raw_condition:?}: {e}"))?;

    Ok(RuleVariant::new(strip, add, condition))
}

fn empty_if_zero(field: &str) -> &str {
    if field == EMPTY_FIELD {
        ""
    } else {
        field
    }
}
