//! Substitution rule-file parser (`pattern=replacement` lines).

use std::path::Path;
use tracing::{debug, warn};

use crate::error::{ConvertError, Result};
use crate::transform::{RuleSet, SubstitutionRule};

/// Split a rule line at its first `=`.
///
/// Unlike section keys, neither side is trimmed: whitespace around `=` is part
/// of the pattern or replacement.
pub fn parse_rule_line(line: &str) -> Option<(&str, &str)> {
    let (pattern, replacement) = line.split_once('=')?;
    if pattern.is_empty() {
        return None;
    }
    Some((pattern, replacement))
}

/// Parse rule-file content.
///
/// Blank lines and `#` comments are skipped. Lines without `=` or with an
/// empty pattern are ignored with a warning.
pub fn parse_rules(content: &str) -> RuleSet {
    let mut rules = RuleSet::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_rule_line(line) {
            Some((pattern, replacement)) => {
                debug!("Rule {}: '{}' -> '{}'", rules.len() + 1, pattern, replacement);
                rules.push(SubstitutionRule::new(pattern, replacement));
            }
            None => warn!("Ignoring malformed rule at line {}: {}", idx + 1, line),
        }
    }

    rules
}

/// Load a UTF-8 rule file.
pub fn load_rules(path: &Path) -> Result<RuleSet> {
    if !path.exists() {
        return Err(ConvertError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    // Tolerate a UTF-8 byte-order mark written by Windows editors
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    Ok(parse_rules(content))
}
