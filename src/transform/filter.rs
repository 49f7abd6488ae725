//! Removal of spare, reserved and malformed rows.

use crate::model::RawSheet;

/// Keep rows whose name field is present and contains none of the exclusion tokens.
///
/// Dropped rows are normal filtering, not errors. An empty result is valid.
pub fn filter_rows(sheet: &RawSheet, name_column: usize, exclusion_tokens: &[String]) -> RawSheet {
    let rows = sheet
        .rows
        .iter()
        .filter(|row| match row.value(name_column) {
            Some(name) if !name.trim().is_empty() => !is_excluded(name, exclusion_tokens),
            _ => false,
        })
        .cloned()
        .collect();
    sheet.with_rows(rows)
}

/// Check if a name contains any exclusion token as a substring.
pub fn is_excluded(name: &str, exclusion_tokens: &[String]) -> bool {
    exclusion_tokens
        .iter()
        .any(|token| !token.is_empty() && name.contains(token.as_str()))
}
