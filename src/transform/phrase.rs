//! Voice-alarm phrase generation from highlighted rows.

use tracing::{debug, warn};

use super::substitute::RuleSet;
use crate::config::PhraseConfig;
use crate::error::{ConvertError, Result};
use crate::model::{ColumnProfile, PhraseEntry, RawSheet};

/// Column positions used by phrase generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseColumns {
    pub sequence: usize,
    pub description: usize,
    pub name: usize,
    pub prefix: Option<usize>,
}

impl PhraseColumns {
    /// Resolve phrase columns by normalized label.
    pub fn resolve(sheet: &RawSheet, config: &PhraseConfig) -> Result<Self> {
        let profile = ColumnProfile::from_labels(sheet.columns.as_slice());
        let required = |label: &str| {
            profile
                .position(label)
                .ok_or_else(|| ConvertError::MissingColumn {
                    sheet: sheet.name.clone(),
                    column: label.to_string(),
                })
        };

        Ok(Self {
            sequence: required(config.sequence_column.as_str())?,
            description: required(config.description_column.as_str())?,
            name: required(config.name_column.as_str())?,
            prefix: profile.position(&config.prefix_column),
        })
    }
}

/// Mark rows whose name cell carries the highlight font colour.
///
/// Returns the number of selected rows.
pub fn mark_highlighted(sheet: &mut RawSheet, config: &PhraseConfig) -> Result<usize> {
    let columns = PhraseColumns::resolve(sheet, config)?;
    let count = sheet.mark_selected(columns.name, &config.highlight_rgb);
    debug!("Sheet '{}': {} highlighted rows", sheet.name, count);
    Ok(count)
}

/// Build phrase entries for the selected rows of a sheet, in sheet order.
///
/// `prefix` is prepended to every phrase before the per-row prefix cell and
/// the name cell; the concatenation then runs through `rules`.
pub fn generate_phrases(
    sheet: &RawSheet,
    rules: &RuleSet,
    prefix: &str,
    config: &PhraseConfig,
) -> Result<Vec<PhraseEntry>> {
    let columns = PhraseColumns::resolve(sheet, config)?;

    let entries: Vec<PhraseEntry> = sheet
        .rows
        .iter()
        .filter(|row| row.selected)
        .map(|row| {
            let text = |column: Option<usize>| {
                column
                    .and_then(|c| row.value(c))
                    .unwrap_or_default()
                    .to_string()
            };
            let raw = format!(
                "{}{}{}",
                prefix,
                text(columns.prefix),
                text(Some(columns.name))
            );
            PhraseEntry {
                sequence: text(Some(columns.sequence)),
                phrase: rules.apply(&raw),
                audio_file: format!("{}{}", text(Some(columns.description)), config.audio_suffix),
            }
        })
        .collect();

    if entries.is_empty() {
        warn!("Sheet '{}': no highlighted rows", sheet.name);
    }
    Ok(entries)
}
