//! pointlist-convert-rs - Normalize engineering I/O point lists into the canonical alarm schema.
//!
//! Point-list workbooks arrive in several incompatible layouts: hardwired I/O
//! lists, side-by-side PLC register maps and logic/alarm mapping tables. This
//! library detects the layout of each sheet, extracts the valid signal rows and
//! emits records in the fixed 48-field schema read by the alarm database
//! importer. It also builds voice-alarm phrase lists from red-highlighted rows.
//!
//! # Example
//!
//! ```no_run
//! use pointlist_convert_rs::{convert_workbook_file, write_sheet_csvs, NormalizeConfig};
//! use std::path::Path;
//!
//! let config = NormalizeConfig::default();
//! let results = convert_workbook_file(Path::new("points.xlsx"), &config, "1.1.11.3").unwrap();
//! write_sheet_csvs(Path::new("out"), &results).unwrap();
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod transform;
pub mod validation;

use std::path::{Path, PathBuf};
use tracing::{info, warn};

// Re-exports for convenience
pub use config::{NormalizeConfig, PhraseConfig, DEFAULT_STATION_PREFIX};
pub use error::{ConvertError, Result};
pub use generator::{generate_csv, generate_phrase_text, write_phrase_file, write_sheet_csvs};
pub use model::{
    CanonicalField, CanonicalRecord, FormatVariant, PhraseEntry, RawSheet, SheetOutcome,
    SheetResult, SignalType, SkipReason, Workbook,
};
pub use parser::{load_rules, read_workbook};
pub use pipeline::{normalize_sheet, normalize_workbook};
pub use transform::RuleSet;
pub use validation::{validate_results, ValidationResult};

/// Read a workbook and normalize all of its sheets.
///
/// File-level problems are errors; sheet-level problems come back as skipped
/// results alongside the normalized sheets.
pub fn convert_workbook_file(
    input_path: &Path,
    config: &NormalizeConfig,
    station_prefix: &str,
) -> Result<Vec<SheetResult>> {
    let workbook = read_workbook(input_path)?;
    Ok(normalize_workbook(&workbook, config, station_prefix))
}

/// Build phrase entries from the first sheet of one workbook.
pub fn phrases_from_workbook(
    input_path: &Path,
    rules: &RuleSet,
    prefix: &str,
    config: &PhraseConfig,
) -> Result<Vec<PhraseEntry>> {
    let mut sheet = parser::read_first_sheet(input_path)?;
    transform::mark_highlighted(&mut sheet, config)?;
    transform::generate_phrases(&sheet, rules, prefix, config)
}

/// Build one phrase list from several workbooks, in input order.
///
/// A workbook that fails to load or lacks a required column is reported and
/// skipped; the remaining workbooks still contribute.
pub fn collect_phrases(
    inputs: &[PathBuf],
    rules: &RuleSet,
    prefix: &str,
    config: &PhraseConfig,
) -> Vec<PhraseEntry> {
    let mut entries = Vec::new();
    for input in inputs {
        match phrases_from_workbook(input, rules, prefix, config) {
            Ok(found) => {
                info!("{}: {} phrases", input.display(), found.len());
                entries.extend(found);
            }
            Err(e) => warn!("{}: skipped, {}", input.display(), e),
        }
    }
    entries
}
