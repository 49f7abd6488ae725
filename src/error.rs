//! Error types for point-list conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the converter.
///
/// Only file-level and archive-level failures are errors. Problems confined to
/// one sheet are reported through [`crate::model::SheetOutcome`] instead.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Workbook has no sheets: {path}")]
    EmptyWorkbook { path: PathBuf },

    #[error("Failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    #[error("Failed to read workbook archive part '{part}': {message}")]
    Archive { part: String, message: String },

    #[error("Malformed XML in '{part}': {message}")]
    Xml { part: String, message: String },

    #[error("Invalid cell reference: {reference}")]
    InvalidCellReference { reference: String },

    #[error("Sheet '{sheet}' is missing required column '{column}'")]
    MissingColumn { sheet: String, column: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
