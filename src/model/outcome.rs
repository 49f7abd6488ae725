//! Per-sheet normalization outcomes.

use serde::Serialize;

use super::record::CanonicalRecord;
use super::variant::{FormatVariant, SignalType};

/// Why a sheet produced no records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Sheet name carries an administrative keyword; never a data sheet.
    Administrative { keyword: String },
    /// Columns matched none of the known layouts.
    Unrecognized { columns: Vec<String> },
    /// The layout was recognized but its name/description column is absent.
    MissingColumn {
        variant: FormatVariant,
        column: String,
    },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Administrative { keyword } => {
                write!(f, "administrative sheet (name contains '{}')", keyword)
            }
            SkipReason::Unrecognized { columns } => {
                write!(f, "no matching layout; columns seen: [{}]", columns.join(", "))
            }
            SkipReason::MissingColumn { variant, column } => {
                write!(f, "{} without required column '{}'", variant, column)
            }
        }
    }
}

/// Result of normalizing one sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SheetOutcome {
    Normalized {
        variant: FormatVariant,
        signal_type: SignalType,
        records: Vec<CanonicalRecord>,
        warnings: Vec<String>,
    },
    Skipped { reason: SkipReason },
}

/// Outcome of one sheet, keyed by its name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetResult {
    pub sheet_name: String,
    pub outcome: SheetOutcome,
}

impl SheetResult {
    /// Create a skipped result.
    pub fn skipped(sheet_name: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            outcome: SheetOutcome::Skipped { reason },
        }
    }

    /// Records produced for this sheet (empty when skipped).
    pub fn records(&self) -> &[CanonicalRecord] {
        match &self.outcome {
            SheetOutcome::Normalized { records, .. } => records,
            SheetOutcome::Skipped { .. } => &[],
        }
    }

    /// Detected layout, if the sheet reached detection and matched.
    pub fn variant(&self) -> Option<FormatVariant> {
        match &self.outcome {
            SheetOutcome::Normalized { variant, .. } => Some(*variant),
            SheetOutcome::Skipped {
                reason: SkipReason::MissingColumn { variant, .. },
            } => Some(*variant),
            SheetOutcome::Skipped {
                reason: SkipReason::Unrecognized { .. },
            } => Some(FormatVariant::Unrecognized),
            SheetOutcome::Skipped { .. } => None,
        }
    }

    /// Skip reason, if the sheet was skipped.
    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match &self.outcome {
            SheetOutcome::Skipped { reason } => Some(reason),
            SheetOutcome::Normalized { .. } => None,
        }
    }

    /// Check if the sheet was normalized (possibly to zero records).
    pub fn is_normalized(&self) -> bool {
        matches!(self.outcome, SheetOutcome::Normalized { .. })
    }
}
