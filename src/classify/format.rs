//! Sheet layout detection.

use tracing::debug;

use crate::config::{DetectionCondition, NormalizeConfig};
use crate::model::{ColumnProfile, FormatVariant};

/// Result of layout detection for one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// The sheet name carries an administrative keyword; detection did not run.
    Administrative { keyword: String },
    /// Detection ran and assigned a variant (possibly `Unrecognized`).
    Variant(FormatVariant),
}

impl DetectionCondition {
    /// Evaluate the condition against a column profile.
    pub fn matches(&self, profile: &ColumnProfile) -> bool {
        match self {
            DetectionCondition::LabelCount { label, count } => profile.count(label) >= *count,
            DetectionCondition::LabelFragment { fragment } => profile.any_contains(fragment),
            DetectionCondition::Label { label } => profile.contains(label),
        }
    }
}

/// Classify a sheet into one of the known layouts.
///
/// Administrative sheets are screened out by name before any column is looked
/// at. Otherwise the first matching rule of the configured table wins.
pub fn detect_format(
    profile: &ColumnProfile,
    sheet_name: &str,
    config: &NormalizeConfig,
) -> Detection {
    if let Some(keyword) = config.admin_keyword(sheet_name) {
        return Detection::Administrative {
            keyword: keyword.to_string(),
        };
    }

    for (idx, rule) in config.detection_rules.iter().enumerate() {
        if rule.condition.matches(profile) {
            debug!(
                "Sheet '{}': detection rule {} ({:?}) -> {:?}",
                sheet_name,
                idx + 1,
                rule.condition,
                rule.variant
            );
            return Detection::Variant(rule.variant);
        }
    }

    Detection::Variant(FormatVariant::Unrecognized)
}
