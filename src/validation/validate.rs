//! Post-build checks over normalized sheet results.

use std::collections::{HashMap, HashSet};

use crate::model::{SheetOutcome, SheetResult};

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Create a failing result with an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            errors: vec![message.into()],
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate every sheet result of a batch.
///
/// Tags repeated across sheets are only warned about, since each sheet is
/// written to its own file.
pub fn validate_results(results: &[SheetResult]) -> ValidationResult {
    if results.is_empty() {
        return ValidationResult::error("Workbook produced no sheets");
    }

    let mut result = ValidationResult::ok();

    for sheet in results {
        result.merge(validate_sheet(sheet));
    }

    let mut owners: HashMap<&str, &str> = HashMap::new();
    for sheet in results {
        for record in sheet.records() {
            match owners.get(record.tag()) {
                Some(owner) if *owner != sheet.sheet_name => result.add_warning(format!(
                    "Sheet '{}': tag {} also used by sheet '{}'",
                    sheet.sheet_name,
                    record.tag(),
                    owner
                )),
                Some(_) => {}
                None => {
                    owners.insert(record.tag(), &sheet.sheet_name);
                }
            }
        }
    }

    if results.iter().all(|r| r.records().is_empty()) {
        result.add_warning("No sheet produced any records");
    }

    result
}

/// Validate a single sheet result.
pub fn validate_sheet(sheet: &SheetResult) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let name = &sheet.sheet_name;

    let records = match &sheet.outcome {
        SheetOutcome::Skipped { reason } => {
            result.add_warning(format!("Sheet '{}': skipped, {}", name, reason));
            return result;
        }
        SheetOutcome::Normalized { records, .. } => records,
    };

    if records.is_empty() {
        result.add_warning(format!("Sheet '{}': no records", name));
        return result;
    }

    let mut seen = HashSet::new();
    for (expected, record) in records.iter().enumerate() {
        if record.sequence_index() != expected as u64 {
            result.add_error(format!(
                "Sheet '{}', record {}: sequence index {} breaks contiguous order",
                name,
                expected + 1,
                record.sequence_index()
            ));
        }

        if record.description().trim().is_empty() {
            result.add_error(format!(
                "Sheet '{}', record {}: empty description",
                name,
                expected + 1
            ));
        }

        if !seen.insert(record.tag()) {
            result.add_error(format!(
                "Sheet '{}', record {}: duplicate tag {}",
                name,
                expected + 1,
                record.tag()
            ));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizeConfig;
    use crate::model::{CanonicalField, CanonicalRecord, FieldValue, FormatVariant, RawSheet, SignalType};
    use crate::pipeline::normalize_sheet;

    fn normalized(name: &str, rows: &[&str]) -> SheetResult {
        let rows: Vec<Vec<&str>> = rows.iter().map(|r| vec![*r]).collect();
        let sheet = RawSheet::from_strings(name, &["点名"], &rows);
        normalize_sheet(&sheet, &NormalizeConfig::default(), "1.1.11.3")
    }

    fn with_records(name: &str, records: Vec<CanonicalRecord>) -> SheetResult {
        SheetResult {
            sheet_name: name.to_string(),
            outcome: SheetOutcome::Normalized {
                variant: FormatVariant::HardwiredIO,
                signal_type: SignalType::DiscreteInput,
                records,
                warnings: Vec::new(),
            },
        }
    }

    // ==================== ValidationResult tests ====================

    #[test]
    fn test_validation_result_ok() {
        let result = ValidationResult::ok();
        assert!(result.passed);
        assert!(result.warnings.is_empty());
        assert!(result.errors.is_empty());
    }


    #[test]
    fn test_validation_result_merge() {
        let mut result = ValidationResult::ok();
        let mut other = ValidationResult::ok();
        other.add_warning("w");
        other.add_error("e");
        result.merge(other);
        assert!(!result.passed);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.errors.len(), 1);
    }

    // ==================== sheet tests ====================

    #[test]
    fn test_normalized_sheet_passes() {
        let result = validate_sheet(&normalized("DI", &["断路器1分闸", "备用", "断路器2分闸"]));
        assert!(result.passed);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_skipped_and_empty_sheets_warn() {
        let skipped = validate_sheet(&normalized("说明", &["x"]));
        assert!(skipped.passed);
        assert_eq!(skipped.warnings.len(), 1);

        let empty = validate_sheet(&normalized("DI", &["备用"]));
        assert!(empty.passed);
        assert_eq!(empty.warnings, vec!["Sheet 'DI': no records"]);
    }

    #[test]
    fn test_broken_sequence_and_duplicate_tag() {
        let good = normalized("DI", &["a", "b"]);
        let mut records = good.records().to_vec();
        records.swap(0, 1);
        records.push(good.records()[0].clone());

        let result = validate_sheet(&with_records("DI", records));
        assert!(!result.passed);
        assert!(result.errors.iter().any(|e| e.contains("breaks contiguous order")));
        assert!(result.errors.iter().any(|e| e.contains("duplicate tag KGZ_DIN000")));
    }

    #[test]
    fn test_empty_description_is_error() {
        let mut record = normalized("DI", &["a"]).records()[0].clone();
        record.set(CanonicalField::Description, FieldValue::Text(String::new()));
        let result = validate_sheet(&with_records("DI", vec![record]));
        assert!(!result.passed);
    }

    // ==================== batch tests ====================

    #[test]
    fn test_cross_sheet_tags_warn_only() {
        let results = vec![normalized("DI_1", &["a"]), normalized("DI_2", &["b"])];
        let result = validate_results(&results);
        assert!(result.passed);
        assert!(result.warnings.iter().any(|w| w.contains("also used by sheet 'DI_1'")));
    }

    #[test]
    fn test_empty_batch_fails() {
        let result = validate_results(&[]);
        assert!(!result.passed);
        assert_eq!(result.errors, vec!["Workbook produced no sheets"]);
    }
}
