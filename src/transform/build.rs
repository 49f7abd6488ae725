//! Mapping of filtered rows onto the canonical record schema.

use crate::config::{NormalizeConfig, TAG_INDEX_WIDTH};
use crate::model::{
    CanonicalField, CanonicalRecord, FieldValue, FormatVariant, RawSheet, SignalType,
};

/// Where a record's physical address comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressSource {
    /// `{station_prefix}.{sequence_index}`.
    Station(String),
    /// Register address cell of the row, fractional suffix truncated.
    RegisterColumn(Option<usize>),
    /// Virtual points carry the literal address `0`.
    Virtual,
}

/// Per-variant recipe for turning rows into records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPlan {
    pub signal_type: SignalType,
    pub name_column: usize,
    pub address: AddressSource,
    pub tag_prefix: String,
}

impl RecordPlan {
    /// Build the plan for a layout variant.
    ///
    /// `address_column` is only consulted for parallel register maps.
    pub fn for_variant(
        variant: FormatVariant,
        signal_type: SignalType,
        name_column: usize,
        address_column: Option<usize>,
        station_prefix: &str,
        config: &NormalizeConfig,
    ) -> Self {
        let (address, tag_prefix) = match variant {
            FormatVariant::ParallelRegisterBlock => (
                AddressSource::RegisterColumn(address_column),
                config.plc_prefix.clone(),
            ),
            FormatVariant::LogicAlarmMap => (
                AddressSource::Virtual,
                config.type_prefix(SignalType::Virtual).to_string(),
            ),
            FormatVariant::HardwiredIO | FormatVariant::Unrecognized => (
                AddressSource::Station(station_prefix.to_string()),
                config.type_prefix(signal_type).to_string(),
            ),
        };
        Self {
            signal_type,
            name_column,
            address,
            tag_prefix,
        }
    }
}

/// Build canonical records from a filtered sheet.
///
/// Rows are emitted in sheet order with `sequence_index` counting from 0.
/// Cell-level problems fall back to defaults; they never drop a row.
pub fn build_records(
    sheet: &RawSheet,
    plan: &RecordPlan,
    config: &NormalizeConfig,
) -> Vec<CanonicalRecord> {
    sheet
        .rows
        .iter()
        .filter_map(|row| {
            let name = row.value(plan.name_column)?.trim();
            (!name.is_empty()).then_some((row, name))
        })
        .enumerate()
        .map(|(index, (row, name))| {
            let address = match &plan.address {
                AddressSource::Station(prefix) => format!("{}.{}", prefix, index),
                AddressSource::RegisterColumn(column) => {
                    register_address(column.and_then(|c| row.value(c)))
                }
                AddressSource::Virtual => "0".to_string(),
            };
            build_record(index, name, address, plan, config)
        })
        .collect()
}

fn build_record(
    index: usize,
    description: &str,
    address: String,
    plan: &RecordPlan,
    config: &NormalizeConfig,
) -> CanonicalRecord {
    use CanonicalField as F;

    let mut record = CanonicalRecord::default();
    let index_value = index as u64;

    record.set(F::PhysicalAddress, FieldValue::Text(address));
    record.set(F::Description, FieldValue::Text(description.to_string()));
    record.set(F::SequenceIndex, FieldValue::Integer(index_value));
    record.set(F::PointId, FieldValue::Number(index as f64));
    record.set(F::InternalPointId, FieldValue::Number(index as f64));
    record.set(
        F::SyntheticTag,
        FieldValue::Text(synthetic_tag(&plan.tag_prefix, index)),
    );
    record.set(F::NodeAlias, FieldValue::Text(config.node_alias.clone()));

    record.set(
        F::Virtual,
        FieldValue::Flag(matches!(plan.address, AddressSource::Virtual)),
    );
    for field in [F::Inverted, F::EventStart, F::RemoteControl] {
        record.set(field, FieldValue::Flag(false));
    }
    for field in [
        F::Historian,
        F::Alarm,
        F::HostAlarm,
        F::RisingAlarm,
        F::FallingAlarm,
    ] {
        record.set(field, FieldValue::Flag(true));
    }

    if plan.signal_type.is_discrete() {
        record.set(
            F::FallingDescription,
            FieldValue::Text(config.falling_label.clone()),
        );
        record.set(
            F::RisingDescription,
            FieldValue::Text(config.rising_label.clone()),
        );
    }

    record
}

/// Synthetic identifier: prefix followed by the zero-padded index.
pub fn synthetic_tag(prefix: &str, index: usize) -> String {
    format!("{}{:0width$}", prefix, index, width = TAG_INDEX_WIDTH)
}

/// Normalize a register address cell: numeric values lose their fractional
/// suffix (`40011.0` -> `40011`), other text is kept as written, and a missing
/// cell becomes `0`.
pub fn register_address(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return "0".to_string();
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value.abs() < i64::MAX as f64 => {
            format!("{}", value.trunc() as i64)
        }
        _ => raw.to_string(),
    }
}
