//! Per-sheet normalization and the workbook batch call.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::classify::{detect_format, resolve_signal_type, Detection};
use crate::config::NormalizeConfig;
use crate::model::{
    ColumnProfile, FormatVariant, RawSheet, SheetOutcome, SheetResult, SkipReason, Workbook,
};
use crate::transform::{build_records, fill_forward, filter_rows, split_blocks, RecordPlan};

/// Normalize every sheet of a workbook.
///
/// Sheets share no state and are processed in parallel; results come back in
/// workbook sheet order. A sheet that cannot be normalized yields a skipped
/// result and never affects the other sheets.
pub fn normalize_workbook(
    workbook: &Workbook,
    config: &NormalizeConfig,
    station_prefix: &str,
) -> Vec<SheetResult> {
    workbook
        .sheets
        .par_iter()
        .map(|sheet| normalize_sheet(sheet, config, station_prefix))
        .collect()
}

/// Normalize one sheet into canonical records, or explain why it was skipped.
pub fn normalize_sheet(
    sheet: &RawSheet,
    config: &NormalizeConfig,
    station_prefix: &str,
) -> SheetResult {
    let profile = ColumnProfile::from_labels(sheet.columns.as_slice());
    let variant = match detect_format(&profile, &sheet.name, config) {
        Detection::Administrative { keyword } => {
            info!("Sheet '{}': administrative, skipped", sheet.name);
            return SheetResult::skipped(sheet.name.clone(), SkipReason::Administrative { keyword });
        }
        Detection::Variant(FormatVariant::Unrecognized) => {
            let columns: Vec<String> = profile
                .normalized_labels()
                .into_iter()
                .map(str::to_string)
                .collect();
            warn!(
                "Sheet '{}': no matching layout; columns seen: [{}]",
                sheet.name,
                columns.join(", ")
            );
            return SheetResult::skipped(sheet.name.clone(), SkipReason::Unrecognized { columns });
        }
        Detection::Variant(variant) => variant,
    };
    info!("Sheet '{}': detected {}", sheet.name, variant);

    let mut filled = sheet.clone();
    fill_forward(&mut filled, &config.fill_columns);

    let (working, name_column, address_column) = match variant {
        FormatVariant::ParallelRegisterBlock => {
            let split = split_blocks(&filled, &config.split);
            debug!(
                "Sheet '{}': {} blocks, {} stacked rows",
                sheet.name,
                split.blocks.len(),
                split.sheet.rows.len()
            );
            (split.sheet, split.name_column, split.address_column)
        }
        _ => {
            let column_label = match variant {
                FormatVariant::LogicAlarmMap => &config.logic_name_column,
                _ => &config.hardwired_name_column,
            };
            match profile.position(column_label) {
                Some(position) => (filled, position, None),
                None => {
                    warn!(
                        "Sheet '{}': {} without required column '{}'",
                        sheet.name, variant, column_label
                    );
                    return SheetResult::skipped(
                        sheet.name.clone(),
                        SkipReason::MissingColumn {
                            variant,
                            column: column_label.clone(),
                        },
                    );
                }
            }
        }
    };

    let kept = filter_rows(&working, name_column, &config.exclusion_tokens);
    debug!(
        "Sheet '{}': kept {} of {} rows",
        sheet.name,
        kept.rows.len(),
        working.rows.len()
    );

    let signal_type = resolve_signal_type(&sheet.name, variant, config);
    let plan = RecordPlan::for_variant(
        variant,
        signal_type,
        name_column,
        address_column,
        station_prefix,
        config,
    );
    let records = build_records(&kept, &plan, config);

    let mut warnings = Vec::new();
    if records.is_empty() {
        warn!("Sheet '{}': no valid rows", sheet.name);
        warnings.push("no valid rows after filtering".to_string());
    }
    info!(
        "Sheet '{}': {} {} records",
        sheet.name,
        records.len(),
        signal_type
    );

    SheetResult {
        sheet_name: sheet.name.clone(),
        outcome: SheetOutcome::Normalized {
            variant,
            signal_type,
            records,
            warnings,
        },
    }
}
