//! Workbook reader: cell values via calamine, highlight colours via the styles reader.

use calamine::{open_workbook_auto, Data, Range, Reader};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use super::styles::{read_font_colors, FontColorMap};
use crate::error::{ConvertError, Result};
use crate::model::{Cell, RawSheet, Row, Workbook};

/// Read every sheet of an `.xlsx`/`.xls` workbook, in workbook order.
///
/// The first row of each sheet's used range is the header row. Font colours
/// are attached for `.xlsx` packages only; if they cannot be read the workbook
/// still loads without highlight metadata.
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    if !path.exists() {
        return Err(ConvertError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| ConvertError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let names = workbook.sheet_names();
    if names.is_empty() {
        return Err(ConvertError::EmptyWorkbook {
            path: path.to_path_buf(),
        });
    }

    let colors = load_font_colors(path);

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| ConvertError::Workbook {
                path: path.to_path_buf(),
                message: format!("sheet '{}': {}", name, e),
            })?;
        let sheet = sheet_from_range(&name, &range, colors.get(&name));
        debug!(
            "Sheet '{}': {} columns, {} rows",
            sheet.name,
            sheet.width(),
            sheet.rows.len()
        );
        sheets.push(sheet);
    }

    info!("Read {} sheets from {}", sheets.len(), path.display());
    Ok(Workbook::new(sheets))
}

/// Read only the first sheet of a workbook.
pub fn read_first_sheet(path: &Path) -> Result<RawSheet> {
    read_workbook(path)?
        .sheets
        .into_iter()
        .next()
        .ok_or_else(|| ConvertError::EmptyWorkbook {
            path: path.to_path_buf(),
        })
}

fn load_font_colors(path: &Path) -> HashMap<String, FontColorMap> {
    let is_package = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "xlsx" | "xlsm"));
    if !is_package {
        debug!("{}: no font colour metadata for this format", path.display());
        return HashMap::new();
    }

    match read_font_colors(path) {
        Ok(colors) => colors,
        Err(e) => {
            warn!("{}: font colours unavailable: {}", path.display(), e);
            HashMap::new()
        }
    }
}

/// Convert a calamine range into a sheet.
///
/// Columns before the used range are kept as blank positional columns so that
/// column positions match the worksheet.
pub fn sheet_from_range(name: &str, range: &Range<Data>, colors: Option<&FontColorMap>) -> RawSheet {
    let Some((start_row, start_col)) = range.start() else {
        return RawSheet::new(name, Vec::new(), Vec::new());
    };
    let offset = start_col as usize;
    let width = offset + range.width();

    let mut rows = range.rows();
    let columns: Vec<String> = match rows.next() {
        Some(header) => (0..width)
            .map(|c| {
                c.checked_sub(offset)
                    .and_then(|i| header.get(i))
                    .and_then(cell_text)
                    .unwrap_or_default()
            })
            .collect(),
        None => Vec::new(),
    };

    let data_rows = rows
        .enumerate()
        .map(|(i, values)| {
            let sheet_row = start_row + 1 + i as u32;
            let cells = (0..width)
                .map(|c| {
                    let value = c
                        .checked_sub(offset)
                        .and_then(|i| values.get(i))
                        .and_then(cell_text);
                    let font_color = colors.and_then(|m| m.get(&(sheet_row, c as u32))).cloned();
                    Cell { value, font_color }
                })
                .collect();
            Row::new(cells)
        })
        .collect();

    RawSheet::new(name, columns, data_rows)
}

/// Coerce a cell value to text. Empty cells yield `None`.
pub fn cell_text(data: &Data) -> Option<String> {
    match data {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Float(f) => Some(format_number(*f)),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(format_number(dt.as_f64())),
        Data::Error(e) => Some(e.to_string()),
    }
}

/// Integral floats print without a fractional part: `40011.0` -> `40011`.
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
