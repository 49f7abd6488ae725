//! Dual-block splitting for side-by-side PLC register maps.
//!
//! A parallel sheet holds two or more record blocks in disjoint column ranges
//! usually separated by blank spacer columns. Blocks are located from the data
//! (runs of non-blank columns), then from the repeated sequence-number label.
//! Fixed offsets are only used when neither finds two blocks.

use std::ops::Range;
use tracing::debug;

use crate::config::SplitConfig;
use crate::model::{normalize_label, Cell, RawSheet, Row};

/// A parallel sheet flattened into one row-major record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSheet {
    /// Block 1 rows followed by block 2 rows (and so on), using block 1's labels.
    pub sheet: RawSheet,
    /// Column ranges of the source blocks.
    pub blocks: Vec<Range<usize>>,
    /// Name column inside the unified sheet.
    pub name_column: usize,
    /// Register address column inside the unified sheet, if the block has one.
    pub address_column: Option<usize>,
}

/// Split a parallel sheet into its blocks and stack them vertically.
///
/// Later blocks are renamed to block 1's labels by position, not by label.
/// Rows with an empty name field are dropped.
pub fn split_blocks(sheet: &RawSheet, config: &SplitConfig) -> SplitSheet {
    let mut blocks = if config.detect_boundaries {
        detect_blocks(sheet)
    } else {
        Vec::new()
    };
    if blocks.len() < 2 {
        let labelled = label_blocks(sheet, &config.sequence_label);
        if labelled.len() >= 2 {
            blocks = labelled;
        }
    }
    if blocks.len() < 2 {
        let fixed = fixed_blocks(sheet.width(), config);
        if fixed.len() >= 2 || blocks.is_empty() {
            blocks = fixed;
        }
    }
    debug!("Sheet '{}': blocks {:?}", sheet.name, blocks);

    let Some(first) = blocks.first().cloned() else {
        return SplitSheet {
            sheet: sheet.with_rows(Vec::new()),
            blocks,
            name_column: 0,
            address_column: None,
        };
    };

    let width = first.len();
    let columns: Vec<String> = sheet.columns[first].to_vec();
    let name_column = resolve_name_column(&columns, config);
    let address_column = resolve_address_column(&columns, config);

    let mut rows = Vec::new();
    for block in &blocks {
        for row in &sheet.rows {
            let mut cells: Vec<Cell> = block
                .clone()
                .take(width)
                .map(|c| row.cell(c).cloned().unwrap_or_default())
                .collect();
            cells.resize_with(width, Cell::empty);
            let stacked = Row {
                cells,
                selected: row.selected,
            };
            if !stacked.is_blank(name_column) {
                rows.push(stacked);
            }
        }
    }

    SplitSheet {
        sheet: RawSheet::new(sheet.name.clone(), columns, rows),
        blocks,
        name_column,
        address_column,
    }
}

/// Find blocks as maximal runs of non-blank columns.
///
/// A column is blank when its header is empty and every data cell is empty.
pub fn detect_blocks(sheet: &RawSheet) -> Vec<Range<usize>> {
    let mut blocks = Vec::new();
    let mut start: Option<usize> = None;

    for column in 0..sheet.width() {
        let blank =
            normalize_label(&sheet.columns[column]).is_empty() && sheet.column_is_blank(column);
        match (blank, start) {
            (false, None) => start = Some(column),
            (true, Some(s)) => {
                blocks.push(s..column);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        blocks.push(s..sheet.width());
    }

    blocks
}

/// Blocks starting at each occurrence of `label`, each running up to the next.
///
/// Columns before the first occurrence belong to no block.
pub fn label_blocks(sheet: &RawSheet, label: &str) -> Vec<Range<usize>> {
    let label = normalize_label(label);
    if label.is_empty() {
        return Vec::new();
    }
    let starts: Vec<usize> = sheet
        .columns
        .iter()
        .enumerate()
        .filter(|(_, c)| normalize_label(c) == label)
        .map(|(i, _)| i)
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| start..starts.get(i + 1).copied().unwrap_or(sheet.width()))
        .collect()
}

/// Blocks at fixed offsets: `block_width` columns, then `spacer_width` skipped, repeated.
pub fn fixed_blocks(sheet_width: usize, config: &SplitConfig) -> Vec<Range<usize>> {
    let mut blocks = Vec::new();
    if config.block_width == 0 {
        return blocks;
    }
    let mut start = 0;
    while start < sheet_width {
        let end = (start + config.block_width).min(sheet_width);
        blocks.push(start..end);
        start = end + config.spacer_width;
    }
    blocks
}

fn resolve_name_column(columns: &[String], config: &SplitConfig) -> usize {
    let normalized: Vec<String> = columns.iter().map(|c| normalize_label(c)).collect();
    config
        .name_labels
        .iter()
        .find_map(|label| {
            let label = normalize_label(label);
            normalized.iter().position(|c| *c == label)
        })
        .unwrap_or_else(|| config.name_offset.min(columns.len().saturating_sub(1)))
}

fn resolve_address_column(columns: &[String], config: &SplitConfig) -> Option<usize> {
    let fragment = normalize_label(&config.address_fragment);
    let by_label = if fragment.is_empty() {
        None
    } else {
        columns
            .iter()
            .position(|c| normalize_label(c).contains(&fragment))
    };
    by_label.or_else(|| (config.address_offset < columns.len()).then_some(config.address_offset))
}
