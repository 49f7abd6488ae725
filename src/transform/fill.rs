//! Fill-forward reconstruction of merged grouping columns.

use crate::model::{ColumnProfile, RawSheet};

/// Replace empty cells of the target columns with the nearest preceding
/// non-empty value in row order.
///
/// Targets are matched by normalized label; absent targets are ignored. Cells
/// before the first non-empty value stay empty. Applying this twice gives the
/// same sheet as applying it once.
pub fn fill_forward(sheet: &mut RawSheet, targets: &[String]) {
    let profile = ColumnProfile::from_labels(sheet.columns.as_slice());

    for target in targets {
        for &column in profile.positions(target) {
            fill_column(sheet, column);
        }
    }
}

fn fill_column(sheet: &mut RawSheet, column: usize) {
    let mut last: Option<String> = None;
    for row in &mut sheet.rows {
        let Some(cell) = row.cells.get_mut(column) else {
            continue;
        };
        if cell.is_blank() {
            if let Some(value) = &last {
                cell.value = Some(value.clone());
            }
        } else {
            last = cell.value.clone();
        }
    }
}
