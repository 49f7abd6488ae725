//! Input readers: workbooks, cell highlight colours and substitution rule files.

mod rules;
mod styles;
mod xlsx;

pub use rules::{load_rules, parse_rule_line, parse_rules};
pub use styles::{cell_style_indices, parse_cell_ref, read_font_colors, style_font_colors, FontColorMap};
pub use xlsx::{cell_text, read_first_sheet, read_workbook, sheet_from_range};
