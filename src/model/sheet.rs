//! Workbook, sheet, row and cell types as read from the source spreadsheet.

use serde::{Deserialize, Serialize};

/// One spreadsheet cell: its text and the optional font colour used as a highlight marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Text content; `None` for an empty cell.
    pub value: Option<String>,
    /// Raw ARGB font colour (e.g. `FFFF0000`) when the cell has an explicit RGB font colour.
    pub font_color: Option<String>,
}

impl Cell {
    /// Create a cell holding text. Empty text yields an empty cell.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            value: if value.is_empty() { None } else { Some(value) },
            font_color: None,
        }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Attach a font colour.
    pub fn with_font_color(mut self, color: impl Into<String>) -> Self {
        self.font_color = Some(color.into());
        self
    }

    /// Check if the cell has no content (absent or whitespace only).
    pub fn is_blank(&self) -> bool {
        self.value.as_deref().is_none_or(|v| v.trim().is_empty())
    }

    /// Check if the font colour ends with the given RGB hex code.
    ///
    /// Only the last six hex characters are compared so that ARGB and RGB
    /// representations of the same colour match.
    pub fn has_font_rgb(&self, rgb: &str) -> bool {
        match &self.font_color {
            Some(color) if color.len() >= 6 && rgb.len() >= 6 => {
                let tail = &color.as_bytes()[color.len() - 6..];
                tail.eq_ignore_ascii_case(&rgb.as_bytes()[rgb.len() - 6..])
            }
            _ => false,
        }
    }
}

/// One data row of a sheet, positionally aligned with the sheet's columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
    /// Manual "use this row" annotation, derived from highlight colour.
    pub selected: bool,
}

impl Row {
    /// Create a row from cells.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            selected: false,
        }
    }

    /// Get the cell at a column position.
    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// Get the text at a column position, if present.
    pub fn value(&self, column: usize) -> Option<&str> {
        self.cells.get(column).and_then(|c| c.value.as_deref())
    }

    /// Check if the cell at a column position is blank (or out of range).
    pub fn is_blank(&self, column: usize) -> bool {
        self.cells.get(column).is_none_or(Cell::is_blank)
    }
}

/// A sheet as read from the workbook: header labels exactly as written, plus data rows.
///
/// Columns are positional because dual-block sheets repeat header labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl RawSheet {
    /// Create a sheet, padding or truncating every row to the column count.
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.cells.resize_with(width, Cell::empty);
                row
            })
            .collect();
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Build a sheet from plain strings. Empty strings become empty cells.
    pub fn from_strings(name: &str, columns: &[&str], rows: &[Vec<&str>]) -> Self {
        let columns = columns.iter().map(|c| c.to_string()).collect();
        let rows = rows
            .iter()
            .map(|r| Row::new(r.iter().map(|v| Cell::text(*v)).collect()))
            .collect();
        Self::new(name, columns, rows)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Check if the sheet has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check if every data cell in a column is blank.
    pub fn column_is_blank(&self, column: usize) -> bool {
        self.rows.iter().all(|row| row.is_blank(column))
    }

    /// Mark rows whose cell in `column` carries the given font colour as selected.
    ///
    /// Returns the number of selected rows.
    pub fn mark_selected(&mut self, column: usize, rgb: &str) -> usize {
        let mut count = 0;
        for row in &mut self.rows {
            row.selected = row.cell(column).is_some_and(|c| c.has_font_rgb(rgb));
            if row.selected {
                count += 1;
            }
        }
        count
    }

    /// Create a sheet with the same name and columns but different rows.
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows,
        }
    }
}

/// An ordered set of named sheets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<RawSheet>,
}

impl Workbook {
    /// Create a workbook from sheets.
    pub fn new(sheets: Vec<RawSheet>) -> Self {
        Self { sheets }
    }

    /// Find a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&RawSheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}
