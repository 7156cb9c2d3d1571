//! A1-anchored view of a sheet's used range

use std::collections::BTreeMap;

use sheetkit_core::{CellValue, Worksheet};

use crate::json::cell_to_text;

static EMPTY: CellValue = CellValue::Empty;

/// Rows of raw cell values, row 0 being the header row
///
/// The grid starts at A1 and spans the sheet's effective used range.
/// Only stored cells are held; every other position reads as
/// [`CellValue::Empty`], so a declared range far larger than the data
/// costs nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: BTreeMap<(usize, usize), CellValue>,
}

impl Grid {
    /// Project a sheet into a grid
    pub fn project(sheet: &Worksheet) -> Self {
        let Some(range) = sheet.used_range() else {
            return Self::default();
        };
        Self {
            height: range.end.row as usize + 1,
            width: usize::from(range.end.col) + 1,
            cells: sheet
                .iter_cells()
                .map(|(row, col, value)| ((row as usize, usize::from(col)), value.clone()))
                .collect(),
        }
    }

    /// Number of rows including the header row
    pub fn row_count(&self) -> usize {
        self.height
    }

    /// Number of rows after the header row
    pub fn data_row_count(&self) -> usize {
        self.height.saturating_sub(1)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// A single cell; out-of-range positions read as empty
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.cells.get(&(row, col)).unwrap_or(&EMPTY)
    }

    /// Column names from the header row
    ///
    /// Blank header cells get `Column {n}` (1-indexed position).
    pub fn headers(&self) -> Vec<String> {
        (0..self.width)
            .map(|col| header_name(self.cell(0, col), col))
            .collect()
    }
}

/// Column name for a header cell at 0-based position `index`
pub fn header_name(value: &CellValue, index: usize) -> String {
    if value.is_blank() {
        format!("Column {}", index + 1)
    } else {
        cell_to_text(value)
    }
}
