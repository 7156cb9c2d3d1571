//! Cell updates addressed by data row and column name

use std::collections::HashMap;

use sheetkit_core::{CellValue, Worksheet};

use crate::error::{Error, Result};
use crate::grid::header_name;

/// Case-insensitive lookup from header name to column index
///
/// When two headers differ only in case (or repeat), the rightmost wins.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    headers: Vec<String>,
    by_name: HashMap<String, u16>,
}

impl HeaderIndex {
    pub fn new(headers: Vec<String>) -> Self {
        let by_name = headers
            .iter()
            .enumerate()
            .filter_map(|(col, name)| Some((name.to_lowercase(), u16::try_from(col).ok()?)))
            .collect();
        Self { headers, by_name }
    }

    /// Index of a sheet's current header row
    ///
    /// Only row 0 is looked at; the width is that of the used range.
    pub fn from_sheet(sheet: &Worksheet) -> Self {
        let width = sheet.used_range().map_or(0, |range| range.end.col + 1);
        Self::new(
            (0..width)
                .map(|col| header_name(&sheet.get_value_at(0, col), usize::from(col)))
                .collect(),
        )
    }

    /// Column index of a header name, ignoring case
    pub fn get(&self, name: &str) -> Option<u16> {
        self.by_name.get(&name.to_lowercase()).copied()
    }

    /// Header names in column order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// A single cell update
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOperation {
    /// Data row, 1-indexed (the header row is not a data row)
    pub row: u32,
    /// Header name, matched ignoring case
    pub column: String,
    /// New value; [`CellValue::Empty`] clears the cell
    pub value: CellValue,
}

impl WriteOperation {
    pub fn new<S: Into<String>, V: Into<CellValue>>(row: u32, column: S, value: V) -> Self {
        Self {
            row,
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Apply cell updates in order and return how many cells were written
///
/// Every operation is resolved before any cell changes, so a bad column
/// or row leaves the sheet untouched.
pub fn write_cells(sheet: &mut Worksheet, operations: &[WriteOperation]) -> Result<usize> {
    let index = HeaderIndex::from_sheet(sheet);

    let mut targets = Vec::with_capacity(operations.len());
    for op in operations {
        let col = index.get(&op.column).ok_or_else(|| Error::ColumnNotFound {
            column: op.column.clone(),
            available: index.headers().to_vec(),
        })?;
        if op.row == 0 {
            return Err(Error::InvalidArgument(format!(
                "row must be at least 1 (row 0 is the header), got 0 for column \"{}\"",
                op.column
            )));
        }
        targets.push((op.row, col, &op.value));
    }

    for (row, col, value) in targets {
        sheet.set_cell_value_at(row, col, value.clone())?;
    }
    Ok(operations.len())
}
