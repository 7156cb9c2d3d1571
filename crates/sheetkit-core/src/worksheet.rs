//! A single named grid of cells

use crate::cell::{CellAddress, CellRange, CellStorage, CellValue};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// One sheet of a workbook
///
/// Alongside the cells it keeps a declared used range (`dimension`), which
/// both file formats store explicitly. The declared range may be wider than
/// the cells themselves, for instance when a file reserves trailing blank
/// rows.
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    cells: CellStorage,
    dimension: Option<CellRange>,
}

impl Worksheet {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
            dimension: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value at an A1 reference; blank cells read as [`CellValue::Empty`]
    pub fn get_value(&self, reference: &str) -> Result<CellValue> {
        let at = CellAddress::parse(reference)?;
        Ok(self.get_value_at(at.row, at.col))
    }

    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        match self.cells.get(row, col) {
            Some(value) => value.clone(),
            None => CellValue::Empty,
        }
    }

    pub fn set_cell_value<V: Into<CellValue>>(&mut self, reference: &str, value: V) -> Result<()> {
        let at = CellAddress::parse(reference)?;
        self.set_cell_value_at(at.row, at.col, value)
    }

    /// Store a value by zero-based position
    ///
    /// The declared range always grows to include the position, even for
    /// [`CellValue::Empty`].
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(u32::from(col), MAX_COLS - 1));
        }

        self.cells.set(row, col, value.into());
        let here = CellRange::single(CellAddress::new(row, col));
        self.dimension = Some(self.dimension.map_or(here, |dim| dim.union(&here)));
        Ok(())
    }

    /// Declared range merged with the extent of the stored cells
    pub fn used_range(&self) -> Option<CellRange> {
        let extent = self
            .cells
            .used_bounds()
            .map(|(top, left, bottom, right)| CellRange::from_indices(top, left, bottom, right));
        match (self.dimension, extent) {
            (Some(declared), Some(extent)) => Some(declared.union(&extent)),
            (declared, extent) => declared.or(extent),
        }
    }

    pub fn dimension(&self) -> Option<CellRange> {
        self.dimension
    }

    pub fn set_dimension(&mut self, range: Option<CellRange>) {
        self.dimension = range;
    }

    /// Non-empty cells, row by row
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellValue)> {
        self.cells.iter()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
