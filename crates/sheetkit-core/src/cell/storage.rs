//! Sparse cell storage

use std::collections::BTreeMap;

use super::CellValue;

/// Non-empty cells keyed by `(row, col)`
///
/// Tuple ordering makes every walk row-major, which is the order both
/// codecs emit rows in.
#[derive(Debug, Clone, Default)]
pub struct CellStorage {
    cells: BTreeMap<(u32, u16), CellValue>,
}

impl CellStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    /// Store a value; [`CellValue::Empty`] deletes the cell instead
    pub fn set(&mut self, row: u32, col: u16, value: CellValue) {
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding box of the stored cells as `(top, left, bottom, right)`
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        let (&(top, _), _) = self.cells.first_key_value()?;
        let (&(bottom, _), _) = self.cells.last_key_value()?;
        let (left, right) = self
            .cells
            .keys()
            .fold((u16::MAX, 0), |(lo, hi), &(_, col)| (lo.min(col), hi.max(col)));
        Some((top, left, bottom, right))
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellValue)> {
        self.cells.iter().map(|(&(row, col), value)| (row, col, value))
    }
}
