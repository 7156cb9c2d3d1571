//! Appending records below a sheet's existing rows

use serde::Serialize;
use sheetkit_core::{CellRange, Worksheet, MAX_ROWS};

use crate::error::Result;
use crate::mutate::HeaderIndex;
use crate::record::Record;

/// Outcome of [`append_rows`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendSummary {
    /// Records given, including ones that matched no column
    pub added_rows: usize,
    /// Data rows in the sheet afterwards
    pub new_row_count: usize,
}

/// Append one row per record after the sheet's last row
///
/// Keys are matched against headers ignoring case; unmatched keys are
/// dropped. A record with no matching key still takes up a (blank) row.
/// The sheet's declared range is then reset to run from A1 to the last
/// appended row and last header column.
pub fn append_rows(sheet: &mut Worksheet, records: &[Record]) -> Result<AppendSummary> {
    let index = HeaderIndex::from_sheet(sheet);
    let mut next_row = sheet.used_range().map_or(0, |range| range.end.row as usize + 1);

    for record in records {
        let row = u32::try_from(next_row).unwrap_or(u32::MAX);
        if row >= MAX_ROWS {
            return Err(sheetkit_core::Error::RowOutOfBounds(row, MAX_ROWS - 1).into());
        }

        for (key, value) in record.iter() {
            match index.get(key) {
                Some(col) => sheet.set_cell_value_at(row, col, value.clone())?,
                None => log::debug!("append: ignoring unknown column \"{}\"", key),
            }
        }
        next_row += 1;
    }

    if next_row > 0 {
        let last_col = u16::try_from(index.len().saturating_sub(1)).unwrap_or(u16::MAX);
        // next_row - 1 was checked against MAX_ROWS above
        sheet.set_dimension(Some(CellRange::from_indices(
            0,
            0,
            (next_row - 1) as u32,
            last_col,
        )));
    }

    Ok(AppendSummary {
        added_rows: records.len(),
        new_row_count: next_row.saturating_sub(1),
    })
}
