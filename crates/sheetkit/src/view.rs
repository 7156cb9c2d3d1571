//! Row-range and column filtered reads

use std::collections::HashSet;

use sheetkit_core::Worksheet;

use crate::grid::Grid;
use crate::record::Record;

/// Which part of a sheet to read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// First data row (1-indexed, inclusive); defaults to 1
    pub start_row: Option<u32>,
    /// Last data row (1-indexed, inclusive); defaults to the last data row
    pub end_row: Option<u32>,
    /// Column names to keep (case-insensitive); defaults to all columns
    pub columns: Option<Vec<String>>,
}

impl ReadOptions {
    pub fn rows(start_row: u32, end_row: u32) -> Self {
        Self {
            start_row: Some(start_row),
            end_row: Some(end_row),
            columns: None,
        }
    }

    pub fn with_columns<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.columns = Some(columns.iter().map(|c| c.as_ref().to_string()).collect());
        self
    }
}

/// Result of [`read_rows`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    /// Retained column names, in workbook order
    pub headers: Vec<String>,
    /// One record per returned data row
    pub rows: Vec<Record>,
    /// Data rows in the sheet, before range filtering
    pub total_rows: usize,
}

/// Read data rows as records
///
/// The column filter keeps workbook header order whatever order the names
/// are given in; names matching no header are ignored. Rows outside the
/// sheet are silently skipped.
pub fn read_rows(sheet: &Worksheet, options: &ReadOptions) -> TableView {
    let grid = Grid::project(sheet);
    let all_headers = grid.headers();

    let wanted: Option<HashSet<String>> = options
        .columns
        .as_ref()
        .map(|columns| columns.iter().map(|c| c.to_lowercase()).collect());
    let kept: Vec<usize> = (0..all_headers.len())
        .filter(|&col| {
            wanted
                .as_ref()
                .map_or(true, |w| w.contains(&all_headers[col].to_lowercase()))
        })
        .collect();

    let total_rows = grid.data_row_count();
    let start = options.start_row.unwrap_or(1).max(1) as usize;
    let end = options
        .end_row
        .map_or(total_rows, |row| row as usize)
        .min(total_rows);

    let rows: Vec<Record> = (start..=end)
        .map(|row| {
            kept.iter()
                .map(|&col| (all_headers[col].clone(), grid.cell(row, col).clone()))
                .collect::<Record>()
        })
        .collect();

    TableView {
        headers: kept.iter().map(|&col| all_headers[col].clone()).collect(),
        rows,
        total_rows,
    }
}
