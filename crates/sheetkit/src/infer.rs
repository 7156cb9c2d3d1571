//! Column type inference from sampled data rows

use serde::Serialize;

use crate::grid::Grid;

/// Data rows sampled per column unless configured otherwise
pub const DEFAULT_TYPE_SAMPLE_ROWS: usize = 20;

/// Label for a column with no sampled values
pub const UNKNOWN_TYPE: &str = "unknown";

/// A column's name and inferred type label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
}

/// Infer the type label of column `col`
///
/// Samples data rows `1..=min(sample_rows, data rows)`, skipping empty
/// cells and empty strings. One observed kind gives its label
/// (`date`, `number`, `boolean`, `string`); several are joined with `" | "`
/// in the order first seen; none gives `unknown`.
pub fn infer_column_type(grid: &Grid, col: usize, sample_rows: usize) -> String {
    let sample = sample_rows.min(grid.data_row_count());
    let mut kinds: Vec<&'static str> = Vec::new();

    for row in 1..=sample {
        let value = grid.cell(row, col);
        if value.is_blank() {
            continue;
        }
        let kind = value.type_name();
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    if kinds.is_empty() {
        UNKNOWN_TYPE.to_string()
    } else {
        kinds.join(" | ")
    }
}

/// Name and inferred type of every grid column
pub fn describe_columns(grid: &Grid, sample_rows: usize) -> Vec<ColumnInfo> {
    grid.headers()
        .into_iter()
        .enumerate()
        .map(|(col, name)| ColumnInfo {
            name,
            column_type: infer_column_type(grid, col, sample_rows),
        })
        .collect()
}
