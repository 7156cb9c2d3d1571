//! File-level operations: each one opens the workbook, works on it and
//! (for edits) saves it once

use std::path::{Path, PathBuf};

use serde::Serialize;
use sheetkit_core::Worksheet;

use crate::append::{append_rows, AppendSummary};
use crate::create::SheetDefinition;
use crate::error::{Result, CREATE_HINT};
use crate::grid::Grid;
use crate::infer::{describe_columns, ColumnInfo};
use crate::io::{self, open_with_hint, resolve_path};
use crate::mutate::{write_cells, WriteOperation};
use crate::record::Record;
use crate::sheet::{resolve, resolve_mut};
use crate::view::{read_rows, ReadOptions, TableView};

/// Structure of one sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetInfo {
    pub name: String,
    /// Data rows, header excluded
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnInfo>,
}

impl SheetInfo {
    /// Summarise a sheet, sampling up to `sample_rows` rows per column
    pub fn from_sheet(sheet: &Worksheet, sample_rows: usize) -> Self {
        let grid = Grid::project(sheet);
        let columns = describe_columns(&grid, sample_rows);
        Self {
            name: sheet.name().to_string(),
            row_count: grid.data_row_count(),
            column_count: columns.len(),
            columns,
        }
    }
}

/// Structure of a whole workbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkbookInfo {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Sheets in workbook order
    pub sheets: Vec<SheetInfo>,
}

/// A freshly created workbook file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedWorkbook {
    /// Absolute path of the new file
    pub path: PathBuf,
    /// Sheet names in the order given
    pub sheets: Vec<String>,
}

/// Describe every sheet of a workbook
pub fn describe_workbook(path: &Path, sample_rows: usize) -> Result<WorkbookInfo> {
    let path = resolve_path(path)?;
    let workbook = io::open(&path)?;

    let sheets: Vec<SheetInfo> = workbook
        .worksheets()
        .map(|sheet| SheetInfo::from_sheet(sheet, sample_rows))
        .collect();
    log::debug!("described {} ({} sheet(s))", path.display(), sheets.len());

    Ok(WorkbookInfo { path, sheets })
}

/// Read data rows from one sheet
pub fn read_sheet(path: &Path, sheet: Option<&str>, options: &ReadOptions) -> Result<TableView> {
    let workbook = io::open(path)?;
    let view = read_rows(resolve(&workbook, sheet)?, options);
    log::debug!(
        "read {} of {} row(s) from {}",
        view.rows.len(),
        view.total_rows,
        path.display()
    );
    Ok(view)
}

/// Apply cell updates to one sheet and save the workbook
///
/// Nothing is saved unless every operation resolves.
pub fn write_to_sheet(
    path: &Path,
    sheet: Option<&str>,
    operations: &[WriteOperation],
) -> Result<usize> {
    let path = resolve_path(path)?;
    let mut workbook = open_with_hint(&path, CREATE_HINT)?;

    let updated = write_cells(resolve_mut(&mut workbook, sheet)?, operations)?;
    io::save(&workbook, &path)?;

    log::debug!("updated {} cell(s) in {}", updated, path.display());
    Ok(updated)
}

/// Append records to one sheet and save the workbook
pub fn add_rows(path: &Path, sheet: Option<&str>, rows: &[Record]) -> Result<AppendSummary> {
    let path = resolve_path(path)?;
    let mut workbook = open_with_hint(&path, CREATE_HINT)?;

    let summary = append_rows(resolve_mut(&mut workbook, sheet)?, rows)?;
    io::save(&workbook, &path)?;

    log::debug!(
        "appended {} row(s) to {}, now {} data row(s)",
        summary.added_rows,
        path.display(),
        summary.new_row_count
    );
    Ok(summary)
}

/// Create a new workbook with one header-only sheet per definition
pub fn create_workbook(path: &Path, sheets: &[SheetDefinition]) -> Result<CreatedWorkbook> {
    let (_, path) = io::create(path, sheets)?;
    log::debug!("created {} with {} sheet(s)", path.display(), sheets.len());

    Ok(CreatedWorkbook {
        path,
        sheets: sheets.iter().map(|def| def.name.clone()).collect(),
    })
}
