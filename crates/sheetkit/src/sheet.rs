//! Sheet resolution by optional name

use sheetkit_core::{Workbook, Worksheet};

use crate::error::{Error, Result};

/// Name reported when the default (first) sheet is missing
const FIRST_SHEET: &str = "(first sheet)";

fn not_found(workbook: &Workbook, name: Option<&str>) -> Error {
    Error::SheetNotFound {
        name: name.unwrap_or(FIRST_SHEET).to_string(),
        available: workbook.sheet_names().into_iter().map(String::from).collect(),
    }
}

fn sheet_index(workbook: &Workbook, name: Option<&str>) -> Result<usize> {
    let index = match name {
        None if !workbook.is_empty() => Some(0),
        None => None,
        Some(name) => workbook.sheet_index(name),
    };
    index.ok_or_else(|| not_found(workbook, name))
}

/// Resolve a sheet: the first one when `name` is `None`, otherwise an exact
/// (case-sensitive) name match
pub fn resolve<'a>(workbook: &'a Workbook, name: Option<&str>) -> Result<&'a Worksheet> {
    let index = sheet_index(workbook, name)?;
    workbook
        .worksheet(index)
        .ok_or_else(|| not_found(workbook, name))
}

/// Mutable counterpart of [`resolve`]
pub fn resolve_mut<'a>(workbook: &'a mut Workbook, name: Option<&str>) -> Result<&'a mut Worksheet> {
    let index = sheet_index(workbook, name)?;
    match workbook.worksheet_mut(index) {
        Some(sheet) => Ok(sheet),
        None => Err(Error::SheetNotFound {
            name: name.unwrap_or(FIRST_SHEET).to_string(),
            available: Vec::new(),
        }),
    }
}
