//! Workbook creation from sheet definitions

use serde::{Deserialize, Serialize};
use sheetkit_core::{Workbook, Worksheet};

use crate::error::{Error, Result};

/// A sheet to create: its name and header row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetDefinition {
    /// Sheet name
    pub name: String,
    /// Column headers, left to right
    pub columns: Vec<String>,
}

impl SheetDefinition {
    pub fn new<S: Into<String>>(name: S, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Build an in-memory workbook with one header-only sheet per definition
pub fn build_workbook(sheets: &[SheetDefinition]) -> Result<Workbook> {
    if sheets.is_empty() {
        return Err(Error::InvalidArgument(
            "at least one sheet definition is required".into(),
        ));
    }

    let mut workbook = Workbook::empty();
    for def in sheets {
        let mut sheet = Worksheet::new(def.name.as_str());
        for (col, header) in def.columns.iter().enumerate() {
            let col = u16::try_from(col).map_err(|_| {
                Error::InvalidArgument(format!("too many columns in sheet \"{}\"", def.name))
            })?;
            sheet.set_cell_value_at(0, col, header.as_str())?;
        }
        workbook.add_existing_worksheet(sheet)?;
    }
    Ok(workbook)
}
