//! The workbook: ordered, uniquely named worksheets

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// Ordered collection of worksheets
///
/// Names are unique ignoring case. Lookups by name are exact; the tool layer
/// does its own case-insensitive matching on top.
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: Vec<Worksheet>,
    settings: WorkbookSettings,
}

/// Flags stored once per file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkbookSettings {
    /// Serial numbers count from 1904-01-01 rather than 1899-12-30
    pub date_1904: bool,
}

impl Workbook {
    /// A workbook holding a single blank `Sheet1`
    pub fn new() -> Self {
        let mut workbook = Self::empty();
        workbook.sheets.push(Worksheet::new("Sheet1"));
        workbook
    }

    /// A workbook with no sheets, the starting point for readers
    pub fn empty() -> Self {
        Self {
            sheets: Vec::new(),
            settings: WorkbookSettings::default(),
        }
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.sheets.get(index)
    }

    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.sheets.get_mut(index)
    }

    /// Position of the sheet named exactly `name`
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|sheet| sheet.name() == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.worksheets().map(Worksheet::name).collect()
    }

    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.sheets.iter()
    }

    /// Append a blank sheet and return its index
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.add_existing_worksheet(Worksheet::new(name))
    }

    /// Append a populated sheet and return its index
    pub fn add_existing_worksheet(&mut self, sheet: Worksheet) -> Result<usize> {
        check_sheet_name(sheet.name())?;
        if self
            .sheets
            .iter()
            .any(|other| other.name().to_lowercase() == sheet.name().to_lowercase())
        {
            return Err(Error::DuplicateSheetName(sheet.name().to_string()));
        }
        self.sheets.push(sheet);
        Ok(self.sheets.len() - 1)
    }

    pub fn settings(&self) -> &WorkbookSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut WorkbookSettings {
        &mut self.settings
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

/// Names must be 1..=31 characters and avoid `: \ / ? * [ ]`
fn check_sheet_name(name: &str) -> Result<()> {
    let length = name.chars().count();
    if length == 0 {
        return Err(Error::InvalidSheetName("name is empty".into()));
    }
    if length > MAX_SHEET_NAME_LEN {
        return Err(Error::InvalidSheetName(format!(
            "'{}' is {} characters, the limit is {}",
            name, length, MAX_SHEET_NAME_LEN
        )));
    }
    match name.chars().find(|c| ":\\/?*[]".contains(*c)) {
        Some(bad) => Err(Error::InvalidSheetName(format!(
            "'{}' contains '{}'",
            name, bad
        ))),
        None => Ok(()),
    }
}
