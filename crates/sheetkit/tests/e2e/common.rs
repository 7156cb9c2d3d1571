//! Common utilities for E2E tests.

use std::path::PathBuf;

use sheetkit::{add_rows, create_workbook, CellValue, Record, SheetDefinition};
use tempfile::TempDir;

/// A temporary directory that is removed when dropped
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Build a record from (column, value) pairs
pub fn record(pairs: &[(&str, CellValue)]) -> Record {
    pairs.iter().cloned().collect()
}

/// Create `name` with an "Items" sheet [Name, Qty, Price] holding `rows`
/// data rows: `item{i}`, `i`, `i * 1.5`
pub fn items_workbook(fixture: &Fixture, name: &str, rows: usize) -> PathBuf {
    let path = fixture.path(name);
    create_workbook(
        &path,
        &[SheetDefinition::new("Items", &["Name", "Qty", "Price"])],
    )
    .unwrap();

    let records: Vec<Record> = (1..=rows)
        .map(|i| {
            record(&[
                ("Name", CellValue::string(format!("item{i}"))),
                ("Qty", CellValue::Number(i as f64)),
                ("Price", CellValue::Number(i as f64 * 1.5)),
            ])
        })
        .collect();
    if !records.is_empty() {
        add_rows(&path, None, &records).unwrap();
    }
    path
}
