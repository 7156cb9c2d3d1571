//! # sheetkit
//!
//! Spreadsheet tools for agents: inspect, read and edit `.xlsx` and `.xls`
//! workbooks through a small set of JSON-callable operations.
//!
//! Every sheet is treated as a table: row 1 holds the column names and
//! each later row is one record. Data rows are numbered from 1 and columns
//! are addressed by header name, ignoring case.
//!
//! ## Operations
//!
//! - [`describe_workbook`] - sheet names, row counts, columns and inferred types
//! - [`read_sheet`] - data rows as records, with row-range and column filters
//! - [`write_to_sheet`] - update cells by (data row, column name)
//! - [`add_rows`] - append records below the last row
//! - [`create_workbook`] - new file with header-only sheets
//!
//! The [`tools`] module wraps each operation as a [`Tool`] taking and
//! returning JSON.
//!
//! ## Example
//!
//! ```rust
//! use sheetkit::prelude::*;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("inventory.xlsx");
//!
//! create_workbook(&path, &[SheetDefinition::new("Items", &["Name", "Qty"])]).unwrap();
//!
//! let row: Record = [("name", CellValue::string("Bolt")), ("qty", CellValue::Number(40.0))]
//!     .into_iter()
//!     .collect();
//! add_rows(&path, None, &[row]).unwrap();
//!
//! write_to_sheet(&path, Some("Items"), &[WriteOperation::new(1, "Qty", 38.0)]).unwrap();
//!
//! let view = read_sheet(&path, None, &ReadOptions::default()).unwrap();
//! assert_eq!(view.headers, vec!["Name", "Qty"]);
//! assert_eq!(view.rows[0].get("Qty"), Some(&CellValue::Number(38.0)));
//! ```

pub mod append;
pub mod create;
pub mod error;
pub mod grid;
pub mod infer;
pub mod io;
pub mod json;
pub mod mutate;
pub mod ops;
pub mod prelude;
pub mod record;
pub mod sheet;
pub mod tools;
pub mod view;

pub use append::{append_rows, AppendSummary};
pub use create::{build_workbook, SheetDefinition};
pub use error::{Error, ErrorKind, Result};
pub use grid::Grid;
pub use infer::{infer_column_type, ColumnInfo, DEFAULT_TYPE_SAMPLE_ROWS};
pub use io::FileFormat;
pub use mutate::{write_cells, HeaderIndex, WriteOperation};
pub use ops::{
    add_rows, create_workbook, describe_workbook, read_sheet, write_to_sheet, CreatedWorkbook,
    SheetInfo, WorkbookInfo,
};
pub use record::Record;
pub use tools::{Tool, ToolConfig, ToolOutput, ToolRegistry};
pub use view::{read_rows, ReadOptions, TableView};

// Re-export core types
pub use sheetkit_core::{CellAddress, CellRange, CellValue, Workbook, Worksheet};

// Re-export codecs
pub use sheetkit_xls::{XlsError, XlsReader, XlsWriter};
pub use sheetkit_xlsx::{XlsxError, XlsxReader, XlsxWriter};

use std::path::Path;

/// Extension trait for Workbook to add file I/O
pub trait WorkbookExt: Sized {
    /// Open a workbook, recognising XLSX or XLS from the file contents
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;

    /// Save the workbook, as XLS for a `.xls` path and XLSX otherwise
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook> {
        io::open(path.as_ref())
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        io::save(self, path.as_ref())
    }
}
