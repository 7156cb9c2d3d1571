//! Document model shared by the sheetkit codecs and tools
//!
//! A [`Workbook`] is an ordered list of [`Worksheet`]s, each a sparse grid
//! of [`CellValue`]s addressed by [`CellAddress`]. The [`date`] module maps
//! between calendar values and spreadsheet serial numbers.
//!
//! ```rust
//! use sheetkit_core::{CellValue, Workbook};
//!
//! let mut book = Workbook::new();
//! let sheet = book.worksheet_mut(0).unwrap();
//! sheet.set_cell_value("A1", "Part").unwrap();
//! sheet.set_cell_value("B1", "Stock").unwrap();
//! sheet.set_cell_value_at(1, 0, "Hinge").unwrap();
//! sheet.set_cell_value_at(1, 1, CellValue::Number(40.0)).unwrap();
//!
//! assert_eq!(sheet.used_range().unwrap().to_string(), "A1:B2");
//! ```

pub mod cell;
pub mod date;
pub mod error;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellRange, CellValue, SharedString};
pub use error::{Error, Result};
pub use workbook::{Workbook, WorkbookSettings};
pub use worksheet::Worksheet;

/// Rows per sheet in both file formats
pub const MAX_ROWS: u32 = 1_048_576;

/// Columns per sheet, `A` through `XFD`
pub const MAX_COLS: u16 = 16_384;

/// Sheet name length limit, in characters
pub const MAX_SHEET_NAME_LEN: usize = 31;
