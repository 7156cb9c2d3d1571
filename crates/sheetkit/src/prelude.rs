//! Everything needed to drive the operations or the tools from one import
//!
//! ```rust
//! use sheetkit::prelude::*;
//! ```

pub use crate::{
    add_rows, create_workbook, describe_workbook, read_sheet, write_to_sheet, CellValue, Error,
    ReadOptions, Record, Result, SheetDefinition, Tool, ToolConfig, ToolOutput, ToolRegistry,
    Workbook, WorkbookExt, Worksheet, WriteOperation,
};
