//! Legacy `.xls` codec for the sheetkit document model
//!
//! The workbook is a BIFF8 record stream named `Workbook`, stored in a
//! Compound File Binary container. [`biff`] holds the record layer.

pub mod biff;
pub mod error;
pub mod reader;
pub mod writer;

mod styles;

pub use error::{XlsError, XlsResult};
pub use reader::XlsReader;
pub use writer::XlsWriter;
