//! Office Open XML (`.xlsx`) codec for the sheetkit document model
//!
//! Cell values only: text, numbers, booleans and dates. A numeric cell
//! whose style carries a date format is read as a date, and dates are
//! written back as serials with a built-in date style.

pub mod error;
pub mod reader;
pub mod writer;

mod styles;
mod xml;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;
