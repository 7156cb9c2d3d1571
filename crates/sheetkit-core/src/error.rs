//! Errors raised by the document model

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("bad cell reference: {0}")]
    InvalidAddress(String),

    #[error("bad cell range: {0}")]
    InvalidRange(String),

    /// Zero-based row, then the largest allowed row
    #[error("row {0} is past the last row ({1})")]
    RowOutOfBounds(u32, u32),

    /// Zero-based column, then the largest allowed column
    #[error("column {0} is past the last column ({1})")]
    ColumnOutOfBounds(u32, u16),

    #[error("bad sheet name: {0}")]
    InvalidSheetName(String),

    /// Sheet names are compared ignoring case
    #[error("a sheet named '{0}' already exists")]
    DuplicateSheetName(String),
}
