//! Failures while decoding or encoding a BIFF8 workbook

use thiserror::Error;

pub type XlsResult<T> = std::result::Result<T, XlsError>;

#[derive(Debug, Error)]
pub enum XlsError {
    /// Includes compound-file errors, which `cfb` reports as I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Structure the format does not allow, in either direction
    #[error("not a usable XLS workbook: {0}")]
    InvalidFormat(String),

    /// A BIFF version other than 8
    #[error("unsupported BIFF version: {0}")]
    UnsupportedVersion(String),

    /// A record body shorter or stranger than its type requires
    #[error("malformed data: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] sheetkit_core::Error),
}
