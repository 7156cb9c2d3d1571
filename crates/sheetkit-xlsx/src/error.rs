//! Failures while decoding or encoding an OOXML package

use thiserror::Error;

pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

#[derive(Debug, Error)]
pub enum XlsxError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("zip container: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The package is readable but not a workbook we understand
    #[error("not a usable XLSX workbook: {0}")]
    InvalidFormat(String),

    /// A part named by the package relationships is absent
    #[error("package has no part {0}")]
    MissingPart(String),

    /// A value inside a part could not be interpreted
    #[error("malformed data: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] sheetkit_core::Error),
}
