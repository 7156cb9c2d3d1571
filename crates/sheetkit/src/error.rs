//! Error types for the spreadsheet tools

use std::path::PathBuf;

use thiserror::Error;

/// Result type for sheetkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Appended to "file not found" messages of operations that need an existing workbook
pub(crate) const CREATE_HINT: &str = ". Use excel_create to create a new workbook.";

/// Errors raised by the spreadsheet operations and tools
#[derive(Debug, Error)]
pub enum Error {
    /// The path does not name an existing file
    #[error("File not found: {}{hint}", path.display())]
    NotFound { path: PathBuf, hint: &'static str },

    /// `create` was asked to overwrite an existing path
    #[error("File already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// No sheet with this name
    #[error("Sheet \"{name}\" not found. Available: {}", available.join(", "))]
    SheetNotFound { name: String, available: Vec<String> },

    /// No header with this name (case-insensitive)
    #[error("Column \"{column}\" not found. Available: {}", available.join(", "))]
    ColumnNotFound { column: String, available: Vec<String> },

    /// A parameter has an unusable value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Tool parameters did not match the tool's schema
    #[error("Invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    /// No tool registered under this name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The file is neither an XLSX (ZIP) nor an XLS (CFB) container
    #[error("Unsupported file format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document model error
    #[error(transparent)]
    Core(#[from] sheetkit_core::Error),

    /// XLSX codec error
    #[error(transparent)]
    Xlsx(#[from] sheetkit_xlsx::XlsxError),

    /// XLS codec error
    #[error(transparent)]
    Xls(#[from] sheetkit_xls::XlsError),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    SheetNotFound,
    ColumnNotFound,
    InvalidArgument,
    InvalidParams,
    UnknownTool,
    UnsupportedFormat,
    Io,
    /// Raised by the document model or a file codec
    Codec,
}

impl Error {
    /// Which kind of failure this is
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Error::SheetNotFound { .. } => ErrorKind::SheetNotFound,
            Error::ColumnNotFound { .. } => ErrorKind::ColumnNotFound,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::InvalidParams(_) => ErrorKind::InvalidParams,
            Error::UnknownTool(_) => ErrorKind::UnknownTool,
            Error::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Error::Io(_) => ErrorKind::Io,
            Error::Core(_) | Error::Xlsx(_) | Error::Xls(_) => ErrorKind::Codec,
        }
    }
}
