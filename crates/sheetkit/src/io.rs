//! Workbook I/O: opening, saving and creating workbook files
//!
//! The container is recognised from the file's leading bytes when opening
//! and chosen from the extension when saving.

use std::fs;
use std::io::Cursor;
use std::path::{Component, Path, PathBuf};

use sheetkit_core::Workbook;
use sheetkit_xls::{XlsReader, XlsWriter};
use sheetkit_xlsx::{XlsxReader, XlsxWriter};

use crate::create::{build_workbook, SheetDefinition};
use crate::error::{Error, Result};

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const CFB_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// On-disk spreadsheet container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Office Open XML (ZIP)
    Xlsx,
    /// BIFF8 inside a Compound File Binary container
    Xls,
}

impl FileFormat {
    /// Recognise a container from its first bytes
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(ZIP_MAGIC) {
            Some(FileFormat::Xlsx)
        } else if bytes.starts_with(CFB_MAGIC) {
            Some(FileFormat::Xls)
        } else {
            None
        }
    }

    /// Format written for a path: `.xls` (any case) is XLS, anything else XLSX
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xls") => FileFormat::Xls,
            _ => FileFormat::Xlsx,
        }
    }
}

/// Make a path absolute against the current directory and drop `.`/`..` components
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    Ok(resolved)
}

fn require_file(path: &Path, hint: &'static str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::NotFound {
            path: path.to_path_buf(),
            hint,
        })
    }
}

/// Open a workbook, decoding date-formatted numbers as dates
pub fn open(path: &Path) -> Result<Workbook> {
    open_with_hint(path, "")
}

/// Open a workbook; `hint` is appended to the message if the file is missing
pub(crate) fn open_with_hint(path: &Path, hint: &'static str) -> Result<Workbook> {
    let path = resolve_path(path)?;
    require_file(&path, hint)?;

    let bytes = fs::read(&path)?;
    let workbook = match FileFormat::detect(&bytes) {
        Some(FileFormat::Xlsx) => XlsxReader::read(Cursor::new(bytes))?,
        Some(FileFormat::Xls) => XlsReader::read(Cursor::new(bytes))?,
        None => return Err(Error::UnsupportedFormat { path }),
    };

    log::debug!(
        "opened {} ({} sheet(s))",
        path.display(),
        workbook.sheet_count()
    );
    Ok(workbook)
}

/// Save a workbook, replacing the file's contents
///
/// The format follows the extension; see [`FileFormat::for_path`].
pub fn save(workbook: &Workbook, path: &Path) -> Result<()> {
    match FileFormat::for_path(path) {
        FileFormat::Xls => XlsWriter::write_file(workbook, path)?,
        FileFormat::Xlsx => XlsxWriter::write_file(workbook, path)?,
    }
    log::debug!("saved {}", path.display());
    Ok(())
}

/// Create a new workbook file holding one header row per sheet
///
/// Fails if `path` exists. Missing parent directories are created.
/// Returns the workbook together with the absolute path it was saved to.
pub fn create(path: &Path, sheets: &[SheetDefinition]) -> Result<(Workbook, PathBuf)> {
    let path = resolve_path(path)?;
    if path.exists() {
        return Err(Error::AlreadyExists { path });
    }

    let workbook = build_workbook(sheets)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    save(&workbook, &path)?;
    Ok((workbook, path))
}
