//! Number formats in the workbook globals
//!
//! Only one question is asked of the XF table: does a cell's format show
//! its number as a date? That needs the FORMAT records (custom format
//! strings) and each XF record's format index.

use std::collections::HashMap;

use crate::biff::parser::read_u16;
use crate::biff::strings::read_unicode_string;
use crate::error::{XlsError, XlsResult};
use sheetkit_core::date::{is_builtin_date_format, is_date_format};

/// Number of style XFs preceding the first cell XF in written workbooks
pub(crate) const STYLE_XF_COUNT: u16 = 15;

/// Default cell XF
pub(crate) const GENERAL_XF: u16 = STYLE_XF_COUNT;

/// Cell XF for dates without a time part (built-in format 14, `m/d/yy`)
pub(crate) const DATE_XF: u16 = STYLE_XF_COUNT + 1;

/// Cell XF for dates with a time part (built-in format 22, `m/d/yy h:mm`)
pub(crate) const DATETIME_XF: u16 = STYLE_XF_COUNT + 2;

/// FORMAT and XF records collected from the globals substream
#[derive(Debug, Default)]
pub(crate) struct FormatTable {
    formats: HashMap<u16, String>,
    xf_formats: Vec<u16>,
}

impl FormatTable {
    /// Record a FORMAT record (0x041E): ifmt(2) + unicode string
    pub(crate) fn add_format(&mut self, data: &[u8]) -> XlsResult<()> {
        let mut off = 0;
        let ifmt = read_u16(data, &mut off)?;
        let code = read_unicode_string(data, &mut off)?;
        self.formats.insert(ifmt, code);
        Ok(())
    }

    /// Record an XF record (0x00E0): ifnt(2) + ifmt(2) + ...
    pub(crate) fn add_xf(&mut self, data: &[u8]) -> XlsResult<()> {
        if data.len() < 20 {
            return Err(XlsError::Parse(format!(
                "XF record too short: {} bytes (expected 20)",
                data.len()
            )));
        }
        let mut off = 2;
        self.xf_formats.push(read_u16(data, &mut off)?);
        Ok(())
    }

    /// Resolve which XF indices format numbers as dates
    pub(crate) fn date_xfs(&self) -> Vec<bool> {
        self.xf_formats
            .iter()
            .map(|ifmt| match self.formats.get(ifmt) {
                Some(code) => is_date_format(code),
                None => is_builtin_date_format(u32::from(*ifmt)),
            })
            .collect()
    }
}

/// Body of an XF record
///
/// Style XFs have the style flag set and parent 0xFFF; cell XFs point at
/// style XF 0.
pub(crate) fn xf_record(ifmt: u16, is_style: bool) -> [u8; 20] {
    let mut body = [0u8; 20];
    // ifnt 0
    body[2..4].copy_from_slice(&ifmt.to_le_bytes());
    let type_prot: u16 = if is_style { 0xFFF5 } else { 0x0001 };
    body[4..6].copy_from_slice(&type_prot.to_le_bytes());
    // Bottom-aligned
    body[6] = 0x20;
    // Style XFs mark every attribute group as unused; cell XFs mark the number format used
    body[9] = if is_style { 0xF4 } else { 0x04 };
    // Automatic pattern colours
    body[18..20].copy_from_slice(&0x20C0u16.to_le_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_record(ifmt: u16, code: &str) -> Vec<u8> {
        let mut data = ifmt.to_le_bytes().to_vec();
        data.extend_from_slice(&(code.len() as u16).to_le_bytes());
        data.push(0);
        data.extend_from_slice(code.as_bytes());
        data
    }

    #[test]
    fn test_builtin_and_custom_date_formats() {
        let mut table = FormatTable::default();
        table.add_format(&format_record(164, "yyyy-mm-dd")).unwrap();
        table.add_format(&format_record(165, "0.00%")).unwrap();

        for ifmt in [0u16, 14, 164, 165, 22] {
            table.add_xf(&xf_record(ifmt, false)).unwrap();
        }

        assert_eq!(table.date_xfs(), vec![false, true, true, false, true]);
    }

    #[test]
    fn test_short_xf_is_rejected() {
        let mut table = FormatTable::default();
        assert!(table.add_xf(&[0u8; 10]).is_err());
    }

    #[test]
    fn test_written_xf_layout() {
        let xf = xf_record(22, false);
        assert_eq!(u16::from_le_bytes([xf[2], xf[3]]), 22);
        assert_eq!(u16::from_le_bytes([xf[4], xf[5]]) & 0x0004, 0);

        let style = xf_record(0, true);
        assert_ne!(u16::from_le_bytes([style[4], style[5]]) & 0x0004, 0);
    }
}
