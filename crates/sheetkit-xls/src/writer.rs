//! XLS (BIFF8) writer.
//!
//! Builds a BIFF8 `Workbook` stream (globals substream followed by one
//! substream per worksheet) and wraps it in a Compound File Binary
//! container. Strings go through the shared string table, numbers are
//! written as NUMBER records and dates as serial numbers with a built-in
//! date format.

use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::Path;

use chrono::Timelike;

use crate::biff::records;
use crate::biff::strings::{encode_sst, write_short_string};
use crate::biff::write_record;
use crate::error::{XlsError, XlsResult};
use crate::styles::{xf_record, DATETIME_XF, DATE_XF, GENERAL_XF, STYLE_XF_COUNT};
use sheetkit_core::date::datetime_to_serial;
use sheetkit_core::{CellAddress, CellValue, Workbook, Worksheet};

/// Rows a BIFF8 sheet can hold
pub const MAX_XLS_ROWS: u32 = 65_536;

/// Columns a BIFF8 sheet can hold
pub const MAX_XLS_COLS: u16 = 256;

/// XLS file writer
pub struct XlsWriter;

/// Shared string table under construction
#[derive(Default)]
struct SharedStrings<'a> {
    strings: Vec<&'a str>,
    index: HashMap<&'a str, u32>,
    total_refs: u32,
}

impl<'a> SharedStrings<'a> {
    fn collect(workbook: &'a Workbook) -> Self {
        let mut sst = Self::default();
        for sheet in workbook.worksheets() {
            for (_, _, value) in sheet.iter_cells() {
                if let CellValue::String(s) = value {
                    sst.intern(s.as_str());
                }
            }
        }
        sst
    }

    fn intern(&mut self, s: &'a str) {
        self.total_refs = self.total_refs.saturating_add(1);
        if !self.index.contains_key(s) {
            self.index.insert(s, self.strings.len() as u32);
            self.strings.push(s);
        }
    }

    fn get(&self, s: &str) -> Option<u32> {
        self.index.get(s).copied()
    }
}

impl XlsWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsResult<()> {
        let bytes = Self::write_to_vec(workbook)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Write a workbook to any writer
    pub fn write<W: Write>(workbook: &Workbook, mut writer: W) -> XlsResult<()> {
        writer.write_all(&Self::write_to_vec(workbook)?)?;
        writer.flush()?;
        Ok(())
    }

    /// Encode a workbook as the bytes of an .xls file
    pub fn write_to_vec(workbook: &Workbook) -> XlsResult<Vec<u8>> {
        let stream = Self::workbook_stream(workbook)?;

        let mut compound = cfb::CompoundFile::create(Cursor::new(Vec::new()))?;
        {
            let mut out = compound.create_stream("/Workbook")?;
            out.write_all(&stream)?;
            out.flush()?;
        }
        compound.flush()?;
        Ok(compound.into_inner().into_inner())
    }

    /// Build the BIFF8 `Workbook` stream
    pub(crate) fn workbook_stream(workbook: &Workbook) -> XlsResult<Vec<u8>> {
        if workbook.is_empty() {
            return Err(XlsError::InvalidFormat(
                "A workbook must contain at least one sheet".into(),
            ));
        }

        let sst = SharedStrings::collect(workbook);
        let date_1904 = workbook.settings().date_1904;

        let substreams = workbook
            .worksheets()
            .enumerate()
            .map(|(i, sheet)| Self::sheet_substream(sheet, i == 0, &sst, date_1904))
            .collect::<XlsResult<Vec<_>>>()?;

        // BOUNDSHEET records hold absolute offsets, and their own size does
        // not depend on the offset values: lay out once to measure.
        let placeholder = vec![0u32; substreams.len()];
        let globals_len = Self::globals(workbook, &sst, &placeholder)?.len();

        let mut offsets = Vec::with_capacity(substreams.len());
        let mut position = globals_len;
        for substream in &substreams {
            let offset = u32::try_from(position).map_err(|_| {
                XlsError::InvalidFormat("workbook too large for the XLS format".into())
            })?;
            offsets.push(offset);
            position += substream.len();
        }

        let mut out = Self::globals(workbook, &sst, &offsets)?;
        debug_assert_eq!(out.len(), globals_len);
        for substream in substreams {
            out.extend_from_slice(&substream);
        }
        Ok(out)
    }

    fn bof(dt: u16) -> [u8; 16] {
        let mut body = [0u8; 16];
        body[0..2].copy_from_slice(&records::BIFF8_VERSION.to_le_bytes());
        body[2..4].copy_from_slice(&dt.to_le_bytes());
        body[4..6].copy_from_slice(&0x0DBBu16.to_le_bytes()); // build
        body[6..8].copy_from_slice(&0x07CCu16.to_le_bytes()); // year
        body[12..16].copy_from_slice(&0x0006u32.to_le_bytes()); // lowest BIFF version
        body
    }

    fn globals(workbook: &Workbook, sst: &SharedStrings<'_>, offsets: &[u32]) -> XlsResult<Vec<u8>> {
        let mut out = Vec::new();

        write_record(&mut out, records::BOF, &Self::bof(records::BOF_WORKBOOK_GLOBALS))?;
        write_record(&mut out, records::CODEPAGE, &1200u16.to_le_bytes())?;
        write_record(&mut out, records::WINDOW1, &Self::window1())?;
        let date_mode = u16::from(workbook.settings().date_1904);
        write_record(&mut out, records::DATEMODE, &date_mode.to_le_bytes())?;

        // Font index 4 is never referenced, but readers expect it to exist
        let font = Self::font("Arial")?;
        for _ in 0..5 {
            write_record(&mut out, records::FONT, &font)?;
        }

        for _ in 0..STYLE_XF_COUNT {
            write_record(&mut out, records::XF, &xf_record(0, true))?;
        }
        // GENERAL_XF, DATE_XF, DATETIME_XF
        for ifmt in [0u16, 14, 22] {
            write_record(&mut out, records::XF, &xf_record(ifmt, false))?;
        }

        // "Normal" built-in style on style XF 0
        write_record(&mut out, records::STYLE, &[0x00, 0x80, 0x00, 0xFF])?;

        for (sheet, offset) in workbook.worksheets().zip(offsets) {
            let mut body = offset.to_le_bytes().to_vec();
            body.push(0); // visible
            body.push(0); // worksheet
            write_short_string(&mut body, sheet.name())?;
            write_record(&mut out, records::BOUNDSHEET, &body)?;
        }

        for (i, body) in encode_sst(&sst.strings, sst.total_refs).iter().enumerate() {
            let record_type = if i == 0 { records::SST } else { records::CONTINUE };
            write_record(&mut out, record_type, body)?;
        }

        write_record(&mut out, records::EOF, &[])?;
        Ok(out)
    }

    fn window1() -> [u8; 18] {
        let mut body = [0u8; 18];
        body[4..6].copy_from_slice(&0x4000u16.to_le_bytes()); // width
        body[6..8].copy_from_slice(&0x2000u16.to_le_bytes()); // height
        body[8..10].copy_from_slice(&0x0038u16.to_le_bytes()); // scroll bars and tabs shown
        body[14..16].copy_from_slice(&1u16.to_le_bytes()); // one selected tab
        body[16..18].copy_from_slice(&0x0258u16.to_le_bytes()); // tab bar ratio
        body
    }

    /// FONT: height(2) + flags(2) + colour(2) + weight(2) + escapement(2) + underline, family, charset, reserved + name
    fn font(name: &str) -> XlsResult<Vec<u8>> {
        let mut body = Vec::with_capacity(16 + 2 * name.len());
        body.extend_from_slice(&200u16.to_le_bytes()); // 10pt in twips
        body.extend_from_slice(&0u16.to_le_bytes());
        body.extend_from_slice(&0x7FFFu16.to_le_bytes()); // automatic colour
        body.extend_from_slice(&400u16.to_le_bytes()); // normal weight
        body.extend_from_slice(&0u16.to_le_bytes());
        body.extend_from_slice(&[0, 0, 0, 0]);
        write_short_string(&mut body, name)?;
        Ok(body)
    }

    fn sheet_substream(
        sheet: &Worksheet,
        selected: bool,
        sst: &SharedStrings<'_>,
        date_1904: bool,
    ) -> XlsResult<Vec<u8>> {
        let mut out = Vec::new();
        write_record(&mut out, records::BOF, &Self::bof(records::BOF_WORKSHEET))?;
        write_record(&mut out, records::DIMENSION, &Self::dimension(sheet))?;

        for (row, col, value) in sheet.iter_cells() {
            if row >= MAX_XLS_ROWS || col >= MAX_XLS_COLS {
                return Err(XlsError::InvalidFormat(format!(
                    "cell {} in sheet {:?} is outside the XLS grid ({} rows x {} columns)",
                    CellAddress::new(row, col),
                    sheet.name(),
                    MAX_XLS_ROWS,
                    MAX_XLS_COLS
                )));
            }
            Self::write_cell(&mut out, row as u16, col, value, sst, date_1904)?;
        }

        let mut window2 = [0u8; 18];
        let flags: u16 = if selected { 0x06B6 } else { 0x04B6 };
        window2[0..2].copy_from_slice(&flags.to_le_bytes());
        window2[6..8].copy_from_slice(&0x0040u16.to_le_bytes()); // automatic gridline colour
        write_record(&mut out, records::WINDOW2, &window2)?;

        write_record(&mut out, records::EOF, &[])?;
        Ok(out)
    }

    /// DIMENSION body; last row and column are stored one past the end
    fn dimension(sheet: &Worksheet) -> [u8; 14] {
        let mut body = [0u8; 14];
        if let Some(range) = sheet.used_range() {
            let row_end = (range.end.row + 1).min(MAX_XLS_ROWS);
            let col_end = (range.end.col + 1).min(MAX_XLS_COLS);
            body[0..4].copy_from_slice(&range.start.row.min(row_end).to_le_bytes());
            body[4..8].copy_from_slice(&row_end.to_le_bytes());
            body[8..10].copy_from_slice(&range.start.col.min(col_end).to_le_bytes());
            body[10..12].copy_from_slice(&col_end.to_le_bytes());
        }
        body
    }

    fn write_cell(
        out: &mut Vec<u8>,
        row: u16,
        col: u16,
        value: &CellValue,
        sst: &SharedStrings<'_>,
        date_1904: bool,
    ) -> XlsResult<()> {
        let header = |xf: u16| {
            let mut body = Vec::with_capacity(14);
            body.extend_from_slice(&row.to_le_bytes());
            body.extend_from_slice(&col.to_le_bytes());
            body.extend_from_slice(&xf.to_le_bytes());
            body
        };

        match value {
            CellValue::String(s) => {
                let index = sst.get(s.as_str()).ok_or_else(|| {
                    XlsError::InvalidFormat(format!("string missing from SST: {s}"))
                })?;
                let mut body = header(GENERAL_XF);
                body.extend_from_slice(&index.to_le_bytes());
                write_record(out, records::LABELSST, &body)
            }
            CellValue::Number(n) if n.is_finite() => {
                let mut body = header(GENERAL_XF);
                body.extend_from_slice(&n.to_le_bytes());
                write_record(out, records::NUMBER, &body)
            }
            CellValue::Number(n) => {
                log::warn!("skipping non-finite number {} at ({}, {})", n, row, col);
                Ok(())
            }
            CellValue::Boolean(b) => {
                let mut body = header(GENERAL_XF);
                body.push(u8::from(*b));
                body.push(0);
                write_record(out, records::BOOLERR, &body)
            }
            CellValue::DateTime(dt) => {
                let xf = if dt.num_seconds_from_midnight() == 0 && dt.nanosecond() == 0 {
                    DATE_XF
                } else {
                    DATETIME_XF
                };
                let mut body = header(xf);
                body.extend_from_slice(&datetime_to_serial(*dt, date_1904).to_le_bytes());
                write_record(out, records::NUMBER, &body)
            }
            CellValue::Empty => Ok(()),
        }
    }
}
