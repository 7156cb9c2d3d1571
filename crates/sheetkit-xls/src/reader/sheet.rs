//! Cell records of one worksheet substream

use sheetkit_core::date::serial_to_datetime;
use sheetkit_core::{CellRange, CellValue, SharedString, Worksheet};

use crate::biff::parser::{read_8_bytes, read_f64, read_rk, read_u16, read_u32, read_u8, skip};
use crate::biff::records;
use crate::biff::strings::read_unicode_string;
use crate::biff::BiffRecord;
use crate::error::{XlsError, XlsResult};

/// Workbook-wide lookups cell records refer to
pub(super) struct SheetContext<'a> {
    pub strings: &'a [SharedString],
    pub date_xfs: &'a [bool],
    pub date_1904: bool,
}

impl SheetContext<'_> {
    fn number(&self, xf: u16, n: f64) -> CellValue {
        let dated = self.date_xfs.get(usize::from(xf)) == Some(&true);
        match dated.then(|| serial_to_datetime(n, self.date_1904)).flatten() {
            Some(when) => CellValue::DateTime(when),
            None => CellValue::Number(n),
        }
    }
}

/// Row, column and XF index that open every single-cell record
struct Anchor {
    row: u32,
    col: u16,
    xf: u16,
}

impl Anchor {
    fn read(body: &[u8], at: &mut usize) -> XlsResult<Self> {
        Ok(Self {
            row: u32::from(read_u16(body, at)?),
            col: read_u16(body, at)?,
            xf: read_u16(body, at)?,
        })
    }
}

/// How a FORMULA record's cached result turned out
enum Cached {
    Value(CellValue),
    /// Text arrives in the STRING record that follows
    Text,
    Nothing,
}

pub(super) fn read_sheet(
    body: &[BiffRecord],
    sheet: &mut Worksheet,
    ctx: &SheetContext<'_>,
) -> XlsResult<()> {
    let mut declared = None;
    let mut awaiting_text: Option<(u32, u16)> = None;

    for rec in body {
        let data = rec.data.as_slice();
        let awaiting = awaiting_text.take();
        let mut at = 0;
        match rec.record_type {
            records::DIMENSION => declared = dimension(data)?,
            records::MULRK => mulrk(data, sheet, ctx)?,
            records::STRING => {
                if let Some((row, col)) = awaiting {
                    let text = read_unicode_string(data, &mut at)?;
                    sheet.set_cell_value_at(row, col, text)?;
                }
            }
            records::FORMULA => {
                let cell = Anchor::read(data, &mut at)?;
                match cached_result(data, &mut at)? {
                    Cached::Value(value) => {
                        let value = match value {
                            CellValue::Number(n) => ctx.number(cell.xf, n),
                            other => other,
                        };
                        sheet.set_cell_value_at(cell.row, cell.col, value)?;
                    }
                    Cached::Text => awaiting_text = Some((cell.row, cell.col)),
                    Cached::Nothing => {}
                }
            }
            kind @ (records::LABELSST
            | records::LABEL
            | records::NUMBER
            | records::RK
            | records::BOOLERR) => {
                let cell = Anchor::read(data, &mut at)?;
                if let Some(value) = single_value(kind, data, &mut at, &cell, ctx)? {
                    sheet.set_cell_value_at(cell.row, cell.col, value)?;
                }
            }
            _ => {}
        }
    }

    if let (Some(declared), Some(written)) = (declared, sheet.dimension()) {
        sheet.set_dimension(Some(declared.union(&written)));
    }
    Ok(())
}

/// Value of a record that carries one cell after its [`Anchor`]
fn single_value(
    kind: u16,
    data: &[u8],
    at: &mut usize,
    cell: &Anchor,
    ctx: &SheetContext<'_>,
) -> XlsResult<Option<CellValue>> {
    let value = match kind {
        records::LABELSST => {
            let index = read_u32(data, at)? as usize;
            match ctx.strings.get(index) {
                Some(text) => CellValue::String(text.clone()),
                None => {
                    log::warn!(
                        "cell ({}, {}) names string {} of {}",
                        cell.row,
                        cell.col,
                        index,
                        ctx.strings.len()
                    );
                    return Ok(None);
                }
            }
        }
        records::LABEL => CellValue::from(read_unicode_string(data, at)?),
        records::NUMBER => ctx.number(cell.xf, read_f64(data, at)?),
        records::RK => ctx.number(cell.xf, read_rk(data, at)?),
        records::BOOLERR => {
            let raw = read_u8(data, at)?;
            if read_u8(data, at)? != 0 {
                log::debug!("error code {} at ({}, {}) read as empty", raw, cell.row, cell.col);
                return Ok(None);
            }
            CellValue::Boolean(raw != 0)
        }
        _ => return Ok(None),
    };
    Ok(Some(value))
}

/// The eight result bytes of a FORMULA record, then the options and
/// reserved fields; the parsed expression is ignored
fn cached_result(data: &[u8], at: &mut usize) -> XlsResult<Cached> {
    let raw = read_8_bytes(data, at)?;
    skip(data, at, 6)?;
    if raw[6..] != [0xFF, 0xFF] {
        return Ok(Cached::Value(CellValue::Number(f64::from_le_bytes(raw))));
    }
    Ok(match raw[0] {
        0x00 => Cached::Text,
        0x01 => Cached::Value(CellValue::Boolean(raw[2] != 0)),
        // errors and empty text
        _ => Cached::Nothing,
    })
}

/// MULRK: a row, the first column, then (xf, rk) pairs and the last column
fn mulrk(data: &[u8], sheet: &mut Worksheet, ctx: &SheetContext<'_>) -> XlsResult<()> {
    let pairs_end = data
        .len()
        .checked_sub(2)
        .filter(|&end| end >= 4)
        .ok_or_else(|| XlsError::Parse(format!("MULRK body of {} bytes", data.len())))?;
    let pairs = &data[..pairs_end];

    let mut at = 0;
    let row = u32::from(read_u16(pairs, &mut at)?);
    let mut col = read_u16(pairs, &mut at)?;
    while pairs.len() - at >= 6 {
        let xf = read_u16(pairs, &mut at)?;
        let n = read_rk(pairs, &mut at)?;
        sheet.set_cell_value_at(row, col, ctx.number(xf, n))?;
        col = col.saturating_add(1);
    }
    Ok(())
}

/// DIMENSION holds exclusive row and column ends; `None` when nothing is used
fn dimension(data: &[u8]) -> XlsResult<Option<CellRange>> {
    let mut at = 0;
    let first_row = read_u32(data, &mut at)?;
    let row_end = read_u32(data, &mut at)?;
    let first_col = read_u16(data, &mut at)?;
    let col_end = read_u16(data, &mut at)?;
    Ok((row_end > first_row && col_end > first_col)
        .then(|| CellRange::from_indices(first_row, first_col, row_end - 1, col_end - 1)))
}
