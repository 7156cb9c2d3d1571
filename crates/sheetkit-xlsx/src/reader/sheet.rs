//! Streaming a worksheet part into a [`Worksheet`]

use std::io::BufRead;

use chrono::{NaiveDate, NaiveDateTime};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::CellFormats;
use crate::xml::{attr, decode_escapes, flag, scan};
use sheetkit_core::date::serial_to_datetime;
use sheetkit_core::{CellAddress, CellRange, CellValue, SharedString, Worksheet};

/// Workbook-wide lookups every sheet needs
pub(super) struct SheetContext<'a> {
    pub strings: &'a [SharedString],
    pub formats: &'a CellFormats,
    pub date_1904: bool,
}

/// Fill `sheet` from the events of its part
///
/// A `<dimension>` is kept as the declared used range once the sheet holds
/// at least one cell.
pub(super) fn read_sheet<B: BufRead>(
    xml: &mut Reader<B>,
    sheet: &mut Worksheet,
    ctx: &SheetContext<'_>,
) -> XlsxResult<()> {
    let mut walker = SheetWalker {
        sheet,
        ctx,
        declared: None,
        row: 0,
        next_row: 0,
        next_col: 0,
        open_cell: None,
        capture: Capture::Off,
    };
    scan(xml, |event| walker.on_event(event))?;

    if let (Some(declared), Some(written)) = (walker.declared, walker.sheet.dimension()) {
        walker.sheet.set_dimension(Some(declared.union(&written)));
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq)]
enum Capture {
    Off,
    Value,
    InlineText,
}

/// Attributes and text of one `<c>` element
struct OpenCell {
    reference: Option<String>,
    kind: Option<String>,
    style: Option<u32>,
    text: Option<String>,
}

impl OpenCell {
    fn from_element(element: &BytesStart<'_>) -> Self {
        Self {
            reference: attr(element, b"r"),
            kind: attr(element, b"t"),
            style: attr(element, b"s").and_then(|s| s.parse().ok()),
            text: None,
        }
    }
}

struct SheetWalker<'w, 'c> {
    sheet: &'w mut Worksheet,
    ctx: &'c SheetContext<'c>,
    declared: Option<CellRange>,
    // cursor for rows and cells that omit their `r`
    row: u32,
    next_row: u32,
    next_col: u16,
    open_cell: Option<OpenCell>,
    capture: Capture,
}

impl SheetWalker<'_, '_> {
    fn on_event(&mut self, event: Event<'_>) -> XlsxResult<()> {
        match event {
            Event::Start(e) => self.on_open(&e, false),
            Event::Empty(e) => self.on_open(&e, true),
            Event::End(e) => match e.local_name().as_ref() {
                b"c" => self.close_cell(),
                b"v" | b"t" => {
                    self.capture = Capture::Off;
                    Ok(())
                }
                _ => Ok(()),
            },
            Event::Text(text) if self.capture != Capture::Off => {
                let text = text.unescape()?;
                if let Some(cell) = self.open_cell.as_mut() {
                    if self.capture == Capture::InlineText {
                        cell.kind = Some("inlineStr".to_string());
                    }
                    cell.text.get_or_insert_with(String::new).push_str(&text);
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn on_open(&mut self, e: &BytesStart<'_>, self_closing: bool) -> XlsxResult<()> {
        match e.local_name().as_ref() {
            b"dimension" => {
                self.declared = attr(e, b"ref").and_then(|r| CellRange::parse(&r).ok());
            }
            b"row" => {
                self.row = attr(e, b"r")
                    .and_then(|r| r.parse::<u32>().ok())
                    .map_or(self.next_row, |r| r.saturating_sub(1));
                self.next_row = self.row + 1;
                self.next_col = 0;
            }
            b"c" if self_closing => {
                // style-only cells still take up a column
                self.locate(&OpenCell::from_element(e))?;
            }
            b"c" => self.open_cell = Some(OpenCell::from_element(e)),
            b"v" if !self_closing && self.open_cell.is_some() => self.capture = Capture::Value,
            b"t" if !self_closing && self.open_cell.is_some() => {
                self.capture = Capture::InlineText;
            }
            _ => {}
        }
        Ok(())
    }

    fn locate(&mut self, cell: &OpenCell) -> XlsxResult<CellAddress> {
        let at = match cell.reference.as_deref() {
            Some(reference) => CellAddress::parse(reference).map_err(|err| {
                XlsxError::Parse(format!("cell reference '{}': {}", reference, err))
            })?,
            None => CellAddress::new(self.row, self.next_col),
        };
        self.next_col = at.col.saturating_add(1);
        Ok(at)
    }

    fn close_cell(&mut self) -> XlsxResult<()> {
        let Some(cell) = self.open_cell.take() else {
            return Ok(());
        };
        let at = self.locate(&cell)?;
        if let Some(value) = cell_value(&cell, at, self.ctx)? {
            self.sheet.set_cell_value_at(at.row, at.col, value)?;
        }
        Ok(())
    }
}

/// Interpret a finished cell; `None` when it carries nothing we keep
fn cell_value(
    cell: &OpenCell,
    at: CellAddress,
    ctx: &SheetContext<'_>,
) -> XlsxResult<Option<CellValue>> {
    let Some(text) = cell.text.as_deref() else {
        return Ok(None);
    };

    let value = match cell.kind.as_deref().unwrap_or("n") {
        "n" => match text.trim().parse::<f64>() {
            Ok(n) if ctx.formats.is_date(cell.style) => serial_to_datetime(n, ctx.date_1904)
                .map_or(CellValue::Number(n), CellValue::DateTime),
            Ok(n) => CellValue::Number(n),
            Err(_) => CellValue::string(text),
        },
        "s" => {
            let index: usize = text.trim().parse().map_err(|_| {
                XlsxError::Parse(format!("shared string index '{}' at {}", text, at))
            })?;
            match ctx.strings.get(index) {
                Some(shared) => CellValue::String(shared.clone()),
                None => {
                    log::warn!("{} refers to string {} past the end of the table", at, index);
                    return Ok(None);
                }
            }
        }
        "b" => CellValue::Boolean(flag(text)),
        "str" | "inlineStr" => CellValue::string(decode_escapes(text)),
        "d" => iso_datetime(text).map_or_else(|| CellValue::string(text), CellValue::DateTime),
        "e" => {
            log::debug!("dropping error value {} at {}", text, at);
            return Ok(None);
        }
        other => {
            log::warn!("{} has unknown type '{}', keeping its text", at, other);
            CellValue::string(text)
        }
    };
    Ok(Some(value))
}

/// Text of a `t="d"` cell: a date, or a date and time, with an optional `Z`
fn iso_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.strip_suffix('Z').unwrap_or(text);
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0))
}
