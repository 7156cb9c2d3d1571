//! Reading `.xls` workbooks
//!
//! The globals substream comes first and names every sheet together with the
//! stream position of its own BOF. Cell values are all that is kept:
//! formulas contribute their cached result, error cells read as empty.

mod sheet;

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use sheetkit_core::{SharedString, Workbook, Worksheet};

use crate::biff::parser::{read_u16, read_u32, read_u8};
use crate::biff::records;
use crate::biff::strings::{parse_sst, read_short_string};
use crate::biff::{self, BiffRecord};
use crate::error::{XlsError, XlsResult};
use crate::styles::FormatTable;
use sheet::{read_sheet, SheetContext};

/// BIFF5 writers call the stream `Book`; those files fail the version check
const STREAM_NAMES: [&str; 2] = ["/Workbook", "/Book"];

const KIND_WORKSHEET: u8 = 0;

pub struct XlsReader;

impl XlsReader {
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsResult<Workbook> {
        Self::read(std::fs::File::open(path)?)
    }

    /// Read a workbook from a compound file held by any seekable source
    pub fn read<R: Read + Seek>(source: R) -> XlsResult<Workbook> {
        let mut container = cfb::CompoundFile::open(source)?;
        let name = STREAM_NAMES
            .into_iter()
            .find(|name| container.exists(name))
            .ok_or_else(|| XlsError::InvalidFormat("compound file has no Workbook stream".into()))?;

        let mut bytes = Vec::new();
        container.open_stream(name)?.read_to_end(&mut bytes)?;
        build(&biff::read_all_records(&mut Cursor::new(bytes))?)
    }
}

/// A BOUNDSHEET entry
#[derive(Debug)]
struct BoundSheet {
    bof_at: u64,
    kind: u8,
    name: String,
}

impl BoundSheet {
    fn parse(body: &[u8]) -> XlsResult<Self> {
        let mut at = 0;
        let bof_at = u64::from(read_u32(body, &mut at)?);
        let _hidden = read_u8(body, &mut at)?;
        let kind = read_u8(body, &mut at)?;
        let name = read_short_string(body, &mut at)?;
        Ok(Self { bof_at, kind, name })
    }
}

/// What the globals substream tells us
#[derive(Default)]
struct Globals {
    strings: Vec<SharedString>,
    sheets: Vec<BoundSheet>,
    formats: FormatTable,
    date_1904: bool,
}

impl Globals {
    /// Walk the globals substream; returns them with the index of its EOF
    fn collect(all: &[BiffRecord]) -> XlsResult<(Self, usize)> {
        let first = all
            .first()
            .filter(|rec| rec.record_type == records::BOF)
            .ok_or_else(|| XlsError::InvalidFormat("stream does not open with a BOF".into()))?;
        check_globals_bof(&first.data)?;

        let mut globals = Self::default();
        for (index, rec) in all.iter().enumerate().skip(1) {
            if rec.record_type == records::EOF {
                return Ok((globals, index));
            }
            globals.absorb(rec)?;
        }
        Err(XlsError::InvalidFormat("workbook globals never end".into()))
    }

    fn absorb(&mut self, rec: &BiffRecord) -> XlsResult<()> {
        match rec.record_type {
            records::SST => {
                self.strings = parse_sst(&rec.data, &rec.continue_offsets)?
                    .into_iter()
                    .map(SharedString::from)
                    .collect();
            }
            records::BOUNDSHEET => self.sheets.push(BoundSheet::parse(&rec.data)?),
            records::DATEMODE => self.date_1904 = read_u16(&rec.data, &mut 0)? == 1,
            records::FORMAT => {
                if let Err(err) = self.formats.add_format(&rec.data) {
                    log::warn!("ignoring FORMAT record: {}", err);
                }
            }
            records::XF => {
                if let Err(err) = self.formats.add_xf(&rec.data) {
                    log::warn!("ignoring XF record: {}", err);
                    // a blank XF keeps the indices of later ones
                    self.formats.add_xf(&[0; 20])?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

fn check_globals_bof(body: &[u8]) -> XlsResult<()> {
    let (version, kind) = biff::parse_bof(body)?;
    if kind != records::BOF_WORKBOOK_GLOBALS {
        return Err(XlsError::InvalidFormat(format!(
            "first substream has type 0x{:04X}, not workbook globals",
            kind
        )));
    }
    if version != records::BIFF8_VERSION {
        return Err(XlsError::UnsupportedVersion(format!(
            "0x{:04X}, only BIFF8 (0x0600) is read",
            version
        )));
    }
    Ok(())
}

/// Top-level BOF..EOF substreams as (BOF position, records between)
///
/// Embedded substreams, such as charts on a worksheet, stay inside the
/// one that holds them.
fn substreams(all: &[BiffRecord]) -> Vec<(u64, &[BiffRecord])> {
    let mut found = Vec::new();
    let mut open: Option<usize> = None;
    let mut depth = 0u32;
    for (index, rec) in all.iter().enumerate() {
        match rec.record_type {
            records::BOF => {
                if depth == 0 {
                    open = Some(index);
                }
                depth += 1;
            }
            records::EOF if depth > 0 => {
                depth -= 1;
                if let (0, Some(start)) = (depth, open) {
                    found.push((all[start].stream_offset, &all[start + 1..index]));
                    open = None;
                }
            }
            _ => {}
        }
    }
    found
}

fn build(all: &[BiffRecord]) -> XlsResult<Workbook> {
    let (globals, globals_eof) = Globals::collect(all)?;
    let date_xfs = globals.formats.date_xfs();
    let ctx = SheetContext {
        strings: &globals.strings,
        date_xfs: &date_xfs,
        date_1904: globals.date_1904,
    };

    let mut book = Workbook::empty();
    book.settings_mut().date_1904 = globals.date_1904;

    let streams = substreams(&all[globals_eof + 1..]);
    for (position, entry) in globals.sheets.iter().enumerate() {
        if entry.kind != KIND_WORKSHEET {
            log::debug!("'{}' is not a worksheet, skipping it", entry.name);
            continue;
        }
        let mut sheet = Worksheet::new(entry.name.as_str());
        // fall back to document order when the recorded position is stale
        let body = streams
            .iter()
            .find(|(bof_at, _)| *bof_at == entry.bof_at)
            .or_else(|| streams.get(position))
            .map(|(_, body)| *body);
        match body {
            Some(body) => read_sheet(body, &mut sheet, &ctx)?,
            None => log::warn!("no cell records found for '{}'", entry.name),
        }
        book.add_existing_worksheet(sheet)?;
    }
    Ok(book)
}
