//! Reading `.xlsx` packages into a [`Workbook`]
//!
//! Only the parts that carry cell values are consulted: the workbook part
//! and its relationships, the shared string table, the stylesheet and each
//! worksheet.

mod sheet;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::{read_styles_xml, CellFormats};
use crate::xml::{
    attr, bound_prefixes, decode_escapes, flag, prefixed_attr, scan, DOC_RELS_NS,
};
use sheetkit_core::{SharedString, Workbook, Worksheet};

use self::sheet::SheetContext;

const CONTENT_TYPES: &str = "[Content_Types].xml";
const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS: &str = "xl/sharedStrings.xml";
const STYLES: &str = "xl/styles.xml";

pub struct XlsxReader;

impl XlsxReader {
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        Self::read(BufReader::new(File::open(path)?))
    }

    /// Decode a package from any seekable byte source
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut package = Package {
            archive: ZipArchive::new(reader)?,
        };
        if !package.contains(CONTENT_TYPES) {
            return Err(XlsxError::InvalidFormat(format!(
                "zip archive has no {}",
                CONTENT_TYPES
            )));
        }

        let strings = match package.part(SHARED_STRINGS)? {
            Some(mut xml) => shared_strings(&mut xml)?,
            None => Vec::new(),
        };
        let formats = match package.part(STYLES)? {
            Some(mut xml) => read_styles_xml(&mut xml)?,
            None => CellFormats::default(),
        };
        let listing = sheet_listing(&mut package.required(WORKBOOK_PART)?)?;
        let targets = worksheet_targets(&mut package.required(WORKBOOK_RELS)?)?;

        let mut workbook = Workbook::empty();
        workbook.settings_mut().date_1904 = listing.date_1904;
        let ctx = SheetContext {
            strings: &strings,
            formats: &formats,
            date_1904: listing.date_1904,
        };

        for (name, rel_id) in listing.sheets {
            let Some(target) = targets.get(&rel_id) else {
                log::warn!("sheet '{}' points at missing relationship {}", name, rel_id);
                continue;
            };
            let mut worksheet = Worksheet::new(name);
            sheet::read_sheet(&mut package.required(target)?, &mut worksheet, &ctx)?;
            workbook.add_existing_worksheet(worksheet)?;
        }
        log::trace!("read {} sheet(s) from package", workbook.sheet_count());
        Ok(workbook)
    }
}

struct Package<R> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> Package<R> {
    fn contains(&self, name: &str) -> bool {
        self.archive.file_names().any(|entry| entry == name)
    }

    fn part(&mut self, name: &str) -> XlsxResult<Option<Reader<BufReader<impl Read + '_>>>> {
        match self.archive.by_name(name) {
            Ok(entry) => Ok(Some(Reader::from_reader(BufReader::new(entry)))),
            Err(ZipError::FileNotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn required(&mut self, name: &str) -> XlsxResult<Reader<BufReader<impl Read + '_>>> {
        self.part(name)?
            .ok_or_else(|| XlsxError::MissingPart(name.to_string()))
    }
}

/// The string table, one entry per `<si>`
///
/// Rich text runs are joined. Phonetic guides (`<rPh>`) are left out.
fn shared_strings<B: BufRead>(xml: &mut Reader<B>) -> XlsxResult<Vec<SharedString>> {
    let mut table = Vec::new();
    let mut item: Option<String> = None;
    let mut phonetic = false;
    let mut in_text = false;

    scan(xml, |event| {
        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => item = Some(String::new()),
                b"rPh" => phonetic = true,
                b"t" => in_text = item.is_some() && !phonetic,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => {
                table.push(SharedString::new(""));
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => {
                    if let Some(text) = item.take() {
                        table.push(SharedString::new(decode_escapes(&text)));
                    }
                }
                b"rPh" => phonetic = false,
                b"t" => in_text = false,
                _ => {}
            },
            Event::Text(text) if in_text => {
                if let Some(item) = item.as_mut() {
                    item.push_str(&text.unescape()?);
                }
            }
            _ => {}
        }
        Ok(())
    })?;

    Ok(table)
}

struct SheetListing {
    /// `(name, relationship id)` in tab order
    sheets: Vec<(String, String)>,
    date_1904: bool,
}

fn sheet_listing<B: BufRead>(xml: &mut Reader<B>) -> XlsxResult<SheetListing> {
    let mut listing = SheetListing {
        sheets: Vec::new(),
        date_1904: false,
    };
    // prefixes may be declared on `<workbook>` or on any element below it
    let mut rel_prefixes: Vec<Vec<u8>> = Vec::new();
    scan(xml, |event| {
        if let Event::Start(e) | Event::Empty(e) = event {
            rel_prefixes.extend(bound_prefixes(&e, DOC_RELS_NS));
            match e.local_name().as_ref() {
                b"sheet" => {
                    let id = prefixed_attr(&e, &rel_prefixes, b"id");
                    match (attr(&e, b"name"), id) {
                        (Some(name), Some(id)) => listing.sheets.push((name, id)),
                        (name, _) => {
                            log::warn!("skipping <sheet> {:?} without a relationship id", name)
                        }
                    }
                }
                b"workbookPr" => {
                    listing.date_1904 = attr(&e, b"date1904").is_some_and(|v| flag(&v));
                }
                _ => {}
            }
        }
        Ok(())
    })?;
    Ok(listing)
}

/// Worksheet relationship ids mapped to archive paths
fn worksheet_targets<B: BufRead>(xml: &mut Reader<B>) -> XlsxResult<HashMap<String, String>> {
    let mut targets = HashMap::new();
    scan(xml, |event| {
        let (Event::Start(e) | Event::Empty(e)) = event else {
            return Ok(());
        };
        if e.local_name().as_ref() != b"Relationship" {
            return Ok(());
        }
        let is_sheet = attr(&e, b"Type").is_some_and(|kind| kind.ends_with("/worksheet"));
        if let (true, Some(id), Some(target)) = (is_sheet, attr(&e, b"Id"), attr(&e, b"Target")) {
            // targets are relative to xl/ unless rooted
            let path = match target.strip_prefix('/') {
                Some(rooted) => rooted.to_string(),
                None => format!("xl/{}", target),
            };
            targets.insert(id, path);
        }
        Ok(())
    })?;
    Ok(targets)
}
