//! Writing a [`Workbook`] as an `.xlsx` package
//!
//! Every part is streamed straight into its zip entry. Strings go inline
//! (`t="inlineStr"`), so no shared string table is written.

use std::fs::File;
use std::io::{self, BufWriter, Seek, Write};
use std::path::Path;

use chrono::{NaiveDateTime, Timelike};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::{styles_xml, DATETIME_XF, DATE_XF};
use crate::xml::{encode_escapes, escape, DOC_RELS_NS};
use sheetkit_core::date::datetime_to_serial;
use sheetkit_core::{CellAddress, CellValue, Workbook, Worksheet};

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const PACKAGE_RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const CONTENT_TYPE_PREFIX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml";

pub struct XlsxWriter;

impl XlsxWriter {
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let mut out = BufWriter::new(File::create(path)?);
        Self::write(workbook, &mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Encode `workbook`; it must hold at least one sheet
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        if workbook.is_empty() {
            return Err(XlsxError::InvalidFormat(
                "a workbook needs at least one sheet".into(),
            ));
        }
        let sheets = workbook.sheet_count();
        let date_1904 = workbook.settings().date_1904;

        let mut zip = ZipWriter::new(writer);
        add_part(&mut zip, "[Content_Types].xml", |out| content_types(out, sheets))?;
        add_part(&mut zip, "_rels/.rels", package_rels)?;
        add_part(&mut zip, "xl/workbook.xml", |out| workbook_part(out, workbook))?;
        add_part(&mut zip, "xl/_rels/workbook.xml.rels", |out| workbook_rels(out, sheets))?;
        add_part(&mut zip, "xl/styles.xml", |out| out.write_all(styles_xml().as_bytes()))?;
        for (index, sheet) in workbook.worksheets().enumerate() {
            let name = format!("xl/worksheets/sheet{}.xml", index + 1);
            add_part(&mut zip, &name, |out| worksheet_part(out, sheet, date_1904))?;
        }
        zip.finish()?;
        Ok(())
    }
}

fn add_part<W, F>(zip: &mut ZipWriter<W>, name: &str, body: F) -> XlsxResult<()>
where
    W: Write + Seek,
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    zip.start_file(name, SimpleFileOptions::default())?;
    body(zip)?;
    Ok(())
}

fn content_types(out: &mut dyn Write, sheets: usize) -> io::Result<()> {
    writeln!(out, "{}", DECLARATION)?;
    writeln!(out, r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#)?;
    writeln!(out, r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#)?;
    writeln!(out, r#"<Default Extension="xml" ContentType="application/xml"/>"#)?;
    writeln!(out, r#"<Override PartName="/xl/workbook.xml" ContentType="{}.sheet.main+xml"/>"#, CONTENT_TYPE_PREFIX)?;
    writeln!(out, r#"<Override PartName="/xl/styles.xml" ContentType="{}.styles+xml"/>"#, CONTENT_TYPE_PREFIX)?;
    for n in 1..=sheets {
        writeln!(
            out,
            r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="{}.worksheet+xml"/>"#,
            n, CONTENT_TYPE_PREFIX
        )?;
    }
    write!(out, "</Types>")
}

fn package_rels(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", DECLARATION)?;
    writeln!(out, r#"<Relationships xmlns="{}">"#, PACKAGE_RELS_NS)?;
    writeln!(
        out,
        r#"<Relationship Id="rId1" Type="{}/officeDocument" Target="xl/workbook.xml"/>"#,
        DOC_RELS_NS
    )?;
    write!(out, "</Relationships>")
}

fn workbook_part(out: &mut dyn Write, workbook: &Workbook) -> io::Result<()> {
    writeln!(out, "{}", DECLARATION)?;
    writeln!(out, r#"<workbook xmlns="{}" xmlns:r="{}">"#, MAIN_NS, DOC_RELS_NS)?;
    if workbook.settings().date_1904 {
        writeln!(out, r#"<workbookPr date1904="1"/>"#)?;
    }
    writeln!(out, "<sheets>")?;
    for (index, sheet) in workbook.worksheets().enumerate() {
        writeln!(
            out,
            r#"<sheet name="{}" sheetId="{id}" r:id="rId{id}"/>"#,
            escape(sheet.name()),
            id = index + 1
        )?;
    }
    write!(out, "</sheets>\n</workbook>")
}

/// Sheets take `rId1..=rIdN`; the stylesheet comes after them
fn workbook_rels(out: &mut dyn Write, sheets: usize) -> io::Result<()> {
    writeln!(out, "{}", DECLARATION)?;
    writeln!(out, r#"<Relationships xmlns="{}">"#, PACKAGE_RELS_NS)?;
    for n in 1..=sheets {
        writeln!(
            out,
            r#"<Relationship Id="rId{n}" Type="{}/worksheet" Target="worksheets/sheet{n}.xml"/>"#,
            DOC_RELS_NS,
            n = n
        )?;
    }
    writeln!(
        out,
        r#"<Relationship Id="rId{}" Type="{}/styles" Target="styles.xml"/>"#,
        sheets + 1,
        DOC_RELS_NS
    )?;
    write!(out, "</Relationships>")
}

/// The `<dimension>` always starts at A1 and ends at the used range's corner
fn dimension_ref(sheet: &Worksheet) -> String {
    match sheet.used_range() {
        Some(range) if range.end != CellAddress::new(0, 0) => format!("A1:{}", range.end),
        _ => "A1".to_string(),
    }
}

fn worksheet_part(out: &mut dyn Write, sheet: &Worksheet, date_1904: bool) -> io::Result<()> {
    writeln!(out, "{}", DECLARATION)?;
    writeln!(out, r#"<worksheet xmlns="{}" xmlns:r="{}">"#, MAIN_NS, DOC_RELS_NS)?;
    writeln!(out, r#"<dimension ref="{}"/>"#, dimension_ref(sheet))?;
    writeln!(out, "<sheetData>")?;

    let mut open_row = None;
    for (row, col, value) in sheet.iter_cells() {
        if open_row != Some(row) {
            if open_row.is_some() {
                writeln!(out, "</row>")?;
            }
            writeln!(out, r#"<row r="{}">"#, u64::from(row) + 1)?;
            open_row = Some(row);
        }
        write_cell(out, CellAddress::new(row, col), value, date_1904)?;
    }
    if open_row.is_some() {
        writeln!(out, "</row>")?;
    }
    write!(out, "</sheetData>\n</worksheet>")
}

fn date_style(at: &NaiveDateTime) -> u32 {
    if at.num_seconds_from_midnight() == 0 && at.nanosecond() == 0 {
        DATE_XF
    } else {
        DATETIME_XF
    }
}

fn write_cell(out: &mut dyn Write, at: CellAddress, value: &CellValue, date_1904: bool) -> io::Result<()> {
    match value {
        CellValue::Empty => Ok(()),
        CellValue::Number(n) if !n.is_finite() => {
            log::warn!("{} holds {}, which cannot be stored; leaving it blank", at, n);
            Ok(())
        }
        CellValue::Number(n) => writeln!(out, r#"<c r="{}"><v>{}</v></c>"#, at, n),
        CellValue::Boolean(flag) => writeln!(out, r#"<c r="{}" t="b"><v>{}</v></c>"#, at, u8::from(*flag)),
        CellValue::DateTime(moment) => writeln!(
            out,
            r#"<c r="{}" s="{}"><v>{}</v></c>"#,
            at,
            date_style(moment),
            datetime_to_serial(*moment, date_1904)
        ),
        CellValue::String(text) => {
            let padded = text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace);
            writeln!(
                out,
                r#"<c r="{}" t="inlineStr"><is><t{}>{}</t></is></c>"#,
                at,
                if padded { r#" xml:space="preserve""# } else { "" },
                escape(&encode_escapes(text))
            )
        }
    }
}
