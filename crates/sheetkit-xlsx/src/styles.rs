//! The parts of `xl/styles.xml` that decide whether a number is a date
//!
//! Nothing else about styling survives a round trip. The writer always emits
//! the same small stylesheet.

use std::collections::HashMap;
use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::XlsxResult;
use crate::xml::{attr, scan};
use sheetkit_core::date::{is_builtin_date_format, is_date_format};

/// `cellXfs` slot written for plain dates (built-in format 14)
pub(crate) const DATE_XF: u32 = 1;

/// `cellXfs` slot written for dates with a time of day (built-in format 22)
pub(crate) const DATETIME_XF: u32 = 2;

/// One flag per `cellXfs` entry: does it show numbers as dates
#[derive(Debug, Default)]
pub(crate) struct CellFormats {
    date_xfs: Vec<bool>,
}

impl CellFormats {
    /// `xf` is a cell's `s` attribute; cells without one use the default format
    pub(crate) fn is_date(&self, xf: Option<u32>) -> bool {
        match xf {
            Some(index) => self.date_xfs.get(index as usize) == Some(&true),
            None => false,
        }
    }
}

/// Collect `numFmts` and `cellXfs` from a stylesheet
pub(crate) fn read_styles_xml<B: BufRead>(xml: &mut Reader<B>) -> XlsxResult<CellFormats> {
    let mut custom: HashMap<u32, String> = HashMap::new();
    let mut xf_formats: Vec<u32> = Vec::new();
    let mut in_cell_xfs = false;

    scan(xml, |event| {
        match event {
            Event::Start(e) | Event::Empty(e) => {
                let format_id = || attr(&e, b"numFmtId").and_then(|id| id.parse().ok()).unwrap_or(0);
                match e.local_name().as_ref() {
                    b"cellXfs" => in_cell_xfs = true,
                    b"xf" if in_cell_xfs => xf_formats.push(format_id()),
                    b"numFmt" => {
                        if let Some(code) = attr(&e, b"formatCode") {
                            custom.insert(format_id(), code);
                        }
                    }
                    _ => {}
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"cellXfs" => in_cell_xfs = false,
            _ => {}
        }
        Ok(())
    })?;

    let date_xfs = xf_formats
        .into_iter()
        .map(|id| {
            custom
                .get(&id)
                .map_or_else(|| is_builtin_date_format(id), |code| is_date_format(code))
        })
        .collect();
    Ok(CellFormats { date_xfs })
}

/// The stylesheet written with every workbook, see [`DATE_XF`] and [`DATETIME_XF`]
pub(crate) fn styles_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <fonts count="1">
    <font><sz val="11"/><name val="Calibri"/><family val="2"/></font>
  </fonts>
  <fills count="2">
    <fill><patternFill patternType="none"/></fill>
    <fill><patternFill patternType="gray125"/></fill>
  </fills>
  <borders count="1">
    <border><left/><right/><top/><bottom/><diagonal/></border>
  </borders>
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>
  <cellXfs count="3">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
    <xf numFmtId="14" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
    <xf numFmtId="22" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
  </cellXfs>
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
</styleSheet>"#
}
