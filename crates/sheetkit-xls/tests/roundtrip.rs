//! Workbooks written by `XlsWriter` read back unchanged by `XlsReader`

use std::io::Cursor;

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use sheetkit_core::{CellRange, CellValue, Workbook};
use sheetkit_xls::{XlsReader, XlsWriter};

fn reread(book: &Workbook) -> Workbook {
    let bytes = XlsWriter::write_to_vec(book).unwrap();
    XlsReader::read(Cursor::new(bytes)).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
}

#[test]
fn test_output_is_a_compound_file() {
    let bytes = XlsWriter::write_to_vec(&Workbook::new()).unwrap();
    assert_eq!(&bytes[..8], &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]);
}

#[test]
fn test_every_value_kind() {
    let restock = day(2023, 11, 3).date().and_hms_opt(14, 5, 0).unwrap();
    let row: Vec<(&str, CellValue)> = vec![
        ("A1", CellValue::string("Spring washer")),
        ("B1", CellValue::Number(250.0)),
        ("C1", CellValue::Number(-0.0625)),
        ("D1", CellValue::Boolean(false)),
        ("E1", CellValue::DateTime(day(2023, 11, 3))),
        ("F1", CellValue::DateTime(restock)),
        ("G1", CellValue::string("M\u{fc}nchen \u{2192} K\u{f6}ln \u{1F69A}")),
        ("H1", CellValue::Number(1e15 + 0.5)),
    ];

    let mut book = Workbook::new();
    let sheet = book.worksheet_mut(0).unwrap();
    for (at, value) in &row {
        sheet.set_cell_value(*at, value.clone()).unwrap();
    }

    let back = reread(&book);
    let sheet = back.worksheet(0).unwrap();
    for (at, value) in row {
        assert_eq!(sheet.get_value(at).unwrap(), value, "{}", at);
    }
    assert_eq!(sheet.cell_count(), 8);
}

#[test]
fn test_shared_strings_spill_into_continue_records() {
    let notes: Vec<String> = (0..30)
        .map(|n| format!("note {} {}", n, "\u{e9}tag\u{e8}re ".repeat(70)))
        .collect();
    let mut book = Workbook::new();
    let sheet = book.worksheet_mut(0).unwrap();
    for (row, note) in notes.iter().enumerate() {
        sheet.set_cell_value_at(row as u32, 1, note.as_str()).unwrap();
    }

    let back = reread(&book);
    let sheet = back.worksheet(0).unwrap();
    for (row, note) in notes.iter().enumerate() {
        assert_eq!(sheet.get_value_at(row as u32, 1).as_string(), Some(note.as_str()));
    }
}

#[test]
fn test_sheet_order_and_1904_dates() {
    let mut book = Workbook::empty();
    for name in ["Inbound", "Outbound", "Returns"] {
        book.add_worksheet_with_name(name).unwrap();
    }
    book.settings_mut().date_1904 = true;
    book.worksheet_mut(2)
        .unwrap()
        .set_cell_value("B2", day(1999, 3, 1))
        .unwrap();

    let back = reread(&book);
    assert_eq!(back.sheet_names(), vec!["Inbound", "Outbound", "Returns"]);
    assert!(back.settings().date_1904);
    assert!(back.worksheet(1).unwrap().is_empty());
    assert_eq!(
        back.worksheet(2).unwrap().get_value("B2").unwrap(),
        CellValue::DateTime(day(1999, 3, 1))
    );
}

#[test]
fn test_declared_range_survives() {
    let mut book = Workbook::new();
    let sheet = book.worksheet_mut(0).unwrap();
    sheet.set_cell_value("B2", "Bin").unwrap();
    sheet.set_dimension(Some(CellRange::parse("A1:E8").unwrap()));

    let back = reread(&book);
    assert_eq!(
        back.worksheet(0).unwrap().used_range().unwrap().to_string(),
        "A1:E8"
    );
}

#[test]
fn test_files_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.xls");

    let mut book = Workbook::new();
    book.worksheet_mut(0).unwrap().set_cell_value("C5", 19.99).unwrap();
    XlsWriter::write_file(&book, &path).unwrap();

    assert_eq!(
        XlsReader::read_file(&path).unwrap().worksheet(0).unwrap().get_value("C5").unwrap(),
        CellValue::Number(19.99)
    );
}
