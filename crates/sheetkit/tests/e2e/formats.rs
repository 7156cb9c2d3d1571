//! XLS and XLSX containers through the same operations.

use std::fs;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sheetkit::prelude::*;
use sheetkit::{FileFormat, XlsWriter};

use crate::{items_workbook, record, Fixture};

#[test]
fn test_extension_picks_container() {
    let fx = Fixture::new();
    let xlsx = items_workbook(&fx, "modern.xlsx", 1);
    let xls = items_workbook(&fx, "legacy.XLS", 1);

    assert_eq!(FileFormat::detect(&fs::read(xlsx).unwrap()), Some(FileFormat::Xlsx));
    assert_eq!(FileFormat::detect(&fs::read(xls).unwrap()), Some(FileFormat::Xls));
}

#[test]
fn test_xls_edit_cycle() {
    let fx = Fixture::new();
    let path = items_workbook(&fx, "legacy.xls", 3);

    write_to_sheet(&path, None, &[WriteOperation::new(2, "Name", "renamed")]).unwrap();
    add_rows(&path, None, &[record(&[("Name", CellValue::string("fourth"))])]).unwrap();

    let view = read_sheet(&path, None, &ReadOptions::default()).unwrap();
    assert_eq!(view.total_rows, 4);
    assert_eq!(view.rows[1].get("Name"), Some(&CellValue::string("renamed")));
    assert_eq!(view.rows[2].get("Price"), Some(&CellValue::Number(4.5)));
    assert_eq!(view.rows[3].get("Name"), Some(&CellValue::string("fourth")));
    assert_eq!(view.rows[3].get("Qty"), Some(&CellValue::Empty));
}

#[test]
fn test_content_decides_how_a_file_is_read() {
    let fx = Fixture::new();
    let path = fx.path("misnamed.xlsx");

    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", "Code").unwrap();
    sheet.set_cell_value("A2", "X1").unwrap();
    XlsWriter::write_file(&wb, &path).unwrap();

    let view = read_sheet(&path, None, &ReadOptions::default()).unwrap();
    assert_eq!(view.rows[0].get("Code"), Some(&CellValue::string("X1")));

    // Saving follows the extension
    write_to_sheet(&path, None, &[WriteOperation::new(1, "Code", "X2")]).unwrap();
    assert_eq!(FileFormat::detect(&fs::read(&path).unwrap()), Some(FileFormat::Xlsx));
}

#[test]
fn test_non_spreadsheet_is_rejected() {
    let fx = Fixture::new();
    let path = fx.path("notes.xlsx");
    fs::write(&path, "Name,Qty\nBolt,3\n").unwrap();

    let err = describe_workbook(&path, 20).unwrap_err();
    assert_eq!(err.kind(), sheetkit::ErrorKind::UnsupportedFormat);
}

#[test]
fn test_dates_survive_both_containers() {
    let when = NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_opt(8, 15, 0)
        .unwrap();

    for name in ["dates.xlsx", "dates.xls"] {
        let fx = Fixture::new();
        let path = fx.path(name);
        create_workbook(&path, &[SheetDefinition::new("Log", &["When"])]).unwrap();
        add_rows(&path, None, &[record(&[("When", CellValue::DateTime(when))])]).unwrap();

        let view = read_sheet(&path, None, &ReadOptions::default()).unwrap();
        assert_eq!(view.rows[0].get("When"), Some(&CellValue::DateTime(when)), "{name}");

        let info = describe_workbook(&path, 20).unwrap();
        assert_eq!(info.sheets[0].columns[0].column_type, "date", "{name}");
    }
}

#[test]
fn test_workbook_ext_open_and_save() {
    let fx = Fixture::new();
    let path = items_workbook(&fx, "ext.xlsx", 2);

    let mut wb = Workbook::open(&path).unwrap();
    wb.worksheet_mut(0)
        .unwrap()
        .set_cell_value("B2", 100.0)
        .unwrap();
    let copy = fx.path("copy.xls");
    wb.save(&copy).unwrap();

    let reopened = Workbook::open(&copy).unwrap();
    assert_eq!(reopened.sheet_names(), vec!["Items"]);
    assert_eq!(
        reopened.worksheet(0).unwrap().get_value("B2").unwrap(),
        CellValue::Number(100.0)
    );
}
