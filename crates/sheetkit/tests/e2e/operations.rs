//! Scenarios driven through the file-level operations.

use std::fs;

use pretty_assertions::assert_eq;
use sheetkit::prelude::*;
use sheetkit::{CellRange, ErrorKind, XlsxWriter};

use crate::{items_workbook, record, Fixture};

#[test]
fn test_create_add_write_read() {
    let fx = Fixture::new();
    let path = fx.path("t.xlsx");

    create_workbook(&path, &[SheetDefinition::new("Items", &["Name", "Qty"])]).unwrap();
    add_rows(
        &path,
        None,
        &[record(&[
            ("Name", CellValue::string("Widget")),
            ("Qty", CellValue::Number(10.0)),
        ])],
    )
    .unwrap();
    write_to_sheet(&path, None, &[WriteOperation::new(1, "Qty", 8.0)]).unwrap();

    let view = read_sheet(&path, None, &ReadOptions::default()).unwrap();
    assert_eq!(
        serde_json::to_value(&view.rows).unwrap(),
        serde_json::json!([{"Name": "Widget", "Qty": 8}])
    );
}

#[test]
fn test_read_row_range() {
    let fx = Fixture::new();
    let path = items_workbook(&fx, "range.xlsx", 5);

    let view = read_sheet(&path, None, &ReadOptions::rows(2, 4)).unwrap();
    assert_eq!(view.total_rows, 5);
    let names: Vec<_> = view
        .rows
        .iter()
        .map(|r| r.get("Name").and_then(|v| v.as_string().map(String::from)))
        .collect();
    assert_eq!(
        names,
        vec![
            Some("item2".to_string()),
            Some("item3".to_string()),
            Some("item4".to_string())
        ]
    );
}

#[test]
fn test_read_past_end_is_empty() {
    let fx = Fixture::new();
    let path = items_workbook(&fx, "past.xlsx", 2);

    let view = read_sheet(&path, None, &ReadOptions::rows(5, 9)).unwrap();
    assert!(view.rows.is_empty());
    assert_eq!(view.total_rows, 2);
}

#[test]
fn test_unknown_column_leaves_file_unchanged() {
    let fx = Fixture::new();
    let path = items_workbook(&fx, "guard.xlsx", 3);
    let before = fs::read(&path).unwrap();

    let err = write_to_sheet(
        &path,
        None,
        &[
            WriteOperation::new(1, "Qty", 99.0),
            WriteOperation::new(2, "Colour", "red"),
        ],
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ColumnNotFound);
    assert_eq!(
        err.to_string(),
        "Column \"Colour\" not found. Available: Name, Qty, Price"
    );
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_describe_headers_only_sheet() {
    let fx = Fixture::new();
    let path = fx.path("headers.xlsx");
    create_workbook(&path, &[SheetDefinition::new("Log", &["When", "What"])]).unwrap();

    let info = describe_workbook(&path, sheetkit::DEFAULT_TYPE_SAMPLE_ROWS).unwrap();
    assert_eq!(info.path, path);
    let sheet = &info.sheets[0];
    assert_eq!(sheet.row_count, 0);
    assert_eq!(sheet.column_count, 2);
    assert!(sheet.columns.iter().all(|c| c.column_type == "unknown"));
}

#[test]
fn test_create_refuses_existing_file() {
    let fx = Fixture::new();
    let path = items_workbook(&fx, "exists.xlsx", 1);
    let before = fs::read(&path).unwrap();

    let err = create_workbook(&path, &[SheetDefinition::new("Other", &["A"])]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(err.to_string(), format!("File already exists: {}", path.display()));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_create_makes_parent_directories() {
    let fx = Fixture::new();
    let path = fx.path("a/b/c/new.xlsx");

    let created = create_workbook(
        &path,
        &[
            SheetDefinition::new("First", &["X"]),
            SheetDefinition::new("Second", &["Y", "Z"]),
        ],
    )
    .unwrap();

    assert!(path.is_file());
    assert_eq!(created.path, path);
    assert_eq!(created.sheets, vec!["First", "Second"]);
}

#[test]
fn test_create_without_sheets_writes_nothing() {
    let fx = Fixture::new();
    let path = fx.path("none.xlsx");

    let err = create_workbook(&path, &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(!path.exists());
}

#[test]
fn test_missing_file_messages() {
    let fx = Fixture::new();
    let path = fx.path("missing.xlsx");

    let err = describe_workbook(&path, 20).unwrap_err();
    assert_eq!(err.to_string(), format!("File not found: {}", path.display()));

    let err = write_to_sheet(&path, None, &[]).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!(
            "File not found: {}. Use excel_create to create a new workbook.",
            path.display()
        )
    );

    let err = add_rows(&path, None, &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().ends_with("Use excel_create to create a new workbook."));
}

#[test]
fn test_sheet_not_found_lists_sheets() {
    let fx = Fixture::new();
    let path = fx.path("sheets.xlsx");
    create_workbook(
        &path,
        &[
            SheetDefinition::new("Items", &["Name"]),
            SheetDefinition::new("Orders", &["Id"]),
        ],
    )
    .unwrap();

    let err = read_sheet(&path, Some("items"), &ReadOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SheetNotFound);
    assert_eq!(err.to_string(), "Sheet \"items\" not found. Available: Items, Orders");
}

#[test]
fn test_named_sheet_is_targeted() {
    let fx = Fixture::new();
    let path = fx.path("multi.xlsx");
    create_workbook(
        &path,
        &[
            SheetDefinition::new("Items", &["Name"]),
            SheetDefinition::new("Orders", &["Id", "Total"]),
        ],
    )
    .unwrap();

    let summary = add_rows(
        &path,
        Some("Orders"),
        &[record(&[("id", CellValue::Number(1.0)), ("TOTAL", CellValue::Number(9.5))])],
    )
    .unwrap();
    assert_eq!(summary.new_row_count, 1);

    let info = describe_workbook(&path, 20).unwrap();
    assert_eq!(info.sheets[0].row_count, 0);
    assert_eq!(info.sheets[1].row_count, 1);
}

#[test]
fn test_add_rows_reports_counts() {
    let fx = Fixture::new();
    let path = items_workbook(&fx, "counts.xlsx", 2);

    let summary = add_rows(
        &path,
        None,
        &[
            record(&[("Name", CellValue::string("x"))]),
            record(&[("Unknown", CellValue::string("dropped"))]),
            record(&[]),
        ],
    )
    .unwrap();
    assert_eq!(summary.added_rows, 3);
    assert_eq!(summary.new_row_count, 5);

    let view = read_sheet(&path, None, &ReadOptions::default()).unwrap();
    assert_eq!(view.total_rows, 5);
    assert_eq!(view.rows[3].get("Name"), Some(&CellValue::Empty));
}

#[test]
fn test_write_null_clears_and_extends_range() {
    let fx = Fixture::new();
    let path = items_workbook(&fx, "clear.xlsx", 2);

    let updated = write_to_sheet(
        &path,
        None,
        &[
            WriteOperation::new(1, "Name", CellValue::Empty),
            WriteOperation::new(4, "price", 2.25),
        ],
    )
    .unwrap();
    assert_eq!(updated, 2);

    let view = read_sheet(&path, None, &ReadOptions::default()).unwrap();
    assert_eq!(view.total_rows, 4);
    assert_eq!(view.rows[0].get("Name"), Some(&CellValue::Empty));
    assert_eq!(view.rows[2].get("Price"), Some(&CellValue::Empty));
    assert_eq!(view.rows[3].get("Price"), Some(&CellValue::Number(2.25)));
}

#[test]
fn test_dot_dot_components_are_normalised() {
    let fx = Fixture::new();
    let path = items_workbook(&fx, "rel.xlsx", 1);
    let info = describe_workbook(&path.join("..").join("rel.xlsx"), 20).unwrap();
    assert_eq!(info.path, path);
}

#[test]
fn test_sheet_declaring_the_whole_grid() {
    let fx = Fixture::new();
    let path = fx.path("whole-grid.xlsx");
    let mut book = Workbook::new();
    let sheet = book.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", "Name").unwrap();
    sheet.set_dimension(Some(CellRange::parse("A1:XFD1048576").unwrap()));
    XlsxWriter::write_file(&book, &path).unwrap();

    let info = describe_workbook(&path, 20).unwrap();
    assert_eq!(info.sheets[0].row_count, 1_048_575);
    assert_eq!(info.sheets[0].column_count, 16_384);
    assert_eq!(info.sheets[0].columns[0].name, "Name");
    assert_eq!(info.sheets[0].columns[16_383].name, "Column 16384");

    write_to_sheet(&path, None, &[WriteOperation::new(2, "name", "Bolt")]).unwrap();
    let view = read_sheet(&path, None, &ReadOptions::rows(1, 2)).unwrap();
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[1].get("Name"), Some(&CellValue::string("Bolt")));
}
