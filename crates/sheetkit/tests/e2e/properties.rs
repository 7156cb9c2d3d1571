//! Cross-operation invariants.

use pretty_assertions::assert_eq;
use sheetkit::prelude::*;
use sheetkit::DEFAULT_TYPE_SAMPLE_ROWS;

use crate::{items_workbook, record, Fixture};

#[test]
fn test_total_rows_matches_described_row_count() {
    let fx = Fixture::new();
    let path = fx.path("counts.xlsx");
    create_workbook(
        &path,
        &[
            SheetDefinition::new("Empty", &["A", "B"]),
            SheetDefinition::new("Some", &["A"]),
        ],
    )
    .unwrap();
    add_rows(
        &path,
        Some("Some"),
        &(0..7).map(|i| record(&[("A", CellValue::Number(f64::from(i)))])).collect::<Vec<_>>(),
    )
    .unwrap();
    write_to_sheet(&path, Some("Empty"), &[WriteOperation::new(3, "B", "late")]).unwrap();

    let info = describe_workbook(&path, DEFAULT_TYPE_SAMPLE_ROWS).unwrap();
    for sheet in &info.sheets {
        let view = read_sheet(&path, Some(sheet.name.as_str()), &ReadOptions::default()).unwrap();
        assert_eq!(view.total_rows, sheet.row_count, "sheet {}", sheet.name);
    }
    assert_eq!(info.sheets[0].row_count, 3);
    assert_eq!(info.sheets[1].row_count, 7);
}

#[test]
fn test_created_sheets_describe_as_defined() {
    let fx = Fixture::new();
    let path = fx.path("defs.xlsx");
    let defs = vec![
        SheetDefinition::new("Customers", &["Id", "Name", "Email", "Joined"]),
        SheetDefinition::new("Orders", &["Order Id", "Customer", "Total"]),
        SheetDefinition::new("Notes", &["Text"]),
    ];
    create_workbook(&path, &defs).unwrap();

    let info = describe_workbook(&path, DEFAULT_TYPE_SAMPLE_ROWS).unwrap();
    assert_eq!(info.sheets.len(), defs.len());
    for (sheet, def) in info.sheets.iter().zip(&defs) {
        assert_eq!(sheet.name, def.name);
        assert_eq!(sheet.row_count, 0);
        let names: Vec<&str> = sheet.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, def.columns.iter().map(String::as_str).collect::<Vec<_>>());
    }
}

#[test]
fn test_appended_rows_read_back_with_known_keys_only() {
    let fx = Fixture::new();
    let path = items_workbook(&fx, "append.xlsx", 3);
    let before = read_sheet(&path, None, &ReadOptions::default()).unwrap();

    let added = [
        record(&[
            ("name", CellValue::string("Gear")),
            ("Colour", CellValue::string("blue")),
            ("PRICE", CellValue::Number(12.5)),
        ]),
        record(&[("Qty", CellValue::Number(2.0)), ("Weight", CellValue::Number(0.4))]),
    ];
    add_rows(&path, None, &added).unwrap();

    let after = read_sheet(&path, None, &ReadOptions::default()).unwrap();
    assert_eq!(after.rows.len(), before.rows.len() + added.len());
    assert_eq!(&after.rows[..3], &before.rows[..]);

    for row in &after.rows[3..] {
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["Name", "Qty", "Price"]);
    }
    assert_eq!(after.rows[3].get("Name"), Some(&CellValue::string("Gear")));
    assert_eq!(after.rows[3].get("Qty"), Some(&CellValue::Empty));
    assert_eq!(after.rows[3].get("Price"), Some(&CellValue::Number(12.5)));
    assert_eq!(after.rows[4].get("Qty"), Some(&CellValue::Number(2.0)));
}

#[test]
fn test_write_changes_only_the_target_cell() {
    let fx = Fixture::new();
    let path = items_workbook(&fx, "target.xlsx", 4);
    let before = read_sheet(&path, None, &ReadOptions::default()).unwrap();

    write_to_sheet(&path, None, &[WriteOperation::new(3, "QTY", true)]).unwrap();
    let after = read_sheet(&path, None, &ReadOptions::default()).unwrap();

    for (i, (old, new)) in before.rows.iter().zip(&after.rows).enumerate() {
        for header in &before.headers {
            let expected = if i == 2 && header == "Qty" {
                CellValue::Boolean(true)
            } else {
                old.get(header).cloned().unwrap()
            };
            assert_eq!(new.get(header), Some(&expected), "row {} column {}", i + 1, header);
        }
    }
}

#[test]
fn test_type_inference_over_files() {
    let fx = Fixture::new();
    let path = fx.path("types.xlsx");
    create_workbook(
        &path,
        &[SheetDefinition::new("T", &["Numbers", "Nothing", "Mixed"])],
    )
    .unwrap();
    add_rows(
        &path,
        None,
        &[
            record(&[("Numbers", CellValue::Number(1.0)), ("Mixed", CellValue::Number(5.0))]),
            record(&[("Numbers", CellValue::Number(2.5)), ("Mixed", CellValue::string("five"))]),
            record(&[("Numbers", CellValue::Number(-3.0)), ("Mixed", CellValue::Number(6.0))]),
        ],
    )
    .unwrap();

    let info = describe_workbook(&path, DEFAULT_TYPE_SAMPLE_ROWS).unwrap();
    let types: Vec<&str> = info.sheets[0]
        .columns
        .iter()
        .map(|c| c.column_type.as_str())
        .collect();
    assert_eq!(types, vec!["number", "unknown", "number | string"]);
}
