//! The JSON tool surface.

use pretty_assertions::assert_eq;
use serde_json::json;
use sheetkit::prelude::*;
use sheetkit::ErrorKind;

use crate::{items_workbook, Fixture};

fn call(name: &str, params: serde_json::Value) -> sheetkit::Result<ToolOutput> {
    ToolRegistry::new().call(name, &ToolConfig::default(), params)
}

#[test]
fn test_describe_tool() {
    let fx = Fixture::new();
    let path = items_workbook(&fx, "d.xlsx", 2);
    let second = fx.path("two.xlsx");
    call(
        "excel_create",
        json!({"path": second, "sheets": [{"name": "A", "columns": ["x"]}, {"name": "B", "columns": []}]}),
    )
    .unwrap();

    let out = call("excel_describe", json!({ "path": path })).unwrap();
    assert_eq!(
        out.text,
        "Sheet: Items\nRows: 2, Columns: 3\n  Name (string)\n  Qty (number)\n  Price (number)"
    );
    assert_eq!(
        out.details,
        json!({"workbook": {
            "path": path,
            "sheets": [{
                "name": "Items",
                "rowCount": 2,
                "columnCount": 3,
                "columns": [
                    {"name": "Name", "type": "string"},
                    {"name": "Qty", "type": "number"},
                    {"name": "Price", "type": "number"},
                ],
            }],
        }})
    );

    let out = call("excel_describe", json!({ "path": second })).unwrap();
    assert_eq!(
        out.text,
        "Sheet: A\nRows: 0, Columns: 1\n  x (unknown)\n\nSheet: B\nRows: 0, Columns: 0\n"
    );
}

#[test]
fn test_read_tool() {
    let fx = Fixture::new();
    let path = items_workbook(&fx, "r.xlsx", 3);

    let out = call(
        "excel_read",
        json!({"path": path, "start_row": 2, "end_row": 2, "columns": ["price", "name"]}),
    )
    .unwrap();
    assert_eq!(
        out.text,
        "[\n  {\n    \"Name\": \"item2\",\n    \"Price\": 3\n  }\n]"
    );
    assert_eq!(
        out.details,
        json!({"rowCount": 1, "totalRows": 3, "headers": ["Name", "Price"]})
    );

    let rows: serde_json::Value =
        serde_json::from_str(&call("excel_read", json!({ "path": path })).unwrap().text).unwrap();
    assert_eq!(rows[2], json!({"Name": "item3", "Qty": 3, "Price": 4.5}));
}

#[test]
fn test_read_tool_truncates_large_output() {
    let fx = Fixture::new();
    let path = items_workbook(&fx, "big.xlsx", 50);

    let config = ToolConfig {
        max_output_bytes: 300,
        ..ToolConfig::default()
    };
    let out = ToolRegistry::new()
        .call("excel_read", &config, json!({ "path": path }))
        .unwrap();

    let (kept, notice) = out.text.split_once("\n\n[Output truncated:").unwrap();
    assert!(kept.len() <= 300);
    assert!(kept.starts_with("[\n  {"));
    assert!(notice.contains("Use start_row/end_row"));
    assert_eq!(out.details["rowCount"], 50);
}

#[test]
fn test_read_tool_clamps_row_bounds() {
    let fx = Fixture::new();
    let headers_only = items_workbook(&fx, "headers.xlsx", 0);
    for bounds in [json!({"end_row": -1}), json!({"end_row": 1e10}), json!({"start_row": -3})] {
        let mut params = bounds.clone();
        params["path"] = json!(headers_only);
        let out = call("excel_read", params).unwrap();
        assert_eq!(out.text, "[]", "{}", bounds);
        assert_eq!(out.details["rowCount"], 0);
    }

    let path = items_workbook(&fx, "rows.xlsx", 3);
    let count = |params: serde_json::Value| {
        call("excel_read", params).unwrap().details["rowCount"].clone()
    };
    assert_eq!(count(json!({"path": path, "start_row": -3})), 3);
    assert_eq!(count(json!({"path": path, "end_row": -1})), 0);
    assert_eq!(count(json!({"path": path, "end_row": 1e10})), 3);
    assert_eq!(count(json!({"path": path, "start_row": 2, "end_row": 2.7})), 1);

    let err = call("excel_read", json!({"path": path, "columns": "Name"})).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParams);
}

#[test]
fn test_write_tool() {
    let fx = Fixture::new();
    let path = items_workbook(&fx, "w.xlsx", 2);
    let operations = json!([
        {"row": 1, "column": "name", "value": "first"},
        {"row": 2, "column": "Qty", "value": null},
        {"row": 2, "column": "Price", "value": {"amount": 2}},
    ]);

    let out = call("excel_write", json!({"path": path, "operations": operations})).unwrap();
    assert_eq!(out.text, format!("Updated 3 cell(s) in {}", path.display()));
    assert_eq!(out.details, json!({"updatedCells": 3, "operations": operations}));

    let read = call("excel_read", json!({ "path": path })).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&read.text).unwrap();
    assert_eq!(
        rows,
        json!([
            {"Name": "first", "Qty": 1, "Price": 1.5},
            {"Name": "item2", "Qty": null, "Price": "{\"amount\":2}"},
        ])
    );
}

#[test]
fn test_write_tool_errors() {
    let fx = Fixture::new();
    let path = items_workbook(&fx, "we.xlsx", 1);

    let err = call(
        "excel_write",
        json!({"path": path, "operations": [{"row": 0, "column": "Name", "value": "x"}]}),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = call(
        "excel_write",
        json!({"path": path, "sheet": "Nope", "operations": []}),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Sheet \"Nope\" not found. Available: Items");

    let err = call("excel_write", json!({ "path": path })).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParams);
}

#[test]
fn test_add_rows_tool() {
    let fx = Fixture::new();
    let path = items_workbook(&fx, "a.xlsx", 1);

    let out = call(
        "excel_add_rows",
        json!({"path": path, "rows": [{"Name": "n", "Extra": 1}, {"QTY": 7}]}),
    )
    .unwrap();
    assert_eq!(out.text, "Added 2 row(s). Sheet now has 3 data rows.");
    assert_eq!(out.details, json!({"addedRows": 2, "newRowCount": 3}));
}

#[test]
fn test_create_tool() {
    let fx = Fixture::new();
    let path = fx.path("nested/c.xlsx");

    let out = call(
        "excel_create",
        json!({"path": path, "sheets": [{"name": "Items", "columns": ["Name", "Qty"]}, {"name": "Log", "columns": ["At"]}]}),
    )
    .unwrap();
    assert_eq!(
        out.text,
        format!("Created workbook at {} with sheets: Items, Log", path.display())
    );
    assert_eq!(out.details, json!({"path": path, "sheets": ["Items", "Log"]}));

    let err = call(
        "excel_create",
        json!({"path": path, "sheets": [{"name": "Items", "columns": []}]}),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
}
