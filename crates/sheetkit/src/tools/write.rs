use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{json, Value};

use super::{
    parse_params, path_schema, row_number, sheet_schema, Tool, ToolConfig, ToolOutput,
    EXISTING_PATH,
};
use crate::error::Result;
use crate::json::json_to_cell;
use crate::mutate::WriteOperation;
use crate::ops::write_to_sheet;

#[derive(Debug, Deserialize)]
struct OperationParams {
    row: f64,
    column: String,
    #[serde(default)]
    value: Value,
}

#[derive(Debug, Deserialize)]
struct Params {
    path: PathBuf,
    sheet: Option<String>,
    operations: Vec<OperationParams>,
}

/// `excel_write`: update cells by data row and column name
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteTool;

impl Tool for WriteTool {
    fn name(&self) -> &'static str {
        "excel_write"
    }

    fn label(&self) -> &'static str {
        "Excel: Write"
    }

    fn description(&self) -> &'static str {
        "Update specific cells in an Excel sheet. Provide a list of {row, column, value} \
         operations. Row numbers are 1-indexed data rows (excluding the header). Use \
         excel_describe or excel_read first to understand the structure."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": path_schema(EXISTING_PATH),
                "sheet": sheet_schema(),
                "operations": {
                    "type": "array",
                    "description": "List of cell updates. Each specifies a row, column, and new value.",
                    "items": {
                        "type": "object",
                        "properties": {
                            "row": {
                                "type": "number",
                                "description": "Data row number (1-indexed, excluding header)",
                            },
                            "column": {
                                "type": "string",
                                "description": "Column name (must match a header)",
                            },
                            "value": {
                                "description": "New cell value (string, number, boolean, or null)",
                            },
                        },
                        "required": ["row", "column", "value"],
                    },
                },
            },
            "required": ["path", "operations"],
        })
    }

    fn execute(&self, _config: &ToolConfig, params: Value) -> Result<ToolOutput> {
        let echoed = params.get("operations").cloned().unwrap_or(Value::Null);
        let params: Params = parse_params(params)?;

        let operations = params
            .operations
            .iter()
            .map(|op| {
                Ok(WriteOperation {
                    row: row_number(op.row, "row")?,
                    column: op.column.clone(),
                    value: json_to_cell(&op.value),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let updated = write_to_sheet(&params.path, params.sheet.as_deref(), &operations)?;

        Ok(ToolOutput::new(
            format!("Updated {} cell(s) in {}", updated, params.path.display()),
            json!({ "updatedCells": updated, "operations": echoed }),
        ))
    }
}
