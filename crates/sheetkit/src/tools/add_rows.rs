use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_params, path_schema, sheet_schema, Tool, ToolConfig, ToolOutput, EXISTING_PATH};
use crate::error::Result;
use crate::ops::add_rows;
use crate::record::Record;

#[derive(Debug, Deserialize)]
struct Params {
    path: PathBuf,
    sheet: Option<String>,
    rows: Vec<Record>,
}

/// `excel_add_rows`: append records after the last row
#[derive(Debug, Clone, Copy, Default)]
pub struct AddRowsTool;

impl Tool for AddRowsTool {
    fn name(&self) -> &'static str {
        "excel_add_rows"
    }

    fn label(&self) -> &'static str {
        "Excel: Add Rows"
    }

    fn description(&self) -> &'static str {
        "Append rows to the end of an Excel sheet. Each row is an object mapping column names \
         to values. Use excel_describe first to learn the column names."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": path_schema(EXISTING_PATH),
                "sheet": sheet_schema(),
                "rows": {
                    "type": "array",
                    "items": { "type": "object", "additionalProperties": true },
                    "description": "Array of row objects. Keys are column names, values are \
                                    cell values. Column names must match existing headers.",
                },
            },
            "required": ["path", "rows"],
        })
    }

    fn execute(&self, _config: &ToolConfig, params: Value) -> Result<ToolOutput> {
        let params: Params = parse_params(params)?;
        let summary = add_rows(&params.path, params.sheet.as_deref(), &params.rows)?;

        Ok(ToolOutput::new(
            format!(
                "Added {} row(s). Sheet now has {} data rows.",
                summary.added_rows, summary.new_row_count
            ),
            serde_json::to_value(summary)?,
        ))
    }
}
