use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{json, Value};

use super::{
    parse_params, path_schema, sheet_schema, truncate_head, Tool, ToolConfig,
    ToolOutput, EXISTING_PATH,
};
use crate::error::Result;
use crate::ops::read_sheet;
use crate::view::ReadOptions;

#[derive(Debug, Deserialize)]
struct Params {
    path: PathBuf,
    sheet: Option<String>,
    start_row: Option<f64>,
    end_row: Option<f64>,
    columns: Option<Vec<String>>,
}

impl Params {
    fn options(&self) -> ReadOptions {
        ReadOptions {
            start_row: self.start_row.map(row_bound),
            end_row: self.end_row.map(row_bound),
            columns: self.columns.clone(),
        }
    }
}

/// Read bounds clamp instead of failing: the float cast saturates, so
/// negatives and NaN land on 0 and anything past `u32::MAX` on the max.
/// A start of 0 reads from row 1, an end of 0 reads nothing.
fn row_bound(value: f64) -> u32 {
    value.floor() as u32
}

/// `excel_read`: data rows as JSON records
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadTool;

impl Tool for ReadTool {
    fn name(&self) -> &'static str {
        "excel_read"
    }

    fn label(&self) -> &'static str {
        "Excel: Read"
    }

    fn description(&self) -> &'static str {
        "Read data from an Excel sheet. Returns rows as JSON. Supports filtering by row range \
         and columns. Use excel_describe first to learn the sheet structure."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": path_schema(EXISTING_PATH),
                "sheet": sheet_schema(),
                "start_row": {
                    "type": "number",
                    "description": "First data row to read (1-indexed). Defaults to 1.",
                },
                "end_row": {
                    "type": "number",
                    "description": "Last data row to read (1-indexed). Defaults to last row.",
                },
                "columns": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Column names to include. Defaults to all columns.",
                },
            },
            "required": ["path"],
        })
    }

    fn execute(&self, config: &ToolConfig, params: Value) -> Result<ToolOutput> {
        let params: Params = parse_params(params)?;
        let view = read_sheet(&params.path, params.sheet.as_deref(), &params.options())?;

        let rows = serde_json::to_string_pretty(&view.rows)?;
        let truncated = truncate_head(&rows, config.max_output_bytes);
        if truncated.truncated {
            log::debug!(
                "excel_read output truncated to {} of {} bytes",
                truncated.kept_bytes,
                truncated.total_bytes
            );
        }

        Ok(ToolOutput::new(
            truncated.content,
            json!({
                "rowCount": view.rows.len(),
                "totalRows": view.total_rows,
                "headers": view.headers,
            }),
        ))
    }
}
