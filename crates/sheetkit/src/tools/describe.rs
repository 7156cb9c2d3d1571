use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_params, path_schema, Tool, ToolConfig, ToolOutput, EXISTING_PATH};
use crate::error::Result;
use crate::ops::{describe_workbook, SheetInfo};

#[derive(Debug, Deserialize)]
struct Params {
    path: PathBuf,
}

/// `excel_describe`: sheet names, row counts, columns and inferred types
#[derive(Debug, Clone, Copy, Default)]
pub struct DescribeTool;

fn summarize(sheet: &SheetInfo) -> String {
    let columns: Vec<String> = sheet
        .columns
        .iter()
        .map(|c| format!("  {} ({})", c.name, c.column_type))
        .collect();
    format!(
        "Sheet: {}\nRows: {}, Columns: {}\n{}",
        sheet.name,
        sheet.row_count,
        sheet.column_count,
        columns.join("\n")
    )
}

impl Tool for DescribeTool {
    fn name(&self) -> &'static str {
        "excel_describe"
    }

    fn label(&self) -> &'static str {
        "Excel: Describe"
    }

    fn description(&self) -> &'static str {
        "Describe an Excel workbook's structure: sheet names, row counts, column names and \
         inferred types. Use this first to understand a workbook before reading or writing."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": path_schema(EXISTING_PATH),
            },
            "required": ["path"],
        })
    }

    fn execute(&self, config: &ToolConfig, params: Value) -> Result<ToolOutput> {
        let params: Params = parse_params(params)?;
        let workbook = describe_workbook(&params.path, config.type_sample_rows)?;

        let text = workbook
            .sheets
            .iter()
            .map(summarize)
            .collect::<Vec<_>>()
            .join("\n\n");
        let details = json!({ "workbook": serde_json::to_value(&workbook)? });
        Ok(ToolOutput::new(text, details))
    }
}
