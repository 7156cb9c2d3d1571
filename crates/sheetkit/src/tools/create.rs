use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_params, path_schema, Tool, ToolConfig, ToolOutput};
use crate::create::SheetDefinition;
use crate::error::Result;
use crate::ops::create_workbook;

#[derive(Debug, Deserialize)]
struct Params {
    path: PathBuf,
    sheets: Vec<SheetDefinition>,
}

/// `excel_create`: new workbook with header-only sheets
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateTool;

impl Tool for CreateTool {
    fn name(&self) -> &'static str {
        "excel_create"
    }

    fn label(&self) -> &'static str {
        "Excel: Create"
    }

    fn description(&self) -> &'static str {
        "Create a new Excel workbook with the specified sheets and column headers. The file \
         must not already exist."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": path_schema("Absolute path for the new Excel (.xlsx) file"),
                "sheets": {
                    "type": "array",
                    "description": "List of sheets to create, each with a name and column headers.",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string", "description": "Sheet name" },
                            "columns": {
                                "type": "array",
                                "items": { "type": "string" },
                                "description": "Column header names",
                            },
                        },
                        "required": ["name", "columns"],
                    },
                },
            },
            "required": ["path", "sheets"],
        })
    }

    fn execute(&self, _config: &ToolConfig, params: Value) -> Result<ToolOutput> {
        let params: Params = parse_params(params)?;
        let created = create_workbook(&params.path, &params.sheets)?;

        Ok(ToolOutput::new(
            format!(
                "Created workbook at {} with sheets: {}",
                created.path.display(),
                created.sheets.join(", ")
            ),
            serde_json::to_value(&created)?,
        ))
    }
}
