//! sheetkit CLI - run the spreadsheet tools from a shell

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use sheetkit::prelude::*;
use sheetkit::tools::DEFAULT_MAX_OUTPUT_BYTES;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetkit")]
#[command(author, version, about = "Describe, read and edit XLSX/XLS workbooks")]
struct Cli {
    /// Cap on the text printed by `read`
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_OUTPUT_BYTES)]
    max_output_bytes: usize,

    /// Print the structured result instead of the text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show sheets, row counts, columns and inferred column types
    Describe {
        /// Workbook file
        path: PathBuf,
    },

    /// Print data rows as JSON
    Read {
        /// Workbook file
        path: PathBuf,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// First data row, 1-indexed
        #[arg(long)]
        start_row: Option<u32>,

        /// Last data row, 1-indexed
        #[arg(long)]
        end_row: Option<u32>,

        /// Comma-separated column names to include
        #[arg(short, long, value_delimiter = ',')]
        columns: Option<Vec<String>>,
    },

    /// Update cells from a JSON array of {row, column, value}
    Write {
        /// Workbook file
        path: PathBuf,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Operations as JSON
        #[arg(long)]
        ops: String,
    },

    /// Append rows from a JSON array of objects
    AddRows {
        /// Workbook file
        path: PathBuf,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Rows as JSON
        #[arg(long)]
        rows: String,
    },

    /// Create a new workbook
    Create {
        /// Workbook file to create (.xls for the legacy format)
        path: PathBuf,

        /// Sheet as NAME:COL1,COL2,... (repeatable)
        #[arg(short, long = "sheet", required = true)]
        sheets: Vec<String>,
    },

    /// Call a tool by name with JSON parameters
    Call {
        /// Tool name, e.g. excel_read
        tool: String,

        /// Parameters as a JSON object
        params: String,
    },

    /// List the available tools and their parameter schemas
    Tools,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let registry = ToolRegistry::new();
    let config = ToolConfig {
        max_output_bytes: cli.max_output_bytes,
        ..ToolConfig::default()
    };

    let (tool, params) = match cli.command {
        Commands::Describe { path } => ("excel_describe", json!({ "path": path })),
        Commands::Read {
            path,
            sheet,
            start_row,
            end_row,
            columns,
        } => {
            let mut params = Map::new();
            params.insert("path".into(), json!(path));
            insert_opt(&mut params, "sheet", sheet.map(Value::from));
            insert_opt(&mut params, "start_row", start_row.map(Value::from));
            insert_opt(&mut params, "end_row", end_row.map(Value::from));
            insert_opt(&mut params, "columns", columns.map(Value::from));
            ("excel_read", Value::Object(params))
        }
        Commands::Write { path, sheet, ops } => {
            let operations = parse_json(&ops, "--ops")?;
            let mut params = Map::new();
            params.insert("path".into(), json!(path));
            insert_opt(&mut params, "sheet", sheet.map(Value::from));
            params.insert("operations".into(), operations);
            ("excel_write", Value::Object(params))
        }
        Commands::AddRows { path, sheet, rows } => {
            let rows = parse_json(&rows, "--rows")?;
            let mut params = Map::new();
            params.insert("path".into(), json!(path));
            insert_opt(&mut params, "sheet", sheet.map(Value::from));
            params.insert("rows".into(), rows);
            ("excel_add_rows", Value::Object(params))
        }
        Commands::Create { path, sheets } => {
            let sheets = sheets
                .iter()
                .map(|arg| parse_sheet_arg(arg))
                .collect::<Result<Vec<_>>>()?;
            ("excel_create", json!({ "path": path, "sheets": sheets }))
        }
        Commands::Call { tool, params } => {
            let params = parse_json(&params, "params")?;
            let output = registry
                .call(&tool, &config, params)
                .with_context(|| format!("Tool '{}' failed", tool))?;
            return print_output(&output, cli.json);
        }
        Commands::Tools => return list_tools(&registry),
    };

    let output = registry
        .call(tool, &config, params)
        .with_context(|| format!("Tool '{}' failed", tool))?;
    print_output(&output, cli.json)
}

fn insert_opt(params: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        params.insert(key.to_string(), value);
    }
}

fn parse_json(text: &str, what: &str) -> Result<Value> {
    serde_json::from_str(text).with_context(|| format!("Invalid JSON in {}", what))
}

/// Parse `NAME:COL1,COL2` into a sheet definition
fn parse_sheet_arg(arg: &str) -> Result<SheetDefinition> {
    let (name, columns) = arg.split_once(':').unwrap_or((arg, ""));
    if name.is_empty() {
        bail!("Sheet argument '{}' has no name", arg);
    }
    let columns: Vec<&str> = columns
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    Ok(SheetDefinition::new(name, &columns))
}

fn print_output(output: &ToolOutput, as_json: bool) -> Result<()> {
    if as_json {
        let details =
            serde_json::to_string_pretty(&output.details).context("Failed to format result")?;
        println!("{}", details);
    } else {
        println!("{}", output.text);
    }
    Ok(())
}

fn list_tools(registry: &ToolRegistry) -> Result<()> {
    let definitions = serde_json::to_string_pretty(&registry.definitions())
        .context("Failed to format tool definitions")?;
    println!("{}", definitions);
    Ok(())
}
