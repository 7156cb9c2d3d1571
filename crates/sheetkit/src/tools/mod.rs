//! Agent-callable tools
//!
//! Each tool takes a JSON object of parameters and returns a text result
//! for the agent plus a structured `details` payload. Tools are looked up
//! by name in a [`ToolRegistry`].

mod add_rows;
mod create;
mod describe;
mod read;
mod truncate;
mod write;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::infer::DEFAULT_TYPE_SAMPLE_ROWS;

pub use add_rows::AddRowsTool;
pub use create::CreateTool;
pub use describe::DescribeTool;
pub use read::ReadTool;
pub use truncate::{truncate_head, Truncated};
pub use write::WriteTool;

/// Default cap on the text returned by `excel_read`
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 50_000;

/// Settings shared by all tool calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolConfig {
    /// Longest text a tool returns before truncating
    pub max_output_bytes: usize,
    /// Data rows sampled per column when inferring types
    pub type_sample_rows: usize,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            type_sample_rows: DEFAULT_TYPE_SAMPLE_ROWS,
        }
    }
}

/// Result of a tool call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolOutput {
    /// Agent-facing result
    pub text: String,
    /// Structured payload
    pub details: Value,
}

impl ToolOutput {
    pub fn new<S: Into<String>>(text: S, details: Value) -> Self {
        Self {
            text: text.into(),
            details,
        }
    }
}

/// A named operation invocable with JSON parameters
pub trait Tool: Send + Sync {
    /// Name the agent calls the tool by
    fn name(&self) -> &'static str;

    /// Short human-readable title
    fn label(&self) -> &'static str;

    /// What the tool does and when to use it
    fn description(&self) -> &'static str;

    /// JSON Schema of the parameter object
    fn parameters_schema(&self) -> Value;

    /// Run the tool
    fn execute(&self, config: &ToolConfig, params: Value) -> Result<ToolOutput>;

    /// Name, label, description and schema as one JSON object
    fn definition(&self) -> Value {
        json!({
            "name": self.name(),
            "label": self.label(),
            "description": self.description(),
            "parameters": self.parameters_schema(),
        })
    }
}

/// Tools by name, in registration order
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Registry holding the five spreadsheet tools
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(DescribeTool));
        registry.register(Box::new(ReadTool));
        registry.register(Box::new(WriteTool));
        registry.register(Box::new(AddRowsTool));
        registry.register(Box::new(CreateTool));
        registry
    }

    pub fn empty() -> Self {
        Self { tools: Vec::new() }
    }

    /// Add a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(index) => self.tools[index] = tool,
            None => self.tools.push(tool),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    pub fn tools(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.iter().map(|t| t.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Definitions of every tool, for handing to an agent
    pub fn definitions(&self) -> Vec<Value> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Run a tool by name
    pub fn call(&self, name: &str, config: &ToolConfig, params: Value) -> Result<ToolOutput> {
        let tool = self
            .get(name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;
        log::debug!("calling tool {}", name);
        tool.execute(config, params)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

/// Deserialize a tool's parameter object
pub(crate) fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T> {
    Ok(serde_json::from_value(params)?)
}

/// Validate a JSON row number: a non-negative integer that fits a `u32`
pub(crate) fn row_number(value: f64, field: &str) -> Result<u32> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Ok(value as u32)
    } else {
        Err(Error::InvalidArgument(format!(
            "{field} must be a non-negative integer, got {value}"
        )))
    }
}

fn path_schema(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn sheet_schema() -> Value {
    json!({ "type": "string", "description": "Sheet name. Defaults to the first sheet." })
}

const EXISTING_PATH: &str = "Absolute path to the Excel (.xlsx) file";
