//! Tool trait definition.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Definition of a tool exposed to the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// What a tool hands back before it is flattened into a context payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Text(String),
    Record(serde_json::Value),
}

impl ToolOutput {
    /// String payload: text as-is, records as compact JSON (non-ASCII kept).
    pub fn into_payload(self) -> Result<String> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Record(value) => Ok(serde_json::to_string(&value)?),
        }
    }
}

/// A named capability the planner can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (used in function calls); unique within a registry.
    fn name(&self) -> &str;

    /// Capability statement shown to the planner.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: &serde_json::Value) -> Result<ToolOutput>;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// Schema shared by every tool that takes one free-text `input` argument.
pub fn text_input_schema(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "input": {
                "type": "string",
                "description": description
            }
        },
        "required": ["input"]
    })
}

/// The `input` argument, or an empty string when absent.
pub fn text_input(args: &serde_json::Value) -> &str {
    args.get("input").and_then(|v| v.as_str()).unwrap_or_default()
}
