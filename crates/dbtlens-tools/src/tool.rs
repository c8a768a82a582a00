//! The tool seam between the artifact readers and an agent runtime

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use dbtlens_artifacts::ArtifactError;
use dbtlens_core::Document;

/// A callable tool: named, described for LLM consumption, and invoked with
/// JSON arguments.
///
/// Calls are synchronous and stateless; each invocation re-reads whatever
/// artifacts it needs. An async host can wrap `call` in `spawn_blocking`.
pub trait Tool: Send + Sync {
    /// Tool name as the agent addresses it (e.g., "get_model_sql")
    fn name(&self) -> &str;

    /// What the tool does and when to call it, written for the LLM
    fn description(&self) -> &str;

    /// JSON Schema describing the tool's arguments
    fn args_schema(&self) -> JsonValue;

    /// Invoke the tool with JSON arguments
    fn call(&self, args: &JsonValue) -> Result<Document, ToolError>;

    /// The schema handed to an LLM runtime for function calling
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.args_schema(),
        }
    }
}

/// Tool schema for LLM function calling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: JsonValue,
}

/// Tool invocation errors
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Extract an optional string argument from a JSON arguments object
pub(crate) fn optional_str_arg<'a>(args: &'a JsonValue, key: &str) -> Option<&'a str> {
    args.get(key).and_then(JsonValue::as_str)
}

/// Extract a required string argument, erroring with the tool's name
pub(crate) fn required_str_arg<'a>(
    args: &'a JsonValue,
    key: &str,
    tool: &str,
) -> Result<&'a str, ToolError> {
    optional_str_arg(args, key).ok_or_else(|| ToolError::InvalidArguments {
        tool: tool.to_string(),
        message: format!("missing required string argument '{}'", key),
    })
}

/// Schema for a tool that takes no arguments
pub(crate) fn no_args_schema() -> JsonValue {
    serde_json::json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn argument_extraction() {
        let args = json!({"model_id": "model.p.users", "count": 3});

        assert_eq!(optional_str_arg(&args, "model_id"), Some("model.p.users"));
        assert_eq!(optional_str_arg(&args, "missing"), None);
        // Non-string values are not silently coerced
        assert_eq!(optional_str_arg(&args, "count"), None);

        let err = required_str_arg(&args, "missing", "get_model_sql").unwrap_err();
        assert!(err.to_string().contains("get_model_sql"));
        assert!(err.to_string().contains("missing"));
    }
}
