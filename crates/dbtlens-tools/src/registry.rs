//! Name-based tool dispatch

use serde_json::Value as JsonValue;
use tracing::debug;

use dbtlens_core::Document;

use crate::tool::{Tool, ToolError, ToolSchema};

/// Ordered collection of tools, dispatched by name.
///
/// Registration order is preserved; it is the order tools appear in the
/// rendered system prompt.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) {
        debug!(tool = tool.name(), "registering tool");
        self.tools.push(tool);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(|tool| tool.as_ref())
    }

    /// Tool names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    /// Schemas for every registered tool, for handing to an LLM runtime
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|tool| tool.schema()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.iter().map(|tool| tool.as_ref())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Invoke a tool by name with JSON arguments.
    ///
    /// This is the whole seam an agent runtime needs: tool name and JSON
    /// arguments in, text document out.
    pub fn execute(&self, name: &str, args: &JsonValue) -> Result<Document, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        debug!(tool = name, %args, "executing tool");
        let result = tool.call(args);

        match &result {
            Ok(doc) => debug!(tool = name, bytes = doc.text.len(), "tool succeeded"),
            Err(e) => debug!(tool = name, error = %e, "tool failed"),
        }

        result
    }
}
