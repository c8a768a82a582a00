//! dbtlens Tools
//!
//! The callable-tool layer: a [`Tool`] trait, one tool per exposed
//! operation, JSON-Schema argument descriptions, and a [`ToolRegistry`]
//! that dispatches `(tool name, JSON arguments) -> text document`.
//!
//! This is the seam a conversational agent runtime plugs into; the runtime
//! decides which tool to call, this crate turns the call into artifact
//! reads.

pub mod manifest;
pub mod project;
pub mod registry;
pub mod run_results;
pub mod tool;

pub use manifest::{ModelSqlTool, ModelsInfoTool, ProjectSourcesTool};
pub use project::{ProjectInfoTool, ProjectSchemasTool};
pub use registry::ToolRegistry;
pub use run_results::RunResultTool;
pub use tool::{Tool, ToolError, ToolSchema};
