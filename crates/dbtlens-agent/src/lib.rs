//! dbtlens Agent
//!
//! The agent-facing assembly: the ReAct system-prompt header with tool
//! descriptions filled in, and the composition function that gathers every
//! dbt inspection tool into a registry for a pre-existing agent runtime.

pub mod assembly;
pub mod prompt;

pub use assembly::{dbt_toolkit, AgentBundle};
pub use prompt::{render_system_header, REACT_SYSTEM_HEADER};
