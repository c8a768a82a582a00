//! dbtlens Core
//!
//! Core domain model shared by every dbtlens crate: the `Document` payload
//! handed back to an agent runtime, and the project configuration.

pub mod config;
pub mod document;

pub use config::{Config, ConfigError, PROJECT_DIR_ENV};
pub use document::Document;
