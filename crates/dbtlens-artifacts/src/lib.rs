//! dbtlens Artifacts
//!
//! Read-only accessors over the files a dbt project leaves on disk:
//! `dbt_project.yml`, `packages.yml`, the per-model `schema.yml` files,
//! `target/manifest.json`, and `target/run_results.json`.
//!
//! Every accessor is a synchronous file read followed by a JSON
//! re-serialization. Nothing is cached between calls; the manifest is
//! re-read and re-parsed on every invocation.

pub mod error;
pub mod lineage;
pub mod manifest;
pub mod project;
pub mod run_results;
pub mod schema_files;

pub use error::ArtifactError;
pub use lineage::LineageGraph;
pub use manifest::{
    ColumnDefinition, DependsOn, Manifest, ManifestMetadata, ManifestNode, ManifestSource,
    ModelInfo, NodeConfig,
};
pub use project::ProjectReader;
pub use run_results::{RunResultsReader, RunSummary};
pub use schema_files::SchemaScanner;

/// Fixed artifact paths, relative to the project directory
pub mod paths {
    pub const PROJECT_FILE: &str = "dbt_project.yml";
    pub const PACKAGES_FILE: &str = "packages.yml";
    pub const MODELS_DIR: &str = "models";
    pub const SCHEMA_FILE_NAME: &str = "schema.yml";
    pub const MANIFEST_FILE: &str = "target/manifest.json";
    pub const RUN_RESULTS_FILE: &str = "target/run_results.json";
}
