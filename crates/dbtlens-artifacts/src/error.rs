//! Errors shared by the artifact readers

/// Artifact reading errors
///
/// Every failure in this crate is either a missing file or a parse error;
/// there is nothing transient to retry, so errors surface immediately.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// A required artifact file is absent from the project directory
    #[error("dbt project {kind} file {file} not found in {dir}")]
    FileNotFound {
        kind: &'static str,
        file: String,
        dir: String,
    },

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse YAML from {path}: {message}")]
    Yaml { path: String, message: String },

    #[error("Failed to parse JSON from {path}: {message}")]
    Json { path: String, message: String },

    /// No model with this unique_id exists in the manifest
    #[error("Model {0} not found in manifest")]
    UnknownModel(String),

    /// The model exists but has never been compiled
    #[error("Model {0} has no compiled code (run `dbt compile` first)")]
    MissingCompiledCode(String),
}
