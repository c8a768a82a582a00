//! Project-level YAML configuration (`dbt_project.yml`, `packages.yml`)

use std::path::Path;

use dbtlens_core::{Config, Document};

use crate::error::ArtifactError;
use crate::paths::{PACKAGES_FILE, PROJECT_FILE};

/// Reads the project's top-level YAML files and wraps them as documents
#[derive(Debug, Clone)]
pub struct ProjectReader {
    config: Config,
}

impl ProjectReader {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Load `dbt_project.yml` as a text document wrapping its JSON form
    pub fn meta(&self) -> Result<Document, ArtifactError> {
        self.load_yaml_doc("meta", PROJECT_FILE, "Here is the dbt project meta information")
    }

    /// Load `packages.yml` as a text document wrapping its JSON form
    pub fn packages(&self) -> Result<Document, ArtifactError> {
        self.load_yaml_doc(
            "packages",
            PACKAGES_FILE,
            "Here is the dbt project packages information",
        )
    }

    fn load_yaml_doc(
        &self,
        kind: &'static str,
        file: &str,
        preamble: &str,
    ) -> Result<Document, ArtifactError> {
        let path = self.config.artifact_path(file);
        if !path.exists() {
            return Err(ArtifactError::FileNotFound {
                kind,
                file: file.to_string(),
                dir: self.config.project_dir.display().to_string(),
            });
        }

        let json = read_yaml_as_json(&path)?;
        let text = format!("{}: {}", preamble, json);

        Ok(Document::new(text).with_source(file))
    }
}

/// Parse a YAML file and re-serialize its content as a JSON string
pub(crate) fn read_yaml_as_json(path: &Path) -> Result<String, ArtifactError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ArtifactError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let value: serde_json::Value =
        serde_yaml::from_str(&contents).map_err(|e| ArtifactError::Yaml {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    serde_json::to_string(&value).map_err(|e| ArtifactError::Json {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
