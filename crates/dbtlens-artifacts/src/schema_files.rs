//! Recursive discovery of per-model `schema.yml` files

use std::path::PathBuf;

use walkdir::WalkDir;

use dbtlens_core::{Config, Document};

use crate::error::ArtifactError;
use crate::paths::{MODELS_DIR, SCHEMA_FILE_NAME};
use crate::project::read_yaml_as_json;

/// Discovers `models/**/schema.yml` files and wraps each as a document
#[derive(Debug, Clone)]
pub struct SchemaScanner {
    config: Config,
}

impl SchemaScanner {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Scan for schema files, one document per file, in path order.
    ///
    /// A project with no `models/` directory or no schema files yields an
    /// empty vec, not an error. Each document's text is tagged with the
    /// file's path relative to the project directory.
    pub fn scan(&self) -> Result<Vec<Document>, ArtifactError> {
        let models_dir = self.config.artifact_path(MODELS_DIR);
        if !models_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&models_dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file() && entry.file_name() == SCHEMA_FILE_NAME)
            .map(|entry| entry.into_path())
            .collect();
        files.sort();

        tracing::debug!(count = files.len(), "discovered schema files");

        let mut docs = Vec::with_capacity(files.len());
        for file in files {
            let relative = file
                .strip_prefix(&self.config.project_dir)
                .unwrap_or(&file)
                .display()
                .to_string();

            let json = read_yaml_as_json(&file)?;
            let text = format!("- Schema {}: {}\n", relative, json);
            docs.push(Document::new(text).with_source(relative));
        }

        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STAGING_SCHEMA: &str = "version: 2\nmodels:\n  - name: stg_orders\n";
    const MARTS_SCHEMA: &str = "version: 2\nmodels:\n  - name: orders\n";

    #[test]
    fn scan_finds_nested_schema_files_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("models/staging")).unwrap();
        std::fs::create_dir_all(dir.path().join("models/marts")).unwrap();
        std::fs::write(dir.path().join("models/staging/schema.yml"), STAGING_SCHEMA).unwrap();
        std::fs::write(dir.path().join("models/marts/schema.yml"), MARTS_SCHEMA).unwrap();
        // Files not named schema.yml are ignored
        std::fs::write(dir.path().join("models/staging/stg_orders.sql"), "select 1").unwrap();

        let docs = SchemaScanner::new(&Config::new(dir.path())).scan().unwrap();

        assert_eq!(docs.len(), 2);
        assert!(docs[0].text.starts_with("- Schema models/marts/schema.yml: "));
        assert!(docs[1].text.starts_with("- Schema models/staging/schema.yml: "));
        assert!(docs.iter().all(|d| d.text.ends_with('\n')));
    }

    #[test]
    fn scan_is_silently_empty_without_models_dir() {
        let dir = tempfile::tempdir().unwrap();

        let docs = SchemaScanner::new(&Config::new(dir.path())).scan().unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn scan_is_silently_empty_with_no_schema_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("models")).unwrap();
        std::fs::write(dir.path().join("models/orders.sql"), "select 1").unwrap();

        let docs = SchemaScanner::new(&Config::new(dir.path())).scan().unwrap();
        assert!(docs.is_empty());
    }
}
