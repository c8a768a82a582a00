//! Last dbt run results (`target/run_results.json`)

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use dbtlens_core::{Config, Document};

use crate::error::ArtifactError;
use crate::paths::RUN_RESULTS_FILE;

/// Reads the result of the last dbt run
#[derive(Debug, Clone)]
pub struct RunResultsReader {
    config: Config,
}

impl RunResultsReader {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Load `target/run_results.json` as raw JSON.
    ///
    /// dbt revises the run-results schema between versions, so the payload
    /// stays untyped and is re-serialized verbatim.
    pub fn load(&self) -> Result<Value, ArtifactError> {
        let path = self.config.artifact_path(RUN_RESULTS_FILE);
        if !path.exists() {
            return Err(ArtifactError::FileNotFound {
                kind: "run results",
                file: RUN_RESULTS_FILE.to_string(),
                dir: self.config.project_dir.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| ArtifactError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&contents).map_err(|e| ArtifactError::Json {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// The run results as a text document wrapping their JSON form
    pub fn document(&self) -> Result<Document, ArtifactError> {
        let value = self.load()?;
        let text = serde_json::to_string(&value).map_err(|e| ArtifactError::Json {
            path: RUN_RESULTS_FILE.to_string(),
            message: e.to_string(),
        })?;

        Ok(Document::new(text).with_source(RUN_RESULTS_FILE))
    }
}

/// Human-oriented digest of a run-results payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// When dbt wrote the artifact
    pub generated_at: Option<DateTime<Utc>>,

    /// Wall-clock seconds for the whole run
    pub elapsed_time: Option<f64>,

    /// Result count per status (success, error, skipped, ...)
    pub statuses: BTreeMap<String, usize>,

    /// Total number of results
    pub total: usize,
}

impl RunSummary {
    pub fn from_value(value: &Value) -> Self {
        let generated_at = value
            .pointer("/metadata/generated_at")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let elapsed_time = value.get("elapsed_time").and_then(Value::as_f64);

        let mut statuses: BTreeMap<String, usize> = BTreeMap::new();
        let mut total = 0;
        if let Some(results) = value.get("results").and_then(Value::as_array) {
            total = results.len();
            for result in results {
                let status = result
                    .get("status")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                *statuses.entry(status.to_string()).or_insert(0) += 1;
            }
        }

        Self {
            generated_at,
            elapsed_time,
            statuses,
            total,
        }
    }
}
