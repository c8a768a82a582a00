//! Tool over `target/run_results.json`

use serde_json::Value as JsonValue;

use dbtlens_artifacts::RunResultsReader;
use dbtlens_core::{Config, Document};

use crate::tool::{no_args_schema, Tool, ToolError};

/// `get_run_result`: the last dbt run's results, re-serialized as JSON
pub struct RunResultTool {
    reader: RunResultsReader,
}

impl RunResultTool {
    pub fn new(config: &Config) -> Self {
        Self {
            reader: RunResultsReader::new(config),
        }
    }
}

impl Tool for RunResultTool {
    fn name(&self) -> &str {
        "get_run_result"
    }

    fn description(&self) -> &str {
        "Get the result of the last dbt run: per-model status, timing, and \
         messages from target/run_results.json."
    }

    fn args_schema(&self) -> JsonValue {
        no_args_schema()
    }

    fn call(&self, _args: &JsonValue) -> Result<Document, ToolError> {
        Ok(self.reader.document()?)
    }
}
