//! Tools over `target/manifest.json`
//!
//! Each call re-reads and re-parses the manifest; nothing is cached between
//! invocations.

use serde_json::{json, Value as JsonValue};

use dbtlens_artifacts::{paths, ArtifactError, Manifest};
use dbtlens_core::{Config, Document};

use crate::tool::{no_args_schema, optional_str_arg, required_str_arg, Tool, ToolError};

fn json_document(value: &impl serde::Serialize) -> Result<Document, ToolError> {
    let text = serde_json::to_string(value).map_err(|e| {
        ToolError::Artifact(ArtifactError::Json {
            path: paths::MANIFEST_FILE.to_string(),
            message: e.to_string(),
        })
    })?;

    Ok(Document::new(text).with_source(paths::MANIFEST_FILE))
}

/// `get_project_sources`: the manifest's source definitions
pub struct ProjectSourcesTool {
    config: Config,
}

impl ProjectSourcesTool {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl Tool for ProjectSourcesTool {
    fn name(&self) -> &str {
        "get_project_sources"
    }

    fn description(&self) -> &str {
        "Get the source database information of the dbt project: every source \
         table the project reads from, keyed by its unique id."
    }

    fn args_schema(&self) -> JsonValue {
        no_args_schema()
    }

    fn call(&self, _args: &JsonValue) -> Result<Document, ToolError> {
        let manifest = Manifest::load(&self.config)?;
        let sources = manifest.sources_json()?;
        json_document(&sources)
    }
}

/// `get_models_info`: the selected attributes of one or all models
pub struct ModelsInfoTool {
    config: Config,
}

impl ModelsInfoTool {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl Tool for ModelsInfoTool {
    fn name(&self) -> &str {
        "get_models_info"
    }

    fn description(&self) -> &str {
        "Get model information of the dbt project: database, schema, name, \
         relation name, path, unique id, columns, and dependencies per model. \
         Pass model_id for one specific model; omit it for all models."
    }

    fn args_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "model_id": {
                    "type": "string",
                    "description": "Unique id of one model (e.g., \"model.my_project.my_model\"); omit for all models"
                }
            },
            "required": []
        })
    }

    fn call(&self, args: &JsonValue) -> Result<Document, ToolError> {
        let manifest = Manifest::load(&self.config)?;
        let info = manifest.models_info(optional_str_arg(args, "model_id"))?;
        json_document(&info)
    }
}

/// `get_model_sql`: one model's compiled SQL, verbatim
pub struct ModelSqlTool {
    config: Config,
}

impl ModelSqlTool {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl Tool for ModelSqlTool {
    fn name(&self) -> &str {
        "get_model_sql"
    }

    fn description(&self) -> &str {
        "Get the compiled SQL of a model. You can reason about the relations and \
         columns of a model from the SQL this returns. model_id is the unique id \
         of the model and starts with \"model.\" (e.g., \"model.my_project.my_model\")."
    }

    fn args_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "model_id": {
                    "type": "string",
                    "description": "Unique id of the model whose SQL to fetch"
                }
            },
            "required": ["model_id"]
        })
    }

    fn call(&self, args: &JsonValue) -> Result<Document, ToolError> {
        let model_id = required_str_arg(args, "model_id", self.name())?;
        let manifest = Manifest::load(&self.config)?;
        let sql = manifest.compiled_sql(model_id)?;

        Ok(Document::new(sql).with_source(paths::MANIFEST_FILE))
    }
}
