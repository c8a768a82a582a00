//! Tools over the project's YAML files

use serde_json::{json, Value as JsonValue};

use dbtlens_artifacts::{ProjectReader, SchemaScanner};
use dbtlens_core::{Config, Document};

use crate::tool::{no_args_schema, optional_str_arg, Tool, ToolError};

/// `fetch_project_info`: project meta and/or external packages
pub struct ProjectInfoTool {
    reader: ProjectReader,
}

impl ProjectInfoTool {
    pub fn new(config: &Config) -> Self {
        Self {
            reader: ProjectReader::new(config),
        }
    }
}

impl Tool for ProjectInfoTool {
    fn name(&self) -> &str {
        "fetch_project_info"
    }

    fn description(&self) -> &str {
        "Fetch information about the dbt project. Pass fetch_type \"meta\" for basic \
         project information (from dbt_project.yml), \"packages\" for the external \
         packages the project installs (from packages.yml), or omit it to fetch both."
    }

    fn args_schema(&self) -> JsonValue {
        json!({
            "type": "object",
            "properties": {
                "fetch_type": {
                    "type": "string",
                    "description": "Which information to fetch; omit for both",
                    "enum": ["meta", "packages"]
                }
            },
            "required": []
        })
    }

    fn call(&self, args: &JsonValue) -> Result<Document, ToolError> {
        let docs = match optional_str_arg(args, "fetch_type") {
            Some("meta") => vec![self.reader.meta()?],
            Some("packages") => vec![self.reader.packages()?],
            _ => vec![self.reader.meta()?, self.reader.packages()?],
        };

        let text = docs
            .iter()
            .map(|doc| doc.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(Document::new(text))
    }
}

/// `fetch_project_schemas`: every `models/**/schema.yml`, concatenated
pub struct ProjectSchemasTool {
    scanner: SchemaScanner,
}

impl ProjectSchemasTool {
    pub fn new(config: &Config) -> Self {
        Self {
            scanner: SchemaScanner::new(config),
        }
    }
}

impl Tool for ProjectSchemasTool {
    fn name(&self) -> &str {
        "fetch_project_schemas"
    }

    fn description(&self) -> &str {
        "Fetch the schema files of the dbt project. Call this when you need the \
         databases, tables, and columns the project declares in its \
         models/**/schema.yml files."
    }

    fn args_schema(&self) -> JsonValue {
        no_args_schema()
    }

    fn call(&self, _args: &JsonValue) -> Result<Document, ToolError> {
        let docs = self.scanner.scan()?;
        Ok(Document::joined(&docs))
    }
}
