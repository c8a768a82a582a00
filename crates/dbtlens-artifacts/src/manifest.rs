//! dbt manifest.json parsing
//!
//! Parses the dbt-generated `target/manifest.json` into a typed subset and
//! extracts the source, model, and compiled-SQL information the tools expose.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use dbtlens_core::Config;

use crate::error::ArtifactError;
use crate::paths::MANIFEST_FILE;

/// dbt manifest.json structure (subset of fields we care about)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Metadata about the manifest
    pub metadata: ManifestMetadata,

    /// Model, test, seed, and snapshot nodes
    pub nodes: HashMap<String, ManifestNode>,

    /// Source definitions
    pub sources: HashMap<String, ManifestSource>,

    /// Parent map (node -> list of parent nodes)
    #[serde(default)]
    pub parent_map: HashMap<String, Vec<String>>,

    /// Child map (node -> list of child nodes)
    #[serde(default)]
    pub child_map: HashMap<String, Vec<String>>,
}

impl Manifest {
    /// Load the manifest from a project's `target/manifest.json`
    pub fn load(config: &Config) -> Result<Self, ArtifactError> {
        let path = config.artifact_path(MANIFEST_FILE);
        if !path.exists() {
            return Err(ArtifactError::FileNotFound {
                kind: "manifest",
                file: MANIFEST_FILE.to_string(),
                dir: config.project_dir.display().to_string(),
            });
        }
        Self::from_file(&path)
    }

    /// Load manifest from a file path
    pub fn from_file(path: &Path) -> Result<Self, ArtifactError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ArtifactError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&contents).map_err(|e| ArtifactError::Json {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Parse manifest from a JSON string
    pub fn from_str(json: &str) -> Result<Self, ArtifactError> {
        serde_json::from_str(json).map_err(|e| ArtifactError::Json {
            path: MANIFEST_FILE.to_string(),
            message: e.to_string(),
        })
    }

    /// All model nodes, keyed by unique_id (filters out tests, seeds, etc.)
    pub fn models(&self) -> BTreeMap<&str, &ManifestNode> {
        self.nodes
            .iter()
            .filter(|(id, _)| id.starts_with("model"))
            .map(|(id, node)| (id.as_str(), node))
            .collect()
    }

    /// Get a specific node by unique_id
    pub fn get_node(&self, unique_id: &str) -> Option<&ManifestNode> {
        self.nodes.get(unique_id)
    }

    /// Get a specific source by unique_id
    pub fn get_source(&self, unique_id: &str) -> Option<&ManifestSource> {
        self.sources.get(unique_id)
    }

    /// The selected-attribute projection of one model
    pub fn model_info(&self, model_id: &str) -> Result<ModelInfo, ArtifactError> {
        self.models()
            .get(model_id)
            .map(|node| ModelInfo::from_node(node))
            .ok_or_else(|| ArtifactError::UnknownModel(model_id.to_string()))
    }

    /// Projections for every model, or for one model when `model_id` is given.
    ///
    /// An unknown `model_id` is an error; with no id the map covers all
    /// nodes whose unique_id starts with `model`.
    pub fn models_info(
        &self,
        model_id: Option<&str>,
    ) -> Result<BTreeMap<String, ModelInfo>, ArtifactError> {
        match model_id {
            Some(id) => {
                let info = self.model_info(id)?;
                Ok(BTreeMap::from([(id.to_string(), info)]))
            }
            None => Ok(self
                .models()
                .into_iter()
                .map(|(id, node)| (id.to_string(), ModelInfo::from_node(node)))
                .collect()),
        }
    }

    /// The compiled SQL of a model, exactly as the manifest stores it
    pub fn compiled_sql(&self, model_id: &str) -> Result<&str, ArtifactError> {
        let node = self
            .get_node(model_id)
            .ok_or_else(|| ArtifactError::UnknownModel(model_id.to_string()))?;

        node.compiled_code
            .as_deref()
            .ok_or_else(|| ArtifactError::MissingCompiledCode(model_id.to_string()))
    }

    /// All sources as a JSON object keyed by unique_id
    pub fn sources_json(&self) -> Result<serde_json::Value, ArtifactError> {
        let sources: BTreeMap<&str, &ManifestSource> = self
            .sources
            .iter()
            .map(|(id, source)| (id.as_str(), source))
            .collect();

        serde_json::to_value(sources).map_err(|e| ArtifactError::Json {
            path: MANIFEST_FILE.to_string(),
            message: e.to_string(),
        })
    }

    /// Resolve a model or source to its unique_id, accepting short names
    pub fn resolve_node_id(&self, name: &str) -> Option<String> {
        if name.contains('.') && (self.get_node(name).is_some() || self.get_source(name).is_some())
        {
            return Some(name.to_string());
        }

        for (node_id, node) in self.models() {
            if node.name == name {
                return Some(node_id.to_string());
            }
        }

        for (source_id, source) in &self.sources {
            if source.name == name {
                return Some(source_id.clone());
            }
        }

        None
    }
}

/// Manifest metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestMetadata {
    pub dbt_schema_version: String,
    pub dbt_version: String,
    pub generated_at: String,
    #[serde(default)]
    pub invocation_id: Option<String>,
}

/// A node in the manifest (model, test, snapshot, etc.)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestNode {
    /// Unique identifier (e.g., "model.my_project.users")
    pub unique_id: String,

    /// Node name (e.g., "users")
    pub name: String,

    /// Resource type (model, test, snapshot, etc.)
    pub resource_type: String,

    /// Package name
    pub package_name: String,

    /// Relative path to the SQL file
    pub path: String,

    /// Original file path
    #[serde(default)]
    pub original_file_path: String,

    /// Database name
    #[serde(default)]
    pub database: Option<String>,

    /// Schema name
    #[serde(default)]
    pub schema: Option<String>,

    /// Alias (output table name)
    #[serde(default)]
    pub alias: Option<String>,

    /// Fully quoted warehouse relation (e.g., `"db"."schema"."users"`)
    #[serde(default)]
    pub relation_name: Option<String>,

    /// Node configuration
    #[serde(default)]
    pub config: NodeConfig,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Column definitions
    #[serde(default)]
    pub columns: BTreeMap<String, ColumnDefinition>,

    /// Dependencies
    #[serde(default)]
    pub depends_on: DependsOn,

    /// SQL after dbt compiled refs and macros away
    #[serde(default)]
    pub compiled_code: Option<String>,

    /// SQL as written in the model file
    #[serde(default)]
    pub raw_code: Option<String>,
}

/// Node configuration (from dbt_project.yml or model config)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Whether the node is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Materialization type
    #[serde(default)]
    pub materialized: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            materialized: None,
        }
    }
}

/// Column definition from manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Data type (if declared)
    #[serde(default)]
    pub data_type: Option<String>,
}

/// Dependencies structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependsOn {
    /// unique_ids of nodes this node depends on
    #[serde(default)]
    pub nodes: Vec<String>,

    /// Macros this node invokes
    #[serde(default)]
    pub macros: Vec<String>,
}

/// A source in the manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestSource {
    /// Unique identifier (e.g., "source.my_project.raw.users")
    pub unique_id: String,

    /// Source name (e.g., "raw")
    pub source_name: String,

    /// Table name (e.g., "users")
    pub name: String,

    /// Database name
    #[serde(default)]
    pub database: Option<String>,

    /// Schema name
    pub schema: String,

    /// Identifier (actual table name)
    #[serde(default)]
    pub identifier: Option<String>,

    /// Column definitions
    #[serde(default)]
    pub columns: BTreeMap<String, ColumnDefinition>,
}

/// The model attributes `get_models_info` exposes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub database: Option<String>,
    pub schema: Option<String>,
    pub name: String,
    pub relation_name: Option<String>,
    pub path: String,
    pub unique_id: String,
    pub columns: BTreeMap<String, ColumnDefinition>,
    pub depends_on: DependsOn,
}

impl ModelInfo {
    pub fn from_node(node: &ManifestNode) -> Self {
        Self {
            database: node.database.clone(),
            schema: node.schema.clone(),
            name: node.name.clone(),
            relation_name: node.relation_name.clone(),
            path: node.path.clone(),
            unique_id: node.unique_id.clone(),
            columns: node.columns.clone(),
            depends_on: node.depends_on.clone(),
        }
    }
}
