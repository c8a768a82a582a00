//! Gathering the dbt tools into a bundle for an agent runtime

use tracing::info;

use dbtlens_core::{Config, ConfigError};
use dbtlens_tools::{
    ModelSqlTool, ModelsInfoTool, ProjectInfoTool, ProjectSchemasTool, ProjectSourcesTool,
    RunResultTool, ToolRegistry,
};

use crate::prompt::render_system_header;

/// Build the full dbt tool registry for a project
pub fn dbt_toolkit(config: &Config) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(ProjectInfoTool::new(config)));
    registry.register(Box::new(ProjectSchemasTool::new(config)));
    registry.register(Box::new(ProjectSourcesTool::new(config)));
    registry.register(Box::new(ModelsInfoTool::new(config)));
    registry.register(Box::new(ModelSqlTool::new(config)));
    registry.register(Box::new(RunResultTool::new(config)));

    info!(
        tools = registry.len(),
        project_dir = %config.project_dir.display(),
        "assembled dbt toolkit"
    );

    registry
}

/// Everything a pre-existing agent runtime needs: the tools and the
/// system prompt that describes them.
pub struct AgentBundle {
    pub registry: ToolRegistry,
    pub system_prompt: String,
}

impl AgentBundle {
    /// Assemble the bundle for an explicitly configured project
    pub fn assemble(config: &Config) -> Self {
        let registry = dbt_toolkit(config);
        let system_prompt = render_system_header(&registry);

        Self {
            registry,
            system_prompt,
        }
    }

    /// Assemble from `DBT_PROJECT_DIR`; an unset variable is a fatal
    /// configuration error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Config::from_env()?;
        Ok(Self::assemble(&config))
    }
}
