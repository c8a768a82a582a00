//! Configuration (environment and dbtlens.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the dbt project directory
pub const PROJECT_DIR_ENV: &str = "DBT_PROJECT_DIR";

/// Main configuration structure
///
/// The only required setting is the dbt project directory. It resolves, in
/// order, from an explicit path, a `dbtlens.toml` file, or the
/// `DBT_PROJECT_DIR` environment variable; a missing value is a fatal
/// configuration error, never a silent default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root directory of the dbt project under inspection
    pub project_dir: PathBuf,
}

impl Config {
    /// Create a config for an explicit project directory
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    /// Load the project directory from `DBT_PROJECT_DIR`
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(PROJECT_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Ok(Self::new(dir)),
            _ => Err(ConfigError::MissingProjectDir),
        }
    }

    /// Load config from a dbtlens.toml file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        // Resolve a relative project_dir against the config file's directory
        if config.project_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.project_dir = parent.join(&config.project_dir);
            }
        }

        Ok(config)
    }

    /// Load config from a TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Absolute or as-given path of an artifact relative to the project dir
    pub fn artifact_path(&self, relative: &str) -> PathBuf {
        self.project_dir.join(relative)
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{PROJECT_DIR_ENV} is not set and no project directory was given")]
    MissingProjectDir,

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_project_dir() {
        let config = Config::new("/srv/analytics");
        assert_eq!(config.project_dir, PathBuf::from("/srv/analytics"));
        assert_eq!(
            config.artifact_path("target/manifest.json"),
            PathBuf::from("/srv/analytics/target/manifest.json")
        );
    }

    #[test]
    fn config_from_toml() {
        let config = Config::from_toml("project_dir = \"/data/jaffle_shop\"").unwrap();
        assert_eq!(config.project_dir, PathBuf::from("/data/jaffle_shop"));
    }

    #[test]
    fn config_from_file_resolves_relative_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("dbtlens.toml");
        std::fs::write(&config_path, "project_dir = \"analytics\"").unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(config.project_dir, dir.path().join("analytics"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::from_toml("project_dir = [").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
