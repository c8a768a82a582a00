//! Test fixture: a throwaway dbt project on disk
//!
//! Builds the artifact files the tools read (`dbt_project.yml`,
//! `packages.yml`, schema files, `target/manifest.json`,
//! `target/run_results.json`) under a temp directory, piecemeal, so each
//! test creates exactly the files it needs.

use std::path::Path;

use dbtlens_core::Config;

pub const PROJECT_YML: &str = "\
name: jaffle_shop
version: '1.0.0'
profile: jaffle_shop
model-paths: ['models']
";

pub const PACKAGES_YML: &str = "\
packages:
  - package: dbt-labs/dbt_utils
    version: 1.1.1
";

pub const MANIFEST_JSON: &str = r#"{
    "metadata": {
        "dbt_schema_version": "https://schemas.getdbt.com/dbt/manifest/v11.json",
        "dbt_version": "1.7.0",
        "generated_at": "2024-03-01T10:00:00.000000Z",
        "invocation_id": "fixture-invocation"
    },
    "nodes": {
        "model.my_project.my_model": {
            "unique_id": "model.my_project.my_model",
            "name": "my_model",
            "resource_type": "model",
            "package_name": "my_project",
            "path": "my_model.sql",
            "original_file_path": "models/my_model.sql",
            "database": "analytics",
            "schema": "main",
            "relation_name": "\"analytics\".\"main\".\"my_model\"",
            "columns": {
                "id": {"name": "id", "description": "primary key"},
                "amount": {"name": "amount", "description": ""}
            },
            "depends_on": {"nodes": ["source.my_project.raw.orders"]},
            "compiled_code": "select id, amount from \"analytics\".\"raw\".\"orders\""
        },
        "test.my_project.not_null_my_model_id": {
            "unique_id": "test.my_project.not_null_my_model_id",
            "name": "not_null_my_model_id",
            "resource_type": "test",
            "package_name": "my_project",
            "path": "not_null_my_model_id.sql"
        }
    },
    "sources": {
        "source.my_project.raw.orders": {
            "unique_id": "source.my_project.raw.orders",
            "source_name": "raw",
            "name": "orders",
            "database": "analytics",
            "schema": "raw"
        }
    },
    "parent_map": {
        "model.my_project.my_model": ["source.my_project.raw.orders"]
    },
    "child_map": {
        "source.my_project.raw.orders": ["model.my_project.my_model"]
    }
}"#;

pub const RUN_RESULTS_JSON: &str = r#"{
    "metadata": {
        "dbt_version": "1.7.0",
        "generated_at": "2024-03-01T10:15:00.000000Z"
    },
    "elapsed_time": 2.5,
    "results": [
        {"unique_id": "model.my_project.my_model", "status": "success"}
    ]
}"#;

/// A dbt project directory that exists only for one test
pub struct DbtProjectFixture {
    dir: tempfile::TempDir,
}

impl DbtProjectFixture {
    /// An empty project directory with nothing in it
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// A project with every artifact the tools read
    pub fn complete() -> Self {
        let fixture = Self::empty();
        fixture
            .with_file("dbt_project.yml", PROJECT_YML)
            .with_file("packages.yml", PACKAGES_YML)
            .with_file(
                "models/staging/schema.yml",
                "version: 2\nmodels:\n  - name: stg_orders\n",
            )
            .with_file(
                "models/marts/schema.yml",
                "version: 2\nmodels:\n  - name: my_model\n",
            )
            .with_file("target/manifest.json", MANIFEST_JSON)
            .with_file("target/run_results.json", RUN_RESULTS_JSON)
    }

    /// Write one file under the project directory, creating parents
    pub fn with_file(self, relative: &str, contents: &str) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> Config {
        Config::new(self.dir.path())
    }
}
