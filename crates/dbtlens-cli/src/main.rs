use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::json;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dbtlens_agent::{dbt_toolkit, render_system_header};
use dbtlens_artifacts::{LineageGraph, Manifest, RunResultsReader, RunSummary};
use dbtlens_core::Config;

/// dbtlens - inspect a dbt project the way a conversational agent does
#[derive(Parser)]
#[command(name = "dbtlens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// dbt project directory (default: dbtlens.toml, then DBT_PROJECT_DIR)
    #[arg(short, long, global = true)]
    project_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the project's dbt_project.yml as JSON
    Meta,

    /// Show the project's packages.yml as JSON
    Packages,

    /// Show every models/**/schema.yml, concatenated
    Schemas,

    /// Show the manifest's source definitions
    Sources,

    /// Show model information from the manifest
    Models {
        /// Unique id of one model (omit for all models)
        model_id: Option<String>,
    },

    /// Show a model's compiled SQL
    Sql {
        /// Unique id of the model (e.g., model.my_project.my_model)
        model_id: String,
    },

    /// Show the last dbt run's results
    RunResults {
        /// Print the raw run_results.json instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Show upstream and downstream lineage for a model or source
    Lineage {
        /// Model or source (short name or unique_id)
        model: String,
    },

    /// Print the JSON schemas of every agent tool
    Tools,

    /// Print the rendered ReAct system prompt
    Prompt,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if cli.verbose {
        eprintln!(
            "{} {}",
            "Using project directory:".cyan(),
            config.project_dir.display()
        );
    }

    match cli.command {
        Commands::Meta => {
            execute_tool(&config, "fetch_project_info", json!({"fetch_type": "meta"}))
        }
        Commands::Packages => execute_tool(
            &config,
            "fetch_project_info",
            json!({"fetch_type": "packages"}),
        ),
        Commands::Schemas => execute_tool(&config, "fetch_project_schemas", json!({})),
        Commands::Sources => execute_tool(&config, "get_project_sources", json!({})),
        Commands::Models { model_id } => {
            let args = match model_id {
                Some(id) => json!({"model_id": id}),
                None => json!({}),
            };
            execute_tool(&config, "get_models_info", args)
        }
        Commands::Sql { model_id } => {
            execute_tool(&config, "get_model_sql", json!({"model_id": model_id}))
        }
        Commands::RunResults { json: raw } => run_results_command(&config, raw),
        Commands::Lineage { model } => lineage_command(&config, &model, cli.verbose),
        Commands::Tools => tools_command(&config),
        Commands::Prompt => prompt_command(&config),
    }
}

/// Resolve the project directory: flag, then dbtlens.toml, then environment
fn resolve_config(cli: &Cli) -> Result<Config> {
    if let Some(dir) = &cli.project_dir {
        return Ok(Config::new(dir));
    }

    let config_file = Path::new("dbtlens.toml");
    if config_file.exists() {
        if cli.verbose {
            eprintln!("{}", "Loading dbtlens.toml".cyan());
        }
        return Ok(Config::from_file(config_file)?);
    }

    Ok(Config::from_env()?)
}

/// Dispatch one tool call through the registry, like an agent would
fn execute_tool(config: &Config, name: &str, args: serde_json::Value) -> Result<()> {
    let registry = dbt_toolkit(config);
    let doc = registry.execute(name, &args)?;

    println!("{}", doc.text);
    Ok(())
}

/// Run-results command: colored summary by default, raw JSON on request
fn run_results_command(config: &Config, raw: bool) -> Result<()> {
    let reader = RunResultsReader::new(config);

    if raw {
        let doc = reader.document()?;
        println!("{}", doc.text);
        return Ok(());
    }

    let value = reader.load()?;
    let summary = RunSummary::from_value(&value);

    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "dbt Run Results".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    if let Some(generated_at) = summary.generated_at {
        println!("{} {}", "Generated at:".bold(), generated_at);
    }
    if let Some(elapsed) = summary.elapsed_time {
        println!("{} {:.2}s", "Elapsed:".bold(), elapsed);
    }
    println!("{} {}", "Results:".bold(), summary.total);
    println!();

    for (status, count) in &summary.statuses {
        let line = format!("  {}: {}", status, count);
        match status.as_str() {
            "success" | "pass" => println!("{}", line.green()),
            "error" | "fail" => println!("{}", line.red()),
            "skipped" => println!("{}", line.yellow()),
            _ => println!("{}", line),
        }
    }

    println!();
    println!("{}", "=".repeat(60).bright_blue());
    Ok(())
}

/// Lineage command: upstream and downstream of one node
fn lineage_command(config: &Config, model: &str, verbose: bool) -> Result<()> {
    if verbose {
        eprintln!("{}", "Loading manifest...".cyan());
    }

    let manifest = Manifest::load(config)?;
    let graph = LineageGraph::from_manifest(&manifest);

    let node_id = manifest.resolve_node_id(model).ok_or_else(|| {
        anyhow::anyhow!(
            "Model '{}' not found in manifest. Try the full unique_id (e.g., 'model.project.{}')",
            model,
            model
        )
    })?;

    let upstream = graph.upstream(&node_id);
    let downstream = graph.downstream(&node_id);

    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "Lineage".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    println!("{} {}", "Node:".bold(), node_id.green());
    println!();

    println!("{} {}", "Upstream (feeds this node):".bold(), upstream.len());
    for (i, dep) in upstream.iter().enumerate() {
        println!("  {}. {}", i + 1, dep.cyan());
    }
    println!();

    println!(
        "{} {}",
        "Downstream (depends on this node):".bold(),
        downstream.len()
    );
    if downstream.is_empty() {
        println!("{}", "  ✓ No downstream dependencies".green());
    } else {
        for (i, dep) in downstream.iter().enumerate() {
            let label = manifest
                .get_node(dep)
                .map(|n| format!("{} ({})", dep, n.resource_type))
                .unwrap_or_else(|| dep.clone());
            println!("  {}. {}", i + 1, label.yellow());
        }
        println!();
        println!(
            "{}",
            "⚠ Changes to this node may break downstream models!"
                .yellow()
                .bold()
        );
    }

    println!();
    println!("{}", "=".repeat(60).bright_blue());
    Ok(())
}

/// Print every tool schema as pretty JSON
fn tools_command(config: &Config) -> Result<()> {
    let registry = dbt_toolkit(config);
    println!("{}", serde_json::to_string_pretty(&registry.schemas())?);
    Ok(())
}

/// Print the assembled system prompt
fn prompt_command(config: &Config) -> Result<()> {
    let registry = dbt_toolkit(config);
    print!("{}", render_system_header(&registry));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
