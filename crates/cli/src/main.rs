//! `flowforge` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`    — start the API server.
//! - `validate` — validate a workflow graph JSON file and print its
//!                execution order.
//! - `run`      — execute a workflow graph once and print the finished log.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use engine::{execution_order, validate_graph, ExecutionEngine, RunStatus, WorkflowGraph};
use nodes::HandlerRegistry;

#[derive(Parser)]
#[command(
    name = "flowforge",
    about = "Visual workflow automation engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
    },
    /// Validate a workflow graph JSON file.
    Validate {
        /// Path to the graph JSON file.
        path: PathBuf,
    },
    /// Execute a workflow graph once and print the finished log.
    Run {
        /// Path to the graph JSON file.
        path: PathBuf,
        /// Trigger input as inline JSON.
        #[arg(long, default_value = "{}")]
        input: String,
    },
}

fn load_graph(path: &Path) -> anyhow::Result<WorkflowGraph> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read file {}: {e}", path.display()))?;
    let graph =
        serde_json::from_str(&content).map_err(|e| anyhow::anyhow!("invalid graph JSON: {e}"))?;
    Ok(graph)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind } => {
            info!("starting API server on {bind}");
            let runner = Arc::new(ExecutionEngine::new(Arc::new(HandlerRegistry::builtin())));
            api::serve(&bind, api::AppState::new(runner)).await?;
        }
        Command::Validate { path } => {
            let graph = load_graph(&path)?;
            match validate_graph(&graph).and_then(|_| execution_order(&graph)) {
                Ok(order) => println!("workflow is valid; execution order: {order:?}"),
                Err(e) => {
                    eprintln!("validation failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Command::Run { path, input } => {
            let graph = load_graph(&path)?;
            let input: serde_json::Value = serde_json::from_str(&input)
                .map_err(|e| anyhow::anyhow!("invalid --input JSON: {e}"))?;

            let runner = ExecutionEngine::new(Arc::new(HandlerRegistry::builtin()));
            let workflow_id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("workflow")
                .to_owned();

            let log = runner.execute(&workflow_id, &graph, input).await;
            println!("{}", serde_json::to_string_pretty(&log)?);

            if log.status == RunStatus::Failed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
