//! CLI command implementations.

pub mod config;
pub mod evaluate;
pub mod graph;
pub mod notes;
pub mod params;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use evaluate::EvaluateArgs;
pub use graph::GraphArgs;
pub use notes::NotesArgs;
pub use params::ParamsArgs;

use std::path::Path;

use impact_graph::ProcessGraph;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Settings shared by every command.
#[derive(Debug)]
pub struct Context {
    /// Resolved configuration.
    pub config: CliConfig,
    /// Suppress non-essential output.
    pub quiet: bool,
}

/// Reads the session graph.
pub fn load_graph(ctx: &Context) -> anyhow::Result<ProcessGraph> {
    let path = &ctx.config.graph_path;
    if !path.exists() {
        return Err(CliError::GraphMissing(path.clone()).into());
    }
    let json = std::fs::read_to_string(path)?;
    Ok(ProcessGraph::from_json(&json)?)
}

/// Writes the session graph through a temporary sibling file.
pub fn save_graph(ctx: &Context, graph: &ProcessGraph) -> anyhow::Result<()> {
    write_atomic(&ctx.config.graph_path, &graph.to_json()?)?;
    tracing::debug!(
        path = %ctx.config.graph_path.display(),
        nodes = graph.node_count(),
        "Graph saved"
    );
    Ok(())
}

fn write_atomic(path: &Path, content: &str) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    std::fs::write(&tmp, content)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
