//! Graph command implementation.
//!
//! Edits the session's process graph. Every subcommand loads the snapshot
//! from the configured path and writes it back after a successful change.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use impact_graph::{AggregationReport, ProcessGraph};

use crate::cli::OutputFormat;
use crate::commands::{load_graph, save_graph, Context};
use crate::error::CliError;
use crate::output::{print_header, print_info, print_output, print_success, KeyValue};

/// Arguments for the graph command.
#[derive(Args, Debug)]
pub struct GraphArgs {
    #[command(subcommand)]
    pub command: GraphCommand,
}

/// Graph subcommands.
#[derive(Subcommand, Debug)]
pub enum GraphCommand {
    /// Create the session graph from the built-in SDLC taxonomy
    Init(InitArgs),

    /// List nodes with their levels and values
    Show(ShowArgs),

    /// Print or write the graph snapshot as JSON
    Export(ExportArgs),

    /// Replace the session graph with a snapshot file
    Import(ImportArgs),

    /// Add a node under an existing parent
    AddNode(AddNodeArgs),

    /// Add a parentless node at level 0
    AddRoot(AddRootArgs),

    /// Delete a node and its edges
    DeleteNode(NodeArgs),

    /// Rename a node, keeping its edges and value
    RenameNode(RenameArgs),

    /// Add a parent -> child edge
    AddEdge(EdgeArgs),

    /// Delete a parent -> child edge
    DeleteEdge(EdgeArgs),

    /// Set a node's AI percentage and roll values up
    SetLeaf(SetLeafArgs),

    /// Recompute every non-leaf node from its children
    Recompute,
}

/// Arguments for init.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing session graph
    #[arg(long)]
    pub force: bool,
}

/// Arguments for show.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Only list nodes at or below this level
    #[arg(long)]
    pub max_level: Option<u32>,
}

/// Arguments for export.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for import.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Snapshot file (versioned, adjacency-map or record-list layout)
    pub file: PathBuf,

    /// Recompute after import
    #[arg(long)]
    pub recompute: bool,
}

/// Arguments for add-node.
#[derive(Args, Debug)]
pub struct AddNodeArgs {
    /// New node id
    pub id: String,

    /// Existing parent id
    #[arg(short, long)]
    pub parent: String,

    /// Recompute after the change
    #[arg(long)]
    pub recompute: bool,
}

/// Arguments for add-root.
#[derive(Args, Debug)]
pub struct AddRootArgs {
    /// New node id
    pub id: String,
}

/// Arguments naming one node.
#[derive(Args, Debug)]
pub struct NodeArgs {
    /// Node id
    pub id: String,

    /// Recompute after the change
    #[arg(long)]
    pub recompute: bool,
}

/// Arguments for rename-node.
#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Current id
    pub old_id: String,

    /// New id
    pub new_id: String,
}

/// Arguments naming one edge.
#[derive(Args, Debug)]
pub struct EdgeArgs {
    /// Parent id
    pub source: String,

    /// Child id
    pub target: String,

    /// Recompute after the change
    #[arg(long)]
    pub recompute: bool,
}

/// Arguments for set-leaf.
#[derive(Args, Debug)]
pub struct SetLeafArgs {
    /// Node id
    pub id: String,

    /// AI percentage in [0, 100]
    pub value: f64,

    /// Keep ancestors unchanged
    #[arg(long)]
    pub no_recompute: bool,
}

/// One node in the show listing.
#[derive(Debug, Serialize, Tabled)]
pub struct NodeRow {
    #[tabled(rename = "Node")]
    pub id: String,
    #[tabled(rename = "Level")]
    pub level: u32,
    #[tabled(rename = "AI %", display_with = "display_percent")]
    pub ai_percentage: f64,
    #[tabled(rename = "Children")]
    pub children: usize,
}

fn display_percent(value: &f64) -> String {
    format!("{value:.2}")
}

/// Execute the graph command.
pub fn execute(args: GraphArgs, format: OutputFormat, ctx: &Context) -> Result<()> {
    match args.command {
        GraphCommand::Init(init) => execute_init(&init, ctx),
        GraphCommand::Show(show) => execute_show(&show, format, ctx),
        GraphCommand::Export(export) => execute_export(export, ctx),
        GraphCommand::Import(import) => execute_import(&import, ctx),
        GraphCommand::Recompute => {
            let mut graph = load_graph(ctx)?;
            let report = recompute(&mut graph, ctx)?;
            save_graph(ctx, &graph)?;
            print_report(&report, format)
        }
        GraphCommand::AddNode(a) => mutate(ctx, a.recompute, |graph| {
            graph.add_node(a.id.as_str(), &a.parent)?;
            Ok(format!("Added {} under {}", a.id, a.parent))
        }),
        GraphCommand::AddRoot(a) => mutate(ctx, false, |graph| {
            graph.add_root(a.id.as_str())?;
            Ok(format!("Added root {}", a.id))
        }),
        GraphCommand::DeleteNode(a) => mutate(ctx, a.recompute, |graph| {
            graph.delete_node(&a.id)?;
            Ok(format!("Deleted {}", a.id))
        }),
        GraphCommand::RenameNode(a) => mutate(ctx, false, |graph| {
            graph.rename_node(&a.old_id, a.new_id.as_str())?;
            Ok(format!("Renamed {} to {}", a.old_id, a.new_id))
        }),
        GraphCommand::AddEdge(a) => mutate(ctx, a.recompute, |graph| {
            Ok(if graph.add_edge(&a.source, &a.target)? {
                format!("Linked {} -> {}", a.source, a.target)
            } else {
                format!("Edge {} -> {} already present", a.source, a.target)
            })
        }),
        GraphCommand::DeleteEdge(a) => mutate(ctx, a.recompute, |graph| {
            graph.delete_edge(&a.source, &a.target)?;
            Ok(format!("Unlinked {} -> {}", a.source, a.target))
        }),
        GraphCommand::SetLeaf(a) => mutate(ctx, !a.no_recompute, |graph| {
            graph.set_leaf_value(&a.id, a.value)?;
            Ok(format!("Set {} to {:.2}%", a.id, a.value))
        }),
    }
}

/// Create the seeded session graph.
fn execute_init(args: &InitArgs, ctx: &Context) -> Result<()> {
    let path = &ctx.config.graph_path;
    if path.exists() && !args.force {
        return Err(CliError::GraphExists(path.clone()).into());
    }

    let graph = ProcessGraph::sdlc_seed()?;
    save_graph(ctx, &graph)?;

    print_success(
        &format!(
            "Created {} ({} nodes, {} edges)",
            path.display(),
            graph.node_count(),
            graph.edge_count()
        ),
        ctx.quiet,
    );
    Ok(())
}

/// List nodes ordered by level, then id.
fn execute_show(args: &ShowArgs, format: OutputFormat, ctx: &Context) -> Result<()> {
    let graph = load_graph(ctx)?;
    if graph.is_empty() && format == OutputFormat::Table {
        print_info("Graph has no nodes");
        return Ok(());
    }

    let mut rows = Vec::with_capacity(graph.node_count());
    for node in graph.nodes() {
        if args.max_level.is_some_and(|max| node.level > max) {
            continue;
        }
        rows.push(NodeRow {
            id: node.id.clone(),
            level: node.level,
            ai_percentage: node.ai_percentage,
            children: graph.successors(&node.id)?.len(),
        });
    }
    rows.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.id.cmp(&b.id)));

    match format {
        OutputFormat::Table => {
            print_header("Process Graph");
            print_output(&rows, format)?;
        }
        OutputFormat::Minimal => {
            for root in graph.roots() {
                println!("{}={:.2}", root.id, root.ai_percentage);
            }
        }
        _ => print_output(&rows, format)?,
    }
    Ok(())
}

/// Print or write the snapshot.
fn execute_export(args: ExportArgs, ctx: &Context) -> Result<()> {
    let json = load_graph(ctx)?.to_json()?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, json)?;
            print_success(&format!("Exported to {}", path.display()), ctx.quiet);
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Replace the session graph with a validated snapshot.
fn execute_import(args: &ImportArgs, ctx: &Context) -> Result<()> {
    let json = std::fs::read_to_string(&args.file)?;
    let mut graph = ProcessGraph::from_json(&json)?;
    if args.recompute {
        recompute(&mut graph, ctx)?;
    }
    save_graph(ctx, &graph)?;

    print_success(
        &format!(
            "Imported {} ({} nodes, {} edges)",
            args.file.display(),
            graph.node_count(),
            graph.edge_count()
        ),
        ctx.quiet,
    );
    Ok(())
}

/// Apply one change, optionally roll up, then save.
fn mutate<F>(ctx: &Context, rollup: bool, change: F) -> Result<()>
where
    F: FnOnce(&mut ProcessGraph) -> Result<String>,
{
    let mut graph = load_graph(ctx)?;
    let message = change(&mut graph)?;
    if rollup {
        recompute(&mut graph, ctx)?;
    }
    save_graph(ctx, &graph)?;
    print_success(&message, ctx.quiet);
    Ok(())
}

fn recompute(graph: &mut ProcessGraph, ctx: &Context) -> Result<AggregationReport> {
    let aggregator = ctx.config.aggregator();
    let report = aggregator.recompute_all(graph)?;
    tracing::info!(
        order = %aggregator.order(),
        recomputed = report.recomputed,
        changed = report.changed,
        "Graph recomputed"
    );
    Ok(report)
}

fn print_report(report: &AggregationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Minimal => println!("{}", report.changed),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.serialize(report)?;
            wtr.flush()?;
        }
        OutputFormat::Table => {
            print_info("Recompute complete");
            let rows = vec![
                KeyValue::new("Visited", report.visited.to_string()),
                KeyValue::new("Recomputed", report.recomputed.to_string()),
                KeyValue::new("Changed", report.changed.to_string()),
            ];
            print_output(&rows, format)?;
        }
    }
    Ok(())
}
