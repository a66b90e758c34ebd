//! Config command implementation.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::config::default_path;
use crate::output::{print_header, print_info, print_output, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the resolved configuration
    Show,

    /// Show configuration file location
    Path,
}

/// Execute the config command.
pub fn execute(
    args: ConfigArgs,
    format: OutputFormat,
    ctx: &Context,
    explicit: Option<&Path>,
) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(format, ctx),
        ConfigCommand::Path => execute_path(explicit),
    }
}

fn execute_show(format: OutputFormat, ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Minimal => print!("{}", config.to_toml_string()?),
        _ => {
            let rows = vec![
                KeyValue::new("graph_path", config.graph_path.display().to_string()),
                KeyValue::new("notes_path", config.notes_path.display().to_string()),
                KeyValue::new("log_filter", config.log_filter.as_str()),
                KeyValue::new("aggregation_order", config.aggregation_order.to_string()),
                KeyValue::new("irr_lower_bound", config.irr_lower_bound.to_string()),
                KeyValue::new("irr_upper_bound", config.irr_upper_bound.to_string()),
                KeyValue::new("irr_tolerance", config.irr_tolerance.to_string()),
            ];
            if format == OutputFormat::Table {
                print_header("Current Configuration");
            }
            print_output(&rows, format)?;
        }
    }
    Ok(())
}

fn execute_path(explicit: Option<&Path>) -> Result<()> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(default_path)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}
