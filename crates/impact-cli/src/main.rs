//! Impact CLI - SDLC AI-augmentation taxonomy and financial impact model.
//!
//! # Usage
//!
//! ```bash
//! # Start a session graph from the built-in taxonomy
//! impact graph init
//!
//! # Set a leaf and roll the values up
//! impact graph set-leaf "Unit Testing" 60
//!
//! # Evaluate the financial model
//! impact evaluate --params params.toml --note "Q3 estimate"
//!
//! # Attach a note to the session
//! impact notes add --submitter lead@example.com --text "Pilot first"
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use config::CliConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    init_tracing(&config.log_filter);

    let format = cli.format;
    let ctx = commands::Context {
        config,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Graph(args) => commands::graph::execute(args, format, &ctx)?,
        Commands::Evaluate(args) => commands::evaluate::execute(args, format, &ctx)?,
        Commands::Params(args) => commands::params::execute(args, format)?,
        Commands::Notes(args) => commands::notes::execute(args, format, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, format, &ctx, cli.config.as_deref())?,
    }

    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` overrides the configured filter.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries command output.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
