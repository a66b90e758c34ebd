//! Params command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use impact_finance::ImpactParameters;

use crate::cli::OutputFormat;
use crate::output::{print_header, print_output, print_success};

/// Arguments for the params command.
#[derive(Args, Debug)]
pub struct ParamsArgs {
    #[command(subcommand)]
    pub command: ParamsCommand,
}

/// Params subcommands.
#[derive(Subcommand, Debug)]
pub enum ParamsCommand {
    /// Print the default parameter record as TOML
    Template(TemplateArgs),

    /// Validate a parameter file and list every violation
    Check(CheckArgs),
}

/// Arguments for template.
#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for check.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Parameter file (TOML)
    pub file: PathBuf,
}

/// One failed rule.
#[derive(Debug, Serialize, Tabled)]
pub struct ViolationRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Problem")]
    pub reason: String,
}

/// Execute the params command.
pub fn execute(args: ParamsArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        ParamsCommand::Template(template) => execute_template(template),
        ParamsCommand::Check(check) => execute_check(&check, format),
    }
}

fn execute_template(args: TemplateArgs) -> Result<()> {
    let toml = ImpactParameters::default().to_toml_string()?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, toml)?;
            print_success(&format!("Wrote {}", path.display()), false);
        }
        None => print!("{toml}"),
    }
    Ok(())
}

fn execute_check(args: &CheckArgs, format: OutputFormat) -> Result<()> {
    let params = ImpactParameters::from_file(&args.file)?;
    let rows: Vec<ViolationRow> = params
        .violations()
        .into_iter()
        .map(|v| ViolationRow {
            field: v.field.to_string(),
            reason: v.reason,
        })
        .collect();

    if rows.is_empty() {
        print_success(&format!("{} is valid", args.file.display()), false);
        return Ok(());
    }

    if format == OutputFormat::Table {
        print_header("Parameter Violations");
    }
    print_output(&rows, format)?;
    anyhow::bail!("{} invalid field(s) in {}", rows.len(), args.file.display())
}
