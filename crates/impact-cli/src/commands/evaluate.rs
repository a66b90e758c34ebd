//! Evaluate command implementation.
//!
//! Runs the financial impact model and prints the export row, the cost and
//! savings breakdowns and the yearly ROI trend.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use impact_finance::prelude::*;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_currency, format_percent, print_header, print_output, KeyValue};

/// Arguments for the evaluate command.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Parameter file (TOML). Missing fields take their defaults.
    #[arg(short, long)]
    pub params: Option<PathBuf>,

    /// Free text for the "Notes" column
    #[arg(short, long)]
    pub note: Option<String>,
}

/// One breakdown category for display.
#[derive(Debug, Serialize, Tabled)]
pub struct BreakdownRow {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
    #[tabled(rename = "Share")]
    pub share: String,
}

impl From<&BreakdownEntry> for BreakdownRow {
    fn from(entry: &BreakdownEntry) -> Self {
        Self {
            category: entry.category.clone(),
            amount: format_currency(entry.amount),
            share: format_percent(entry.share),
        }
    }
}

/// One year of the ROI trend for display.
#[derive(Debug, Serialize, Tabled)]
pub struct TrendRow {
    #[tabled(rename = "Year")]
    pub year: u32,
    #[tabled(rename = "ROI")]
    pub roi: String,
}

/// Execute the evaluate command.
pub fn execute(args: EvaluateArgs, format: OutputFormat, ctx: &Context) -> Result<()> {
    let params = match &args.params {
        Some(path) => ImpactParameters::from_file(path)?,
        None => ImpactParameters::default(),
    };

    let model = ImpactModel::new(ctx.config.model_config());
    let results = model
        .evaluate(&params)
        .context("Financial model evaluation failed")?;
    let row = results.export_row(args.note.as_deref());

    let irr_range = model.config().irr;
    tracing::info!(
        irr_lower = irr_range.lower_bound,
        irr_upper = irr_range.upper_bound,
        roi = results.investment.roi,
        npv = results.investment.npv,
        irr = results.investment.irr,
        "Model evaluated"
    );

    match format {
        OutputFormat::Table => print_tables(&results, &row)?,
        OutputFormat::Json => {
            let output = serde_json::json!({
                "row": row,
                "results": results,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(EXPORT_COLUMNS)?;
            wtr.write_record(row.iter().map(|field| field.value.to_string()))?;
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            println!("{:.2}", results.investment.roi);
        }
    }

    Ok(())
}

fn print_tables(results: &ImpactResults, row: &[ExportField]) -> Result<()> {
    let metrics: Vec<KeyValue> = row
        .iter()
        .map(|field| match &field.value {
            ExportValue::Number(n) => KeyValue::from_number(field.column, *n, 2),
            ExportValue::Text(t) => KeyValue::new(field.column, t.as_str()),
        })
        .collect();

    print_header("Financial Impact");
    print_output(&metrics, OutputFormat::Table)?;

    let costs: Vec<BreakdownRow> = results.cost_breakdown.iter().map(Into::into).collect();
    print_header("Cost Breakdown");
    print_output(&costs, OutputFormat::Table)?;

    let savings: Vec<BreakdownRow> = results.savings_breakdown.iter().map(Into::into).collect();
    print_header("Savings Breakdown");
    print_output(&savings, OutputFormat::Table)?;

    let trend: Vec<TrendRow> = results
        .roi_trend
        .iter()
        .map(|point| TrendRow {
            year: point.year,
            roi: format_percent(point.roi),
        })
        .collect();
    print_header("ROI Trend");
    print_output(&trend, OutputFormat::Table)?;

    Ok(())
}
