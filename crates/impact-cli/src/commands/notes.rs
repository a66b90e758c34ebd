//! Notes command implementation.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use impact_notes::{Annotation, AnnotationStore, JsonFileAnnotationStore};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_header, print_output, print_success};

/// Arguments for the notes command.
#[derive(Args, Debug)]
pub struct NotesArgs {
    #[command(subcommand)]
    pub command: NotesCommand,
}

/// Notes subcommands.
#[derive(Subcommand, Debug)]
pub enum NotesCommand {
    /// Append a note
    Add(AddArgs),

    /// List notes, newest first
    List,
}

/// Arguments for add.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Submitter, typically an email address
    #[arg(short, long)]
    pub submitter: String,

    /// Note body
    #[arg(short, long)]
    pub text: String,
}

/// One note for display.
#[derive(Debug, Serialize, Tabled)]
pub struct NoteRow {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "Submitted")]
    pub timestamp: String,
    #[tabled(rename = "Submitter")]
    pub submitter_id: String,
    #[tabled(rename = "Note")]
    pub text: String,
}

impl From<Annotation> for NoteRow {
    fn from(note: Annotation) -> Self {
        Self {
            id: note.id.0,
            timestamp: note.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            submitter_id: note.submitter_id,
            text: note.text,
        }
    }
}

/// Execute the notes command.
pub fn execute(args: NotesArgs, format: OutputFormat, ctx: &Context) -> Result<()> {
    let store = JsonFileAnnotationStore::open(&ctx.config.notes_path);
    match args.command {
        NotesCommand::Add(add) => execute_add(&store, &add, format, ctx),
        NotesCommand::List => execute_list(&store, format),
    }
}

fn execute_add(
    store: &dyn AnnotationStore,
    args: &AddArgs,
    format: OutputFormat,
    ctx: &Context,
) -> Result<()> {
    let id = store.append(&args.submitter, &args.text)?;
    match format {
        OutputFormat::Minimal => println!("{}", id.0),
        OutputFormat::Json => println!("{}", serde_json::json!({ "id": id })),
        _ => print_success(&format!("Saved note {id}"), ctx.quiet),
    }
    Ok(())
}

fn execute_list(store: &dyn AnnotationStore, format: OutputFormat) -> Result<()> {
    let notes = store.list_all()?;
    tracing::debug!(backend = store.backend_name(), count = notes.len(), "Notes listed");

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&notes)?),
        OutputFormat::Minimal => println!("{}", notes.len()),
        _ => {
            let rows: Vec<NoteRow> = notes.into_iter().map(Into::into).collect();
            if format == OutputFormat::Table {
                print_header("Notes");
            }
            print_output(&rows, format)?;
        }
    }
    Ok(())
}
