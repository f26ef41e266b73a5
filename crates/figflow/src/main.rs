//! figflow - Inkscape figures for LaTeX documents
//!
//! Creates, edits, exports and deletes figures under `<path>/figures`, and
//! pastes LaTeX snippets into a running Inkscape. macOS with yabai assumed.

mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use figflow_core::export::Exporter;
use figflow_core::prelude::*;

#[derive(Parser)]
#[command(name = "figflow")]
#[command(about = "figflow - Inkscape figure workflow for LaTeX documents")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/figflow/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a figure from the template and open it in Inkscape
    CreateFigure {
        /// Human-readable title, e.g. "Block Diagram"
        title: String,
        /// Document directory containing (or to contain) figures/
        path: PathBuf,
    },

    /// Type a LaTeX snippet in a terminal and paste it into Inkscape
    InsertLatex,

    /// Pick a figure and reopen it in Inkscape
    EditFigure {
        /// Document directory containing figures/
        path: PathBuf,
    },

    /// Pick a figure and delete its svg, pdf and pdf_tex
    DeleteFigure {
        /// Document directory containing figures/
        path: PathBuf,
    },

    /// Export every figure that has no PDF yet
    ExportFigures {
        /// Document directory containing figures/
        path: PathBuf,
    },
}

#[derive(Serialize)]
struct Output<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Error>,
}

impl<T: Serialize> Output<T> {
    fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }
    fn err(e: Error) -> Output<()> {
        Output { success: false, data: None, error: Some(e) }
    }
}

fn print_json<T: Serialize>(output: &T) {
    match serde_json::to_string_pretty(output) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("could not serialize output: {}", e),
    }
}

// Cancelled selections still succeed.
fn print_choice<T: Serialize>(choice: Option<T>) {
    match choice {
        Some(data) => print_json(&Output::ok(data)),
        None => print_json(&Output::ok(serde_json::json!({"cancelled": true}))),
    }
}

// ── Main ────────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    let _logger = match logging::init(cli.verbose) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    if let Err(e) = run(cli) {
        if let Some(err) = e.downcast_ref::<Error>() {
            print_json(&Output::<()>::err(err.clone()));
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    log::debug!("config: {:?}", config);
    let runner = SystemRunner;

    match cli.command {
        Commands::CreateFigure { title, path } => cmd_create(&config, &runner, &title, &path),
        Commands::InsertLatex => cmd_insert(&config, &runner),
        Commands::EditFigure { path } => cmd_edit(&config, &runner, &path),
        Commands::DeleteFigure { path } => cmd_delete(&config, &runner, &path),
        Commands::ExportFigures { path } => cmd_export(&config, &runner, &path),
    }
}

fn cmd_create(config: &Config, runner: &dyn Runner, title: &str, path: &Path) -> Result<()> {
    let mut clipboard = SystemClipboard::new()?;
    let created = Workflow::new(config, runner, &mut clipboard).create_figure(title, path)?;
    print_json(&Output::ok(created));
    Ok(())
}

fn cmd_insert(config: &Config, runner: &dyn Runner) -> Result<()> {
    let mut clipboard = SystemClipboard::new()?;
    let pasted = Workflow::new(config, runner, &mut clipboard).insert_latex()?;
    print_json(&Output::ok(serde_json::json!({"pasted": pasted})));
    Ok(())
}

fn cmd_edit(config: &Config, runner: &dyn Runner, path: &Path) -> Result<()> {
    let mut clipboard = SystemClipboard::new()?;
    let edited = Workflow::new(config, runner, &mut clipboard).edit_figure(path)?;
    print_choice(edited);
    Ok(())
}

fn cmd_delete(config: &Config, runner: &dyn Runner, path: &Path) -> Result<()> {
    let mut clipboard = SystemClipboard::new()?;
    let deleted = Workflow::new(config, runner, &mut clipboard).delete_figure(path)?;
    print_choice(deleted);
    Ok(())
}

fn cmd_export(config: &Config, runner: &dyn Runner, path: &Path) -> Result<()> {
    let exporter = Exporter::new(runner, &config.editor, config.export_syntax);
    let report = exporter.export_missing(&config.figures_dir(path))?;
    print_json(&Output::ok(report));
    Ok(())
}
