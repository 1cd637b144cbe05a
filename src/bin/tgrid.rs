//! tgrid CLI - inspect how tablegrid places, fills and coalesces a table

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use tablegrid::{
    diagnostics::{format_diagnostics, CheckResult, Diagnostic, DiagnosticLevel},
    document::{reconcile_document, ReconcileOptions, TableDocument},
    layout::{format_details, format_grid},
    GridResult, Warehouse, WarehouseOptions,
};
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tgrid")]
#[command(version)]
#[command(about = "Table grid reconciliation: dense grids and coalesced cell details", long_about = None)]
struct Cli {
    /// Subcommand to run (defaults to `details`)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input table document (JSON); reads from stdin if not provided
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Reject malformed spans instead of repairing them
    #[arg(long, global = true)]
    strict: bool,

    /// Emit the full report as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Mark existing cells as new in the dense grid
    #[arg(long, global = true)]
    mark_new: bool,

    /// Quiet mode: suppress repair warnings on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log engine internals (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Print the table extent and the dense, gap-filled grid
    Grid {
        /// Input table document
        input: Option<String>,
    },

    /// Print coalesced cell details per row
    Details {
        /// Input table document
        input: Option<String>,
    },

    /// Report placement repairs without producing output
    Check {
        /// Input table document
        input: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "tablegrid=trace" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> GridResult<()> {
    let mut use_color = true;
    let (mode, input) = match cli.command {
        Some(Commands::Info) => {
            print_info();
            return Ok(());
        }
        Some(Commands::Grid { input }) => (Mode::Grid, input.or(cli.input_file)),
        Some(Commands::Details { input }) => (Mode::Details, input.or(cli.input_file)),
        Some(Commands::Check { input, no_color }) => {
            use_color = !no_color;
            (Mode::Check, input.or(cli.input_file))
        }
        None => (Mode::Details, cli.input_file),
    };

    let content = read_input(input.as_deref())?;
    let doc = TableDocument::from_json(&content)?;

    if let Mode::Check = mode {
        let result = check_document(&doc, cli.strict)?;
        println!("{}", format_diagnostics(&result, use_color));
        if result.has_errors() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let options = ReconcileOptions {
        mark_cells_as_new: cli.mark_new,
        strict: cli.strict,
    };
    let report = reconcile_document(&doc, &options)?;

    if !cli.quiet && !report.diagnostics.is_empty() {
        eprintln!("Repaired {} placement issue(s):", report.diagnostics.len());
        for diag in &report.diagnostics {
            eprintln!("  {}", diag.replace('\n', "\n  "));
        }
    }

    let result = if cli.json {
        serde_json::to_string_pretty(&report)?
    } else {
        match mode {
            Mode::Grid => format!(
                "{} rows x {} columns\n{}",
                report.grid.rows,
                report.grid.columns,
                format_grid(&report.dense)
            ),
            _ => format_details(&report.details),
        }
    };

    write_output(cli.output.as_deref(), result.trim_end())
}

#[cfg(feature = "cli")]
enum Mode {
    Grid,
    Details,
    Check,
}

/// Collect lenient repairs; in strict mode a rejection is reported as an error
#[cfg(feature = "cli")]
fn check_document(doc: &TableDocument, strict: bool) -> GridResult<CheckResult> {
    let rows = doc.to_rows()?;
    let warehouse = Warehouse::build_with_options(&rows, &WarehouseOptions::lenient())?;

    let mut result: CheckResult = warehouse.diagnostics().iter().cloned().collect();

    if strict {
        if let Err(err) = Warehouse::build_with_options(&rows, &WarehouseOptions::strict()) {
            result.add(
                Diagnostic::new(DiagnosticLevel::Error, err.to_string())
                    .with_suggestion("fix the spans or drop --strict to repair them"),
            );
        }
    }

    if result.is_empty() {
        result.add(Diagnostic::new(
            DiagnosticLevel::Info,
            format!(
                "{} cells placed in a {}x{} grid",
                warehouse.cell_count(),
                warehouse.grid().rows,
                warehouse.grid().columns
            ),
        ));
    }

    Ok(result)
}

#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> GridResult<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(feature = "cli")]
fn write_output(path: Option<&str>, result: &str) -> GridResult<()> {
    match path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            writeln!(file, "{}", result)?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => {
            println!("{}", result);
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn print_info() {
    println!("tgrid {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Input: JSON table document");
    println!(r#"  {{ "rows": [ {{ "section": "tbody", "cells": [ {{ "id": "a", "rowspan": 2 }} ] }} ] }}"#);
    println!();
    println!("Commands:");
    println!("  grid     dense, gap-filled grid (new cells marked with *)");
    println!("  details  one entry per spanning cell: id[rowspan x colspan]");
    println!("  check    placement repairs (exit 1 on --strict rejection)");
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install tablegrid --features cli");
    eprintln!("  tgrid [OPTIONS] [INPUT_FILE] [COMMAND]");
}
