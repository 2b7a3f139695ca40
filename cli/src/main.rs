//! sheetpulse CLI - spreadsheet interaction log ingestion
//!
//! Reads an XLSX export and writes one JSON dataset per configured view.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use sheetpulse::render::{to_json, JsonFormat};
use sheetpulse::{IngestOptions, XlsxReader};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Spreadsheet interaction logs to normalized JSON datasets
#[derive(Parser)]
#[command(
    name = "sheetpulse",
    author = "iyulab",
    version,
    about = "Normalize spreadsheet interaction logs into JSON datasets",
    long_about = "sheetpulse - Interaction log ingestion tool.\n\n\
                  Reads an XLSX workbook, normalizes each interaction row and writes \
                  per-participant aggregates alongside the records as JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a workbook and write JSON datasets
    Ingest {
        /// Source workbook path
        #[arg(short, long)]
        source: PathBuf,

        /// Output directory for dataset files
        #[arg(short, long)]
        output: PathBuf,

        /// Participant to leave out of the exclusion dataset (repeatable)
        #[arg(short, long = "exclude", value_name = "PARTICIPANT")]
        exclude: Vec<String>,

        /// Prefix for dataset names
        #[arg(long, default_value = sheetpulse::ingest::DEFAULT_DATASET_PREFIX)]
        dataset_prefix: String,

        /// Worksheet holding the interaction rows
        #[arg(long, default_value = sheetpulse::ingest::DEFAULT_SHEET)]
        sheet: String,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// List the worksheets of a workbook
    Sheets {
        /// Workbook path
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Ingest {
            source,
            output,
            exclude,
            dataset_prefix,
            sheet,
            compact,
        } => {
            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let options = IngestOptions::new()
                .with_sheet(sheet)
                .with_dataset_prefix(dataset_prefix)
                .with_exclude(exclude)
                .with_json_format(format);

            let pb = create_spinner("Reading workbook...");
            let result = sheetpulse::ingest_file(&source, &options)?;

            pb.set_message("Writing datasets...");
            fs::create_dir_all(&output)?;

            let mut written = Vec::with_capacity(result.datasets.len());
            for dataset in &result.datasets {
                let path = output.join(format!("{}.json", dataset.meta.dataset));
                fs::write(&path, to_json(dataset, options.json_format)?)?;
                tracing::debug!(path = %path.display(), "wrote dataset");
                written.push((path, dataset.meta.record_count));
            }

            pb.finish_and_clear();

            for (path, count) in written {
                println!("{} {}", "✓".green().bold(), written_line(&path, count));
            }
            if result.formula_fallbacks > 0 {
                println!(
                    "{} {} cells had no cached value; formula text was used",
                    "!".yellow().bold(),
                    result.formula_fallbacks
                );
            }
        }

        Commands::Sheets { input } => {
            if !input.exists() {
                return Err(sheetpulse::Error::SourceNotFound(input.display().to_string()).into());
            }
            let reader = XlsxReader::open(&input)?;

            println!("{}", "Worksheets".cyan().bold());
            println!("{}", "─".repeat(40));
            for sheet in reader.sheets() {
                println!("{}: {}", sheet.name.bold(), sheet.path);
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

/// Status text for one written dataset file.
fn written_line(path: &Path, records: usize) -> String {
    format!("wrote {} ({} records)", path.display(), records)
}

fn print_version() {
    println!("{} {}", "sheetpulse".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Spreadsheet interaction logs to normalized JSON datasets");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
