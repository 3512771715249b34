//! fdu CLI - FDU spreadsheet import and structure analysis
//!
//! Both commands run with the fixed paths of the FDU control spreadsheet
//! unless other paths are given.

use clap::{Parser, Subcommand};
use colored::*;
use fdu_import::{AnalyzeOptions, ImportOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// FDU (safety data sheet) spreadsheet tools
#[derive(Parser)]
#[command(
    name = "fdu",
    author = "iyulab",
    version,
    about = "Convert FDU spreadsheets into import-ready JSON",
    long_about = "fdu - FDU spreadsheet tools.\n\n\
                  Converts the FDS control spreadsheet into JSON records for bulk import,\n\
                  or samples the structure of its sheets for inspection."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every sheet into FDU records
    Import {
        /// Input spreadsheet
        #[arg(default_value = fdu_import::DEFAULT_INPUT)]
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long, default_value = fdu_import::DEFAULT_IMPORT_OUTPUT)]
        output: PathBuf,
    },

    /// Sample headers and rows of every sheet
    Analyze {
        /// Input spreadsheet
        #[arg(default_value = fdu_import::DEFAULT_INPUT)]
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long, default_value = fdu_import::DEFAULT_ANALYSIS_OUTPUT)]
        output: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let produced = match cli.command {
        Commands::Import { input, output } => run_import(&input, &output),
        Commands::Analyze { input, output } => run_analyze(&input, &output),
        Commands::Version => {
            print_version();
            true
        }
    };

    if produced {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Import records and write them; returns whether a file was written.
fn run_import(input: &Path, output: &Path) -> bool {
    println!("{} {}", "Importing FDUs from".cyan().bold(), input.display());

    let records = fdu_import::import_file(input, &ImportOptions::default());
    println!("{}: {}", "FDUs found".bold(), records.len());

    if records.is_empty() {
        println!("{} No FDU records to import", "!".yellow().bold());
        return false;
    }

    match fdu_import::export::write_records(output, &records) {
        Ok(count) => {
            println!(
                "{} Saved {} records to {}",
                "✓".green().bold(),
                count,
                output.display()
            );
            println!();
            println!("{}", "Next steps:".bold());
            println!("  1. Run the database import with {}", output.display());
            println!("  2. Upload the FDU files once they are available");
            true
        }
        Err(e) => {
            eprintln!("{}: cannot save {}: {}", "Error".red().bold(), output.display(), e);
            false
        }
    }
}

/// Analyze the workbook and write the report; returns whether a file was written.
fn run_analyze(input: &Path, output: &Path) -> bool {
    let report = match fdu_import::analyze_file(input, &AnalyzeOptions::default()) {
        Ok(report) => report,
        Err(e) => {
            eprintln!(
                "{}: cannot analyze {}: {}",
                "Error".red().bold(),
                input.display(),
                e
            );
            return false;
        }
    };

    if let Err(e) = fdu_import::export::write_json(output, &report) {
        eprintln!("{}: cannot save {}: {}", "Error".red().bold(), output.display(), e);
        return false;
    }

    println!(
        "{} Analyzed {} sheets ({} failed), saved to {}",
        "✓".green().bold(),
        report.len(),
        report.failures(),
        output.display()
    );
    true
}

fn print_version() {
    println!("{} {}", "fdu".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("FDU spreadsheet import and structure analysis");
}
