//! Command-line interface for the ingest pipeline.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::batch::BatchReport;
use crate::config::DEFAULT_TOPIC_OUTPUT;
use crate::error::{IngestError, Result};
use crate::manifest::Manifest;
use crate::pipeline::{
    process_directory, process_document, validate_topics, DocumentOutputs, DocumentReport,
};
use crate::schema::RecordSchema;

/// Refresher ingest - Validate scraped topics and GROBID TEI documents into clean CSV tables.
#[derive(Parser)]
#[command(name = "refresher-ingest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a scraped topic table.
    Topics {
        /// Input CSV with a header row
        input: PathBuf,

        /// Output CSV for the valid topics
        #[arg(short, long, default_value = DEFAULT_TOPIC_OUTPUT)]
        output: PathBuf,
    },

    /// Extract and validate one TEI document.
    Document {
        /// GROBID TEI XML file
        source: PathBuf,

        /// Output CSV for content rows
        #[arg(long)]
        content: PathBuf,

        /// Output CSV for the metadata row
        #[arg(long)]
        metadata: PathBuf,
    },

    /// Extract and validate every TEI document in a directory.
    Batch {
        /// Directory holding the TEI files
        input_dir: PathBuf,

        /// Directory receiving content/csv and metadata/csv
        output_dir: PathBuf,

        /// YAML manifest listing the documents (default: all *.tei.xml files)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Topics { input, output } => topics_command(&input, &output),
        Commands::Document {
            source,
            content,
            metadata,
        } => document_command(
            &source,
            &DocumentOutputs {
                content_csv: content,
                metadata_csv: metadata,
            },
        ),
        Commands::Batch {
            input_dir,
            output_dir,
            manifest,
        } => batch_command(&input_dir, &output_dir, manifest.as_deref()),
    }
}

fn topics_command(input: &Path, output: &Path) -> Result<()> {
    println!(
        "{} {}",
        style("Validating topics from").bold(),
        style(input.display()).cyan()
    );
    println!();

    let report = validate_topics(input, output)?;
    print_batch(&report, output);

    Ok(())
}

fn document_command(source: &Path, outputs: &DocumentOutputs) -> Result<()> {
    println!(
        "{} {}",
        style("Processing").bold(),
        style(source.display()).cyan()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Extracting sections...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let report = match process_document(source, outputs) {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    print_document(&report);

    Ok(())
}

fn batch_command(input_dir: &Path, output_dir: &Path, manifest: Option<&Path>) -> Result<()> {
    ensure_directory(input_dir)?;

    let manifest = match manifest {
        Some(path) => Manifest::load(path)?,
        None => Manifest::discover(input_dir)?,
    };

    println!(
        "{} {} documents from {}",
        style("Processing").bold(),
        style(manifest.len()).cyan(),
        style(input_dir.display()).cyan()
    );
    println!();

    let pb = ProgressBar::new(manifest.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("=>-"),
    );

    let report = process_directory(input_dir, output_dir, &manifest, |entry| {
        pb.set_message(entry.source.clone());
        pb.inc(1);
    });
    pb.finish_and_clear();

    for document in &report.documents {
        print_document(document);
    }
    for failure in &report.failures {
        println!(
            "{} {}: {}",
            style("Failed:").red().bold(),
            failure.source.display(),
            failure.error
        );
    }

    println!();
    println!(
        "{} {} of {} documents",
        style("Processed").green().bold(),
        report.documents.len(),
        report.total()
    );

    report.into_result().map(|_| ())
}

fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(IngestError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input directory does not exist: {}", path.display()),
        )));
    }
    if !path.is_dir() {
        return Err(IngestError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Input path is not a directory: {}", path.display()),
        )));
    }
    Ok(())
}

fn print_document(report: &DocumentReport) {
    println!("{}", style(report.source.display()).bold());
    print_batch(&report.content, &report.outputs.content_csv);
    print_batch(&report.metadata, &report.outputs.metadata_csv);
}

fn print_batch<R: RecordSchema>(report: &BatchReport<R>, output: &Path) {
    println!(
        "  {}: {} valid, {} rejected",
        R::NAME,
        style(report.valid_count()).green(),
        if report.is_clean() {
            style(report.error_count()).dim()
        } else {
            style(report.error_count()).yellow().bold()
        }
    );
    for row_error in &report.errors {
        println!("    {} {}", style("-").yellow(), row_error.row);
        println!("      {}", style(row_error.reason()).yellow());
    }
    println!("  {} {}", style("Saved to:").green(), output.display());
}
