use anyhow::{Context, Result};
use clap::Parser;
use cvtext::{config::Config, extractor::Backends, BatchRunner, Dispatcher, OcrSettings};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser)]
#[command(name = "cvtext")]
#[command(about = "Extract plain text from a folder of résumés (PDF, DOC, DOCX), one .txt per document")]
#[command(version)]
struct Cli {
    /// Folder containing the résumés (overrides config)
    #[arg(short, long, value_name = "DIR")]
    input: Option<PathBuf>,

    /// Folder receiving the extracted text files (overrides config)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Settings file to use instead of the default locations
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Tesseract language for scanned PDFs (overrides config)
    #[arg(long)]
    lang: Option<String>,

    /// Rasterisation DPI for scanned PDFs (overrides config)
    #[arg(long)]
    dpi: Option<u32>,

    /// Keep directory listing order instead of sorting by file name
    #[arg(long)]
    unsorted: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Show a progress bar
    #[arg(long)]
    progress: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    cvtext::init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load().context("Failed to load config")?,
    };
    if let Some(input) = cli.input {
        config.input_dir = input;
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if let Some(lang) = cli.lang {
        config.ocr_language = lang;
    }
    if let Some(dpi) = cli.dpi {
        config.ocr_dpi = dpi;
    }
    if cli.unsorted {
        config.sort_entries = false;
    }
    config.validate().context("Invalid configuration")?;

    let missing = Backends::missing_tools();
    if !missing.is_empty() {
        warn!(
            "External tools not found on PATH: {} (affected documents will fail)",
            missing.join(", ")
        );
    }

    let dispatcher = Dispatcher::new(Backends::system(), OcrSettings::from(&config));
    let mut runner = BatchRunner::new(config, dispatcher);

    if cli.progress {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} files ({msg})")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        runner = runner.with_progress(pb);
    }

    let summary = runner.run().await.context("Batch run failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Processed {} files: {} succeeded, {} failed",
            summary.processed, summary.succeeded, summary.failed
        );
        for report in summary.failures() {
            if let cvtext::models::FileOutcome::Failed { message, .. } = &report.outcome {
                println!("  ✗ {}: {}", report.file_name, message);
            }
        }
    }

    Ok(())
}
