use anyhow::{Context, Result};
use clap::Parser;
use cvtext::{config::Config, extractor::Backends, Dispatcher, OcrSettings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cvtext-file")]
#[command(about = "Extract plain text from a single résumé")]
#[command(version)]
struct Cli {
    /// Document to extract (.pdf, .doc or .docx)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Write the text here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only report the detected document type
    #[arg(long)]
    detect: bool,

    /// Tesseract language for scanned PDFs (overrides config)
    #[arg(long)]
    lang: Option<String>,

    /// Rasterisation DPI for scanned PDFs (overrides config)
    #[arg(long)]
    dpi: Option<u32>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    cvtext::init_tracing();
    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load config")?;
    if let Some(lang) = cli.lang {
        config.ocr_language = lang;
    }
    if let Some(dpi) = cli.dpi {
        config.ocr_dpi = dpi;
    }
    config.validate_ocr().context("Invalid configuration")?;

    let dispatcher = Dispatcher::new(Backends::system(), OcrSettings::from(&config));

    if cli.detect {
        let detection = dispatcher.detect(&cli.file).await?;
        println!(
            "{}: {} ({})",
            cli.file.display(),
            detection.document.kind,
            detection.document.kind.backend()
        );
        return Ok(());
    }

    let extracted = dispatcher.process(&cli.file).await?;

    match cli.output {
        Some(path) => {
            std::fs::write(&path, extracted.text.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Saved extracted text to {}", path.display());
        }
        None => print!("{}", extracted.text),
    }

    Ok(())
}
