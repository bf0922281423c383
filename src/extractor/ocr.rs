use crate::extractor::r#trait::TextExtractor;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;
use tracing::{info, warn};

/// Rendered page images of one PDF, in page order.
///
/// Holds the scratch directory the images live in; dropping it removes them.
pub struct RenderedPages {
    pages: Vec<PathBuf>,
    _scratch: Option<TempDir>,
}

impl RenderedPages {
    pub fn new(pages: Vec<PathBuf>, scratch: Option<TempDir>) -> Self {
        Self { pages, _scratch: scratch }
    }

    pub fn pages(&self) -> &[PathBuf] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Turns PDF pages into raster images
pub trait PageRasterizer: Send + Sync {
    fn render_pages(&self, path: &Path, dpi: u32) -> Result<RenderedPages>;
}

/// OCR engine operating on one page image
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &Path, language: &str) -> Result<String>;
}

/// Rasterizer backed by poppler's `pdftoppm`
#[derive(Debug, Default)]
pub struct PdftoppmRasterizer;

impl PdftoppmRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl PageRasterizer for PdftoppmRasterizer {
    fn render_pages(&self, path: &Path, dpi: u32) -> Result<RenderedPages> {
        let scratch = tempfile::tempdir().context("Failed to create scratch directory for page images")?;
        let prefix = scratch.path().join("page");

        let output = Command::new("pdftoppm")
            .arg("-png")
            .arg("-r")
            .arg(dpi.to_string())
            .arg(path)
            .arg(&prefix)
            .output()
            .context("Failed to execute pdftoppm. Install Poppler utils: brew install poppler (macOS) or apt-get install poppler-utils (Linux)")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("pdftoppm failed: {}", stderr.trim());
        }

        // pdftoppm zero-pads page numbers to a common width, so name order is page order
        let mut pages: Vec<PathBuf> = std::fs::read_dir(scratch.path())
            .context("Failed to list rendered pages")?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().map_or(false, |ext| ext == "png"))
            .collect();
        pages.sort();

        if pages.is_empty() {
            anyhow::bail!("pdftoppm produced no page images for {}", path.display());
        }

        Ok(RenderedPages::new(pages, Some(scratch)))
    }
}

/// OCR engine backed by the `tesseract` CLI
#[derive(Debug, Default)]
pub struct TesseractEngine;

impl TesseractEngine {
    pub fn new() -> Self {
        Self
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &Path, language: &str) -> Result<String> {
        let output = Command::new("tesseract")
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .output()
            .context("Failed to execute tesseract. Install Tesseract: brew install tesseract (macOS) or apt-get install tesseract-ocr (Linux)")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("tesseract failed on {}: {}", image.display(), stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Concatenate per-page OCR results, each page followed by one newline
pub fn assemble_pages<I>(pages: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut text = String::new();
    for page in pages {
        text.push_str(page.as_ref());
        text.push('\n');
    }
    text
}

/// OCR backend for scanned PDFs
#[derive(Clone)]
pub struct OcrExtractor {
    rasterizer: Arc<dyn PageRasterizer>,
    engine: Arc<dyn OcrEngine>,
    language: String,
    dpi: u32,
}

impl OcrExtractor {
    pub fn new(
        rasterizer: Arc<dyn PageRasterizer>,
        engine: Arc<dyn OcrEngine>,
        language: impl Into<String>,
        dpi: u32,
    ) -> Self {
        Self {
            rasterizer,
            engine,
            language: language.into(),
            dpi,
        }
    }

    fn run(&self, path: &Path) -> Result<String> {
        let rendered = self
            .rasterizer
            .render_pages(path, self.dpi)
            .with_context(|| format!("Failed to render pages of {}", path.display()))?;

        if rendered.is_empty() {
            warn!("{} has no pages to OCR", path.display());
        }

        let total = rendered.len();
        let mut page_texts = Vec::with_capacity(total);
        for (i, image) in rendered.pages().iter().enumerate() {
            info!("Processing page {} of {} of scanned PDF...", i + 1, total);
            let text = self
                .engine
                .recognize(image, &self.language)
                .with_context(|| format!("OCR failed on page {}", i + 1))?;
            page_texts.push(text);
        }

        Ok(assemble_pages(page_texts))
    }
}

#[async_trait::async_trait]
impl TextExtractor for OcrExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let this = self.clone();
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || this.run(&path)).await?
    }

    fn name(&self) -> &'static str {
        "ocr"
    }
}
