//! In-memory stand-ins for the external collaborators, keyed by file name.

use crate::extractor::docx::WordReader;
use crate::extractor::ocr::{OcrEngine, PageRasterizer, RenderedPages};
use crate::extractor::parser::ContentParser;
use crate::extractor::Backends;
use crate::models::ParsedContent;
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[derive(Default)]
pub struct FakeParser {
    contents: HashMap<String, Option<String>>,
    failing: HashSet<String>,
    calls: AtomicUsize,
}

impl FakeParser {
    pub fn with(mut self, name: &str, content: Option<&str>) -> Self {
        self.contents.insert(name.to_string(), content.map(str::to_string));
        self
    }

    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ContentParser for FakeParser {
    fn parse(&self, path: &Path) -> Result<ParsedContent> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = file_name(path);
        if self.failing.contains(&name) {
            anyhow::bail!("corrupt document: {}", name);
        }
        match self.contents.get(&name) {
            Some(content) => Ok(ParsedContent::new(content.clone())),
            None => anyhow::bail!("file not found: {}", name),
        }
    }
}

#[derive(Default)]
pub struct FakeRasterizer {
    pages: usize,
    fail: bool,
    dpi: Mutex<Option<u32>>,
}

impl FakeRasterizer {
    pub fn with_pages(pages: usize) -> Self {
        Self { pages, ..Self::default() }
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn requested_dpi(&self) -> Option<u32> {
        *self.dpi.lock().unwrap()
    }
}

impl PageRasterizer for FakeRasterizer {
    fn render_pages(&self, _path: &Path, dpi: u32) -> Result<RenderedPages> {
        *self.dpi.lock().unwrap() = Some(dpi);
        if self.fail {
            anyhow::bail!("rasterizer unavailable");
        }
        let pages = (1..=self.pages)
            .map(|i| PathBuf::from(format!("page-{}.png", i)))
            .collect();
        Ok(RenderedPages::new(pages, None))
    }
}

/// Recognises every image as `text of <image name>`
#[derive(Default)]
pub struct FakeOcrEngine {
    failing_on: Option<String>,
    languages: Mutex<Vec<String>>,
}

impl FakeOcrEngine {
    pub fn failing_on(image: &str) -> Self {
        Self {
            failing_on: Some(image.to_string()),
            ..Self::default()
        }
    }

    pub fn languages(&self) -> Vec<String> {
        self.languages.lock().unwrap().clone()
    }
}

impl OcrEngine for FakeOcrEngine {
    fn recognize(&self, image: &Path, language: &str) -> Result<String> {
        self.languages.lock().unwrap().push(language.to_string());
        let name = file_name(image);
        if self.failing_on.as_deref() == Some(name.as_str()) {
            anyhow::bail!("tesseract crashed on {}", name);
        }
        Ok(format!("text of {}", name))
    }
}

#[derive(Default)]
pub struct FakeWordReader {
    documents: HashMap<String, Vec<String>>,
}

impl FakeWordReader {
    pub fn with(mut self, name: &str, paragraphs: &[&str]) -> Self {
        self.documents.insert(
            name.to_string(),
            paragraphs.iter().map(|p| p.to_string()).collect(),
        );
        self
    }
}

impl WordReader for FakeWordReader {
    fn paragraphs(&self, path: &Path) -> Result<Vec<String>> {
        let name = file_name(path);
        self.documents
            .get(&name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("not a word document: {}", name))
    }
}

/// Backends wired to fakes, with the parser handle kept for call counting
pub fn fake_backends(
    parser: FakeParser,
    words: FakeWordReader,
    pages_per_scan: usize,
) -> (Backends, Arc<FakeParser>) {
    let parser = Arc::new(parser);
    let backends = Backends::new(
        parser.clone(),
        Arc::new(FakeRasterizer::with_pages(pages_per_scan)),
        Arc::new(FakeOcrEngine::default()),
        Arc::new(words),
    );
    (backends, parser)
}
