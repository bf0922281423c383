use crate::config::Config;
use crate::constants::{DOC_CONVERTERS, OCR_TOOLS};
use crate::extractor::docx::{DocxExtractor, DocxReader, WordReader};
use crate::extractor::generic::GenericParserExtractor;
use crate::extractor::ocr::{OcrEngine, OcrExtractor, PageRasterizer, PdftoppmRasterizer, TesseractEngine};
use crate::extractor::parser::{ContentParser, DocumentParser};
use crate::extractor::r#trait::TextExtractor;
use crate::models::Backend;
use crate::utils;
use std::sync::Arc;

/// The external collaborators every extraction goes through
#[derive(Clone)]
pub struct Backends {
    pub parser: Arc<dyn ContentParser>,
    pub rasterizer: Arc<dyn PageRasterizer>,
    pub ocr: Arc<dyn OcrEngine>,
    pub word: Arc<dyn WordReader>,
}

impl Backends {
    pub fn new(
        parser: Arc<dyn ContentParser>,
        rasterizer: Arc<dyn PageRasterizer>,
        ocr: Arc<dyn OcrEngine>,
        word: Arc<dyn WordReader>,
    ) -> Self {
        Self {
            parser,
            rasterizer,
            ocr,
            word,
        }
    }

    /// Default implementations: lopdf/pdf-extract, pdftoppm, tesseract, docx-rs
    pub fn system() -> Self {
        Self::new(
            Arc::new(DocumentParser::new()),
            Arc::new(PdftoppmRasterizer::new()),
            Arc::new(TesseractEngine::new()),
            Arc::new(DocxReader::new()),
        )
    }

    /// External tools the default backends shell out to that are not on PATH.
    /// DOC converters are only reported when none of them is installed.
    pub fn missing_tools() -> Vec<&'static str> {
        let mut missing: Vec<&'static str> = OCR_TOOLS
            .iter()
            .copied()
            .filter(|cmd| !utils::command_available(cmd))
            .collect();

        if !DOC_CONVERTERS.iter().any(|cmd| utils::command_available(cmd)) {
            missing.extend(DOC_CONVERTERS.iter().copied());
        }
        missing
    }
}

/// OCR settings threaded from the run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrSettings {
    pub language: String,
    pub dpi: u32,
}

impl From<&Config> for OcrSettings {
    fn from(config: &Config) -> Self {
        Self {
            language: config.ocr_language.clone(),
            dpi: config.ocr_dpi,
        }
    }
}

/// Factory for creating extractors based on the selected backend
pub struct ExtractorFactory {
    backends: Backends,
    ocr: OcrSettings,
}

impl ExtractorFactory {
    pub fn new(backends: Backends, ocr: OcrSettings) -> Self {
        Self { backends, ocr }
    }

    pub fn backends(&self) -> &Backends {
        &self.backends
    }

    pub fn create(&self, backend: Backend) -> Arc<dyn TextExtractor> {
        match backend {
            Backend::GenericParser => Arc::new(GenericParserExtractor::new(self.backends.parser.clone())),
            Backend::Docx => Arc::new(DocxExtractor::new(self.backends.word.clone())),
            Backend::Ocr => Arc::new(OcrExtractor::new(
                self.backends.rasterizer.clone(),
                self.backends.ocr.clone(),
                self.ocr.language.clone(),
                self.ocr.dpi,
            )),
        }
    }
}
