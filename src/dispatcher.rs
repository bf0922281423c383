use crate::detector::{Detection, Detector};
use crate::error::ExtractError;
use crate::extractor::{Backends, ExtractorFactory, OcrSettings};
use crate::models::{Document, DocumentKind};
use std::path::Path;
use tracing::info;

/// Text extracted from one classified document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub document: Document,
    pub text: String,
}

/// Routes a file through type detection to the matching backend
pub struct Dispatcher {
    detector: Detector,
    factory: ExtractorFactory,
}

impl Dispatcher {
    pub fn new(backends: Backends, ocr: OcrSettings) -> Self {
        Self {
            detector: Detector::new(backends.parser.clone()),
            factory: ExtractorFactory::new(backends, ocr),
        }
    }

    /// Classify without extracting (PDFs are still probed)
    pub async fn detect(&self, path: &Path) -> Result<Detection, ExtractError> {
        self.detector.detect(path).await
    }

    pub async fn process(&self, path: &Path) -> Result<Extracted, ExtractError> {
        let detection = self.detector.detect(path).await?;
        self.extract(detection).await
    }

    /// Run the backend selected for an already classified document
    pub async fn extract(&self, detection: Detection) -> Result<Extracted, ExtractError> {
        let Detection {
            document,
            probed_content,
        } = detection;

        let backend = document.kind.backend();
        info!("{} is a {}. Using {}...", document.file_name(), document.kind, backend);

        // The probe already ran the same parser over text PDFs
        if let (DocumentKind::PdfText, Some(text)) = (document.kind, probed_content) {
            return Ok(Extracted { document, text });
        }

        let text = self
            .factory
            .create(backend)
            .extract(&document.path)
            .await
            .map_err(|e| ExtractError::extraction(&document.path, e))?;

        Ok(Extracted { document, text })
    }
}
