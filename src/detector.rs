use crate::error::ExtractError;
use crate::extractor::ContentParser;
use crate::models::{Document, DocumentKind};
use crate::utils;
use std::path::Path;
use std::sync::Arc;

/// Format implied by a file's extension, before any content probing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Pdf,
    Doc,
    Docx,
}

/// Classify a path by extension (case-insensitive)
pub fn classify_extension(path: &Path) -> Result<FileFormat, ExtractError> {
    match utils::get_extension(path).as_deref() {
        Some("pdf") => Ok(FileFormat::Pdf),
        Some("doc") => Ok(FileFormat::Doc),
        Some("docx") => Ok(FileFormat::Docx),
        _ => Err(ExtractError::unsupported(path)),
    }
}

/// A PDF whose probed content is blank has no text layer
pub fn classify_probe(content: Option<&str>) -> DocumentKind {
    if utils::is_blank(content) {
        DocumentKind::PdfScanned
    } else {
        DocumentKind::PdfText
    }
}

/// Outcome of type detection for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub document: Document,
    /// Parser output from the probe, kept for text-based PDFs
    pub probed_content: Option<String>,
}

/// Decides which backend applies to a file, probing PDFs with the parser
pub struct Detector {
    parser: Arc<dyn ContentParser>,
}

impl Detector {
    pub fn new(parser: Arc<dyn ContentParser>) -> Self {
        Self { parser }
    }

    pub async fn detect(&self, path: &Path) -> Result<Detection, ExtractError> {
        let kind = match classify_extension(path)? {
            FileFormat::Docx => DocumentKind::Docx,
            FileFormat::Doc => DocumentKind::Doc,
            FileFormat::Pdf => return self.probe_pdf(path).await,
        };

        Ok(Detection {
            document: Document::new(path.to_path_buf(), kind),
            probed_content: None,
        })
    }

    async fn probe_pdf(&self, path: &Path) -> Result<Detection, ExtractError> {
        let parser = self.parser.clone();
        let owned = path.to_path_buf();
        let parsed = tokio::task::spawn_blocking(move || parser.parse(&owned))
            .await
            .map_err(|e| ExtractError::extraction(path, e))?
            .map_err(|e| ExtractError::extraction(path, e))?;

        let kind = classify_probe(parsed.content.as_deref());
        let probed_content = match kind {
            DocumentKind::PdfText => parsed.content,
            _ => None,
        };

        Ok(Detection {
            document: Document::new(path.to_path_buf(), kind),
            probed_content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::fakes::FakeParser;
    use crate::models::FailureKind;

    #[test]
    fn test_classify_extension() {
        assert_eq!(classify_extension(Path::new("a.pdf")).unwrap(), FileFormat::Pdf);
        assert_eq!(classify_extension(Path::new("a.doc")).unwrap(), FileFormat::Doc);
        assert_eq!(classify_extension(Path::new("a.docx")).unwrap(), FileFormat::Docx);
    }

    #[test]
    fn test_classify_extension_case_insensitive() {
        assert_eq!(classify_extension(Path::new("CV.PDF")).unwrap(), FileFormat::Pdf);
        assert_eq!(classify_extension(Path::new("Cv.DocX")).unwrap(), FileFormat::Docx);
    }

    #[test]
    fn test_classify_extension_unsupported() {
        let err = classify_extension(Path::new("/cvs/notes.xyz")).unwrap_err();
        assert_eq!(err.kind(), FailureKind::UnsupportedType);
        assert_eq!(err.path(), Path::new("/cvs/notes.xyz"));

        assert!(classify_extension(Path::new("/cvs/README")).is_err());
    }

    #[test]
    fn test_classify_probe() {
        assert_eq!(classify_probe(None), DocumentKind::PdfScanned);
        assert_eq!(classify_probe(Some("")), DocumentKind::PdfScanned);
        assert_eq!(classify_probe(Some("\n \n\t")), DocumentKind::PdfScanned);
        assert_eq!(classify_probe(Some("Jane Doe")), DocumentKind::PdfText);
    }

    #[tokio::test]
    async fn test_detect_text_pdf_keeps_content() {
        let parser = Arc::new(FakeParser::default().with("cv.pdf", Some("Jane Doe\n")));
        let detector = Detector::new(parser.clone());

        let detection = detector.detect(Path::new("/cvs/cv.pdf")).await.unwrap();
        assert_eq!(detection.document.kind, DocumentKind::PdfText);
        assert_eq!(detection.probed_content.as_deref(), Some("Jane Doe\n"));
        assert_eq!(parser.calls(), 1);
    }

    #[tokio::test]
    async fn test_detect_scanned_pdf() {
        let parser = Arc::new(FakeParser::default().with("scan.pdf", Some("   \n")));
        let detector = Detector::new(parser);

        let detection = detector.detect(Path::new("/cvs/scan.pdf")).await.unwrap();
        assert_eq!(detection.document.kind, DocumentKind::PdfScanned);
        assert_eq!(detection.probed_content, None);
    }

    #[tokio::test]
    async fn test_detect_word_documents_do_not_probe() {
        let parser = Arc::new(FakeParser::default());
        let detector = Detector::new(parser.clone());

        let docx = detector.detect(Path::new("/cvs/a.docx")).await.unwrap();
        let doc = detector.detect(Path::new("/cvs/b.doc")).await.unwrap();
        assert_eq!(docx.document.kind, DocumentKind::Docx);
        assert_eq!(doc.document.kind, DocumentKind::Doc);
        assert_eq!(parser.calls(), 0);
    }

    #[tokio::test]
    async fn test_detect_probe_failure_is_extraction_error() {
        let parser = Arc::new(FakeParser::default().failing("bad.pdf"));
        let detector = Detector::new(parser);

        let err = detector.detect(Path::new("/cvs/bad.pdf")).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Extraction);
        assert_eq!(err.path(), Path::new("/cvs/bad.pdf"));
    }
}
