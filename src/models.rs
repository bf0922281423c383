use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// What a candidate document turned out to be after classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// PDF with an extractable text layer
    PdfText,
    /// PDF made of page images; needs OCR
    PdfScanned,
    Docx,
    Doc,
}

impl DocumentKind {
    /// Select the extraction backend for this kind of document
    pub fn backend(self) -> Backend {
        match self {
            DocumentKind::PdfText | DocumentKind::Doc => Backend::GenericParser,
            DocumentKind::Docx => Backend::Docx,
            DocumentKind::PdfScanned => Backend::Ocr,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentKind::PdfText => "text-based PDF",
            DocumentKind::PdfScanned => "scanned PDF",
            DocumentKind::Docx => "DOCX file",
            DocumentKind::Doc => "DOC file",
        };
        f.write_str(label)
    }
}

/// Extraction backends a document can be routed to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    GenericParser,
    Docx,
    Ocr,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Backend::GenericParser => "document parser",
            Backend::Docx => "DOCX reader",
            Backend::Ocr => "OCR",
        };
        f.write_str(label)
    }
}

/// A classified input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub kind: DocumentKind,
}

impl Document {
    pub fn new(path: PathBuf, kind: DocumentKind) -> Self {
        Self { path, kind }
    }

    /// File name for log lines, falling back to the full path
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Result of running the generic document parser over a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedContent {
    /// Extracted text, `None` when the parser found no content layer at all
    pub content: Option<String>,
}

impl ParsedContent {
    pub fn new(content: Option<String>) -> Self {
        Self { content }
    }
}

/// Failure categories surfaced to callers and in the batch summary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UnsupportedType,
    Extraction,
    Io,
}

/// Terminal state of one file in a batch run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Saved { output: PathBuf },
    Failed { failure: FailureKind, message: String },
}

/// Per-file line of the batch summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileReport {
    pub file_name: String,
    /// Detected kind, absent when classification itself failed
    pub kind: Option<DocumentKind>,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn is_saved(&self) -> bool {
        matches!(self.outcome, FileOutcome::Saved { .. })
    }
}

/// Counts and per-file outcomes of one batch run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub files: Vec<FileReport>,
}

impl BatchSummary {
    pub fn record(&mut self, report: FileReport) {
        self.processed += 1;
        if report.is_saved() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.files.push(report);
    }

    /// Reports for files that failed, in processing order
    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|r| !r.is_saved())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_selection() {
        assert_eq!(DocumentKind::PdfText.backend(), Backend::GenericParser);
        assert_eq!(DocumentKind::Doc.backend(), Backend::GenericParser);
        assert_eq!(DocumentKind::Docx.backend(), Backend::Docx);
        assert_eq!(DocumentKind::PdfScanned.backend(), Backend::Ocr);
    }

    #[test]
    fn test_document_file_name() {
        let doc = Document::new(PathBuf::from("/cvs/jane.docx"), DocumentKind::Docx);
        assert_eq!(doc.file_name(), "jane.docx");
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = BatchSummary::default();
        summary.record(FileReport {
            file_name: "a.docx".to_string(),
            kind: Some(DocumentKind::Docx),
            outcome: FileOutcome::Saved { output: PathBuf::from("out/a.txt") },
        });
        summary.record(FileReport {
            file_name: "b.xyz".to_string(),
            kind: None,
            outcome: FileOutcome::Failed {
                failure: FailureKind::UnsupportedType,
                message: "unsupported file type: b.xyz".to_string(),
            },
        });

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        let failed: Vec<_> = summary.failures().map(|r| r.file_name.as_str()).collect();
        assert_eq!(failed, vec!["b.xyz"]);
    }

    #[test]
    fn test_summary_serialization() {
        let mut summary = BatchSummary::default();
        summary.record(FileReport {
            file_name: "scan.pdf".to_string(),
            kind: Some(DocumentKind::PdfScanned),
            outcome: FileOutcome::Saved { output: PathBuf::from("out/scan.txt") },
        });

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["succeeded"], 1);
        assert_eq!(json["files"][0]["kind"], "pdf_scanned");
        assert_eq!(json["files"][0]["status"], "saved");

        let back: BatchSummary = serde_json::from_value(json).unwrap();
        assert_eq!(back, summary);
    }
}
