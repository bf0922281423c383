use crate::constants::DOC_CONVERTERS;
use crate::models::ParsedContent;
use crate::utils;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// General document-content parser used for text PDFs and legacy .doc files
pub trait ContentParser: Send + Sync {
    /// Parse a file, returning its text content if it has any
    fn parse(&self, path: &Path) -> Result<ParsedContent>;
}

/// Default parser: lopdf / pdf-extract for PDFs, external converters for .doc
pub struct DocumentParser {
    doc_converters: Vec<&'static str>,
}

impl DocumentParser {
    pub fn new() -> Self {
        // Check which converters are available
        let doc_converters = DOC_CONVERTERS
            .iter()
            .copied()
            .filter(|cmd| utils::command_available(cmd))
            .collect();

        Self { doc_converters }
    }

    /// Converters found on PATH at construction time
    pub fn doc_converters(&self) -> &[&'static str] {
        &self.doc_converters
    }

    fn parse_pdf(&self, path: &Path) -> Result<ParsedContent> {
        use lopdf::Document;

        let doc = Document::load(path)
            .with_context(|| format!("Failed to load PDF: {}", path.display()))?;

        let mut text_content = String::new();
        let mut failed_pages = Vec::new();
        for page_num in doc.get_pages().keys() {
            match doc.extract_text(&[*page_num]) {
                Ok(page_text) => {
                    text_content.push_str(&page_text);
                    text_content.push('\n');
                }
                Err(e) => {
                    warn!("lopdf could not decode page {} of {}: {}", page_num, path.display(), e);
                    failed_pages.push(*page_num);
                }
            }
        }

        // pdf-extract handles more font encodings than lopdf
        let content = select_pdf_text(text_content, &failed_pages, || {
            pdf_extract::extract_text(path).map_err(|e| anyhow::anyhow!("{}", e))
        })
        .with_context(|| format!("Failed to read text from {}", path.display()))?;

        Ok(ParsedContent::new(content))
    }

    fn parse_doc(&self, path: &Path) -> Result<ParsedContent> {
        if self.doc_converters.is_empty() {
            anyhow::bail!(
                "No DOC converter available. Install antiword or catdoc: apt-get install antiword catdoc (Linux) or brew install antiword catdoc (macOS)"
            );
        }

        let mut last_error = None;
        for converter in &self.doc_converters {
            match run_doc_converter(converter, path) {
                Ok(text) => return Ok(ParsedContent::new(Some(text))),
                Err(e) => {
                    warn!("{} failed for {}: {:#}", converter, path.display(), e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("no DOC converter succeeded")))
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentParser for DocumentParser {
    fn parse(&self, path: &Path) -> Result<ParsedContent> {
        match utils::get_extension(path).as_deref() {
            Some("pdf") => self.parse_pdf(path),
            Some("doc") => self.parse_doc(path),
            other => anyhow::bail!(
                "document parser cannot read .{} files",
                other.unwrap_or("<none>")
            ),
        }
    }
}

/// Choose between lopdf's page text and a whole-document fallback.
///
/// lopdf's text is kept only when every page decoded and something was found.
/// A blank document whose fallback also fails has no text layer (`None`);
/// a partially decoded one is an error, since keeping it would drop pages.
fn select_pdf_text<F>(lopdf_text: String, failed_pages: &[u32], fallback: F) -> Result<Option<String>>
where
    F: FnOnce() -> Result<String>,
{
    if failed_pages.is_empty() && !lopdf_text.trim().is_empty() {
        return Ok(Some(lopdf_text));
    }

    match fallback() {
        Ok(text) => Ok(Some(text)),
        Err(e) if lopdf_text.trim().is_empty() => {
            debug!("pdf-extract found no text: {:#}", e);
            Ok(None)
        }
        Err(e) => Err(e.context(format!("pages {:?} could not be decoded", failed_pages))),
    }
}

/// Run one external .doc converter and capture its UTF-8 stdout
fn run_doc_converter(converter: &str, path: &Path) -> Result<String> {
    let mut command = Command::new(converter);
    match converter {
        "antiword" => command.arg("-m").arg("UTF-8.txt"),
        "catdoc" => command.arg("-d").arg("utf-8"),
        _ => &mut command,
    };

    let output = command
        .arg(path)
        .output()
        .with_context(|| format!("Failed to execute {}", converter))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("{} failed: {}", converter, stderr.trim());
    }

    String::from_utf8(output.stdout)
        .with_context(|| format!("{} returned invalid UTF-8", converter))
}
