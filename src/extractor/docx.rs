use crate::extractor::r#trait::TextExtractor;
use anyhow::{Context, Result};
use docx_rs::{DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild};
use std::path::Path;
use std::sync::Arc;

/// Word-processor document reader
pub trait WordReader: Send + Sync {
    /// Body paragraphs in document order, formatting dropped
    fn paragraphs(&self, path: &Path) -> Result<Vec<String>>;
}

/// Reads .docx packages with docx-rs
#[derive(Debug, Default)]
pub struct DocxReader;

impl DocxReader {
    pub fn new() -> Self {
        Self
    }
}

impl WordReader for DocxReader {
    fn paragraphs(&self, path: &Path) -> Result<Vec<String>> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read DOCX file: {}", path.display()))?;

        let docx = docx_rs::read_docx(&bytes)
            .map_err(|e| anyhow::anyhow!("Failed to parse DOCX {}: {:?}", path.display(), e))?;

        // Tables and other block content are not body paragraphs
        let paragraphs = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
                _ => None,
            })
            .collect();

        Ok(paragraphs)
    }
}

/// Plain text of one paragraph: run texts concatenated, tabs and breaks kept
fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    push_children_text(&para.children, &mut text);
    text
}

/// Hyperlinks and tracked insertions hold visible runs of their own
fn push_children_text(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, text),
            ParagraphChild::Hyperlink(link) => push_children_text(&link.children, text),
            ParagraphChild::Insert(ins) => {
                for ic in &ins.children {
                    if let InsertChild::Run(run) = ic {
                        push_run_text(run, text);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run_text(run: &Run, text: &mut String) {
    for rc in &run.children {
        match rc {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

/// Join paragraphs with newline separators, empty paragraphs included
pub fn join_paragraphs(paragraphs: &[String]) -> String {
    paragraphs.join("\n")
}

/// DOCX backend
pub struct DocxExtractor {
    reader: Arc<dyn WordReader>,
}

impl DocxExtractor {
    pub fn new(reader: Arc<dyn WordReader>) -> Self {
        Self { reader }
    }
}

#[async_trait::async_trait]
impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let reader = self.reader.clone();
        let path = path.to_path_buf();
        let paragraphs = tokio::task::spawn_blocking(move || reader.paragraphs(&path)).await??;

        Ok(join_paragraphs(&paragraphs))
    }

    fn name(&self) -> &'static str {
        "docx"
    }
}
