use crate::extractor::parser::ContentParser;
use crate::extractor::r#trait::TextExtractor;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// Backend for text-based PDFs and .doc files: the parser's content, verbatim
pub struct GenericParserExtractor {
    parser: Arc<dyn ContentParser>,
}

impl GenericParserExtractor {
    pub fn new(parser: Arc<dyn ContentParser>) -> Self {
        Self { parser }
    }
}

#[async_trait::async_trait]
impl TextExtractor for GenericParserExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let parser = self.parser.clone();
        let owned = path.to_path_buf();
        let parsed = tokio::task::spawn_blocking(move || parser.parse(&owned)).await??;

        match parsed.content {
            Some(content) => Ok(content),
            None => anyhow::bail!("parser returned no content for {}", path.display()),
        }
    }

    fn name(&self) -> &'static str {
        "document parser"
    }
}
