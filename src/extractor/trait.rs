use anyhow::Result;
use std::path::Path;

/// Trait for text extractors that turn one document into plain text
#[async_trait::async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract text content from a file
    async fn extract(&self, path: &Path) -> Result<String>;

    /// Short backend name for log lines
    fn name(&self) -> &'static str;
}
