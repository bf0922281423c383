use crate::models::FailureKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can surface while processing one document.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file type: {}", .path.display())]
    UnsupportedType { path: PathBuf },
    #[error("failed to extract text from {}: {source}", .path.display())]
    Extraction {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    pub fn unsupported(path: impl Into<PathBuf>) -> Self {
        ExtractError::UnsupportedType { path: path.into() }
    }

    /// Wrap a backend failure. Accepts `anyhow::Error` as well as plain std errors.
    pub fn extraction(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        ExtractError::Extraction {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ExtractError::UnsupportedType { .. } => FailureKind::UnsupportedType,
            ExtractError::Extraction { .. } => FailureKind::Extraction,
            ExtractError::Io { .. } => FailureKind::Io,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ExtractError::UnsupportedType { path }
            | ExtractError::Extraction { path, .. }
            | ExtractError::Io { path, .. } => path,
        }
    }

    /// Message including every cause in the chain, for log lines and summaries
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut cause = std::error::Error::source(self).and_then(|s| s.source());
        while let Some(err) = cause {
            message.push_str(": ");
            message.push_str(&err.to_string());
            cause = err.source();
        }
        message
    }
}
