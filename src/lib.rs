pub mod batch;
pub mod config;
pub mod constants;
pub mod detector;
pub mod dispatcher;
pub mod error;
pub mod extractor;
pub mod models;
pub mod utils;

pub use batch::BatchRunner;
pub use config::Config;
pub use detector::{Detection, Detector};
pub use dispatcher::{Dispatcher, Extracted};
pub use error::ExtractError;
pub use extractor::{Backends, OcrSettings, TextExtractor};
pub use models::{BatchSummary, Document, DocumentKind, FailureKind};

/// Install the fmt subscriber used by the binaries (`RUST_LOG` overrides the default level)
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cvtext=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
