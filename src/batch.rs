use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::error::ExtractError;
use crate::models::{BatchSummary, DocumentKind, FileOutcome, FileReport};
use crate::utils;
use indicatif::ProgressBar;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use walkdir::WalkDir;

/// Extracts every document in the input folder into the output folder, one file at a time
pub struct BatchRunner {
    config: Config,
    dispatcher: Dispatcher,
    progress: ProgressBar,
}

impl BatchRunner {
    pub fn new(config: Config, dispatcher: Dispatcher) -> Self {
        Self {
            config,
            dispatcher,
            progress: ProgressBar::hidden(),
        }
    }

    /// Drive a visible progress bar instead of the hidden default
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Regular files directly inside the input folder (no recursion)
    pub fn list_inputs(&self) -> Result<Vec<PathBuf>, ExtractError> {
        let input_dir = &self.config.input_dir;
        let metadata = std::fs::metadata(input_dir).map_err(|e| ExtractError::io(input_dir, e))?;
        if !metadata.is_dir() {
            return Err(ExtractError::io(
                input_dir,
                std::io::Error::new(std::io::ErrorKind::Other, "input path is not a directory"),
            ));
        }

        let mut walker = WalkDir::new(input_dir).min_depth(1).max_depth(1);
        if self.config.sort_entries {
            walker = walker.sort_by_file_name();
        }

        let mut files = Vec::new();
        for entry in walker {
            match entry {
                Ok(e) => {
                    if e.path().is_file() {
                        files.push(e.path().to_path_buf());
                    }
                }
                Err(e) => {
                    warn!("Error accessing entry in {}: {}", input_dir.display(), e);
                }
            }
        }
        Ok(files)
    }

    /// Process the whole folder. Per-file failures are logged and recorded, never returned.
    pub async fn run(&self) -> Result<BatchSummary, ExtractError> {
        let inputs = self.list_inputs()?;

        let output_dir = &self.config.output_dir;
        if let Err(e) = tokio::fs::create_dir_all(output_dir).await {
            error!("Failed to create output directory {}: {}", output_dir.display(), e);
        }

        info!(
            "Found {} files in {}",
            inputs.len(),
            self.config.input_dir.display()
        );
        self.progress.set_length(inputs.len() as u64);

        let mut summary = BatchSummary::default();
        let mut written: HashSet<PathBuf> = HashSet::new();

        for path in &inputs {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            info!("Processing file: {}", file_name);
            self.progress.set_message(format!("Extracting: {}", file_name));

            let report = match self.process_file(path).await {
                Ok((kind, output)) => {
                    info!("Saved extracted text to {}", output.display());
                    if !written.insert(output.clone()) {
                        warn!(
                            "{} overwrote output of an earlier file with the same name",
                            file_name
                        );
                    }
                    FileReport {
                        file_name,
                        kind: Some(kind),
                        outcome: FileOutcome::Saved { output },
                    }
                }
                Err((kind, e)) => {
                    let message = e.report();
                    error!("Error processing {}: {}", file_name, message);
                    FileReport {
                        file_name,
                        kind,
                        outcome: FileOutcome::Failed {
                            failure: e.kind(),
                            message,
                        },
                    }
                }
            };

            summary.record(report);
            self.progress.inc(1);
        }

        self.progress.finish_with_message(format!(
            "{} saved, {} failed",
            summary.succeeded, summary.failed
        ));
        info!(
            "Processed {} files: {} succeeded, {} failed",
            summary.processed, summary.succeeded, summary.failed
        );

        Ok(summary)
    }

    async fn process_file(
        &self,
        path: &Path,
    ) -> Result<(DocumentKind, PathBuf), (Option<DocumentKind>, ExtractError)> {
        let detection = self.dispatcher.detect(path).await.map_err(|e| (None, e))?;
        let kind = detection.document.kind;
        let extracted = self
            .dispatcher
            .extract(detection)
            .await
            .map_err(|e| (Some(kind), e))?;

        // Written only once extraction has fully succeeded
        let output = utils::output_path_for(&self.config.output_dir, path);
        tokio::fs::write(&output, extracted.text.as_bytes())
            .await
            .map_err(|e| (Some(kind), ExtractError::io(&output, e)))?;

        Ok((kind, output))
    }
}
