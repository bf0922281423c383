use crate::constants::{DEFAULT_INPUT_DIR, DEFAULT_OCR_DPI, DEFAULT_OCR_LANGUAGE, DEFAULT_OUTPUT_DIR};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Run configuration loaded from settings.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Folder holding the résumés to extract
    pub input_dir: PathBuf,
    /// Folder receiving one .txt per extracted document
    pub output_dir: PathBuf,
    /// Tesseract language code for scanned PDFs
    pub ocr_language: String,
    /// Rasterisation resolution for scanned PDFs
    pub ocr_dpi: u32,
    /// Process files in lexical name order instead of directory listing order
    pub sort_entries: bool,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration from default location or return defaults
    pub fn load() -> Result<Self> {
        let default_paths: Vec<PathBuf> = [
            "config/settings.toml",
            "./config/settings.toml",
            "~/.config/cvtext/settings.toml",
        ]
        .iter()
        .map(|raw| PathBuf::from(shellexpand::tilde(raw).into_owned()))
        .collect();

        Self::load_from(&default_paths)
    }

    /// First existing file wins; a file that exists but does not parse is an error
    pub fn load_from(paths: &[PathBuf]) -> Result<Self> {
        for path in paths {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        Ok(Self::default())
    }

    /// Reject settings that would make every file fail
    pub fn validate(&self) -> Result<()> {
        self.validate_ocr()?;
        if self.input_dir == self.output_dir {
            anyhow::bail!(
                "output directory must differ from the input directory ({})",
                self.input_dir.display()
            );
        }
        Ok(())
    }

    /// OCR settings only, for callers that never touch the folders
    pub fn validate_ocr(&self) -> Result<()> {
        if self.ocr_dpi == 0 {
            anyhow::bail!("ocr_dpi must be greater than zero");
        }
        if self.ocr_language.trim().is_empty() {
            anyhow::bail!("ocr_language must not be empty");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            ocr_dpi: DEFAULT_OCR_DPI,
            sort_entries: true,
        }
    }
}
