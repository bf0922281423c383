/// Constants used throughout cvtext
/// This module centralizes default values and recognised file types

/// File extensions (lower-case, without the dot) that can be extracted
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "pdf",
    "doc",
    "docx",
];

/// Extension given to every output file
pub const OUTPUT_EXTENSION: &str = "txt";

/// Rasterisation resolution for scanned PDFs
pub const DEFAULT_OCR_DPI: u32 = 300;

/// Tesseract language code
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Folder scanned when neither the config file nor the CLI names one
pub const DEFAULT_INPUT_DIR: &str = "resumes";

/// Folder written to when neither the config file nor the CLI names one
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// External converters tried in order for legacy .doc files
pub const DOC_CONVERTERS: &[&str] = &[
    "antiword",
    "catdoc",
];

/// External tools needed by the OCR backend
pub const OCR_TOOLS: &[&str] = &[
    "pdftoppm",      // poppler-utils
    "tesseract",     // tesseract-ocr
];
