pub mod docx;
pub mod factory;
pub mod generic;
pub mod ocr;
pub mod parser;
pub mod r#trait;

#[cfg(test)]
pub(crate) mod fakes;

pub use docx::{DocxExtractor, DocxReader, WordReader};
pub use factory::{Backends, ExtractorFactory, OcrSettings};
pub use generic::GenericParserExtractor;
pub use ocr::{OcrEngine, OcrExtractor, PageRasterizer, PdftoppmRasterizer, RenderedPages, TesseractEngine};
pub use parser::{ContentParser, DocumentParser};
pub use r#trait::TextExtractor;
