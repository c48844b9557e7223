//! OCR and text extraction components.
//!
//! Extracts text from PDFs using:
//! - pdftotext (Poppler) for the embedded text layer
//! - pdftoppm (Poppler) for rendering pages to PNG
//! - Tesseract OCR for recognizing text in rendered pages
//!
//! Each tool sits behind a trait from [`backend`] so the orchestrator in
//! `services::extraction` can run against any implementation.

mod backend;
mod pdftoppm;
mod pdftotext;
mod tesseract;
pub mod tools;

pub use backend::{
    CancelFlag, ExtractionError, OcrBackend, PageImage, PageRenderer, RenderedPages,
    TextLayerExtractor,
};
pub use pdftoppm::{PdftoppmRenderer, DEFAULT_DPI};
pub use pdftotext::PdfToTextExtractor;
pub use tesseract::{TesseractBackend, DEFAULT_LANGUAGE};
