//! duoscan - dual PDF text extraction.
//!
//! Every page is read twice: from the PDF's own text layer (`pdftotext`) and
//! from a rendered image run through OCR (`pdftoppm` + `tesseract`). Both
//! views are kept side by side and merged into a single labelled document
//! that can be passed to a local LLM for analysis.

pub mod config;
pub mod llm;
pub mod models;
pub mod ocr;
pub mod server;
pub mod services;

#[cfg(test)]
mod test_support;
