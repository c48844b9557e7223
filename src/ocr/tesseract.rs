//! Tesseract OCR backend implementation.
//!
//! Uses Tesseract OCR via command-line for text extraction.

use std::path::Path;
use std::process::Command;
use std::time::Instant;

use tracing::debug;

use super::backend::{CancelFlag, ExtractionError, OcrBackend, PageImage};
use super::tools::{handle_cmd_output, TESSERACT_NOT_FOUND};

/// Default OCR language.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Tesseract OCR backend.
#[derive(Debug, Clone, Default)]
pub struct TesseractBackend;

impl TesseractBackend {
    pub fn new() -> Self {
        Self
    }

    /// Run Tesseract on an image file.
    fn run_tesseract(&self, image_path: &Path, language: &str) -> Result<String, ExtractionError> {
        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .args(["-l", language])
            .output();

        handle_cmd_output(output, TESSERACT_NOT_FOUND, "tesseract failed")
    }
}

impl OcrBackend for TesseractBackend {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(
        &self,
        images: &[PageImage],
        language: &str,
        cancel: &CancelFlag,
    ) -> Result<Vec<String>, ExtractionError> {
        let mut texts = Vec::with_capacity(images.len());
        for image in images {
            if cancel.is_cancelled() {
                debug!(
                    "tesseract stopped before page {} of {}",
                    image.page_number,
                    images.len()
                );
                return Err(ExtractionError::Cancelled);
            }
            let start = Instant::now();
            let text = self.run_tesseract(&image.path, language)?;
            debug!(
                "tesseract page {}: {} chars in {}ms",
                image.page_number,
                text.len(),
                start.elapsed().as_millis()
            );
            texts.push(text);
        }
        Ok(texts)
    }
}
