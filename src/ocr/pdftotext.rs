//! Text-layer extraction via Poppler's pdftotext.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use super::backend::{ExtractionError, TextLayerExtractor};
use super::tools::{handle_cmd_output, PDFTOTEXT_NOT_FOUND};

/// Page separator pdftotext writes after every page.
const FORM_FEED: char = '\u{c}';

/// Reads the embedded text layer with `pdftotext`.
#[derive(Debug, Clone, Default)]
pub struct PdfToTextExtractor {
    /// Pass `-layout` to keep the physical column layout.
    layout: bool,
}

impl PdfToTextExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: bool) -> Self {
        self.layout = layout;
        self
    }

    /// Run pdftotext over the whole document, writing to stdout.
    fn run_pdftotext(&self, file_path: &Path) -> Result<String, ExtractionError> {
        let mut cmd = Command::new("pdftotext");
        if self.layout {
            cmd.arg("-layout");
        }
        let output = cmd
            .args(["-enc", "UTF-8"])
            .arg(file_path)
            .arg("-") // Output to stdout
            .output();

        handle_cmd_output(output, PDFTOTEXT_NOT_FOUND, "pdftotext failed")
    }
}

impl TextLayerExtractor for PdfToTextExtractor {
    fn extract_text(&self, pdf_path: &Path) -> Result<Vec<String>, ExtractionError> {
        let raw = self.run_pdftotext(pdf_path)?;
        let pages = split_pages(&raw);
        debug!("pdftotext read {} pages from {}", pages.len(), pdf_path.display());
        Ok(pages)
    }
}

/// Split pdftotext output into per-page strings.
///
/// Every page is terminated by a form feed, so the segment after the last one
/// is not a page.
pub(crate) fn split_pages(raw: &str) -> Vec<String> {
    let body = raw.strip_suffix(FORM_FEED).unwrap_or(raw);
    body.split(FORM_FEED).map(str::to_string).collect()
}
