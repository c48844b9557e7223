//! Per-page and document-level extraction results.

use serde::{Deserialize, Serialize};

/// Text from both sources for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageExtraction {
    /// 1-based page number.
    pub page_number: usize,
    /// Raw text from the PDF text layer.
    #[serde(default)]
    pub text_pdf: String,
    /// Raw text recognized from the rendered page image.
    #[serde(default)]
    pub text_ocr: String,
}

/// Cleaned, line-wise view of a text. No line contains a newline or is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedText {
    #[serde(default)]
    pub lines: Vec<String>,
}

impl NormalizedText {
    /// Rejoin the lines into a single newline-separated string.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Normalized views of both sources for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageExtractionNormalized {
    pub page_number: usize,
    pub pdf: NormalizedText,
    pub ocr: NormalizedText,
}

/// Result of dual extraction over a whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub num_pages: usize,
    pub pages: Vec<PageExtraction>,
    /// All page texts (PDF + OCR) concatenated with page/source labels.
    #[serde(default)]
    pub merged_text: String,
    /// Verification-friendly view; empty when normalization is disabled.
    #[serde(default)]
    pub normalized_pages: Vec<PageExtractionNormalized>,
}
