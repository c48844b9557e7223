//! Merging text-layer and OCR results into one document view.

use crate::models::{ExtractionResult, PageExtraction, PageExtractionNormalized};

use super::normalize::normalize;

/// Pair up per-page results from both sources.
///
/// The document is as long as the longer source; the shorter side is filled
/// with empty strings.
pub fn merge_pages(text_pages: Vec<String>, ocr_pages: Vec<String>) -> Vec<PageExtraction> {
    let num_pages = text_pages.len().max(ocr_pages.len());
    let mut text_iter = text_pages.into_iter();
    let mut ocr_iter = ocr_pages.into_iter();

    (1..=num_pages)
        .map(|page_number| PageExtraction {
            page_number,
            text_pdf: text_iter.next().unwrap_or_default(),
            text_ocr: ocr_iter.next().unwrap_or_default(),
        })
        .collect()
}

/// Build the labeled text sent to the LLM.
///
/// Per page, a PDF block then an OCR block, each `"[PAGE n SOURCE]\n{text}\n"`,
/// with a blank line between consecutive blocks.
pub fn merged_text(pages: &[PageExtraction]) -> String {
    let fragments: Vec<String> = pages
        .iter()
        .flat_map(|page| {
            [
                format!("[PAGE {} PDF]\n{}\n", page.page_number, page.text_pdf),
                format!("[PAGE {} OCR]\n{}\n", page.page_number, page.text_ocr),
            ]
        })
        .collect();

    fragments.join("\n")
}

/// Normalized line views for every page, in page order.
pub fn normalized_pages(pages: &[PageExtraction]) -> Vec<PageExtractionNormalized> {
    pages
        .iter()
        .map(|page| PageExtractionNormalized {
            page_number: page.page_number,
            pdf: normalize(&page.text_pdf),
            ocr: normalize(&page.text_ocr),
        })
        .collect()
}

/// Assemble the document-level result from both sources.
pub fn build_result(
    text_pages: Vec<String>,
    ocr_pages: Vec<String>,
    with_normalized: bool,
) -> ExtractionResult {
    let pages = merge_pages(text_pages, ocr_pages);
    let merged_text = merged_text(&pages);
    let normalized_pages = if with_normalized {
        normalized_pages(&pages)
    } else {
        Vec::new()
    };

    ExtractionResult {
        num_pages: pages.len(),
        pages,
        merged_text,
        normalized_pages,
    }
}
