//! Dual extraction: text layer and OCR, merged per page.
//!
//! Phase 1 runs text-layer extraction and page rendering side by side on the
//! blocking pool. Phase 2 runs OCR over the rendered pages once rendering is
//! done. The two page lists are then merged into one [`ExtractionResult`].
//! A failure in any phase fails the whole extraction.

mod merge;
mod normalize;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::Settings;
use crate::models::ExtractionResult;
use crate::ocr::{
    CancelFlag, ExtractionError, OcrBackend, PageRenderer, PdfToTextExtractor, PdftoppmRenderer,
    TesseractBackend, TextLayerExtractor, DEFAULT_DPI, DEFAULT_LANGUAGE,
};

pub use merge::{build_result, merge_pages, merged_text, normalized_pages};
pub use normalize::normalize;

/// Tunables for one extractor instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOptions {
    /// Rendering resolution for OCR input.
    pub dpi: u32,
    /// OCR language code.
    pub language: String,
    /// Attach normalized per-page line views.
    pub normalized_view: bool,
    /// Abort extraction after this long.
    pub timeout: Option<Duration>,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            language: DEFAULT_LANGUAGE.to_string(),
            normalized_view: true,
            timeout: None,
        }
    }
}

impl ExtractionOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            dpi: settings.render_dpi,
            language: settings.ocr_language.clone(),
            normalized_view: settings.normalized_view,
            timeout: settings.extraction_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Orchestrates text-layer extraction, rendering and OCR for one PDF at a time.
///
/// Stateless between calls; a single instance is shared by all requests.
#[derive(Clone)]
pub struct DualExtractor {
    text_layer: Arc<dyn TextLayerExtractor>,
    renderer: Arc<dyn PageRenderer>,
    ocr: Arc<dyn OcrBackend>,
    options: ExtractionOptions,
}

impl DualExtractor {
    pub fn new(
        text_layer: Arc<dyn TextLayerExtractor>,
        renderer: Arc<dyn PageRenderer>,
        ocr: Arc<dyn OcrBackend>,
    ) -> Self {
        Self {
            text_layer,
            renderer,
            ocr,
            options: ExtractionOptions::default(),
        }
    }

    /// Poppler + Tesseract pipeline configured from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Arc::new(PdfToTextExtractor::new().with_layout(settings.text_layout)),
            Arc::new(PdftoppmRenderer::new()),
            Arc::new(TesseractBackend::new()),
        )
        .with_options(ExtractionOptions::from_settings(settings))
    }

    pub fn with_options(mut self, options: ExtractionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    /// Extract and merge both text sources for the PDF at `pdf_path`.
    pub async fn extract(&self, pdf_path: &Path) -> Result<ExtractionResult, ExtractionError> {
        match self.options.timeout {
            Some(limit) => tokio::time::timeout(limit, self.run(pdf_path))
                .await
                .map_err(|_| ExtractionError::Timeout(limit.as_secs()))?,
            None => self.run(pdf_path).await,
        }
    }

    async fn run(&self, pdf_path: &Path) -> Result<ExtractionResult, ExtractionError> {
        let start = Instant::now();
        // Stops OCR between pages if this future is dropped (timeout, client gone)
        let cancel = CancelFlag::new();
        let _cancel_on_exit = CancelOnDrop(cancel.clone());

        // Phase 1: text layer and rendering are independent
        let text_task = {
            let text_layer = Arc::clone(&self.text_layer);
            let path = pdf_path.to_path_buf();
            tokio::task::spawn_blocking(move || text_layer.extract_text(&path))
        };
        let render_task = {
            let renderer = Arc::clone(&self.renderer);
            let path: PathBuf = pdf_path.to_path_buf();
            let dpi = self.options.dpi;
            tokio::task::spawn_blocking(move || renderer.render(&path, dpi))
        };

        let (text_pages, rendered) = tokio::try_join!(
            join_stage(text_task, "text layer"),
            join_stage(render_task, "render")
        )?;
        debug!(
            "Phase 1 done in {}ms: {} text pages, {} rendered pages",
            start.elapsed().as_millis(),
            text_pages.len(),
            rendered.len()
        );

        // Phase 2: OCR consumes the rendered pages; the scratch dir goes with them
        let ocr_task = {
            let ocr = Arc::clone(&self.ocr);
            let language = self.options.language.clone();
            tokio::task::spawn_blocking(move || {
                ocr.recognize(rendered.pages(), &language, &cancel)
            })
        };
        let ocr_pages = join_stage(ocr_task, self.ocr.name()).await?;

        if text_pages.len() != ocr_pages.len() {
            debug!(
                "Page count mismatch for {}: text layer {}, OCR {}",
                pdf_path.display(),
                text_pages.len(),
                ocr_pages.len()
            );
        }

        let result = build_result(text_pages, ocr_pages, self.options.normalized_view);
        info!(
            "Extracted {} pages from {} in {}ms",
            result.num_pages,
            pdf_path.display(),
            start.elapsed().as_millis()
        );
        Ok(result)
    }
}

/// Sets its flag when dropped.
struct CancelOnDrop(CancelFlag);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

/// Await a blocking stage, folding panics and cancellation into extraction errors.
async fn join_stage<T>(
    handle: JoinHandle<Result<T, ExtractionError>>,
    stage: &str,
) -> Result<T, ExtractionError> {
    handle
        .await
        .map_err(|e| ExtractionError::Worker(format!("{} task failed: {}", stage, e)))?
}
