//! Extraction component abstractions.
//!
//! The dual extraction pipeline is assembled from three blocking components:
//! - [`TextLayerExtractor`]: reads the embedded text layer of a PDF
//! - [`PageRenderer`]: rasterizes every page of a PDF
//! - [`OcrBackend`]: recognizes text from rendered page images
//!
//! All three are synchronous and expected to run on a blocking worker thread.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tempfile::TempDir;
use thiserror::Error;

/// Errors raised by any extraction component.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Extraction worker failed: {0}")]
    Worker(String),

    #[error("Extraction timed out after {0}s")]
    Timeout(u64),

    #[error("Extraction cancelled")]
    Cancelled,
}

/// Stop signal shared with a blocking stage.
///
/// Clones share one flag. Stages check it between units of work, so a
/// cancelled stage stops after the unit in progress.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A single rendered page image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// 1-based page number as reported by the renderer.
    pub page_number: u32,
    /// Location of the raster on disk.
    pub path: PathBuf,
}

/// Ordered page rasters for one document.
///
/// When the images live in a scratch directory, that directory is owned here
/// and removed when the value is dropped.
#[derive(Debug)]
pub struct RenderedPages {
    pages: Vec<PageImage>,
    _scratch: Option<TempDir>,
}

impl RenderedPages {
    /// Wrap images that live inside `scratch`; the directory goes away with `self`.
    pub fn in_scratch_dir(pages: Vec<PageImage>, scratch: TempDir) -> Self {
        Self {
            pages,
            _scratch: Some(scratch),
        }
    }

    /// Wrap images whose storage is managed elsewhere.
    pub fn from_pages(pages: Vec<PageImage>) -> Self {
        Self {
            pages,
            _scratch: None,
        }
    }

    pub fn pages(&self) -> &[PageImage] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Extracts per-page text from a PDF's embedded text layer.
pub trait TextLayerExtractor: Send + Sync {
    /// One entry per page in document order; pages without text yield `""`.
    fn extract_text(&self, pdf_path: &Path) -> Result<Vec<String>, ExtractionError>;
}

/// Renders every page of a PDF to a raster image.
pub trait PageRenderer: Send + Sync {
    /// One image per page in document order, rendered at `dpi`.
    fn render(&self, pdf_path: &Path, dpi: u32) -> Result<RenderedPages, ExtractionError>;
}

/// Recognizes text from page images.
pub trait OcrBackend: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// One string per input image, same order. Images are processed
    /// sequentially; once `cancel` is set, no further image is started.
    fn recognize(
        &self,
        images: &[PageImage],
        language: &str,
        cancel: &CancelFlag,
    ) -> Result<Vec<String>, ExtractionError>;
}
