//! Page rendering via Poppler's pdftoppm.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;
use tracing::debug;

use super::backend::{ExtractionError, PageImage, PageRenderer, RenderedPages};
use super::tools::{check_cmd_status, PDFTOPPM_NOT_FOUND};

/// Default rendering resolution, a balance between OCR accuracy and cost.
pub const DEFAULT_DPI: u32 = 200;

/// Output file prefix passed to pdftoppm.
const PAGE_PREFIX: &str = "page";

/// Renders PDF pages to PNG files with `pdftoppm`.
#[derive(Debug, Clone, Default)]
pub struct PdftoppmRenderer;

impl PdftoppmRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl PageRenderer for PdftoppmRenderer {
    fn render(&self, pdf_path: &Path, dpi: u32) -> Result<RenderedPages, ExtractionError> {
        let temp_dir = TempDir::new()?;
        let dpi_str = dpi.to_string();

        let status = Command::new("pdftoppm")
            .args(["-png", "-r", &dpi_str])
            .arg(pdf_path)
            .arg(temp_dir.path().join(PAGE_PREFIX))
            .status();

        check_cmd_status(status, PDFTOPPM_NOT_FOUND, "pdftoppm failed to convert PDF")?;

        let pages = collect_page_images(temp_dir.path())?;
        if pages.is_empty() {
            return Err(ExtractionError::ExtractionFailed(
                "No images generated from PDF".to_string(),
            ));
        }

        debug!(
            "pdftoppm rendered {} pages at {} dpi from {}",
            pages.len(),
            dpi,
            pdf_path.display()
        );
        Ok(RenderedPages::in_scratch_dir(pages, temp_dir))
    }
}

/// List rendered images in `dir`, ordered by page number.
///
/// pdftoppm names files like page-1.png, page-01.png or page-001.png
/// depending on the document's page count.
pub(crate) fn collect_page_images(dir: &Path) -> Result<Vec<PageImage>, ExtractionError> {
    let mut pages: Vec<PageImage> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter_map(|path| {
            let page_number = parse_page_number(path.file_name()?.to_str()?)?;
            Some(PageImage { page_number, path })
        })
        .collect();

    pages.sort_by_key(|p| p.page_number);
    Ok(pages)
}

fn parse_page_number(filename: &str) -> Option<u32> {
    filename
        .strip_prefix(PAGE_PREFIX)?
        .strip_prefix('-')?
        .strip_suffix(".png")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_number() {
        assert_eq!(parse_page_number("page-1.png"), Some(1));
        assert_eq!(parse_page_number("page-01.png"), Some(1));
        assert_eq!(parse_page_number("page-120.png"), Some(120));
        assert_eq!(parse_page_number("page-1.ppm"), None);
        assert_eq!(parse_page_number("thumb-1.png"), None);
    }

    #[test]
    fn test_collect_page_images_orders_numerically() {
        let temp = TempDir::new().unwrap();
        for name in ["page-10.png", "page-2.png", "page-1.png", "notes.txt"] {
            std::fs::write(temp.path().join(name), b"fake png").unwrap();
        }

        let pages = collect_page_images(temp.path()).unwrap();
        let numbers: Vec<u32> = pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 10]);
        assert_eq!(pages[2].path, temp.path().join("page-10.png"));
    }

    #[test]
    fn test_collect_page_images_empty_dir() {
        let temp = TempDir::new().unwrap();
        assert!(collect_page_images(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_scratch_dir_removed_on_drop() {
        let temp = TempDir::new().unwrap();
        let dir_path = temp.path().to_path_buf();
        std::fs::write(dir_path.join("page-1.png"), b"fake png").unwrap();

        let pages = collect_page_images(&dir_path).unwrap();
        let rendered = RenderedPages::in_scratch_dir(pages, temp);
        assert_eq!(rendered.len(), 1);
        assert!(dir_path.exists());

        drop(rendered);
        assert!(!dir_path.exists());
    }
}
