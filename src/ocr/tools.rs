//! Helpers for invoking the external Poppler and Tesseract binaries.

use std::ffi::OsString;
use std::process::{ExitStatus, Output};

use super::backend::ExtractionError;

/// Binaries the extraction pipeline shells out to.
pub const REQUIRED_TOOLS: [&str; 3] = ["pdftotext", "pdftoppm", "tesseract"];

pub const PDFTOTEXT_NOT_FOUND: &str = "pdftotext (install poppler-utils)";
pub const PDFTOPPM_NOT_FOUND: &str = "pdftoppm (install poppler-utils)";
pub const TESSERACT_NOT_FOUND: &str = "tesseract (install tesseract-ocr)";

/// Check if a binary is available in PATH.
pub fn check_binary(name: &str) -> bool {
    check_binary_in(name, std::env::var_os("PATH"))
}

/// Look `name` up in an explicit search path (PATH syntax).
fn check_binary_in(name: &str, search_path: Option<OsString>) -> bool {
    which::which_in(name, search_path, ".").is_ok()
}

/// Availability of every required tool, in a fixed order.
pub fn check_tools() -> Vec<(&'static str, bool)> {
    REQUIRED_TOOLS
        .iter()
        .map(|tool| (*tool, check_binary(tool)))
        .collect()
}

/// Handle command output, extracting stdout on success or returning appropriate error.
pub fn handle_cmd_output(
    result: std::io::Result<Output>,
    tool_name: &str,
    error_prefix: &str,
) -> Result<String, ExtractionError> {
    match result {
        Ok(output) => {
            if output.status.success() {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(ExtractionError::ExtractionFailed(format!(
                    "{}: {}",
                    error_prefix,
                    stderr.trim()
                )))
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractionError::ToolNotFound(tool_name.to_string()))
        }
        Err(e) => Err(ExtractionError::Io(e)),
    }
}

/// Check command status, returning appropriate error on failure.
pub fn check_cmd_status(
    result: std::io::Result<ExitStatus>,
    tool_name: &str,
    error_msg: &str,
) -> Result<(), ExtractionError> {
    match result {
        Ok(s) if s.success() => Ok(()),
        Ok(_) => Err(ExtractionError::ExtractionFailed(error_msg.to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractionError::ToolNotFound(tool_name.to_string()))
        }
        Err(e) => Err(ExtractionError::Io(e)),
    }
}
