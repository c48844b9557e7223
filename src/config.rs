//! Configuration management for duoscan.
//!
//! Settings are resolved once at startup, lowest to highest priority:
//! built-in defaults, an optional TOML file, then environment variables.
//! CLI flags are applied on top by the command that needs them.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm::LlmConfig;
use crate::ocr::{DEFAULT_DPI, DEFAULT_LANGUAGE};

/// Default upload staging directory.
pub const DEFAULT_UPLOAD_DIR: &str = "/tmp/pdf_extractor";

/// Default request body limit (50 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Errors while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory where uploaded PDFs are staged during a request.
    pub upload_dir: PathBuf,
    /// Resolution used when rendering pages for OCR.
    pub render_dpi: u32,
    /// Tesseract language code.
    pub ocr_language: String,
    /// Keep the physical layout when reading the text layer.
    pub text_layout: bool,
    /// Include normalized per-page line views in results.
    pub normalized_view: bool,
    /// Upper bound for one extraction, in seconds (None = unbounded).
    pub extraction_timeout_secs: Option<u64>,
    /// Maximum accepted request body size.
    pub max_upload_bytes: usize,
    /// LLM endpoint settings.
    pub llm: LlmConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            render_dpi: DEFAULT_DPI,
            ocr_language: DEFAULT_LANGUAGE.to_string(),
            text_layout: false,
            normalized_view: true,
            extraction_timeout_secs: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            llm: LlmConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from an optional TOML file, then apply env overrides.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    /// Parse a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(settings)
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `UPLOAD_DIR`: staging directory for uploads
    /// - `RENDER_DPI`: page rendering resolution
    /// - `OCR_LANGUAGE`: Tesseract language code
    /// - `PDFTOTEXT_LAYOUT`: "true" or "false"
    /// - `NORMALIZED_VIEW`: "true" or "false"
    /// - `EXTRACTION_TIMEOUT_SECS`: extraction time limit
    /// - `MAX_UPLOAD_BYTES`: request body limit
    /// - plus the LLM variables documented on [`LlmConfig::with_env_overrides`]
    ///
    /// Invalid numeric values are logged and ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("UPLOAD_DIR") {
            self.upload_dir = PathBuf::from(val);
        }
        if let Some(dpi) = env_parse("RENDER_DPI") {
            self.render_dpi = dpi;
        }
        if let Ok(val) = std::env::var("OCR_LANGUAGE") {
            self.ocr_language = val;
        }
        if let Ok(val) = std::env::var("PDFTOTEXT_LAYOUT") {
            self.text_layout = parse_bool(&val);
        }
        if let Ok(val) = std::env::var("NORMALIZED_VIEW") {
            self.normalized_view = parse_bool(&val);
        }
        if let Some(secs) = env_parse("EXTRACTION_TIMEOUT_SECS") {
            self.extraction_timeout_secs = Some(secs);
        }
        if let Some(bytes) = env_parse("MAX_UPLOAD_BYTES") {
            self.max_upload_bytes = bytes;
        }
        self.llm = self.llm.with_env_overrides();
        self
    }
}

fn parse_bool(val: &str) -> bool {
    val.eq_ignore_ascii_case("true") || val == "1"
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    let val = std::env::var(name).ok()?;
    match val.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}: {}", name, val);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.upload_dir, PathBuf::from("/tmp/pdf_extractor"));
        assert_eq!(settings.render_dpi, 200);
        assert_eq!(settings.ocr_language, "eng");
        assert!(settings.normalized_view);
        assert!(!settings.text_layout);
        assert!(settings.extraction_timeout_secs.is_none());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
render_dpi = 300
normalized_view = false

[llm]
endpoint = "http://192.168.2.23:11435"
"#
        )
        .unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.render_dpi, 300);
        assert!(!settings.normalized_view);
        assert_eq!(settings.llm.endpoint, "http://192.168.2.23:11435");
        assert_eq!(settings.llm.model, "mistral");
        assert_eq!(settings.ocr_language, "eng");
    }

    #[test]
    fn test_from_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "render_dpi = \"high\"").unwrap();
        let err = Settings::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Settings::from_file(Path::new("/nonexistent/duoscan.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("no"));
        assert!(!parse_bool("0"));
    }
}
