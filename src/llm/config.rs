//! LLM client configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the Ollama chat client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL (without the `/api/...` path)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model to use for analysis
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds; local models can be very slow on long documents
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "mistral".to_string()
}

fn default_timeout_secs() -> u64 {
    6000
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `OLLAMA_BASE_URL`: API endpoint
    /// - `OLLAMA_MODEL`: Model name
    /// - `LLM_TIMEOUT_SECS`: Request timeout in seconds
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("OLLAMA_BASE_URL") {
            self.endpoint = val;
        }
        if let Ok(val) = std::env::var("OLLAMA_MODEL") {
            self.model = val;
        }
        if let Ok(val) = std::env::var("LLM_TIMEOUT_SECS") {
            match val.parse() {
                Ok(n) => self.timeout_secs = n,
                Err(_) => tracing::warn!("Ignoring invalid LLM_TIMEOUT_SECS: {}", val),
            }
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Endpoint without a trailing slash, ready for path joining.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }
}
