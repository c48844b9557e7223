//! LLM client for document analysis.
//!
//! Talks to a local Ollama server through its `/api/chat` endpoint. One
//! request per analysis, no streaming and no retries.

mod config;
mod prompts;

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::LlmAnalysisResult;

pub use config::LlmConfig;
pub use prompts::{build_prompt, DEFAULT_INSTRUCTION, SYSTEM_PROMPT};

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Failed to connect to LLM service
    #[error("Connection error: {0}")]
    Connection(String),
    /// Request exceeded the configured timeout
    #[error("LLM request timed out after {0}s")]
    Timeout(u64),
    /// API returned an error
    #[error("API error: {0}")]
    Api(String),
    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),
}

/// LLM client for document analysis.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Ollama `/api/chat` request format.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    stream: bool,
    messages: Vec<ChatMessage<'a>>,
}

/// Ollama `/api/chat` response format.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: String,
}

impl LlmClient {
    /// Create a new LLM client with the given configuration.
    pub fn new(config: LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Get the config.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Check if the LLM service is reachable.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.config.base_url());
        match self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// Ask the model to apply `instruction` to the merged document text.
    ///
    /// The reply is returned verbatim, even when the instruction asks for JSON.
    pub async fn analyze(
        &self,
        instruction: &str,
        merged_text: &str,
    ) -> Result<LlmAnalysisResult, LlmError> {
        let prompt = build_prompt(instruction, merged_text);
        info!(
            "Sending {} chars to {} for analysis",
            prompt.len(),
            self.config.model
        );
        let raw_response = self.chat(&prompt).await?;

        Ok(LlmAnalysisResult {
            instruction: instruction.to_string(),
            raw_response,
        })
    }

    /// Send one chat turn and return the assistant's content.
    pub async fn chat(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.config.model,
            stream: false,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let url = format!("{}/api/chat", self.config.base_url());
        debug!("POST {}", url);
        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, body)));
        }

        let chat_resp: ChatResponse = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout(self.config.timeout_secs)
            } else {
                LlmError::Parse(e.to_string())
            }
        })?;

        Ok(chat_resp.message.map(|m| m.content).unwrap_or_default())
    }

    fn transport_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.config.timeout_secs)
        } else {
            LlmError::Connection(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_mock_ollama, spawn_server, unused_local_url, MockOllama};
    use axum::{http::StatusCode, routing::post, Router};

    #[tokio::test]
    async fn test_chat_returns_raw_content() {
        let mock = MockOllama::replying(r#"{"company_name":"Acme"}"#);
        let url = spawn_mock_ollama(mock.clone()).await;
        let client = LlmClient::new(LlmConfig::default().with_endpoint(&url));

        let analysis = client
            .analyze("Extract the company.", "[PAGE 1 PDF]\nAcme Corp\n")
            .await
            .unwrap();

        assert_eq!(analysis.instruction, "Extract the company.");
        assert_eq!(analysis.raw_response, r#"{"company_name":"Acme"}"#);
    }

    #[tokio::test]
    async fn test_request_shape() {
        let mock = MockOllama::replying("ok");
        let url = spawn_mock_ollama(mock.clone()).await;
        let client = LlmClient::new(
            LlmConfig::default()
                .with_endpoint(&format!("{}/", url))
                .with_model("mistral:7b"),
        );

        client.chat("hello").await.unwrap();

        let body = mock.last_request().unwrap();
        assert_eq!(body["model"], "mistral:7b");
        assert_eq!(body["stream"], false);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], SYSTEM_PROMPT);
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "hello");
    }

    #[tokio::test]
    async fn test_missing_message_yields_empty_content() {
        let router = Router::new().route(
            "/api/chat",
            post(|| async { axum::Json(serde_json::json!({ "done": true })) }),
        );
        let url = spawn_server(router).await;
        let client = LlmClient::new(LlmConfig::default().with_endpoint(&url));

        assert_eq!(client.chat("hi").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_http_error_is_api_error() {
        let router = Router::new().route(
            "/api/chat",
            post(|| async { (StatusCode::NOT_FOUND, "model 'mistral' not found") }),
        );
        let url = spawn_server(router).await;
        let client = LlmClient::new(LlmConfig::default().with_endpoint(&url));

        let err = client.chat("hi").await.unwrap_err();
        assert!(matches!(err, LlmError::Api(ref msg) if msg.contains("404")));
    }

    #[tokio::test]
    async fn test_non_json_body_is_parse_error() {
        let router = Router::new().route("/api/chat", post(|| async { "not json" }));
        let url = spawn_server(router).await;
        let client = LlmClient::new(LlmConfig::default().with_endpoint(&url));

        let err = client.chat("hi").await.unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        let url = unused_local_url().await;
        let client = LlmClient::new(LlmConfig::default().with_endpoint(&url));

        let err = client.chat("hi").await.unwrap_err();
        assert!(matches!(err, LlmError::Connection(_)));
        assert!(!client.is_available().await);
    }

    #[tokio::test]
    async fn test_is_available() {
        let url = spawn_mock_ollama(MockOllama::replying("ok")).await;
        let client = LlmClient::new(LlmConfig::default().with_endpoint(&url));
        assert!(client.is_available().await);
    }
}
