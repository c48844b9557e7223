//! Shared doubles for unit tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::ocr::{
    CancelFlag, ExtractionError, OcrBackend, PageImage, PageRenderer, RenderedPages,
    TextLayerExtractor,
};

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A local URL nothing is listening on.
pub async fn unused_local_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Minimal stand-in for an Ollama server.
#[derive(Clone)]
pub struct MockOllama {
    reply: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockOllama {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn last_request(&self) -> Option<Value> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn mock_chat(State(mock): State<MockOllama>, Json(body): Json<Value>) -> Json<Value> {
    mock.requests.lock().unwrap().push(body);
    Json(json!({
        "model": "mistral",
        "message": { "role": "assistant", "content": mock.reply },
        "done": true
    }))
}

pub async fn spawn_mock_ollama(mock: MockOllama) -> String {
    let router = Router::new()
        .route("/api/chat", post(mock_chat))
        .route("/api/tags", get(|| async { Json(json!({ "models": [] })) }))
        .with_state(mock);
    spawn_server(router).await
}

/// Text layer that returns fixed pages.
pub struct StaticTextLayer(pub Vec<String>);

impl TextLayerExtractor for StaticTextLayer {
    fn extract_text(&self, _pdf_path: &Path) -> Result<Vec<String>, ExtractionError> {
        Ok(self.0.clone())
    }
}

/// Renderer that pretends to produce `pages` images.
pub struct StaticRenderer {
    pub pages: u32,
}

impl PageRenderer for StaticRenderer {
    fn render(&self, _pdf_path: &Path, _dpi: u32) -> Result<RenderedPages, ExtractionError> {
        let pages = (1..=self.pages)
            .map(|page_number| PageImage {
                page_number,
                path: PathBuf::from(format!("page-{}.png", page_number)),
            })
            .collect();
        Ok(RenderedPages::from_pages(pages))
    }
}

/// OCR that returns fixed texts and records what it was asked to read.
#[derive(Default)]
pub struct StaticOcr {
    texts: Vec<String>,
    calls: Mutex<Vec<(Vec<u32>, String)>>,
}

impl StaticOcr {
    pub fn new(texts: Vec<String>) -> Self {
        Self {
            texts,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Page numbers and language of every call so far.
    pub fn calls(&self) -> Vec<(Vec<u32>, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl OcrBackend for StaticOcr {
    fn name(&self) -> &'static str {
        "static"
    }

    fn recognize(
        &self,
        images: &[PageImage],
        language: &str,
        _cancel: &CancelFlag,
    ) -> Result<Vec<String>, ExtractionError> {
        let pages = images.iter().map(|i| i.page_number).collect();
        self.calls
            .lock()
            .unwrap()
            .push((pages, language.to_string()));
        Ok(self.texts.clone())
    }
}

/// A component that always fails.
pub struct FailingStage;

fn stage_failure() -> ExtractionError {
    ExtractionError::ExtractionFailed("corrupt PDF".to_string())
}

impl TextLayerExtractor for FailingStage {
    fn extract_text(&self, _pdf_path: &Path) -> Result<Vec<String>, ExtractionError> {
        Err(stage_failure())
    }
}

impl PageRenderer for FailingStage {
    fn render(&self, _pdf_path: &Path, _dpi: u32) -> Result<RenderedPages, ExtractionError> {
        Err(stage_failure())
    }
}

impl OcrBackend for FailingStage {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn recognize(
        &self,
        _images: &[PageImage],
        _language: &str,
        _cancel: &CancelFlag,
    ) -> Result<Vec<String>, ExtractionError> {
        Err(stage_failure())
    }
}
