//! Web server exposing the extraction API.
//!
//! - `POST /api/v1/pdf/extract-basic`: dual extraction of an uploaded PDF
//! - `POST /api/v1/pdf/extract-with-llm`: dual extraction plus LLM analysis
//! - `GET /health`: liveness probe

mod error;
mod handlers;
mod routes;
mod staging;

pub use error::ApiError;
pub use routes::{create_router, PDF_API_PREFIX};
pub use staging::StagedUpload;

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config::Settings;
use crate::llm::LlmClient;
use crate::services::DualExtractor;

/// Shared state for the web server. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub extractor: DualExtractor,
    pub llm: LlmClient,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            extractor: DualExtractor::from_settings(settings),
            llm: LlmClient::new(settings.llm.clone()),
            upload_dir: settings.upload_dir.clone(),
            max_upload_bytes: settings.max_upload_bytes,
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);
    tracing::info!(
        "Uploads staged in {}, LLM at {} ({})",
        settings.upload_dir.display(),
        settings.llm.endpoint,
        settings.llm.model
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
