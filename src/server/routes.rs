//! Router configuration for the web server.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Prefix for the PDF extraction API.
pub const PDF_API_PREFIX: &str = "/api/v1/pdf";

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    let pdf_routes = Router::new()
        .route("/extract-basic", post(handlers::extract_basic))
        .route("/extract-with-llm", post(handlers::extract_with_llm));

    Router::new()
        // Health check for container orchestration
        .route("/health", get(handlers::health))
        .nest(PDF_API_PREFIX, pdf_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
