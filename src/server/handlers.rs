//! HTTP handlers for the extraction API.

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use super::error::ApiError;
use super::staging::StagedUpload;
use super::AppState;
use crate::llm::DEFAULT_INSTRUCTION;
use crate::models::{ExtractionResult, FullAnalysisResponse};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Parsed multipart upload.
struct PdfUpload {
    filename: String,
    contents: Bytes,
    instruction: Option<String>,
}

fn is_pdf_filename(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}

/// Read the `file` (and optional `instruction`) fields.
///
/// The filename is checked as soon as the file field starts, before its
/// contents are read.
async fn read_upload(mut multipart: Multipart) -> Result<PdfUpload, ApiError> {
    let mut file = None;
    let mut instruction = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if !is_pdf_filename(&filename) {
                    return Err(ApiError::BadRequest(
                        "Only PDF files are supported".to_string(),
                    ));
                }
                let contents = field.bytes().await?;
                file = Some((filename, contents));
            }
            Some("instruction") => {
                instruction = Some(field.text().await?);
            }
            _ => {}
        }
    }

    let (filename, contents) =
        file.ok_or_else(|| ApiError::BadRequest("Missing 'file' field".to_string()))?;

    Ok(PdfUpload {
        filename,
        contents,
        instruction,
    })
}

/// Dual extraction (PDF text + OCR) without LLM.
pub async fn extract_basic(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractionResult>, ApiError> {
    let upload = read_upload(multipart).await?;
    let staged = StagedUpload::write(&state.upload_dir, &upload.filename, &upload.contents).await?;

    let extraction = state.extractor.extract(staged.path()).await?;
    info!(
        "extract-basic: {} -> {} pages",
        upload.filename, extraction.num_pages
    );

    Ok(Json(extraction))
}

/// Dual extraction followed by LLM analysis of the merged text.
pub async fn extract_with_llm(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FullAnalysisResponse>, ApiError> {
    let upload = read_upload(multipart).await?;
    let instruction = upload
        .instruction
        .filter(|i| !i.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_INSTRUCTION.to_string());
    let staged = StagedUpload::write(&state.upload_dir, &upload.filename, &upload.contents).await?;

    let extraction = state.extractor.extract(staged.path()).await?;
    let llm_analysis = state
        .llm
        .analyze(&instruction, &extraction.merged_text)
        .await?;
    info!(
        "extract-with-llm: {} -> {} pages, {} chars of analysis",
        upload.filename,
        extraction.num_pages,
        llm_analysis.raw_response.len()
    );

    Ok(Json(FullAnalysisResponse {
        extraction,
        llm_analysis,
    }))
}
