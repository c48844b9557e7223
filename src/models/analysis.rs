//! LLM analysis results.

use serde::{Deserialize, Serialize};

use super::extraction::ExtractionResult;

/// The instruction sent to the LLM and its unvalidated reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmAnalysisResult {
    pub instruction: String,
    pub raw_response: String,
}

/// Extraction plus LLM analysis for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullAnalysisResponse {
    pub extraction: ExtractionResult,
    pub llm_analysis: LlmAnalysisResult,
}
