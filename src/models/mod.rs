//! Data models for duoscan.

mod analysis;
mod extraction;

pub use analysis::{FullAnalysisResponse, LlmAnalysisResult};
pub use extraction::{ExtractionResult, NormalizedText, PageExtraction, PageExtractionNormalized};
