//! One-shot extraction of a local file.

use std::path::Path;

use duoscan::config::Settings;
use duoscan::llm::{LlmClient, DEFAULT_INSTRUCTION};
use duoscan::models::FullAnalysisResponse;
use duoscan::services::DualExtractor;

/// Extract `file` and print the result (or the full analysis) as JSON.
pub async fn cmd_extract(
    settings: &Settings,
    file: &Path,
    use_llm: bool,
    instruction: Option<String>,
    pretty: bool,
) -> anyhow::Result<()> {
    if !file.is_file() {
        anyhow::bail!("File not found: {}", file.display());
    }

    let extractor = DualExtractor::from_settings(settings);
    let extraction = extractor.extract(file).await?;
    tracing::info!("Extracted {} pages from {}", extraction.num_pages, file.display());

    let output = if use_llm {
        let instruction = instruction
            .filter(|i| !i.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_INSTRUCTION.to_string());
        let llm = LlmClient::new(settings.llm.clone());
        let llm_analysis = llm.analyze(&instruction, &extraction.merged_text).await?;
        to_json(
            &FullAnalysisResponse {
                extraction,
                llm_analysis,
            },
            pretty,
        )?
    } else {
        to_json(&extraction, pretty)?
    };

    println!("{}", output);
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
