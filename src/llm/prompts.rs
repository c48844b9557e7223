//! Prompt text for document analysis.

/// System message sent with every chat request.
pub const SYSTEM_PROMPT: &str = "You are an assistant that reads text extracted from PDFs \
and returns concise, well-structured answers. \
Response should strictly be in JSON format only.";

/// Instruction used when the caller does not provide one.
pub const DEFAULT_INSTRUCTION: &str = "Summarize the key points and return a short JSON with \
fields company_name, period, key_financials, dividends, notes.";

/// Build the user message from an instruction and the merged document text.
pub fn build_prompt(instruction: &str, merged_text: &str) -> String {
    format!(
        "{}\n\nHere is the text extracted from the PDF (both direct parsing and OCR):\n\n{}",
        instruction, merged_text
    )
}
