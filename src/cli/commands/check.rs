//! Environment check command.

use console::style;

use duoscan::config::Settings;
use duoscan::llm::LlmClient;
use duoscan::ocr::tools::check_tools;

/// Report which external tools are installed and whether the LLM answers.
pub async fn cmd_check(settings: &Settings) -> anyhow::Result<()> {
    println!("{} Extraction tools", style("→").cyan());
    let mut missing = 0;
    for (tool, found) in check_tools() {
        if found {
            println!("  {} {}", style("✓").green(), tool);
        } else {
            println!("  {} {} (not found in PATH)", style("✗").red(), tool);
            missing += 1;
        }
    }

    println!(
        "{} LLM at {} (model {})",
        style("→").cyan(),
        settings.llm.endpoint,
        settings.llm.model
    );
    let llm = LlmClient::new(settings.llm.clone());
    if llm.is_available().await {
        println!("  {} reachable", style("✓").green());
    } else {
        println!(
            "  {} unreachable (/api/v1/pdf/extract-with-llm will fail)",
            style("✗").yellow()
        );
    }

    if missing > 0 {
        anyhow::bail!("{} required tool(s) missing", missing);
    }
    Ok(())
}
