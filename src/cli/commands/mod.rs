//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod check;
mod extract;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use duoscan::config::Settings;

#[derive(Parser)]
#[command(name = "duoscan")]
#[command(about = "PDF dual extraction (text layer + OCR) with optional LLM analysis")]
#[command(version)]
pub struct Cli {
    /// Config file path (TOML)
    #[arg(short, long, global = true, env = "DUOSCAN_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind to: "PORT", "HOST" or "HOST:PORT"
        #[arg(short, long, default_value = "127.0.0.1:8000", env = "DUOSCAN_BIND")]
        bind: String,
    },

    /// Run dual extraction on a local PDF and print the result as JSON
    Extract {
        /// PDF file to process
        file: PathBuf,
        /// Also send the merged text to the LLM
        #[arg(long)]
        llm: bool,
        /// Instruction for the LLM (implies --llm)
        #[arg(short, long)]
        instruction: Option<String>,
        /// Rendering resolution for OCR
        #[arg(long)]
        dpi: Option<u32>,
        /// Tesseract language code
        #[arg(short, long)]
        lang: Option<String>,
        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Check that the extraction tools and the LLM endpoint are available
    Check,
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { bind } => serve::cmd_serve(&settings, &bind).await,
        Commands::Extract {
            file,
            llm,
            instruction,
            dpi,
            lang,
            pretty,
        } => {
            if let Some(dpi) = dpi {
                settings.render_dpi = dpi;
            }
            if let Some(lang) = lang {
                settings.ocr_language = lang;
            }
            let use_llm = llm || instruction.is_some();
            extract::cmd_extract(&settings, &file, use_llm, instruction, pretty).await
        }
        Commands::Check => check::cmd_check(&settings).await,
    }
}
