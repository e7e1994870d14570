// file: src/main.rs
// description: commandline application entry point
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use search_rag::utils::logging::init_logger;
use search_rag::{Config, DEFAULT_QUESTION, PipelineOrchestrator};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "search_rag")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(
    about = "Answer a question from Azure AI Search documents with Azure OpenAI",
    long_about = None
)]
struct Cli {
    /// Question to answer
    #[arg(default_value = DEFAULT_QUESTION)]
    question: String,

    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = search_rag::config::DEFAULT_CONFIG_PATH
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.color, cli.verbose);

    info!("Search RAG pipeline");
    info!("Loading configuration from: {}", cli.config.display());

    let config =
        Config::load_or_default(&cli.config).context("Failed to load configuration")?;

    let orchestrator = PipelineOrchestrator::from_config(&config)
        .with_color(cli.color)
        .with_progress(true);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let report = orchestrator
        .run(&cli.question, &mut out)
        .await
        .context("Pipeline run failed")?;
    out.flush().context("Failed to flush stdout")?;

    info!(
        "Retained {:.0}% of top results, {:.1} chunks per document, {} bytes embedded",
        report.stats.retention_rate(),
        report.stats.chunks_per_document(),
        report.stats.bytes_embedded
    );

    Ok(())
}
