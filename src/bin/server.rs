//! HTTP server binary for webqa.
//!
//! All tracing output goes to stderr. Provider API keys are read from
//! `SERPER_API_KEY` and `OPENAI_API_KEY`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use webqa::{QueryPipeline, QueryServer, Secrets, WebqaConfig};

/// Answers questions from live web search results.
#[derive(Parser)]
#[command(name = "webqa-server", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind port from the config file.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Suppress noisy dependency logs by default; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("webqa=info,webqa_search=info,hyper=warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = WebqaConfig::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let secrets = Secrets::from_env();
    for name in secrets.missing() {
        tracing::warn!(variable = name, "API key not set; answers will degrade");
    }

    let pipeline = Arc::new(QueryPipeline::from_config(&config, &secrets)?);
    let server = QueryServer::start(pipeline, &config.server).await?;
    tracing::info!(addr = %server.addr(), "webqa-server started");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    server.shutdown();
    Ok(())
}
