use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use apikeys::config::LogConfig;
use apikeys::server::Server;
use apikeys::{ApiKeysProvider, Config};
use clap::Parser;
use tracing::info;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Serve API keys over the Redis protocol
#[derive(Debug, Parser)]
#[command(name = "apikeys", version)]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening address, overrides `server_addr`
    #[arg(long)]
    addr: Option<String>,

    /// Log level, overrides `log.level`
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let writer = match &log.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path))?;
            BoxMakeWriter::new(Arc::new(file))
        }
        None => BoxMakeWriter::new(std::io::stdout),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log.level)),
        )
        .with_writer(writer)
        .with_ansi(log.file.is_none())
        .with_target(true)
        .with_thread_ids(true)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(addr) = cli.addr {
        config.server_addr = addr;
    }
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }

    init_logging(&config.log)?;

    info!("Starting apikeys");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Configuration phase
    let provider = ApiKeysProvider::new();
    provider.seed(&config);

    // Running phase
    let server = Arc::new(Server::bind(&config.server_addr, provider.instance()).await?);
    info!("Server listening on: {}", server.local_addr());

    tokio::select! {
        _ = server.run() => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for shutdown signal")?;
            info!("Shutting down");
        }
    }

    Ok(())
}
