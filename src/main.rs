//! audio-dl server binary

use anyhow::{Context, Result};
use audio_dl::Config;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Turn video URLs into downloadable MP3 files over HTTP
#[derive(Debug, Parser)]
#[command(name = "audio-dl", version, about)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:5001
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<SocketAddr>,

    /// Landing page served at `/`
    #[arg(long, value_name = "FILE")]
    index: Option<PathBuf>,
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,audio_dl=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }
    if let Some(index) = &args.index {
        config.server.index_path = index.clone();
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    let config = load_config(&args)?;

    if !config.server.index_path.is_file() {
        tracing::warn!(
            path = %config.server.index_path.display(),
            "landing page not found; GET / will return an error"
        );
    }

    audio_dl::api::start_api_server(Arc::new(config))
        .await
        .context("API server failed")?;

    Ok(())
}
