//! gcalgo
//!
//! Runs grand-challenge.org algorithms on local images.
//!
//! Architecture:
//! - Configuration: API settings from flags or environment
//! - Repository: HTTP access to algorithms, uploads, jobs and images
//! - Service: upload, import and job polling, mask download
//! - Commands: CLI entry points and terminal output

mod commands;
mod config;
mod context;
mod error;
mod repository;
mod retry;
mod service;

use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{Commands, handle_command};
use crate::config::ApiConfig;

#[derive(Parser)]
#[command(name = "gcalgo")]
#[command(about = "Run grand-challenge.org algorithms on local images", long_about = None)]
struct Cli {
    /// Personal API token
    #[arg(long, env = "GC_API_TOKEN", hide_env_values = true)]
    token: String,

    /// API root URL
    #[arg(long, env = "GC_API_URL", default_value = gcalgo_client::DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "GC_REQUEST_TIMEOUT")]
    request_timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gcalgo_runner=info,gcalgo_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ApiConfig {
        base_url: cli.base_url,
        token: cli.token,
        request_timeout: cli.request_timeout.map(Duration::from_secs),
    };

    handle_command(cli.command, &config).await
}
