//! BPM CLI
//!
//! Command-line interface for browsing and editing installs, leads and
//! customers on the BPM backend.

mod auth;
mod commands;
mod config;
mod types;

use std::time::Duration;

use anyhow::Result;
use bpm_core::query::DEFAULT_PAGE_SIZE;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bpm")]
#[command(about = "BPM resource CLI", long_about = None)]
struct Cli {
    /// BPM API base URL
    #[arg(long, env = "BPM_API_URL", default_value = "http://localhost:3001/api")]
    api_url: String,

    /// Rows per page for list commands
    #[arg(long, env = "BPM_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// HTTP timeout in seconds
    #[arg(long, env = "BPM_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Environment variable read for the bearer token on every authenticated call
    #[arg(long, env = "BPM_TOKEN_VAR", default_value = "BPM_TOKEN")]
    token_var: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bpm_cli=info,bpm_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        page_size: cli.page_size,
        timeout: Duration::from_secs(cli.timeout),
        token_var: cli.token_var,
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}
