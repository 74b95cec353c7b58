//! Postboard CLI
//!
//! Terminal front end for the posts service. Each command positions the
//! router at a fragment, lets the app render it, and prints the final view.

mod commands;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, handle_command};
use postboard_app::AppConfig;
use postboard_app::config::DEFAULT_API_BASE;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "postboard")]
#[command(about = "Browse and create posts", long_about = None)]
struct Cli {
    /// Base URL of the posts API
    #[arg(long, env = "POSTBOARD_API_URL", default_value = DEFAULT_API_BASE)]
    api_url: String,

    /// Delay between effect job status checks, in milliseconds
    #[arg(long, env = "POSTBOARD_POLL_INTERVAL_MS", default_value_t = 1000)]
    poll_interval_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the rendered view
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "postboard=info,postboard_app=info,postboard_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::new(cli.api_url, Duration::from_millis(cli.poll_interval_ms));
    config.validate().context("Invalid configuration")?;

    handle_command(cli.command, &config).await
}
