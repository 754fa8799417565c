//! Binary crate for the `weather-server` HTTP proxy.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - Serving `GET /weather` on top of `weather-core`

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cli;
mod server;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cmd = cli::Cli::parse_from(cli::normalize_legacy_flags(std::env::args()));
    if let Err(err) = cmd.run().await {
        error!("{err:#}");
        std::process::exit(1);
    }
}
