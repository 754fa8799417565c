use clap::Parser;
use tracing::info;
use weather_core::{CliOverrides, Config, provider_from_config};

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather classification proxy")]
pub struct Cli {
    /// OpenWeather API key. Falls back to OPENWEATHER_API_KEY.
    #[arg(long = "apikey", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Port to listen on. Falls back to PORT, then 8080.
    #[arg(long)]
    pub port: Option<u16>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::from_env(CliOverrides {
            api_key: self.api_key,
            port: self.port,
        })?;
        info!(?config, "configuration resolved");

        let provider = provider_from_config(&config)?;
        server::serve(&config, provider.into()).await
    }
}

/// Rewrite the single-dash `-apikey` spelling into the `--apikey` form clap expects.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| match arg.strip_prefix("-apikey") {
            Some(rest) if rest.is_empty() || rest.starts_with('=') => format!("--apikey{rest}"),
            _ => arg,
        })
        .collect()
}
