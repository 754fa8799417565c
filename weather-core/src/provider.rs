use crate::{
    Config, UpstreamWeatherResponse, WeatherError, WeatherQuery,
    provider::openweather::OpenWeatherProvider,
};
use anyhow::Context;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions for the given coordinates. One attempt, no retry.
    async fn current_weather(
        &self,
        query: &WeatherQuery,
    ) -> Result<UpstreamWeatherResponse, WeatherError>;
}

/// Construct the upstream provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let mut provider = OpenWeatherProvider::new(config.api_key.clone())
        .with_base_url(config.upstream_url.clone());

    if let Some(timeout) = config.upstream_timeout {
        provider = provider
            .with_timeout(timeout)
            .context("Failed to build HTTP client for the weather provider")?;
    }

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config() -> Config {
        Config {
            api_key: "KEY".to_string(),
            port: 8080,
            upstream_url: "http://127.0.0.1:9/weather".to_string(),
            upstream_timeout: None,
            expose_upstream_errors: true,
        }
    }

    #[test]
    fn provider_from_config_uses_configured_url() {
        let provider = provider_from_config(&config()).expect("provider should build");
        let debug = format!("{provider:?}");
        assert!(debug.contains("http://127.0.0.1:9/weather"));
    }

    #[test]
    fn provider_from_config_accepts_timeout() {
        let cfg = Config { upstream_timeout: Some(Duration::from_secs(3)), ..config() };
        assert!(provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn provider_debug_does_not_leak_api_key() {
        let provider = provider_from_config(&config()).unwrap();
        assert!(!format!("{provider:?}").contains("KEY"));
    }
}
