use async_trait::async_trait;
use reqwest::Client;
use std::{fmt, time::Duration};
use tracing::debug;

use crate::{
    error::WeatherError,
    model::{UpstreamWeatherResponse, WeatherQuery},
};

use super::WeatherProvider;

/// OpenWeather "current weather data" endpoint.
pub const DEFAULT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the HTTP client with one that gives up after `timeout`.
    /// Without this the transport default applies.
    pub fn with_timeout(mut self, timeout: Duration) -> reqwest::Result<Self> {
        self.http = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }
}

// The api key must never end up in logs.
impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(
        &self,
        query: &WeatherQuery,
    ) -> Result<UpstreamWeatherResponse, WeatherError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", query.latitude.as_str()),
                ("lon", query.longitude.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "weather provider responded");

        if !status.is_success() {
            return Err(WeatherError::UpstreamStatus {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
