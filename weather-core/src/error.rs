use reqwest::StatusCode;
use thiserror::Error;

/// Failures while fetching or interpreting upstream weather data.
///
/// The `Display` text of each variant is what clients see in the `error`
/// field of a 500 response, unless detail exposure is disabled in config.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Never carries the request URL, which holds the api key.
    #[error("failed to reach weather provider: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("weather provider responded with status {status}: {body}")]
    UpstreamStatus { status: StatusCode, body: String },

    #[error("failed to decode weather provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("malformed upstream response: no weather conditions reported")]
    EmptyConditions,
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Transport(err.without_url())
    }
}
