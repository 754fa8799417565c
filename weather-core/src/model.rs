use serde::{Deserialize, Serialize};

use crate::classify::TemperatureCondition;

/// Coordinates as received from the client. Not validated as numbers; the
/// upstream provider is the judge of that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub latitude: String,
    pub longitude: String,
}

impl WeatherQuery {
    /// Returns `None` unless both values are present and non-empty.
    pub fn from_params(latitude: Option<String>, longitude: Option<String>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) if !latitude.is_empty() && !longitude.is_empty() => {
                Some(Self { latitude, longitude })
            }
            _ => None,
        }
    }
}

/// Subset of the provider's current-weather payload that the proxy uses.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamWeatherResponse {
    pub weather: Vec<UpstreamCondition>,
    pub main: UpstreamMain,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamCondition {
    pub main: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamMain {
    /// Kelvin.
    pub temp: f64,
}

/// Body of a successful `/weather` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedWeather {
    pub weather_condition: String,
    /// Celsius with two decimals and a `°C` suffix, e.g. `"22.00°C"`.
    pub temperature: String,
    pub temperature_condition: TemperatureCondition,
}
