//! Core library for the `weather-server` proxy.
//!
//! This crate defines:
//! - Configuration resolution (flags, environment)
//! - Abstraction over the upstream weather provider
//! - Shared domain models and the temperature classification rules
//!
//! It is used by `weather-server`, but has no HTTP server dependency of its own.

pub mod classify;
pub mod compose;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use classify::{TemperatureCondition, classify, kelvin_to_celsius};
pub use compose::compose;
pub use config::{CliOverrides, Config};
pub use error::WeatherError;
pub use model::{ClassifiedWeather, UpstreamWeatherResponse, WeatherQuery};
pub use provider::{WeatherProvider, provider_from_config};
