use anyhow::{Context, Result, anyhow, bail};
use std::{
    fmt,
    net::{Ipv4Addr, SocketAddr},
    time::Duration,
};

use crate::provider::openweather::DEFAULT_URL;

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const PORT_ENV: &str = "PORT";
pub const UPSTREAM_URL_ENV: &str = "OPENWEATHER_URL";
pub const UPSTREAM_TIMEOUT_ENV: &str = "UPSTREAM_TIMEOUT_SECS";
pub const EXPOSE_ERRORS_ENV: &str = "EXPOSE_UPSTREAM_ERRORS";

pub const DEFAULT_PORT: u16 = 8080;

/// Values supplied on the command line. They win over the environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_key: Option<String>,
    pub port: Option<u16>,
}

/// Process-wide settings, resolved once at startup and read-only afterwards.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub port: u16,
    /// Full URL of the provider's current-weather endpoint.
    pub upstream_url: String,
    /// `None` leaves the HTTP client's default in place.
    pub upstream_timeout: Option<Duration>,
    /// When false, 500 responses carry a generic message; details are only logged.
    pub expose_upstream_errors: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("port", &self.port)
            .field("upstream_url", &self.upstream_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("expose_upstream_errors", &self.expose_upstream_errors)
            .finish()
    }
}

impl Config {
    /// Resolve configuration from CLI overrides and the process environment.
    pub fn from_env(cli: CliOverrides) -> Result<Self> {
        Self::from_sources(cli, |name| std::env::var(name).ok())
    }

    /// Resolve configuration from CLI overrides and an arbitrary variable lookup.
    /// Empty values count as unset.
    pub fn from_sources<F>(cli: CliOverrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        let api_key = cli
            .api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| lookup(API_KEY_ENV))
            .ok_or_else(|| {
                anyhow!(
                    "API key is required. Provide it using -apikey flag or set \
                     {API_KEY_ENV} environment variable."
                )
            })?;

        let port = match cli.port {
            Some(port) => port,
            None => match lookup(PORT_ENV) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid {PORT_ENV} value: {raw:?}"))?,
                None => DEFAULT_PORT,
            },
        };

        let upstream_url = lookup(UPSTREAM_URL_ENV).unwrap_or_else(|| DEFAULT_URL.to_string());

        let upstream_timeout = match lookup(UPSTREAM_TIMEOUT_ENV) {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid {UPSTREAM_TIMEOUT_ENV} value: {raw:?}"))?;
                if secs == 0 {
                    bail!("{UPSTREAM_TIMEOUT_ENV} must be a positive number of seconds");
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let expose_upstream_errors = match lookup(EXPOSE_ERRORS_ENV) {
            Some(raw) => parse_bool(&raw)
                .with_context(|| format!("Invalid {EXPOSE_ERRORS_ENV} value"))?,
            None => true,
        };

        Ok(Self {
            api_key,
            port,
            upstream_url,
            upstream_timeout,
            expose_upstream_errors,
        })
    }

    /// Listen on all interfaces.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("expected true or false, got {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn with_key(key: &str) -> CliOverrides {
        CliOverrides { api_key: Some(key.to_string()), ..CliOverrides::default() }
    }

    #[test]
    fn flag_key_takes_precedence_over_env() {
        let cfg =
            Config::from_sources(with_key("FLAG"), env(&[(API_KEY_ENV, "ENV")])).unwrap();
        assert_eq!(cfg.api_key, "FLAG");
    }

    #[test]
    fn env_key_is_used_when_flag_missing_or_empty() {
        let cfg = Config::from_sources(CliOverrides::default(), env(&[(API_KEY_ENV, "ENV")]))
            .unwrap();
        assert_eq!(cfg.api_key, "ENV");

        let cfg = Config::from_sources(with_key(""), env(&[(API_KEY_ENV, "ENV")])).unwrap();
        assert_eq!(cfg.api_key, "ENV");
    }

    #[test]
    fn missing_key_is_fatal() {
        let err = Config::from_sources(CliOverrides::default(), env(&[])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("API key is required"));
        assert!(msg.contains(API_KEY_ENV));

        let err =
            Config::from_sources(with_key(""), env(&[(API_KEY_ENV, "")])).unwrap_err();
        assert!(err.to_string().contains("API key is required"));
    }

    #[test]
    fn defaults_apply() {
        let cfg = Config::from_sources(with_key("K"), env(&[])).unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.upstream_url, DEFAULT_URL);
        assert_eq!(cfg.upstream_timeout, None);
        assert!(cfg.expose_upstream_errors);
        assert_eq!(cfg.bind_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn port_comes_from_env_unless_flag_given() {
        let cfg = Config::from_sources(with_key("K"), env(&[(PORT_ENV, "9090")])).unwrap();
        assert_eq!(cfg.port, 9090);

        let cli = CliOverrides { port: Some(7070), ..with_key("K") };
        let cfg = Config::from_sources(cli, env(&[(PORT_ENV, "9090")])).unwrap();
        assert_eq!(cfg.port, 7070);

        let cfg = Config::from_sources(with_key("K"), env(&[(PORT_ENV, "")])).unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err =
            Config::from_sources(with_key("K"), env(&[(PORT_ENV, "eighty")])).unwrap_err();
        assert!(err.to_string().contains("Invalid PORT value"));
    }

    #[test]
    fn optional_upstream_settings() {
        let cfg = Config::from_sources(
            with_key("K"),
            env(&[
                (UPSTREAM_URL_ENV, "http://localhost:1234/weather"),
                (UPSTREAM_TIMEOUT_ENV, "5"),
                (EXPOSE_ERRORS_ENV, "false"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.upstream_url, "http://localhost:1234/weather");
        assert_eq!(cfg.upstream_timeout, Some(Duration::from_secs(5)));
        assert!(!cfg.expose_upstream_errors);
    }

    #[test]
    fn zero_timeout_and_bad_flags_are_rejected() {
        assert!(
            Config::from_sources(with_key("K"), env(&[(UPSTREAM_TIMEOUT_ENV, "0")])).is_err()
        );
        assert!(
            Config::from_sources(with_key("K"), env(&[(EXPOSE_ERRORS_ENV, "maybe")])).is_err()
        );
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let cfg = Config::from_sources(with_key("TOP_SECRET"), env(&[])).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("TOP_SECRET"));
        assert!(debug.contains("<redacted>"));
    }
}
