//! Runtime configuration read from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TRYON_API_URL` | `http://localhost:8000/api/v1` |
//! | `TRYON_API_TOKEN` | unset |
//! | `TRYON_GENERATION_TIMEOUT_SECS` | `30` |
//! | `TRYON_REQUEST_TIMEOUT_SECS` | `15` |
//! | `TRYON_MAILBOX_CAPACITY` | `32` |
//!
//! A `.env` file in the working directory is loaded first when present.

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudioConfig {
    /// Base URL of the try-on API, without a trailing slash.
    pub api_base_url: String,
    /// Bearer token forwarded to the API, if any.
    pub auth_token: Option<String>,
    /// Client-side limit for one generation call.
    pub generation_timeout: Duration,
    /// Client-side limit for history and favorite calls.
    pub request_timeout: Duration,
    pub mailbox_capacity: usize,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            auth_token: None,
            generation_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(15),
            mailbox_capacity: 32,
        }
    }
}

impl StudioConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = read("TRYON_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: "TRYON_API_URL",
                value: api_base_url,
                reason: "expected an http(s) URL".to_string(),
            });
        }

        let generation_secs: u64 = parse_var(
            "TRYON_GENERATION_TIMEOUT_SECS",
            read("TRYON_GENERATION_TIMEOUT_SECS"),
            defaults.generation_timeout.as_secs(),
        )?;
        let request_secs: u64 = parse_var(
            "TRYON_REQUEST_TIMEOUT_SECS",
            read("TRYON_REQUEST_TIMEOUT_SECS"),
            defaults.request_timeout.as_secs(),
        )?;
        let mailbox_capacity: usize = parse_var(
            "TRYON_MAILBOX_CAPACITY",
            read("TRYON_MAILBOX_CAPACITY"),
            defaults.mailbox_capacity,
        )?;

        Ok(Self {
            api_base_url,
            auth_token: read("TRYON_API_TOKEN"),
            generation_timeout: Duration::from_secs(generation_secs),
            request_timeout: Duration::from_secs(request_secs),
            mailbox_capacity,
        })
    }
}

// Zero is rejected for every numeric setting: a zero timeout fails every call
// and tokio refuses a zero-capacity mailbox.
fn parse_var<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
{
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value = raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })?;
    if value == T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StudioConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StudioConfig::default());
        assert_eq!(config.generation_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = StudioConfig::from_lookup(lookup(&[
            ("TRYON_API_URL", "https://shop.example/api/v1/"),
            ("TRYON_API_TOKEN", "secret"),
            ("TRYON_GENERATION_TIMEOUT_SECS", "45"),
            ("TRYON_MAILBOX_CAPACITY", "8"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://shop.example/api/v1");
        assert_eq!(config.auth_token.as_deref(), Some("secret"));
        assert_eq!(config.generation_timeout, Duration::from_secs(45));
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.mailbox_capacity, 8);
    }

    #[test]
    fn test_invalid_values() {
        let err = StudioConfig::from_lookup(lookup(&[("TRYON_REQUEST_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TRYON_REQUEST_TIMEOUT_SECS", .. }));

        let err = StudioConfig::from_lookup(lookup(&[("TRYON_MAILBOX_CAPACITY", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TRYON_MAILBOX_CAPACITY", .. }));

        let err = StudioConfig::from_lookup(lookup(&[("TRYON_API_URL", "localhost:8000")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TRYON_API_URL", .. }));
    }
}
