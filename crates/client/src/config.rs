//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BOOKING_API_BASE` - Base URL of the booking API (default: `http://localhost:8000/api`)
//! - `BOOKING_SESSION_FILE` - Where the CLI persists the session (default: `.booking/session.json`)
//! - `BOOKING_HTTP_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default API base, matching the backend's development server.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";
const DEFAULT_SESSION_FILE: &str = ".booking/session.json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Booking client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every API path is resolved against
    pub api_base: Url,
    /// Session file used by file-backed storage
    pub session_file: PathBuf,
    /// Timeout applied to every HTTP request
    pub timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl ClientConfig {
    /// Configuration for an API base with every other setting at its default.
    #[must_use]
    pub fn new(api_base: Url) -> Self {
        Self {
            api_base,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            sentry_dsn: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_base = lookup("BOOKING_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_base = parse_api_base(&raw_base)
            .map_err(|e| ConfigError::InvalidEnvVar("BOOKING_API_BASE".to_string(), e))?;

        let session_file = lookup("BOOKING_SESSION_FILE")
            .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from);

        let timeout_secs = match lookup("BOOKING_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("BOOKING_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "BOOKING_HTTP_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            api_base,
            session_file,
            timeout: Duration::from_secs(timeout_secs),
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
        })
    }
}

/// Parse the API base, requiring an http(s) URL.
fn parse_api_base(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_base.as_str(), "http://localhost:8000/api");
        assert_eq!(config.session_file, PathBuf::from(".booking/session.json"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("BOOKING_API_BASE", "https://book.example.com/api/"),
            ("BOOKING_SESSION_FILE", "/tmp/session.json"),
            ("BOOKING_HTTP_TIMEOUT_SECS", "5"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ]))
        .unwrap();

        assert_eq!(config.api_base.as_str(), "https://book.example.com/api/");
        assert_eq!(config.session_file, PathBuf::from("/tmp/session.json"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_invalid_api_base() {
        let err = ClientConfig::from_lookup(lookup_from(&[("BOOKING_API_BASE", "ftp://x")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "BOOKING_API_BASE"));

        assert!(ClientConfig::from_lookup(lookup_from(&[("BOOKING_API_BASE", "not a url")])).is_err());
    }

    #[test]
    fn test_invalid_timeout() {
        assert!(
            ClientConfig::from_lookup(lookup_from(&[("BOOKING_HTTP_TIMEOUT_SECS", "soon")]))
                .is_err()
        );
        assert!(
            ClientConfig::from_lookup(lookup_from(&[("BOOKING_HTTP_TIMEOUT_SECS", "0")])).is_err()
        );
    }

    #[test]
    fn test_empty_sentry_dsn_is_ignored() {
        let config = ClientConfig::from_lookup(lookup_from(&[("SENTRY_DSN", "")])).unwrap();
        assert!(config.sentry_dsn.is_none());
    }
}
