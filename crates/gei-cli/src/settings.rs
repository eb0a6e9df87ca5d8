//! HTTP and retry settings.
//!
//! Loaded with the following precedence (highest to lowest):
//! 1. Environment variables prefixed with `GEI_`, e.g. `GEI_RETRY_ATTEMPTS`
//! 2. The file passed with `--settings` (TOML, YAML or JSON)
//! 3. Built-in defaults
//!
//! ```toml
//! timeout_secs = 30
//! retry_attempts = 3
//! retry_base_delay_ms = 1000
//! retry_max_delay_ms = 30000
//! deadline_secs = 600
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File};
use gei_http::{Cancellation, HttpConfig, RetryPolicy};
use serde::Deserialize;

/// Request behavior shared by every source client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Timeout of a single request attempt.
    pub timeout_secs: u64,
    /// Attempts per request, including the first.
    pub retry_attempts: u32,
    /// Delay before the first retry.
    pub retry_base_delay_ms: u64,
    /// Upper bound on any retry delay.
    pub retry_max_delay_ms: u64,
    /// Give up on all remaining requests after this long.
    pub deadline_secs: Option<u64>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            retry_attempts: 3,
            retry_base_delay_ms: 1_000,
            retry_max_delay_ms: 30_000,
            deadline_secs: None,
        }
    }
}

impl HttpSettings {
    /// Load settings from an optional file and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, Environment::with_prefix("GEI").try_parsing(true))
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "Loading settings file");
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(env)
            .build()
            .context("failed to load settings")?
            .try_deserialize()
            .context("invalid settings")
    }

    /// Client configuration for these settings.
    pub fn http_config(&self, no_ssl_verify: bool) -> HttpConfig {
        HttpConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            no_ssl_verify,
            retry: RetryPolicy::new(
                self.retry_attempts,
                Duration::from_millis(self.retry_base_delay_ms),
            )
            .with_max_delay(Duration::from_millis(self.retry_max_delay_ms)),
        }
    }

    /// A fresh cancellation signal carrying the configured deadline.
    pub fn cancellation(&self) -> Cancellation {
        match self.deadline_secs {
            Some(secs) => Cancellation::new().with_timeout(Duration::from_secs(secs)),
            None => Cancellation::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env() -> Environment {
        Environment::with_prefix("GEI").source(Some(config::Map::new()))
    }

    #[test]
    fn test_defaults() {
        let settings = HttpSettings::load_with(None, no_env()).unwrap();
        assert_eq!(settings, HttpSettings::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "retry_attempts = 5\ndeadline_secs = 120").unwrap();

        let settings = HttpSettings::load_with(Some(file.path()), no_env()).unwrap();
        assert_eq!(settings.retry_attempts, 5);
        assert_eq!(settings.deadline_secs, Some(120));
        assert_eq!(settings.timeout_secs, 30);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "retry_attempts = 5").unwrap();

        let mut vars = config::Map::new();
        vars.insert("GEI_RETRY_ATTEMPTS".to_string(), "7".to_string());
        let env = Environment::with_prefix("GEI")
            .try_parsing(true)
            .source(Some(vars));

        let settings = HttpSettings::load_with(Some(file.path()), env).unwrap();
        assert_eq!(settings.retry_attempts, 7);
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = HttpSettings::load_with(Some(Path::new("/nonexistent/gei.toml")), no_env());
        assert!(result.is_err());
    }

    #[test]
    fn test_http_config() {
        let config = HttpSettings::default().http_config(true);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.no_ssl_verify);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.max_delay, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_cancellation_deadline() {
        let settings = HttpSettings {
            deadline_secs: Some(60),
            ..Default::default()
        };
        assert!(settings.cancellation().deadline().is_some());
        assert!(HttpSettings::default().cancellation().deadline().is_none());
    }
}
