//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `navloader.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values.

use std::time::Duration;

use serde::Deserialize;

use navloader_domain::error::ValidationError;
use navloader_domain::loading::{DEFAULT_LOADING_MESSAGE, validate_message};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Loading indicator settings.
    pub loading: LoadingConfig,
    /// Auto-hide settings.
    pub watchdog: WatchdogConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    /// Message shown when an intent does not supply one.
    pub default_message: String,
}

/// Auto-hide watchdog; disabled when `timeout_ms` is absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WatchdogConfig {
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `navloader.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("navloader.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("NAVLOADER_DEFAULT_MESSAGE") {
            self.loading.default_message = val;
        }
        if let Some(ms) = std::env::var("NAVLOADER_WATCHDOG_TIMEOUT_MS")
            .ok()
            .and_then(|val| val.parse().ok())
        {
            self.watchdog.timeout_ms = Some(ms);
        }
        if let Ok(val) = std::env::var("NAVLOADER_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_message(&self.loading.default_message)?;
        if self.watchdog.timeout_ms == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Watchdog timeout, if auto-hide is enabled.
    #[must_use]
    pub fn watchdog_timeout(&self) -> Option<Duration> {
        self.watchdog.timeout_ms.map(Duration::from_millis)
    }
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            default_message: DEFAULT_LOADING_MESSAGE.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "navloader_replay=info,navloader_app=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// A value failed a domain invariant.
    #[error("invalid configuration")]
    Validation(#[from] ValidationError),
    #[error("invalid configuration: watchdog timeout must be non-zero")]
    ZeroTimeout,
}
