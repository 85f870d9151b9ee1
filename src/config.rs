use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::ConfigError;

/// Main application configuration, loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// Base URL of the feed backend, without a trailing slash.
    pub api_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            api_url: "https://exchangesvssportsbooks.com".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Seconds between feed refreshes in watch mode.
    pub poll_interval_secs: u64,
    /// Floor for how long the loading indicator stays raised per refresh.
    pub min_loading_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
            min_loading_ms: 600,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, falling back to defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.network.api_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "network.api_url",
                reason: "cannot be empty".into(),
            });
        }
        if self.network.api_url.ends_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "network.api_url",
                reason: "must not end with a slash".into(),
            });
        }
        if self.feed.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "feed.poll_interval_secs",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Install the global tracing subscriber. `RUST_LOG` overrides the
    /// configured level.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production_backend() {
        let config = Config::default();
        assert_eq!(config.network.api_url, "https://exchangesvssportsbooks.com");
        assert_eq!(config.feed.min_loading_ms, 600);
        assert_eq!(config.feed.poll_interval_secs, 30);
    }

    #[test]
    fn parses_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [network]
            api_url = "http://localhost:8080"
            "#,
        )
        .unwrap();
        assert_eq!(config.network.api_url, "http://localhost:8080");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn rejects_trailing_slash() {
        let config: Config = toml::from_str(
            r#"
            [network]
            api_url = "http://localhost:8080/"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let config: Config = toml::from_str(
            r#"
            [feed]
            poll_interval_secs = 0
            min_loading_ms = 600
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
