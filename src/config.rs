//! Application configuration loaded from TOML.

use crate::oracle::SearchLimits;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Environment variable that overrides the oracle base URL.
pub const ORACLE_URL_ENV: &str = "CONNECT_FOUR_ORACLE_URL";

/// Where the oracle lives.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Base URL the oracle endpoints hang off.
    base_url: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".to_string(),
        }
    }
}

/// Top-level configuration.
///
/// ```toml
/// [oracle]
/// base_url = "http://localhost:5001"
///
/// [limits]
/// max_time_ms = 2000
/// max_depth = 5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Oracle endpoint.
    oracle: OracleConfig,
    /// Hints forwarded with every move request.
    limits: SearchLimits,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(base_url = %config.oracle.base_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads from `path` if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the oracle URL when an override is present and non-empty.
    pub fn with_oracle_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            debug!(base_url = %url, "Oracle URL overridden");
            self.oracle.base_url = url;
        }
        self
    }

    /// Replaces the search limits.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Checks the values a run depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.oracle.base_url.trim();
        if url.is_empty() {
            warn!("Oracle base URL is empty");
            return Err(ConfigError::new("oracle.base_url must not be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            warn!(base_url = %url, "Oracle base URL is not http(s)");
            return Err(ConfigError::new(format!(
                "oracle.base_url must start with http:// or https://, got {}",
                url
            )));
        }
        if self.limits.max_depth < 1 {
            return Err(ConfigError::new(
                "limits.max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert_eq!(config.oracle().base_url(), "http://localhost:5001");
        assert_eq!(*config.limits(), SearchLimits::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config("[limits]\nmax_depth = 7\n");
        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config.limits().max_depth, 7);
        assert_eq!(config.limits().max_time_ms, 2000);
        assert_eq!(config.oracle().base_url(), "http://localhost:5001");
    }

    #[test]
    fn test_full_file() {
        let file = write_config(
            "[oracle]\nbase_url = \"https://oracle.example:8443\"\n\n[limits]\nmax_time_ms = 0\nmax_depth = 3\n",
        );
        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config.oracle().base_url(), "https://oracle.example:8443");
        assert_eq!(config.limits().max_time_ms, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_toml_is_error() {
        let file = write_config("[limits\nmax_depth = ");
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let no_scheme = AppConfig::default().with_oracle_url_override(Some("localhost:5001".into()));
        assert!(no_scheme.validate().is_err());

        let zero_depth = AppConfig::default().with_limits(SearchLimits {
            max_time_ms: 2000,
            max_depth: 0,
        });
        let err = zero_depth.validate().unwrap_err();
        assert!(err.message.contains("max_depth"));
        assert!(err.file.ends_with("config.rs"));
    }

    #[test]
    fn test_url_override() {
        let config =
            AppConfig::default().with_oracle_url_override(Some("http://10.0.0.2:5001".into()));
        assert_eq!(config.oracle().base_url(), "http://10.0.0.2:5001");

        let unchanged = AppConfig::default().with_oracle_url_override(Some("  ".into()));
        assert_eq!(unchanged.oracle().base_url(), "http://localhost:5001");

        let absent = AppConfig::default().with_oracle_url_override(None);
        assert_eq!(absent, AppConfig::default());
    }
}
