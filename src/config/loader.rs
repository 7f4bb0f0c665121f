use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use thiserror::Error;

use crate::config::types::Config;
use crate::schema::{FieldSchema, SchemaError};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },

    #[error("Invalid field list: {0}")]
    Schema(#[from] SchemaError),
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/bankpredict/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("bankpredict").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The endpoint is an absolute http(s) URL
    /// - Both timeouts are non-zero
    /// - A custom field list, if given, forms a valid schema
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.endpoint.url).map_err(|e| ConfigError::ValidationError {
            message: format!("Endpoint '{}' is not a valid URL: {}", self.endpoint.url, e),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Endpoint '{}' must use http or https",
                    self.endpoint.url
                ),
            });
        }

        if self.endpoint.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "endpoint.timeout_seconds must be greater than 0".to_string(),
            });
        }
        if self.endpoint.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "endpoint.connect_timeout_seconds must be greater than 0".to_string(),
            });
        }

        self.schema()?;
        Ok(())
    }

    /// The form schema described by this configuration.
    pub fn schema(&self) -> Result<FieldSchema, ConfigError> {
        if self.fields.is_empty() {
            return Ok(FieldSchema::bank_marketing());
        }
        Ok(FieldSchema::new(self.fields.clone())?)
    }
}
