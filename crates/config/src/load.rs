//! Config parsing helpers (TOML + JSON).
//!
//! Host applications usually embed [`LoggerConfig`] in their own config
//! struct; these helpers cover the standalone case.

use crate::{ConfigError, LoggerConfig};

/// Parse a logger config from TOML.
pub fn parse_logger_config_toml(input: &str) -> Result<LoggerConfig, ConfigError> {
    toml::from_str(input).map_err(|error| ConfigError::Toml {
        message: error.message().to_owned(),
    })
}

/// Parse a logger config from JSON.
pub fn parse_logger_config_json(input: &str) -> Result<LoggerConfig, ConfigError> {
    serde_json::from_str(input).map_err(|error| ConfigError::Json {
        message: error.to_string(),
    })
}

impl LoggerConfig {
    /// Parse from TOML. See [`parse_logger_config_toml`].
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        parse_logger_config_toml(input)
    }

    /// Parse from JSON. See [`parse_logger_config_json`].
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        parse_logger_config_json(input)
    }
}
