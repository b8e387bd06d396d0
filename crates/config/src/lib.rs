//! # kvlog-config
//!
//! Construction-time configuration for kvlog loggers.
//!
//! The only decision a caller makes is the output format (and, for the
//! convenience constructors, the standard stream to write to). Nothing here
//! reads files or environment variables.

pub mod load;
pub mod schema;

pub use load::{parse_logger_config_json, parse_logger_config_toml};
pub use schema::{LogFormat, LoggerConfig, SinkTarget};

/// Configuration parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Unrecognized log format name.
    #[error("unknown log format `{input}` (expected `json` or `text`)")]
    UnknownFormat {
        /// Trimmed user input.
        input: String,
    },
    /// Unrecognized sink target name.
    #[error("unknown log target `{input}` (expected `stderr` or `stdout`)")]
    UnknownTarget {
        /// Trimmed user input.
        input: String,
    },
    /// TOML document could not be parsed into a config.
    #[error("invalid logger config TOML: {message}")]
    Toml {
        /// Parser message.
        message: String,
    },
    /// JSON document could not be parsed into a config.
    #[error("invalid logger config JSON: {message}")]
    Json {
        /// Parser message.
        message: String,
    },
}

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
