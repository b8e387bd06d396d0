//! Logger configuration schema.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ConfigError;

/// Output format of a logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// One `time level msg="..." key="value"` line per event.
    #[default]
    Text,
}

impl LogFormat {
    /// Return the canonical config string for this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
        }
    }

    /// Parse a format from user input.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "json" | "jsonl" | "json-lines" => Some(Self::Json),
            "text" | "txt" | "logfmt" => Some(Self::Text),
            _ => None,
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input).ok_or_else(|| ConfigError::UnknownFormat {
            input: input.trim().to_owned(),
        })
    }
}

/// Standard stream a configured logger writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SinkTarget {
    /// Process stderr.
    #[default]
    Stderr,
    /// Process stdout.
    Stdout,
}

impl SinkTarget {
    /// Return the canonical config string for this target.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stderr => "stderr",
            Self::Stdout => "stdout",
        }
    }

    /// Parse a target from user input.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "stderr" => Some(Self::Stderr),
            "stdout" => Some(Self::Stdout),
            _ => None,
        }
    }
}

impl fmt::Display for SinkTarget {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SinkTarget {
    type Err = ConfigError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input).ok_or_else(|| ConfigError::UnknownTarget {
            input: input.trim().to_owned(),
        })
    }
}

/// Construction-time logger settings.
///
/// Meant to be embedded in a host application's own config; the library
/// never reads files or environment variables by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggerConfig {
    /// Output format.
    pub format: LogFormat,
    /// Destination stream.
    pub target: SinkTarget,
}

impl LoggerConfig {
    /// JSON lines on stderr.
    #[must_use]
    pub const fn json() -> Self {
        Self {
            format: LogFormat::Json,
            target: SinkTarget::Stderr,
        }
    }

    /// Text lines on stderr.
    #[must_use]
    pub const fn text() -> Self {
        Self {
            format: LogFormat::Text,
            target: SinkTarget::Stderr,
        }
    }

    /// Replace the destination stream.
    #[must_use]
    pub const fn with_target(mut self, target: SinkTarget) -> Self {
        self.target = target;
        self
    }
}
