//! # kvlog
//!
//! Minimal structured logging facade.
//!
//! Leveled events (`info`, `error`) with flat key/value pairs, rendered as
//! JSON lines or human-readable text lines and written to any byte sink.
//! Callers hold an `Arc<dyn Logger>`; the format is chosen once, at
//! construction.
//!
//! ```
//! use kvlog::{Logger, SharedBuffer, kvs, new_text_logger};
//! use std::sync::Arc;
//!
//! let sink = SharedBuffer::new();
//! let logger = new_text_logger(Arc::new(sink.clone()));
//! logger.info("started", &kvs!["port", 8080]);
//! assert!(sink.text().ends_with(" INF msg=\"started\" port=\"8080\"\n"));
//! ```
//!
//! Sinks are not locked by the logger. A sink shared across threads must
//! serialize its own writes (every sink shipped here does), otherwise lines
//! from concurrent calls may interleave.

use std::sync::Arc;

pub use kvlog_adapters::{
    JsonLogger, LogSink, LoggerWriter, SharedBuffer, StderrLogSink, StdoutLogSink, TextLogger,
    WriterSink,
};
pub use kvlog_config::{ConfigError, LogFormat, LoggerConfig, SinkTarget};
pub use kvlog_ports::{ERR_KEY, LogLevel, Logger, Value, kvs};
pub use kvlog_shared::{Clock, FixedClock, PoolStats, SystemClock};

/// Create a JSON-lines logger writing to `sink`.
pub fn new_json_logger(sink: Arc<dyn LogSink>) -> Arc<dyn Logger> {
    Arc::new(JsonLogger::new(sink))
}

/// Create a text-lines logger writing to `sink`.
pub fn new_text_logger(sink: Arc<dyn LogSink>) -> Arc<dyn Logger> {
    Arc::new(TextLogger::new(sink))
}

/// Create a logger of the given format writing to `sink`.
pub fn new_logger(format: LogFormat, sink: Arc<dyn LogSink>) -> Arc<dyn Logger> {
    match format {
        LogFormat::Json => new_json_logger(sink),
        LogFormat::Text => new_text_logger(sink),
    }
}

/// Create a logger from config, writing to the configured standard stream.
pub fn build_logger(config: &LoggerConfig) -> Arc<dyn Logger> {
    let sink: Arc<dyn LogSink> = match config.target {
        SinkTarget::Stderr => Arc::new(StderrLogSink),
        SinkTarget::Stdout => Arc::new(StdoutLogSink),
    };
    new_logger(config.format, sink)
}

/// Bridge a logger into a byte-stream writer.
///
/// Every write becomes one `info` event carrying the written bytes as its
/// message. The writer also plugs into `tracing_subscriber` as a
/// `MakeWriter`.
pub fn std_logger(logger: Arc<dyn Logger>) -> LoggerWriter {
    LoggerWriter::new(logger)
}

/// Returns the facade crate version.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
