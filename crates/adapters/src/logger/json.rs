//! JSON-lines formatter.
//!
//! One compact object per line:
//!
//! ```text
//! {"time":"2024-05-01T12:00:00Z", "level":"INF", "msg":"started", "port":8080}
//! ```
//!
//! Each key and value is encoded independently. A pair where either side
//! fails to encode is omitted; the rest of the line is still written.
//!
//! NOTE: the message is copied into the `msg` slot verbatim, without JSON
//! escaping. A message containing `"` or `\` (or a raw control character)
//! yields a line that is not valid JSON. Existing consumers depend on this
//! byte layout, so keep messages free of such characters; escaping the slot
//! with `serde_json` is the candidate fix once the format may change.

use super::{LOG_TARGET, LineWriter, error_pair, event_pairs};
use crate::log_sink::LogSink;
use kvlog_ports::{LogLevel, Logger, Value};
use kvlog_shared::{Clock, PoolStats, Rfc3339};
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// Logger emitting one JSON object per line.
#[derive(Debug)]
pub struct JsonLogger {
    lines: LineWriter,
}

impl JsonLogger {
    /// Create a JSON logger writing to `sink`.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            lines: LineWriter::new(sink),
        }
    }

    /// Use `clock` for timestamps instead of the system clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.lines.set_clock(clock);
        self
    }

    /// Counters of the internal buffer pool.
    pub fn pool_stats(&self) -> PoolStats {
        self.lines.pool_stats()
    }

    fn print(&self, level: LogLevel, msg: &str, err: Option<&dyn fmt::Display>, kvs: &[Value]) {
        let err_pair = err.map(error_pair);
        self.lines.emit(level, |buf, time| {
            render_line(buf, time, level, msg, event_pairs(err_pair.as_ref(), kvs))
        });
    }
}

impl Logger for JsonLogger {
    fn info(&self, msg: &str, keyvalues: &[Value]) {
        self.print(LogLevel::Info, msg, None, keyvalues);
    }

    fn error(&self, err: &dyn fmt::Display, msg: &str, keyvalues: &[Value]) {
        self.print(LogLevel::Error, msg, Some(err), keyvalues);
    }
}

fn render_line<'a>(
    buf: &mut Vec<u8>,
    time: Rfc3339,
    level: LogLevel,
    msg: &str,
    pairs: impl Iterator<Item = (&'a Value, &'a Value)>,
) -> io::Result<()> {
    write!(buf, r#"{{"time":"{time}", "level":"{level}", "msg":""#)?;
    buf.extend_from_slice(msg.as_bytes());
    buf.push(b'"');
    for (key, value) in pairs {
        if let Err(error) = append_pair(buf, key, value) {
            tracing::trace!(target: LOG_TARGET, %key, %error, "dropped unencodable pair");
        }
    }
    buf.extend_from_slice(b"}\n");
    Ok(())
}

/// Append `, <key>:<value>`, leaving `buf` untouched if either side fails.
fn append_pair(buf: &mut Vec<u8>, key: &Value, value: &Value) -> serde_json::Result<()> {
    let mark = buf.len();
    let encoded = encode_pair(buf, key, value);
    if encoded.is_err() {
        buf.truncate(mark);
    }
    encoded
}

fn encode_pair(buf: &mut Vec<u8>, key: &Value, value: &Value) -> serde_json::Result<()> {
    buf.extend_from_slice(b", ");
    serde_json::to_writer(&mut *buf, key)?;
    buf.push(b':');
    serde_json::to_writer(&mut *buf, value)
}
