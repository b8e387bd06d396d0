//! Line formatters implementing the [`Logger`](kvlog_ports::Logger) capability.
//!
//! Both formatters share one control flow: acquire a pooled buffer, render
//! the header, append pairs, terminate with a newline, hand the buffer to the
//! sink in a single write, release the buffer.

pub mod json;
pub mod text;

mod quote;

pub use json::JsonLogger;
pub use text::TextLogger;

use crate::log_sink::LogSink;
use kvlog_ports::{ERR_KEY, LogLevel, Value, pairs};
use kvlog_shared::{BufferPool, Clock, PoolStats, Rfc3339, SystemClock};
use std::fmt;
use std::io;
use std::sync::Arc;

/// Target for the crate's own diagnostics.
pub(crate) const LOG_TARGET: &str = "kvlog";

/// Sink, buffer pool, and clock shared by both formatters.
pub(crate) struct LineWriter {
    sink: Arc<dyn LogSink>,
    pool: BufferPool,
    clock: Arc<dyn Clock>,
}

impl LineWriter {
    pub(crate) fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            pool: BufferPool::new(),
            clock: Arc::new(SystemClock),
        }
    }

    pub(crate) fn set_clock(&mut self, clock: Arc<dyn Clock>) {
        self.clock = clock;
    }

    pub(crate) fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Render one line into a pooled buffer and write it to the sink.
    ///
    /// Failures are reported as diagnostics only; nothing reaches the caller.
    pub(crate) fn emit<F>(&self, level: LogLevel, render: F)
    where
        F: FnOnce(&mut Vec<u8>, Rfc3339) -> io::Result<()>,
    {
        let mut buf = self.pool.acquire();
        if let Err(error) = render(&mut *buf, Rfc3339(self.clock.now())) {
            tracing::debug!(target: LOG_TARGET, log_level = %level, %error, "log line render failed");
            return;
        }
        if let Err(error) = self.sink.write_bytes(buf.as_slice()) {
            tracing::debug!(target: LOG_TARGET, log_level = %level, %error, "log sink write failed");
        }
    }
}

impl fmt::Debug for LineWriter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LineWriter")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

/// The `err` pair prepended to error events.
pub(crate) fn error_pair(err: &dyn fmt::Display) -> [Value; 2] {
    [Value::from(ERR_KEY), Value::display(err)]
}

/// Complete pairs in emission order: the optional `err` pair, then callers'.
pub(crate) fn event_pairs<'a>(
    err_pair: Option<&'a [Value; 2]>,
    keyvalues: &'a [Value],
) -> impl Iterator<Item = (&'a Value, &'a Value)> {
    err_pair
        .map(|[key, value]| (key, value))
        .into_iter()
        .chain(pairs(keyvalues))
}
