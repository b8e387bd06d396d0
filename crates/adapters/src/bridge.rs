//! Byte-stream bridge into a [`Logger`].
//!
//! [`LoggerWriter`] lets code that only knows how to write text (a
//! `tracing_subscriber` fmt layer, a `std::io::Write` consumer) log through
//! any `Logger`. Every `write` call becomes one `info` event whose message is
//! the written bytes, decoded lossily as UTF-8 and otherwise untouched.
//! Nothing is parsed and `error` is never called.

use kvlog_ports::Logger;
use std::fmt;
use std::io;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

/// `io::Write` adapter that forwards each write as an `info` event.
///
/// Callers should hand over whole lines per write: `write!` on an
/// `io::Write` may split one formatted line across several writes.
#[derive(Clone)]
pub struct LoggerWriter {
    logger: Arc<dyn Logger>,
}

impl LoggerWriter {
    /// Bridge writes into `logger`.
    #[must_use]
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    fn forward(&self, bytes: &[u8]) -> usize {
        self.logger.info(&String::from_utf8_lossy(bytes), &[]);
        bytes.len()
    }
}

impl fmt::Debug for LoggerWriter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("LoggerWriter").finish_non_exhaustive()
    }
}

impl io::Write for LoggerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.forward(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Write for &LoggerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.forward(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LoggerWriter {
    type Writer = &'a Self;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}
