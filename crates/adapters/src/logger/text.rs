//! Human-readable text formatter.
//!
//! ```text
//! 2024-05-01T12:00:00Z INF msg="started" port="8080"
//! ```
//!
//! The message and every value are quoted and escaped. Keys are written
//! as-is and are expected to be simple identifiers.

use super::quote::{quote_display_into, quote_into};
use super::{LineWriter, error_pair, event_pairs};
use crate::log_sink::LogSink;
use kvlog_ports::{LogLevel, Logger, Value};
use kvlog_shared::{Clock, PoolStats, Rfc3339};
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// Logger emitting one `time level msg="..." key="value"` line per event.
#[derive(Debug)]
pub struct TextLogger {
    lines: LineWriter,
}

impl TextLogger {
    /// Create a text logger writing to `sink`.
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

impl Logger for TextLogger {
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
    write!(buf, "{time} {level} msg=")?;
    quote_into(buf, msg);
    for (key, value) in pairs {
        write!(buf, " {key}=")?;
        quote_display_into(buf, value).map_err(|_| io::Error::other("value formatting failed"))?;
    }
    buf.push(b'\n');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_sink::SharedBuffer;
    use kvlog_ports::kvs;
    use kvlog_shared::FixedClock;
    use proptest::prelude::*;
    use serde_json::json;

    const FROZEN: &str = "2024-05-01T12:00:00+02:00";

    type TestResult<T = ()> = Result<T, String>;

    fn frozen_logger() -> TestResult<(TextLogger, SharedBuffer)> {
        let sink = SharedBuffer::new();
        let clock = FixedClock::parse(FROZEN).map_err(|error| error.to_string())?;
        let logger = TextLogger::new(Arc::new(sink.clone())).with_clock(Arc::new(clock));
        Ok((logger, sink))
    }

    #[test]
    fn info_line_matches_wire_format() -> TestResult {
        let (logger, sink) = frozen_logger()?;
        logger.info("started", &kvs!["port", 8080]);
        assert_eq!(
            sink.text(),
            "2024-05-01T12:00:00+02:00 INF msg=\"started\" port=\"8080\"\n"
        );
        Ok(())
    }

    #[test]
    fn error_line_prepends_err_pair() -> TestResult {
        let (logger, sink) = frozen_logger()?;
        logger.error(&"boom", "failed", &kvs!["attempt", 3]);
        assert_eq!(
            sink.text(),
            "2024-05-01T12:00:00+02:00 ERR msg=\"failed\" err=\"boom\" attempt=\"3\"\n"
        );
        Ok(())
    }

    #[test]
    fn message_and_values_are_escaped() -> TestResult {
        let (logger, sink) = frozen_logger()?;
        logger.info("say \"hi\"\n", &kvs!["path", "C:\\tmp", "tab", "a\tb"]);
        assert_eq!(
            sink.text(),
            "2024-05-01T12:00:00+02:00 INF msg=\"say \\\"hi\\\"\\n\" path=\"C:\\\\tmp\" tab=\"a\\tb\"\n"
        );
        Ok(())
    }

    #[test]
    fn values_use_default_text_forms() -> TestResult {
        let (logger, sink) = frozen_logger()?;
        logger.info(
            "forms",
            &kvs![
                "ratio",
                f64::NAN,
                "missing",
                None::<u8>,
                "peer",
                json!({"host": "db"}),
                "name",
                json!("ana"),
                "ok",
                true
            ],
        );
        assert_eq!(
            sink.text(),
            "2024-05-01T12:00:00+02:00 INF msg=\"forms\" ratio=\"NaN\" missing=\"<nil>\" peer=\"{\\\"host\\\":\\\"db\\\"}\" name=\"ana\" ok=\"true\"\n"
        );
        Ok(())
    }

    #[test]
    fn keys_are_written_unescaped() -> TestResult {
        let (logger, sink) = frozen_logger()?;
        logger.info("keys", &kvs![7, "seven", "user id", "u1"]);
        assert!(sink.text().ends_with(" 7=\"seven\" user id=\"u1\"\n"));
        Ok(())
    }

    #[test]
    fn trailing_unpaired_element_is_dropped() -> TestResult {
        let (logger, sink) = frozen_logger()?;
        logger.info("odd", &kvs!["a", 1, "dangling"]);
        assert_eq!(
            sink.text(),
            "2024-05-01T12:00:00+02:00 INF msg=\"odd\" a=\"1\"\n"
        );
        Ok(())
    }

    proptest! {
        #[test]
        fn pairs_keep_call_order(keys in proptest::collection::vec("[a-z]{1,8}", 0..12)) {
            let (logger, sink) = frozen_logger().map_err(TestCaseError::fail)?;
            let keyvalues: Vec<Value> = keys
                .iter()
                .enumerate()
                .flat_map(|(index, key)| [Value::from(key.as_str()), Value::from(index)])
                .collect();
            logger.info("ordered", &keyvalues);

            let mut expected = String::from("2024-05-01T12:00:00+02:00 INF msg=\"ordered\"");
            for (index, key) in keys.iter().enumerate() {
                expected.push_str(&format!(" {key}=\"{index}\""));
            }
            expected.push('\n');
            prop_assert_eq!(sink.text(), expected);
        }

        #[test]
        fn err_pair_always_comes_first(
            cause in "[ -~]{0,16}",
            values in proptest::collection::vec(any::<i64>(), 0..6),
        ) {
            let (logger, sink) = frozen_logger().map_err(TestCaseError::fail)?;
            let keyvalues: Vec<Value> = values
                .iter()
                .flat_map(|value| [Value::from("n"), Value::from(*value)])
                .collect();
            logger.error(&cause, "failed", &keyvalues);

            let text = sink.text();
            let after_msg = text
                .strip_prefix("2024-05-01T12:00:00+02:00 ERR msg=\"failed\" ")
                .unwrap_or_default();
            prop_assert!(after_msg.starts_with("err=\""));
        }
    }
}
