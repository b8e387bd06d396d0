//! Leveled logging capability.

use crate::Value;
use std::fmt;
use std::sync::Arc;

/// Log level. Only informational and error events exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    /// Informational event (`INF`).
    Info,
    /// Error event (`ERR`).
    Error,
}

impl LogLevel {
    /// Three-letter tag written into every line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INF",
            Self::Error => "ERR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Reserved key carrying the error description on error events.
pub const ERR_KEY: &str = "err";

/// Boundary contract for leveled key/value logging.
///
/// `keyvalues` is a flat alternating sequence: `[key0, value0, key1, value1, ..]`.
/// A trailing unpaired element is dropped. Implementations never fail and
/// never panic on malformed pairs.
pub trait Logger: Send + Sync {
    /// Emit an informational event.
    fn info(&self, msg: &str, keyvalues: &[Value]);

    /// Emit an error event.
    ///
    /// The error's `Display` output is emitted as the first pair under
    /// [`ERR_KEY`], ahead of `keyvalues`.
    fn error(&self, err: &dyn fmt::Display, msg: &str, keyvalues: &[Value]);
}

impl<L: Logger + ?Sized> Logger for &L {
    fn info(&self, msg: &str, keyvalues: &[Value]) {
        (**self).info(msg, keyvalues);
    }

    fn error(&self, err: &dyn fmt::Display, msg: &str, keyvalues: &[Value]) {
        (**self).error(err, msg, keyvalues);
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn info(&self, msg: &str, keyvalues: &[Value]) {
        (**self).info(msg, keyvalues);
    }

    fn error(&self, err: &dyn fmt::Display, msg: &str, keyvalues: &[Value]) {
        (**self).error(err, msg, keyvalues);
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn info(&self, msg: &str, keyvalues: &[Value]) {
        (**self).info(msg, keyvalues);
    }

    fn error(&self, err: &dyn fmt::Display, msg: &str, keyvalues: &[Value]) {
        (**self).error(err, msg, keyvalues);
    }
}

/// Iterate complete `(key, value)` pairs, dropping a trailing unpaired element.
pub fn pairs(keyvalues: &[Value]) -> impl Iterator<Item = (&Value, &Value)> {
    keyvalues
        .chunks_exact(2)
        .filter_map(|pair| match pair {
            [key, value] => Some((key, value)),
            _ => None,
        })
}
