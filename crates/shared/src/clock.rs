//! Time sources for log timestamps.

use chrono::{DateTime, FixedOffset, Local};
use std::fmt;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current wall-clock time with its UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the process-local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<FixedOffset>);

impl FixedClock {
    /// Freeze time at `at`.
    #[must_use]
    pub const fn new(at: DateTime<FixedOffset>) -> Self {
        Self(at)
    }

    /// Freeze time at an RFC3339 instant.
    pub fn parse(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(rfc3339).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// RFC3339 rendering with second precision.
///
/// Zero offsets render as `Z`, all others as `+HH:MM`/`-HH:MM`.
#[derive(Debug, Clone, Copy)]
pub struct Rfc3339(pub DateTime<FixedOffset>);

impl fmt::Display for Rfc3339 {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pattern = if self.0.offset().local_minus_utc() == 0 {
            "%Y-%m-%dT%H:%M:%SZ"
        } else {
            "%Y-%m-%dT%H:%M:%S%:z"
        };
        fmt::Display::fmt(&self.0.format(pattern), formatter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::SecondsFormat;

    #[test]
    fn utc_instants_render_with_z_suffix() -> Result<(), chrono::ParseError> {
        let clock = FixedClock::parse("2024-03-09T07:05:01.987+00:00")?;
        assert_eq!(Rfc3339(clock.now()).to_string(), "2024-03-09T07:05:01Z");
        Ok(())
    }

    #[test]
    fn offset_instants_keep_their_offset() -> Result<(), chrono::ParseError> {
        let clock = FixedClock::parse("2024-12-31T23:59:59-05:30")?;
        assert_eq!(
            Rfc3339(clock.now()).to_string(),
            "2024-12-31T23:59:59-05:30"
        );
        Ok(())
    }

    #[test]
    fn display_matches_chrono_rfc3339_seconds() {
        let now = SystemClock.now();
        assert_eq!(
            Rfc3339(now).to_string(),
            now.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }

    #[test]
    fn fixed_clock_is_stable() -> Result<(), chrono::ParseError> {
        let clock = FixedClock::parse("2025-01-01T00:00:00Z")?;
        assert_eq!(clock.now(), clock.now());
        Ok(())
    }
}
