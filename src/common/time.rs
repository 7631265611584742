//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, TimeZone, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp in UTC (milliseconds)
    fn now_utc_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc_millis(&self) -> i64 {
        get_utc_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_utc_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get the current Unix timestamp in UTC, in milliseconds.
pub fn get_utc_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix millisecond timestamp as an RFC 3339 UTC string.
///
/// Timestamps outside the representable range fall back to the Unix epoch
/// rather than panicking; the system clock cannot produce them.
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    let datetime: DateTime<Utc> = Utc
        .timestamp_millis_opt(timestamp_millis)
        .single()
        .unwrap_or_else(|| Utc.timestamp_millis_opt(0).unwrap());
    datetime.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_fixed_time() {
        // given (precondition):
        let clock = FixedClock::new(1_700_000_000_000);

        // when (operation):
        let first = clock.now_utc_millis();
        let second = clock.now_utc_millis();

        // then (expected result):
        assert_eq!(first, 1_700_000_000_000);
        assert_eq!(first, second);
    }

    #[test]
    fn test_system_clock_does_not_go_backwards() {
        // given (precondition):
        let clock = SystemClock;

        // when (operation):
        let first = clock.now_utc_millis();
        let second = clock.now_utc_millis();

        // then (expected result):
        assert!(second >= first);
    }

    #[test]
    fn test_timestamp_to_rfc3339_formats_epoch() {
        // given (precondition):
        let timestamp = 0;

        // when (operation):
        let formatted = timestamp_to_rfc3339(timestamp);

        // then (expected result):
        assert_eq!(formatted, "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_timestamp_to_rfc3339_keeps_millis() {
        // given (precondition):
        let timestamp = 1_700_000_000_123;

        // when (operation):
        let formatted = timestamp_to_rfc3339(timestamp);

        // then (expected result):
        assert!(formatted.starts_with("2023-11-14T22:13:20.123"));
    }
}
