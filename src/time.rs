//! Clock abstraction for timestamps and message times.
//!
//! The reaper and the use cases take a [`Clock`] instead of reading the wall
//! clock directly, so staleness logic can be driven in tests without real
//! sleeps.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{Local, TimeZone};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in milliseconds.
    fn now_millis(&self) -> i64;

    /// Human-readable local clock time ("HH:MM:SS") for `now_millis`.
    fn clock_time(&self) -> String {
        format_clock_time(self.now_millis())
    }
}

/// Format a millisecond Unix timestamp as local "HH:MM:SS".
pub fn format_clock_time(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => String::from("00:00:00"),
    }
}

/// Wall-clock implementation used by the server.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Local::now().timestamp_millis()
    }
}

/// Manually advanced clock for tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn new(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        // given (precondition):
        let clock = ManualClock::new(1_000);

        // when (operation):
        clock.advance(500);

        // then (expected result):
        assert_eq!(clock.now_millis(), 1_500);
    }

    #[test]
    fn test_clock_time_is_hh_mm_ss() {
        // given (precondition):
        let clock = SystemClock;

        // when (operation):
        let time = clock.clock_time();

        // then (expected result):
        assert_eq!(time.len(), 8);
        assert_eq!(time.matches(':').count(), 2);
    }
}
