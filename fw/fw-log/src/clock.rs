//! Time sources for log timestamps.
//!
//! A clock only reports Unix seconds; the logger turns that into UTC
//! calendar time. Boards without an RTC typically report seconds since boot,
//! which renders as a 1970 date.

use chrono::{DateTime, Utc};

/// Source of the current time in whole seconds since the Unix epoch.
pub trait Clock {
    fn unix_seconds(&self) -> i64;

    /// Current time as UTC calendar time.
    ///
    /// Values chrono cannot represent fall back to the epoch.
    fn now_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.unix_seconds(), 0).unwrap_or_default()
    }
}

impl<F> Clock for F
where
    F: Fn() -> i64,
{
    fn unix_seconds(&self) -> i64 {
        self()
    }
}

/// Clock stuck at a fixed instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_seconds(&self) -> i64 {
        self.0
    }
}

/// Host wall clock.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn unix_seconds(&self) -> i64 {
        use std::time::{SystemTime, UNIX_EPOCH};

        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
            // clock set before 1970
            Err(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_fixed_clock_calendar_time() {
        // 2024-03-05 07:08:09 UTC
        let now = FixedClock(1_709_622_489).now_utc();
        assert_eq!((now.year(), now.month(), now.day()), (2024, 3, 5));
        assert_eq!((now.hour(), now.minute(), now.second()), (7, 8, 9));
    }

    #[test]
    fn test_out_of_range_falls_back_to_epoch() {
        let now = FixedClock(i64::MAX).now_utc();
        assert_eq!(now.timestamp(), 0);
    }

    #[test]
    fn test_fn_clock() {
        let clock = || 86_400_i64;
        assert_eq!(clock.now_utc().day(), 2);
    }
}
