//! Wall-clock source for record timestamps.

use chrono::{Local, NaiveDateTime, SubsecRound};

/// Textual form of every timestamp, in storage and on the wire.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Supplies the timestamp stamped onto created and updated recipes.
pub trait Clock: Send + Sync {
    /// Current time, truncated to whole seconds.
    fn now(&self) -> NaiveDateTime;
}

/// Local system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local().trunc_subsecs(0)
    }
}

/// Formats a timestamp the way it is stored and serialized.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a timestamp produced by [`format_timestamp`].
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok()
}

/// Serde adapter for [`TIMESTAMP_FORMAT`].
pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(ts))
    }
}

#[cfg(any(test, feature = "testkit"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "testkit"))]
mod manual {
    use std::sync::Mutex;

    use chrono::{Duration, NaiveDateTime};

    use super::Clock;

    /// Clock that only moves when told to.
    #[derive(Debug)]
    pub struct ManualClock {
        now: Mutex<NaiveDateTime>,
    }

    impl ManualClock {
        pub fn new(start: NaiveDateTime) -> Self {
            Self {
                now: Mutex::new(start),
            }
        }

        /// Moves the clock forward by `secs` seconds.
        pub fn advance_secs(&self, secs: i64) {
            let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
            *now += Duration::seconds(secs);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> NaiveDateTime {
            *self.now.lock().unwrap_or_else(|e| e.into_inner())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn system_clock_has_no_subseconds() {
        assert_eq!(SystemClock.now().nanosecond(), 0);
    }

    #[test]
    fn timestamp_text_roundtrips() {
        let ts = parse_timestamp("2024-03-05 07:08:09").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-03-05 07:08:09");
        assert!(parse_timestamp("2024-03-05T07:08:09Z").is_none());
    }

    #[test]
    fn manual_clock_advances() {
        let start = parse_timestamp("2024-01-01 00:00:00").unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);
        clock.advance_secs(90);
        assert_eq!(format_timestamp(&clock.now()), "2024-01-01 00:01:30");
    }
}
