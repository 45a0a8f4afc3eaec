//! Wall-clock abstraction.
//!
//! The engine never calls `Local::now()` directly. It reads the wall clock
//! through a [`TimeSource`] so tests (and the preview machinery) can run
//! against a clock they control.

use chrono::{DateTime, Local};
#[cfg(any(test, feature = "testing-support"))]
use chrono::Duration;
#[cfg(any(test, feature = "testing-support"))]
use std::sync::{Mutex, PoisonError};

/// Source of the real-world current time.
pub trait TimeSource: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Local>;
}

/// System clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
#[cfg(any(test, feature = "testing-support"))]
#[derive(Debug)]
pub struct ManualTimeSource {
    current: Mutex<DateTime<Local>>,
}

#[cfg(any(test, feature = "testing-support"))]
impl ManualTimeSource {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, time: DateTime<Local>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = time;
    }

    /// Move the clock forward (or backward for negative durations).
    pub fn advance(&self, by: Duration) {
        let mut guard = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *guard += by;
    }
}

#[cfg(any(test, feature = "testing-support"))]
impl TimeSource for ManualTimeSource {
    fn now(&self) -> DateTime<Local> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_source_moves_only_when_told() {
        let start = Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let clock = ManualTimeSource::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::minutes(90));
        assert_eq!(clock.now(), start + Duration::minutes(90));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }
}
