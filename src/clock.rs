//! Source of "now" for time-dependent logic.

use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDateTime};

/// Local wall-clock time provider.
pub trait Clock {
    fn now_local(&self) -> NaiveDateTime;
}

/// Real local time.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Controllable clock for tests.
#[derive(Debug, Clone)]
pub struct MockClock {
    time: Arc<Mutex<NaiveDateTime>>,
}

impl MockClock {
    pub fn new(time: NaiveDateTime) -> Self {
        Self {
            time: Arc::new(Mutex::new(time)),
        }
    }

    pub fn set_time(&self, time: NaiveDateTime) {
        *self.time.lock().unwrap() = time;
    }

    pub fn advance(&self, duration: chrono::Duration) {
        let mut time = self.time.lock().unwrap();
        *time += duration;
    }
}

impl Clock for MockClock {
    fn now_local(&self) -> NaiveDateTime {
        *self.time.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn mock_clock_returns_set_time() {
        let clock = MockClock::new(at(4, 0));
        assert_eq!(clock.now_local(), at(4, 0));
        clock.set_time(at(13, 0));
        assert_eq!(clock.now_local(), at(13, 0));
    }

    #[test]
    fn mock_clock_advance() {
        let clock = MockClock::new(at(10, 0));
        clock.advance(chrono::Duration::hours(2));
        assert_eq!(clock.now_local(), at(12, 0));
    }
}
