use chrono::{Duration, NaiveDate};

use crate::prayer_times::store::PrayerTimeStore;

/// Moves between days, but only onto days the timetable covers.
pub struct DateNavigator<'a> {
    store: &'a PrayerTimeStore,
}

impl<'a> DateNavigator<'a> {
    pub fn new(store: &'a PrayerTimeStore) -> Self {
        Self { store }
    }

    /// `current + delta_days` if that day has a record, otherwise `current`.
    pub fn step(&self, current: NaiveDate, delta_days: i64) -> NaiveDate {
        let target = Duration::try_days(delta_days).and_then(|d| current.checked_add_signed(d));
        match target {
            Some(date) if self.store.contains(date) => date,
            _ => {
                log::debug!(
                    "No prayer times available {} day(s) from {}, staying put",
                    delta_days,
                    current
                );
                current
            }
        }
    }

    /// Jump straight to a picked date, refusing dates without a record.
    pub fn jump(&self, current: NaiveDate, target: NaiveDate) -> NaiveDate {
        self.step(current, (target - current).num_days())
    }
}
