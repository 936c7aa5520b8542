use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// A wall-clock `HH:mm` value detached from any date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Parse an `HH:mm` string. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M").ok().map(Self)
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }

    /// This clock time on the given day.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.0)
    }

    /// First occurrence strictly after `now`: today if still ahead, otherwise tomorrow.
    pub fn next_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = self.on(now.date());
        if today <= now {
            today + chrono::Duration::days(1)
        } else {
            today
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}
