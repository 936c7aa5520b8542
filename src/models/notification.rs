use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::Prayer;

/// Per-prayer reminder switches. Every prayer starts disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPreferences {
    enabled: BTreeMap<Prayer, bool>,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            enabled: Prayer::ALL.iter().map(|p| (*p, false)).collect(),
        }
    }
}

impl NotificationPreferences {
    pub fn is_enabled(&self, prayer: Prayer) -> bool {
        self.enabled.get(&prayer).copied().unwrap_or(false)
    }

    pub fn set(&mut self, prayer: Prayer, enabled: bool) {
        self.enabled.insert(prayer, enabled);
    }

    /// Flip the switch and return the new state.
    pub fn toggle(&mut self, prayer: Prayer) -> bool {
        let next = !self.is_enabled(prayer);
        self.set(prayer, next);
        next
    }

    pub fn enabled(&self) -> impl Iterator<Item = Prayer> + '_ {
        self.enabled.iter().filter(|(_, on)| **on).map(|(p, _)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prayer, bool)> + '_ {
        self.enabled.iter().map(|(p, on)| (*p, *on))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmSound {
    Default,
    Named(String),
}

impl AlarmSound {
    pub const EZAN_FILE: &'static str = "ezan.wav";
}

/// A one-shot reminder handed to the alarm backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmRequest {
    pub id: String,
    pub fire_at: NaiveDateTime,
    pub title: String,
    pub body: String,
    pub sound: AlarmSound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_all_disabled() {
        let prefs = NotificationPreferences::default();
        assert!(Prayer::ALL.iter().all(|p| !prefs.is_enabled(*p)));
        assert_eq!(prefs.enabled().count(), 0);
        assert_eq!(prefs.iter().count(), 6);
    }

    #[test]
    fn toggle_flips_and_reports_state() {
        let mut prefs = NotificationPreferences::default();
        assert!(prefs.toggle(Prayer::Podne));
        assert_eq!(prefs.enabled().collect::<Vec<_>>(), vec![Prayer::Podne]);
        assert!(!prefs.toggle(Prayer::Podne));
        assert!(!prefs.is_enabled(Prayer::Podne));
    }
}
