use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::clock::Clock;
use crate::db::repository::{MetaRepo, PreferenceRepo, SettingsRepo, APP_VERSION_KEY};
use crate::models::{
    AlarmRequest, AlarmSound, NotificationPreferences, Prayer, PrayerTimeRecord, SoundOption,
    TimeOfDay,
};
use crate::notifications::center::{AlarmCenter, AlarmError};

pub const ALARM_TITLE: &str = "Takvim";

/// Physical feedback on toggle. Purely cosmetic.
pub trait Haptics {
    fn pulse(&self);
}

#[derive(Debug, Clone, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn pulse(&self) {}
}

/// Rings the terminal bell.
#[derive(Debug, Clone, Default)]
pub struct TerminalBell;

impl Haptics for TerminalBell {
    fn pulse(&self) {
        eprint!("\x07");
    }
}

pub fn alarm_body(prayer: Prayer) -> String {
    format!("Nastupilo je vrijeme {} namaza", prayer.notification_title())
}

pub fn alarm_sound(sound: SoundOption) -> AlarmSound {
    match sound {
        SoundOption::Ezan => AlarmSound::Named(AlarmSound::EZAN_FILE.to_string()),
        SoundOption::Standardno => AlarmSound::Default,
    }
}

pub fn build_request(prayer: Prayer, fire_at: NaiveDateTime, sound: SoundOption) -> AlarmRequest {
    AlarmRequest {
        id: prayer.alarm_id(),
        fire_at,
        title: ALARM_TITLE.to_string(),
        body: alarm_body(prayer),
        sound: alarm_sound(sound),
    }
}

/// Turns the user's reminder switches into pending one-shot alarms.
///
/// Constructed once per process; every collaborator is borrowed, so tests can hand in
/// an in-memory database, a mock clock and a recording alarm center.
pub struct NotificationScheduler<'a> {
    conn: &'a Connection,
    center: &'a dyn AlarmCenter,
    clock: &'a dyn Clock,
    haptics: &'a dyn Haptics,
    prefs: NotificationPreferences,
    sound: SoundOption,
}

impl<'a> NotificationScheduler<'a> {
    pub fn new(
        conn: &'a Connection,
        center: &'a dyn AlarmCenter,
        clock: &'a dyn Clock,
        haptics: &'a dyn Haptics,
    ) -> Result<Self> {
        let prefs = PreferenceRepo::load(conn)?;
        let sound = SettingsRepo::load(conn)?.sound;
        Ok(Self {
            conn,
            center,
            clock,
            haptics,
            prefs,
            sound,
        })
    }

    pub fn preferences(&self) -> &NotificationPreferences {
        &self.prefs
    }

    pub fn is_enabled(&self, prayer: Prayer) -> bool {
        self.prefs.is_enabled(prayer)
    }

    /// (Re)schedule every enabled prayer from the given day's times.
    pub fn schedule(&self, record: &PrayerTimeRecord) {
        for (prayer, time) in record.schedule() {
            if self.prefs.is_enabled(prayer) {
                self.schedule_one(prayer, time);
            }
        }
    }

    /// Submit the next occurrence of `time` for one prayer, replacing its pending alarm.
    pub fn schedule_one(&self, prayer: Prayer, time: &str) {
        let Some(time) = TimeOfDay::parse(time) else {
            log::warn!("Not scheduling {}: invalid time '{}'", prayer, time);
            return;
        };
        let fire_at = time.next_after(self.clock.now_local());
        let request = build_request(prayer, fire_at, self.sound);

        match self.center.add(request) {
            Ok(()) => log::debug!("Scheduled {} reminder for {}", prayer, fire_at),
            Err(AlarmError::Denied) => {
                log::warn!("Notification permission denied, {} reminder not scheduled", prayer)
            }
            Err(e) => log::warn!("Error adding {} reminder: {}", prayer, e),
        }
    }

    /// Flip one prayer's switch, apply it to the alarm backend and persist all switches.
    /// Nothing changes in memory or in the alarm backend unless the save succeeds.
    pub fn toggle(&mut self, prayer: Prayer, time: &str) -> Result<bool> {
        let mut next = self.prefs.clone();
        let enabled = next.toggle(prayer);
        PreferenceRepo::save(self.conn, &next)?;
        self.prefs = next;

        if enabled {
            self.schedule_one(prayer, time);
        } else {
            self.cancel(prayer);
        }
        self.haptics.pulse();
        Ok(enabled)
    }

    pub fn cancel(&self, prayer: Prayer) {
        self.center.remove_pending(&[prayer.alarm_id()]);
    }

    /// Drop every pending alarm when the stored version marker differs from `version`.
    /// Returns whether a flush happened.
    pub fn flush_on_upgrade(&self, version: &str) -> Result<bool> {
        let previous = MetaRepo::get(self.conn, APP_VERSION_KEY)?;
        if previous.as_deref() == Some(version) {
            return Ok(false);
        }
        log::info!(
            "App version changed ({} -> {}), clearing pending alarms",
            previous.as_deref().unwrap_or("none"),
            version
        );
        self.center.remove_all_pending();
        MetaRepo::set(self.conn, APP_VERSION_KEY, version)?;
        Ok(true)
    }
}
