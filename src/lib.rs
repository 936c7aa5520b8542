//! Takvim library
//!
//! Prayer timetable lookup, current-prayer highlighting, date navigation over the
//! timetable and prayer reminder scheduling. The binary in `main.rs` is a thin
//! command-line front end over these modules.

pub mod cli;
pub mod clock;
pub mod config;
pub mod db;
pub mod models;
pub mod notifications;
pub mod prayer_times;
pub mod utils;

pub use clock::{Clock, MockClock, SystemClock};
pub use config::AppConfig;
pub use models::{
    AlarmRequest, AlarmSound, Location, NotificationPreferences, Prayer, PrayerTimeRecord,
    SelectedSettings, SoundOption, TimeOfDay,
};
pub use notifications::{
    AlarmCenter, AlarmError, Authorization, Haptics, MockAlarmCenter, NoHaptics,
    NotificationScheduler, SqliteAlarmCenter, TerminalBell,
};
pub use prayer_times::{
    resolve, resolve_times, DataSource, DateNavigator, LoadError, PrayerTimeStore,
};
