pub mod notification;
pub mod prayer;
pub mod settings;
pub mod time;

pub use notification::{AlarmRequest, AlarmSound, NotificationPreferences};
pub use prayer::{Prayer, PrayerTimeRecord};
pub use settings::{Location, SelectedSettings, SoundOption};
pub use time::TimeOfDay;
