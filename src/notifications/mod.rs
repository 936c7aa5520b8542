pub mod center;
pub mod scheduler;

pub use center::{AlarmCenter, AlarmError, Authorization, MockAlarmCenter, SqliteAlarmCenter};
pub use scheduler::{Haptics, NoHaptics, NotificationScheduler, TerminalBell};
