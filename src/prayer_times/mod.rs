pub mod navigator;
pub mod resolver;
pub mod store;

pub use navigator::DateNavigator;
pub use resolver::{resolve, resolve_times};
pub use store::{DataSource, LoadError, PrayerTimeStore};
