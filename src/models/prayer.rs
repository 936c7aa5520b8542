use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The six daily reminder slots, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Prayer {
    RaniSabah,
    Sabah,
    Podne,
    Ikindija,
    Aksam,
    Jacija,
}

impl Prayer {
    pub const ALL: [Prayer; 6] = [
        Prayer::RaniSabah,
        Prayer::Sabah,
        Prayer::Podne,
        Prayer::Ikindija,
        Prayer::Aksam,
        Prayer::Jacija,
    ];

    pub fn all() -> Vec<Prayer> {
        Self::ALL.to_vec()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Prayer::RaniSabah => "Rani Sabah",
            Prayer::Sabah => "Sabah",
            Prayer::Podne => "Podne",
            Prayer::Ikindija => "Ikindija",
            Prayer::Aksam => "Akšam",
            Prayer::Jacija => "Jacija",
        }
    }

    /// Genitive form used in reminder text and as the preference key.
    pub fn notification_title(&self) -> &'static str {
        match self {
            Prayer::RaniSabah => "Ranog Sabah",
            other => other.display_name(),
        }
    }

    /// Identifier of the pending alarm owned by this prayer.
    pub fn alarm_id(&self) -> String {
        format!("{}-notification", self.notification_title())
    }
}

impl std::fmt::Display for Prayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Prayer {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .replace('š', "s")
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match normalized.as_str() {
            "ranisabah" | "ranogsabah" | "earlyfajr" => Ok(Prayer::RaniSabah),
            "sabah" | "fajr" => Ok(Prayer::Sabah),
            "podne" | "dhuhr" | "zuhr" => Ok(Prayer::Podne),
            "ikindija" | "asr" => Ok(Prayer::Ikindija),
            "aksam" | "maghrib" => Ok(Prayer::Aksam),
            "jacija" | "isha" => Ok(Prayer::Jacija),
            _ => Err(anyhow::anyhow!("Unknown prayer: {}", s)),
        }
    }
}

/// One day of the bundled timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerTimeRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub event: Option<String>,
    pub early_fajr: String,
    pub fajr: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl PrayerTimeRecord {
    /// Raw `HH:mm` string stored for the given prayer.
    pub fn time_of(&self, prayer: Prayer) -> &str {
        match prayer {
            Prayer::RaniSabah => &self.early_fajr,
            Prayer::Sabah => &self.fajr,
            Prayer::Podne => &self.dhuhr,
            Prayer::Ikindija => &self.asr,
            Prayer::Aksam => &self.maghrib,
            Prayer::Jacija => &self.isha,
        }
    }

    /// (prayer, raw time) pairs in chronological order.
    pub fn schedule(&self) -> [(Prayer, &str); 6] {
        Prayer::ALL.map(|p| (p, self.time_of(p)))
    }
}
