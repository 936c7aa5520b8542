use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;

/// Hijri month names as used in Bosnian takvims (index 0 = Muharrem = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "Muharrem",
    "Safer",
    "Rebiu-l-evvel",
    "Rebiu-l-ahir",
    "Džumade-l-ula",
    "Džumade-l-uhra",
    "Redžeb",
    "Ša'ban",
    "Ramazan",
    "Ševval",
    "Zu-l-ka'de",
    "Zu-l-hidždže",
];

fn hijri_month_name(month: usize) -> &'static str {
    if (1..=12).contains(&month) {
        HIJRI_MONTH_NAMES[month - 1]
    } else {
        "Nepoznat"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HijriInfo {
    pub day: usize,
    pub month: usize,
    pub year: usize,
    pub month_name: String,
}

impl HijriInfo {
    /// "1446 Redžeb 10"
    pub fn formatted(&self) -> String {
        format!("{} {} {:02}", self.year, self.month_name, self.day)
    }
}

/// Convert a Gregorian date, shifted by `offset_days` for local moon sighting.
pub fn to_hijri(date: NaiveDate, offset_days: i32) -> Result<HijriInfo> {
    let adjusted = date
        .checked_add_signed(Duration::days(offset_days as i64))
        .ok_or_else(|| anyhow::anyhow!("Date out of range: {} + {} days", date, offset_days))?;

    let hd = HijriDate::from_gr(
        adjusted.year() as usize,
        adjusted.month() as usize,
        adjusted.day() as usize,
    )
    .map_err(|e| anyhow::anyhow!("Hijri conversion error: {}", e))?;

    let month = hd.month();
    Ok(HijriInfo {
        day: hd.day(),
        month,
        year: hd.year(),
        month_name: hijri_month_name(month).to_string(),
    })
}
