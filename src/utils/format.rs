use chrono::{Datelike, NaiveDate, Weekday};

const MONTHS: &[&str] = &[
    "januar",
    "februar",
    "mart",
    "april",
    "maj",
    "juni",
    "juli",
    "august",
    "septembar",
    "oktobar",
    "novembar",
    "decembar",
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "ponedjeljak",
        Weekday::Tue => "utorak",
        Weekday::Wed => "srijeda",
        Weekday::Thu => "četvrtak",
        Weekday::Fri => "petak",
        Weekday::Sat => "subota",
        Weekday::Sun => "nedjelja",
    }
}

/// Two-letter weekday headers, Monday first.
pub const WEEKDAY_SHORT: [&str; 7] = ["Po", "Ut", "Sr", "Če", "Pe", "Su", "Ne"];

pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i as usize))
        .copied()
        .unwrap_or("?")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "Petak, 10 januar"
pub fn format_gregorian(date: NaiveDate) -> String {
    capitalize(&format!(
        "{}, {} {}",
        weekday_name(date.weekday()),
        date.day(),
        month_name(date.month())
    ))
}

/// "Januar 2025"
pub fn format_month_heading(year: i32, month: u32) -> String {
    format!("{} {}", capitalize(month_name(month)), year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_bosnian_long_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert_eq!(format_gregorian(date), "Petak, 10 januar");
        let date = NaiveDate::from_ymd_opt(2025, 1, 16).unwrap();
        assert_eq!(format_gregorian(date), "Četvrtak, 16 januar");
    }

    #[test]
    fn month_heading_is_capitalized() {
        assert_eq!(format_month_heading(2025, 2), "Februar 2025");
        assert_eq!(month_name(13), "?");
        assert_eq!(month_name(0), "?");
    }
}
