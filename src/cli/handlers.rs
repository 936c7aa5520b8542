use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use rusqlite::Connection;
use std::str::FromStr;

use crate::cli::args::NotifyCommands;
use crate::cli::display::DisplayMode;
use crate::clock::Clock;
use crate::config::AppConfig;
use crate::db::repository::SettingsRepo;
use crate::models::{Location, Prayer, SoundOption};
use crate::notifications::{AlarmCenter, Authorization, NotificationScheduler};
use crate::prayer_times::{resolve, DataSource, DateNavigator, PrayerTimeStore};
use crate::utils::format::{format_gregorian, format_month_heading, WEEKDAY_SHORT};
use crate::utils::hijri::to_hijri;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";
const RESET: &str = "\x1b[0m";

/// Load the timetable; failures are fatal for the command and shown as-is.
pub fn load_store(config: &AppConfig) -> Result<PrayerTimeStore> {
    let source = DataSource::from_config(config.data.path.as_deref());
    PrayerTimeStore::load_all(&source).context("Loading prayer times")
}

fn parse_prayer(s: &str) -> Result<Prayer> {
    Prayer::from_str(s).map_err(|_| {
        anyhow!(
            "Unknown prayer '{}'. Use: rani-sabah, sabah, podne, ikindija, aksam, jacija",
            s
        )
    })
}

// ─── Times ───────────────────────────────────────────────────────────────────

/// What the `times` command was asked to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimesRequest {
    pub date: Option<NaiveDate>,
    pub step: i64,
    pub display: DisplayMode,
}

/// Day to show for `request`, plus a notice for every move that was refused.
fn pick_day(
    navigator: &DateNavigator,
    today: NaiveDate,
    request: &TimesRequest,
) -> (NaiveDate, Vec<String>) {
    let mut notices = Vec::new();
    let mut shown = today;
    if let Some(picked) = request.date {
        shown = navigator.jump(today, picked);
        if shown != picked {
            notices.push(format!("No prayer times available for {}", picked));
        }
    }
    if request.step != 0 {
        let moved = navigator.step(shown, request.step);
        if moved == shown {
            notices.push(format!(
                "No prayer times available {} day(s) from {}",
                request.step, shown
            ));
        }
        shown = moved;
    }
    (shown, notices)
}

pub fn handle_times(
    store: &PrayerTimeStore,
    scheduler: &NotificationScheduler,
    clock: &dyn Clock,
    config: &AppConfig,
    conn: &Connection,
    request: TimesRequest,
) -> Result<()> {
    let now = clock.now_local();
    let navigator = DateNavigator::new(store);

    let (shown, notices) = pick_day(&navigator, now.date(), &request);
    for notice in notices {
        println_colored!(AMBER, "  {}", notice);
    }

    let record = store
        .find(shown)
        .ok_or_else(|| anyhow!("No prayer times available for {}", shown))?;

    scheduler.schedule(record);

    let location = SettingsRepo::load(conn)?.location;
    let header = match request.display {
        DisplayMode::Gregorian => format_gregorian(shown),
        DisplayMode::Hijri => to_hijri(shown, config.calendar.hijri_offset)
            .map(|h| h.formatted())
            .unwrap_or_else(|e| {
                log::warn!("{}", e);
                format_gregorian(shown)
            }),
    };

    println!();
    println_colored!(GOLD, "  Takvim {} — {}", shown.year(), location);
    println_colored!(BOLD, "  {}", header);
    if let Some(event) = &record.event {
        println_colored!(GREEN, "  {}", event);
    }
    println!();

    let current = resolve(now.time(), record);
    for (prayer, time) in record.schedule() {
        let bell = if scheduler.is_enabled(prayer) { "●" } else { "○" };
        let line = format!("{:<11} {:<6} {}", prayer.display_name(), time, bell);
        if current == Some(prayer) {
            println_colored!(GOLD, "▸ {}", line);
        } else {
            println!("  {}", line);
        }
    }
    println!();
    Ok(())
}

// ─── Calendar ────────────────────────────────────────────────────────────────

fn parse_month(s: &str) -> Result<(i32, u32)> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok((first.year(), first.month()))
}

/// Lines of a Monday-first month grid. Days without data show as a dim dot.
pub fn month_grid(year: i32, month: u32, days: &[NaiveDate], today: NaiveDate) -> Vec<String> {
    let mut lines = vec![WEEKDAY_SHORT
        .iter()
        .map(|d| format!("{:>3}", d))
        .collect::<String>()];

    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return lines;
    };
    let mut row = "   ".repeat(first.weekday().num_days_from_monday() as usize);
    let mut day = first;
    while day.month() == month {
        let cell = if !days.contains(&day) {
            format!("{}{:>3}{}", DIM, "·", RESET)
        } else if day == today {
            format!("{}{:>3}{}", BOLD, day.day(), RESET)
        } else if day.weekday() == Weekday::Fri {
            format!("{}{:>3}{}", GREEN, day.day(), RESET)
        } else {
            format!("{:>3}", day.day())
        };
        row.push_str(&cell);
        if day.weekday() == Weekday::Sun {
            lines.push(std::mem::take(&mut row));
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    if !row.is_empty() {
        lines.push(row);
    }
    lines
}

pub fn handle_calendar(store: &PrayerTimeStore, clock: &dyn Clock, month: Option<&str>) -> Result<()> {
    let today = clock.now_local().date();
    let wanted = month.map(parse_month).transpose()?;
    let months = store.dates_by_month();

    let selected: Vec<_> = months
        .iter()
        .filter(|(key, _)| wanted.is_none_or(|w| w == **key))
        .collect();
    if selected.is_empty() {
        match (store.first_date(), store.last_date()) {
            (Some(first), Some(last)) => println_colored!(
                AMBER,
                "  No prayer times available for that month (timetable covers {} to {})",
                first,
                last
            ),
            _ => println_colored!(AMBER, "  No prayer times available for that month"),
        }
        return Ok(());
    }

    for ((year, m), days) in selected {
        println!();
        println_colored!(GOLD, "  {}", format_month_heading(*year, *m));
        for line in month_grid(*year, *m, days, today) {
            println!("  {}", line);
        }
    }
    println!();
    Ok(())
}

// ─── Events ──────────────────────────────────────────────────────────────────

pub fn handle_events(store: &PrayerTimeStore) -> Result<()> {
    let events = store.events();
    println!();
    if events.is_empty() {
        println_colored!(DIM, "  No events in the timetable");
    }
    for (date, event) in events {
        println!("  {}  {}", date.format("%Y-%m-%d"), event);
    }
    println!();
    Ok(())
}

// ─── Notifications ───────────────────────────────────────────────────────────

pub fn handle_notify(
    store: &PrayerTimeStore,
    scheduler: &mut NotificationScheduler,
    center: &dyn AlarmCenter,
    clock: &dyn Clock,
    action: &NotifyCommands,
) -> Result<()> {
    let today = clock.now_local().date();
    match action {
        NotifyCommands::List => {
            println!();
            for (prayer, enabled) in scheduler.preferences().iter() {
                if enabled {
                    println_colored!(GREEN, "  ● {}", prayer.display_name());
                } else {
                    println_colored!(DIM, "  ○ {}", prayer.display_name());
                }
            }
            if center.authorization() == Authorization::Denied {
                println!();
                println_colored!(RED, "  Notifications are not permitted; reminders will not fire");
            }
            println!();
        }
        NotifyCommands::Toggle { prayer, date } => {
            let prayer = parse_prayer(prayer)?;
            let day = date.unwrap_or(today);
            let record = store
                .find(day)
                .ok_or_else(|| anyhow!("No prayer times available for {}", day))?;
            let enabled = scheduler.toggle(prayer, record.time_of(prayer))?;
            if enabled {
                println_colored!(
                    GREEN,
                    "  ● {} reminder on ({})",
                    prayer.display_name(),
                    record.time_of(prayer)
                );
            } else {
                println_colored!(DIM, "  ○ {} reminder off", prayer.display_name());
            }
        }
        NotifyCommands::Schedule => {
            let record = store
                .find(today)
                .ok_or_else(|| anyhow!("No prayer times available for {}", today))?;
            scheduler.schedule(record);
            println_colored!(GREEN, "  ✓ Reminders rescheduled from {}", today);
        }
    }
    Ok(())
}

pub fn handle_alarms(center: &dyn AlarmCenter) -> Result<()> {
    let pending = center.pending();
    println!();
    if pending.is_empty() {
        println_colored!(DIM, "  No pending reminders");
    }
    for alarm in pending {
        println!(
            "  {}  {}",
            alarm.fire_at.format("%Y-%m-%d %H:%M"),
            alarm.body
        );
    }
    println!();
    Ok(())
}

// ─── Settings ────────────────────────────────────────────────────────────────

pub fn handle_settings(
    conn: &Connection,
    sound: Option<&str>,
    location: Option<&str>,
) -> Result<()> {
    if let Some(s) = sound {
        let sound = SoundOption::from_str(s)
            .map_err(|_| anyhow!("Unknown sound '{}'. Use: Standardno, Ezan", s))?;
        SettingsRepo::set_sound(conn, sound)?;
    }
    if let Some(l) = location {
        let names: Vec<_> = Location::all().iter().map(|l| l.as_str()).collect();
        let location = Location::from_str(l)
            .map_err(|_| anyhow!("Unknown location '{}'. Use: {}", l, names.join(", ")))?;
        SettingsRepo::set_location(conn, location)?;
    }

    let settings = SettingsRepo::load(conn)?;
    println!();
    println_colored!(GOLD, "  Postavke");
    println!("  {:<18} {}", "Zvuk notifikacije", settings.sound);
    println!("  {:<18} {}", "Lokacija", settings.location);
    println!();
    Ok(())
}
