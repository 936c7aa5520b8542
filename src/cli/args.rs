use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "takvim", version, author, about = "Daily prayer times, Hijri calendar and prayer reminders")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show prayer times for a day and highlight the current prayer
    Times {
        /// Day to show (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Move this many days from the shown day (refused if no data)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        step: i64,
        /// Show the Hijri date instead of the Gregorian one
        #[arg(long)]
        hijri: bool,
    },
    /// Month grid of the days the timetable covers
    Calendar {
        /// Month to show (YYYY-MM), defaults to every month
        #[arg(long)]
        month: Option<String>,
    },
    /// List the events marked in the timetable
    Events,
    /// Prayer reminder switches
    Notify {
        #[command(subcommand)]
        action: NotifyCommands,
    },
    /// Show pending reminders
    Alarms,
    /// Show or change settings
    Settings {
        /// Notification sound (Standardno, Ezan)
        #[arg(long)]
        sound: Option<String>,
        /// City (Sarajevo, Mostar, Tuzla, Zenica, Bihać, Banja Luka)
        #[arg(long)]
        location: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotifyCommands {
    /// Show which reminders are on
    List,
    /// Switch a prayer reminder on or off
    Toggle {
        /// Prayer name (rani-sabah, sabah, podne, ikindija, aksam, jacija)
        prayer: String,
        /// Take the reminder time from this day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Reschedule every enabled reminder from today's times
    Schedule,
}
