use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use takvim::cli::args::{Cli, Commands};
use takvim::cli::display::DisplayMode;
use takvim::cli::handlers::{self, TimesRequest};
use takvim::config::AppConfig;
use takvim::db::migrations::run_migrations;
use takvim::notifications::{
    Haptics, NoHaptics, NotificationScheduler, SqliteAlarmCenter, TerminalBell,
};
use takvim::SystemClock;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    run_migrations(&conn)?;

    let clock = SystemClock;
    let center = SqliteAlarmCenter::new(&conn, config.notifications.permitted);
    let haptics: Box<dyn Haptics> = if config.notifications.bell {
        Box::new(TerminalBell)
    } else {
        Box::new(NoHaptics)
    };
    let mut scheduler = NotificationScheduler::new(&conn, &center, &clock, haptics.as_ref())?;
    scheduler.flush_on_upgrade(env!("CARGO_PKG_VERSION"))?;

    match cli.command {
        Some(Commands::Times { date, step, hijri }) => {
            let store = handlers::load_store(&config)?;
            let request = TimesRequest {
                date,
                step,
                display: DisplayMode::from_flag(hijri),
            };
            handlers::handle_times(&store, &scheduler, &clock, &config, &conn, request)?;
        }
        Some(Commands::Calendar { month }) => {
            let store = handlers::load_store(&config)?;
            handlers::handle_calendar(&store, &clock, month.as_deref())?;
        }
        Some(Commands::Events) => {
            let store = handlers::load_store(&config)?;
            handlers::handle_events(&store)?;
        }
        Some(Commands::Notify { action }) => {
            let store = handlers::load_store(&config)?;
            handlers::handle_notify(&store, &mut scheduler, &center, &clock, &action)?;
        }
        Some(Commands::Alarms) => {
            handlers::handle_alarms(&center)?;
        }
        Some(Commands::Settings { sound, location }) => {
            handlers::handle_settings(&conn, sound.as_deref(), location.as_deref())?;
        }

        // No subcommand → today's times
        None => {
            let store = handlers::load_store(&config)?;
            handlers::handle_times(
                &store,
                &scheduler,
                &clock,
                &config,
                &conn,
                TimesRequest::default(),
            )?;
        }
    }

    Ok(())
}
