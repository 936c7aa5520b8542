use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;

use crate::models::{
    AlarmRequest, AlarmSound, Location, NotificationPreferences, Prayer, SelectedSettings,
    SoundOption,
};

pub const SOUND_KEY: &str = "notificationSound";
pub const LOCATION_KEY: &str = "location";
pub const APP_VERSION_KEY: &str = "appVersion";

const FIRE_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}

// ─── Notification preferences ────────────────────────────────────────────────

pub struct PreferenceRepo;

impl PreferenceRepo {
    /// Flags are keyed by each prayer's notification title; missing keys read as off.
    pub fn load(conn: &Connection) -> Result<NotificationPreferences> {
        let mut prefs = NotificationPreferences::default();
        for prayer in Prayer::all() {
            if let Some(value) = MetaRepo::get(conn, prayer.notification_title())? {
                prefs.set(prayer, value == "true");
            }
        }
        Ok(prefs)
    }

    pub fn save(conn: &Connection, prefs: &NotificationPreferences) -> Result<()> {
        for (prayer, enabled) in prefs.iter() {
            MetaRepo::set(
                conn,
                prayer.notification_title(),
                if enabled { "true" } else { "false" },
            )?;
        }
        Ok(())
    }
}

// ─── Selected settings ───────────────────────────────────────────────────────

pub struct SettingsRepo;

impl SettingsRepo {
    /// Unknown stored values fall back to the defaults.
    pub fn load(conn: &Connection) -> Result<SelectedSettings> {
        let sound = MetaRepo::get(conn, SOUND_KEY)?
            .and_then(|s| SoundOption::from_str(&s).ok())
            .unwrap_or_default();
        let location = MetaRepo::get(conn, LOCATION_KEY)?
            .and_then(|s| Location::from_str(&s).ok())
            .unwrap_or_default();
        Ok(SelectedSettings { sound, location })
    }

    pub fn set_sound(conn: &Connection, sound: SoundOption) -> Result<()> {
        MetaRepo::set(conn, SOUND_KEY, sound.as_str())
    }

    pub fn set_location(conn: &Connection, location: Location) -> Result<()> {
        MetaRepo::set(conn, LOCATION_KEY, location.as_str())
    }
}

// ─── Pending alarms ──────────────────────────────────────────────────────────

pub struct AlarmRepo;

impl AlarmRepo {
    /// Insert or replace the alarm with the same id.
    pub fn upsert(conn: &Connection, alarm: &AlarmRequest) -> Result<()> {
        let sound = match &alarm.sound {
            AlarmSound::Default => None,
            AlarmSound::Named(name) => Some(name.as_str()),
        };
        conn.execute(
            "INSERT OR REPLACE INTO pending_alarms (id, fire_at, title, body, sound)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                alarm.id,
                alarm.fire_at.format(FIRE_AT_FORMAT).to_string(),
                alarm.title,
                alarm.body,
                sound,
            ],
        )?;
        Ok(())
    }

    pub fn delete(conn: &Connection, id: &str) -> Result<()> {
        conn.execute("DELETE FROM pending_alarms WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub fn delete_all(conn: &Connection) -> Result<()> {
        conn.execute("DELETE FROM pending_alarms", [])?;
        Ok(())
    }

    pub fn list(conn: &Connection) -> Result<Vec<AlarmRequest>> {
        let mut stmt = conn.prepare(
            "SELECT id, fire_at, title, body, sound FROM pending_alarms ORDER BY fire_at, id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })?;

        let mut result = Vec::new();
        for r in rows {
            let (id, fire_at, title, body, sound) = r?;
            let fire_at = NaiveDateTime::parse_from_str(&fire_at, FIRE_AT_FORMAT)
                .map_err(|e| anyhow!("Bad fire_at '{}' for alarm '{}': {}", fire_at, id, e))?;
            result.push(AlarmRequest {
                id,
                fire_at,
                title,
                body,
                sound: sound.map(AlarmSound::Named).unwrap_or(AlarmSound::Default),
            });
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use chrono::NaiveDate;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn alarm(id: &str, hour: u32) -> AlarmRequest {
        AlarmRequest {
            id: id.to_string(),
            fire_at: NaiveDate::from_ymd_opt(2025, 1, 10)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            title: "Takvim".to_string(),
            body: "body".to_string(),
            sound: AlarmSound::Named(AlarmSound::EZAN_FILE.to_string()),
        }
    }

    #[test]
    fn meta_set_overwrites() {
        let conn = conn();
        assert_eq!(MetaRepo::get(&conn, "k").unwrap(), None);
        MetaRepo::set(&conn, "k", "1").unwrap();
        MetaRepo::set(&conn, "k", "2").unwrap();
        assert_eq!(MetaRepo::get(&conn, "k").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn preferences_default_then_persist() {
        let conn = conn();
        let mut prefs = PreferenceRepo::load(&conn).unwrap();
        assert_eq!(prefs, NotificationPreferences::default());

        prefs.set(Prayer::RaniSabah, true);
        PreferenceRepo::save(&conn, &prefs).unwrap();

        assert_eq!(
            MetaRepo::get(&conn, "Ranog Sabah").unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(PreferenceRepo::load(&conn).unwrap(), prefs);
    }

    #[test]
    fn settings_fall_back_to_defaults() {
        let conn = conn();
        assert_eq!(SettingsRepo::load(&conn).unwrap(), SelectedSettings::default());

        MetaRepo::set(&conn, SOUND_KEY, "Kazan").unwrap();
        assert_eq!(SettingsRepo::load(&conn).unwrap().sound, SoundOption::Ezan);

        SettingsRepo::set_sound(&conn, SoundOption::Standardno).unwrap();
        SettingsRepo::set_location(&conn, Location::Mostar).unwrap();
        let loaded = SettingsRepo::load(&conn).unwrap();
        assert_eq!(loaded.sound, SoundOption::Standardno);
        assert_eq!(loaded.location, Location::Mostar);
    }

    #[test]
    fn alarms_replace_by_id() {
        let conn = conn();
        AlarmRepo::upsert(&conn, &alarm("Podne-notification", 12)).unwrap();
        AlarmRepo::upsert(&conn, &alarm("Podne-notification", 13)).unwrap();
        AlarmRepo::upsert(&conn, &alarm("Sabah-notification", 5)).unwrap();

        let alarms = AlarmRepo::list(&conn).unwrap();
        assert_eq!(alarms.len(), 2);
        assert_eq!(alarms[0].id, "Sabah-notification");
        assert_eq!(alarms[1], alarm("Podne-notification", 13));
    }

    #[test]
    fn default_sound_stored_as_null() {
        let conn = conn();
        let mut a = alarm("Jacija-notification", 19);
        a.sound = AlarmSound::Default;
        AlarmRepo::upsert(&conn, &a).unwrap();
        assert_eq!(AlarmRepo::list(&conn).unwrap()[0].sound, AlarmSound::Default);
    }

    #[test]
    fn deletes_are_idempotent() {
        let conn = conn();
        AlarmRepo::upsert(&conn, &alarm("Podne-notification", 12)).unwrap();
        AlarmRepo::delete(&conn, "Podne-notification").unwrap();
        AlarmRepo::delete(&conn, "Podne-notification").unwrap();
        AlarmRepo::delete_all(&conn).unwrap();
        assert!(AlarmRepo::list(&conn).unwrap().is_empty());
    }
}
