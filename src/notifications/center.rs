//! The seam between reminder policy and whatever actually delivers alarms.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use thiserror::Error;

use crate::db::repository::AlarmRepo;
use crate::models::AlarmRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlarmError {
    #[error("Permission to schedule notifications was denied")]
    Denied,
    #[error("Alarm backend error: {0}")]
    Backend(String),
}

/// Best-effort alarm backend. Callers never rely on confirmation.
pub trait AlarmCenter {
    fn authorization(&self) -> Authorization;

    /// Submit an alarm, replacing any pending alarm with the same id.
    fn add(&self, request: AlarmRequest) -> Result<(), AlarmError>;

    /// Remove pending alarms by id. Unknown ids are ignored.
    fn remove_pending(&self, ids: &[String]);

    fn remove_all_pending(&self);

    fn pending(&self) -> Vec<AlarmRequest>;
}

/// Local backend that keeps pending alarms in the app database.
pub struct SqliteAlarmCenter<'c> {
    conn: &'c Connection,
    authorization: Authorization,
}

impl<'c> SqliteAlarmCenter<'c> {
    pub fn new(conn: &'c Connection, permitted: bool) -> Self {
        Self {
            conn,
            authorization: if permitted {
                Authorization::Granted
            } else {
                Authorization::Denied
            },
        }
    }
}

impl AlarmCenter for SqliteAlarmCenter<'_> {
    fn authorization(&self) -> Authorization {
        self.authorization
    }

    fn add(&self, request: AlarmRequest) -> Result<(), AlarmError> {
        if self.authorization == Authorization::Denied {
            return Err(AlarmError::Denied);
        }
        AlarmRepo::upsert(self.conn, &request).map_err(|e| AlarmError::Backend(e.to_string()))
    }

    fn remove_pending(&self, ids: &[String]) {
        for id in ids {
            if let Err(e) = AlarmRepo::delete(self.conn, id) {
                log::warn!("Failed to remove pending alarm '{}': {}", id, e);
            }
        }
    }

    fn remove_all_pending(&self) {
        if let Err(e) = AlarmRepo::delete_all(self.conn) {
            log::warn!("Failed to clear pending alarms: {}", e);
        }
    }

    fn pending(&self) -> Vec<AlarmRequest> {
        AlarmRepo::list(self.conn).unwrap_or_else(|e| {
            log::warn!("Failed to read pending alarms: {}", e);
            Vec::new()
        })
    }
}

/// In-memory backend that records what was scheduled.
#[derive(Debug, Clone)]
pub struct MockAlarmCenter {
    alarms: Arc<Mutex<BTreeMap<String, AlarmRequest>>>,
    authorization: Authorization,
    submissions: Arc<Mutex<usize>>,
}

impl Default for MockAlarmCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAlarmCenter {
    pub fn new() -> Self {
        Self {
            alarms: Arc::new(Mutex::new(BTreeMap::new())),
            authorization: Authorization::Granted,
            submissions: Arc::new(Mutex::new(0)),
        }
    }

    /// A backend the user never allowed to post alarms.
    pub fn denied() -> Self {
        Self {
            authorization: Authorization::Denied,
            ..Self::new()
        }
    }

    pub fn get(&self, id: &str) -> Option<AlarmRequest> {
        self.alarms.lock().unwrap().get(id).cloned()
    }

    pub fn pending_count(&self) -> usize {
        self.alarms.lock().unwrap().len()
    }

    /// Number of `add` calls, accepted or not.
    pub fn submission_count(&self) -> usize {
        *self.submissions.lock().unwrap()
    }
}

impl AlarmCenter for MockAlarmCenter {
    fn authorization(&self) -> Authorization {
        self.authorization
    }

    fn add(&self, request: AlarmRequest) -> Result<(), AlarmError> {
        *self.submissions.lock().unwrap() += 1;
        if self.authorization == Authorization::Denied {
            return Err(AlarmError::Denied);
        }
        self.alarms
            .lock()
            .unwrap()
            .insert(request.id.clone(), request);
        Ok(())
    }

    fn remove_pending(&self, ids: &[String]) {
        let mut alarms = self.alarms.lock().unwrap();
        for id in ids {
            alarms.remove(id);
        }
    }

    fn remove_all_pending(&self) {
        self.alarms.lock().unwrap().clear();
    }

    fn pending(&self) -> Vec<AlarmRequest> {
        self.alarms.lock().unwrap().values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::AlarmSound;

    fn request(id: &str, hour: u32) -> AlarmRequest {
        AlarmRequest {
            id: id.to_string(),
            fire_at: NaiveDate::from_ymd_opt(2025, 1, 10)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            title: "Takvim".to_string(),
            body: "Nastupilo je vrijeme Podne namaza".to_string(),
            sound: AlarmSound::Default,
        }
    }

    #[test]
    fn sqlite_center_replaces_and_removes() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let center = SqliteAlarmCenter::new(&conn, true);

        center.add(request("Podne-notification", 12)).unwrap();
        center.add(request("Podne-notification", 12)).unwrap();
        assert_eq!(center.pending().len(), 1);

        center.remove_pending(&["Podne-notification".to_string(), "nope".to_string()]);
        assert!(center.pending().is_empty());
    }

    #[test]
    fn sqlite_center_refuses_without_permission() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let center = SqliteAlarmCenter::new(&conn, false);

        assert_eq!(center.authorization(), Authorization::Denied);
        assert_eq!(
            center.add(request("Podne-notification", 12)),
            Err(AlarmError::Denied)
        );
        assert!(center.pending().is_empty());
    }

    #[test]
    fn mock_center_counts_submissions() {
        let center = MockAlarmCenter::denied();
        assert!(center.add(request("Sabah-notification", 5)).is_err());
        assert_eq!(center.submission_count(), 1);
        assert_eq!(center.pending_count(), 0);
    }

    #[test]
    fn remove_all_clears_everything() {
        let center = MockAlarmCenter::new();
        center.add(request("a", 5)).unwrap();
        center.add(request("b", 6)).unwrap();
        center.remove_all_pending();
        assert_eq!(center.pending_count(), 0);
    }
}
