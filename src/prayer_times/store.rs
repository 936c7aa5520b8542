use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::PrayerTimeRecord;

/// Timetable compiled into the binary.
const BUNDLED_DATASET: &str = include_str!("../../data/namaska_vremena.json");

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Prayer time data not found: {0}")]
    NotFound(PathBuf),
    #[error("Error loading or decoding prayer time data: {0}")]
    Decode(String),
}

/// Where the timetable is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Bundled,
    File(PathBuf),
}

impl DataSource {
    pub fn from_config(path: Option<&Path>) -> Self {
        match path {
            Some(p) => DataSource::File(p.to_path_buf()),
            None => DataSource::Bundled,
        }
    }
}

/// Read-only, date-ordered collection of prayer time records.
#[derive(Debug, Clone, Default)]
pub struct PrayerTimeStore {
    records: BTreeMap<NaiveDate, PrayerTimeRecord>,
}

impl PrayerTimeStore {
    pub fn load_all(source: &DataSource) -> Result<Self, LoadError> {
        match source {
            DataSource::Bundled => Self::from_json(BUNDLED_DATASET),
            DataSource::File(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        LoadError::NotFound(path.clone())
                    } else {
                        LoadError::Decode(format!("{:?}: {}", path, e))
                    }
                })?;
                Self::from_json(&content)
            }
        }
    }

    /// Decode a `{ group: [record, ...], ... }` document and flatten the groups.
    pub fn from_json(content: &str) -> Result<Self, LoadError> {
        let groups: BTreeMap<String, Vec<PrayerTimeRecord>> =
            serde_json::from_str(content).map_err(|e| LoadError::Decode(e.to_string()))?;

        let mut records = BTreeMap::new();
        for (group, entries) in groups {
            for record in entries {
                if records.contains_key(&record.date) {
                    log::warn!(
                        "Duplicate prayer times for {} in group '{}', keeping the first",
                        record.date,
                        group
                    );
                    continue;
                }
                records.insert(record.date, record);
            }
        }

        log::debug!("Loaded {} prayer time records", records.len());
        Ok(Self { records })
    }

    pub fn find(&self, date: NaiveDate) -> Option<&PrayerTimeRecord> {
        self.records.get(&date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.records.contains_key(&date)
    }

    pub fn available_dates(&self) -> Vec<NaiveDate> {
        self.records.keys().copied().collect()
    }

    /// Available dates grouped by (year, month), for the calendar picker.
    pub fn dates_by_month(&self) -> BTreeMap<(i32, u32), Vec<NaiveDate>> {
        let mut grouped: BTreeMap<(i32, u32), Vec<NaiveDate>> = BTreeMap::new();
        for date in self.records.keys() {
            grouped
                .entry((date.year(), date.month()))
                .or_default()
                .push(*date);
        }
        grouped
    }

    /// Records that carry an event label, in date order.
    pub fn events(&self) -> Vec<(NaiveDate, &str)> {
        self.records
            .values()
            .filter_map(|r| r.event.as_deref().map(|e| (r.date, e)))
            .collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const SAMPLE: &str = r#"{
        "februar": [
            {"date": "2025-02-01", "earlyFajr": "05:10", "fajr": "05:40", "dhuhr": "12:02",
             "asr": "14:45", "maghrib": "17:05", "isha": "18:35"}
        ],
        "januar": [
            {"date": "2025-01-31", "event": "Lejletu-l-mi'radž", "earlyFajr": "05:12",
             "fajr": "05:42", "dhuhr": "12:01", "asr": "14:43", "maghrib": "17:03", "isha": "18:33"},
            {"date": "2025-01-30", "earlyFajr": "05:13", "fajr": "05:43", "dhuhr": "12:01",
             "asr": "14:42", "maghrib": "17:02", "isha": "18:32"}
        ]
    }"#;

    #[test]
    fn flattens_groups_into_date_order() {
        let store = PrayerTimeStore::from_json(SAMPLE).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(
            store.available_dates(),
            vec![date(2025, 1, 30), date(2025, 1, 31), date(2025, 2, 1)]
        );
        assert_eq!(store.first_date(), Some(date(2025, 1, 30)));
        assert_eq!(store.last_date(), Some(date(2025, 2, 1)));
    }

    #[test]
    fn find_returns_matching_record() {
        let store = PrayerTimeStore::from_json(SAMPLE).unwrap();
        let record = store.find(date(2025, 1, 31)).unwrap();
        assert_eq!(record.fajr, "05:42");
        assert!(store.find(date(2025, 2, 2)).is_none());
    }

    #[test]
    fn groups_dates_by_month_and_lists_events() {
        let store = PrayerTimeStore::from_json(SAMPLE).unwrap();
        let months = store.dates_by_month();
        assert_eq!(months[&(2025, 1)].len(), 2);
        assert_eq!(months[&(2025, 2)], vec![date(2025, 2, 1)]);
        assert_eq!(store.events(), vec![(date(2025, 1, 31), "Lejletu-l-mi'radž")]);
    }

    #[test]
    fn duplicate_dates_keep_first_group() {
        let json = r#"{
            "a": [{"date": "2025-01-10", "earlyFajr": "05:00", "fajr": "05:30", "dhuhr": "12:00",
                   "asr": "15:00", "maghrib": "17:00", "isha": "19:00"}],
            "b": [{"date": "2025-01-10", "earlyFajr": "06:00", "fajr": "06:30", "dhuhr": "12:00",
                   "asr": "15:00", "maghrib": "17:00", "isha": "19:00"}]
        }"#;
        let store = PrayerTimeStore::from_json(json).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.find(date(2025, 1, 10)).unwrap().early_fajr, "05:00");
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = PrayerTimeStore::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
    }

    #[test]
    fn bad_date_is_a_decode_error() {
        let json = r#"{"x": [{"date": "10.01.2025", "earlyFajr": "05:00", "fajr": "05:30",
            "dhuhr": "12:00", "asr": "15:00", "maghrib": "17:00", "isha": "19:00"}]}"#;
        assert!(matches!(
            PrayerTimeStore::from_json(json),
            Err(LoadError::Decode(_))
        ));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = PrayerTimeStore::load_all(&DataSource::File(path.clone())).unwrap_err();
        assert_eq!(err, LoadError::NotFound(path));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let store =
            PrayerTimeStore::load_all(&DataSource::File(file.path().to_path_buf())).unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn bundled_dataset_decodes() {
        let store = PrayerTimeStore::load_all(&DataSource::Bundled).unwrap();
        assert!(!store.is_empty());
        assert!(store.find(date(2025, 1, 10)).is_some());
    }
}
