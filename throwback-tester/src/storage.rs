//! JSON file implementations of the record store and score ledger.
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use throwback_game::record::sort_newest_first;
use throwback_game::{GuessableRecord, NewRecord, RecordId, RecordStore, ScoreLedger};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn read_json<T>(path: &Path) -> Result<Option<T>, StorageError>
where
    T: serde::de::DeserializeOwned,
{
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let payload = serde_json::to_string_pretty(value).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StorageError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, payload).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Records kept as a JSON array in a single file. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Vec<GuessableRecord>, StorageError> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }
}

fn next_sequence(records: &[GuessableRecord]) -> u64 {
    records
        .iter()
        .filter_map(|record| record.id.as_str().strip_prefix("rec-"))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .map_or(1, |max| max + 1)
}

impl RecordStore for FileRecordStore {
    type Error = StorageError;

    fn create(&self, record: NewRecord) -> Result<RecordId, Self::Error> {
        let mut records = self.load()?;
        let id = RecordId::new(format!("rec-{}", next_sequence(&records)));
        // keep ordering strict even when two records land in the same millisecond
        let newest = records.iter().map(|r| r.created_at).max().unwrap_or(i64::MIN);
        let created_at = Utc::now().timestamp_millis().max(newest.saturating_add(1));
        records.push(record.into_record(id.clone(), created_at));
        write_json(&self.path, &records)?;
        Ok(id)
    }

    fn list(&self, limit: Option<usize>) -> Result<Vec<GuessableRecord>, Self::Error> {
        let mut records = self.load()?;
        sort_newest_first(&mut records);
        if let Some(limit) = limit {
            records.truncate(limit);
        }
        Ok(records)
    }

    fn delete(&self, id: &RecordId) -> Result<(), Self::Error> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|record| &record.id != id);
        if records.len() != before {
            write_json(&self.path, &records)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct LedgerFile {
    score: f64,
}

/// Running score stored as `{"score": <number>}`.
#[derive(Debug, Clone)]
pub struct FileLedger {
    path: PathBuf,
}

impl FileLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreLedger for FileLedger {
    type Error = StorageError;

    fn get(&self) -> Result<f64, Self::Error> {
        Ok(read_json::<LedgerFile>(&self.path)?.map_or(0.0, |file| file.score))
    }

    fn set(&self, score: f64) -> Result<(), Self::Error> {
        write_json(&self.path, &LedgerFile { score })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use throwback_game::TimePoint;

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "throwback-storage-{label}-{}.json",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    fn draft(label: &str) -> NewRecord {
        NewRecord {
            media_ref: "dQw4w9WgXcQ".to_string(),
            time_point: TimePoint::year_month(2013, 5),
            primary_label: label.to_string(),
            secondary: BTreeMap::from([("country".to_string(), "jp".to_string())]),
            description: None,
        }
    }

    #[test]
    fn missing_files_read_as_empty() {
        let store = FileRecordStore::new(temp_path("missing-store"));
        assert!(store.list(None).unwrap().is_empty());
        store.delete(&RecordId::new("rec-1")).unwrap();
        let ledger = FileLedger::new(temp_path("missing-ledger"));
        assert!(ledger.get().unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn store_round_trips_through_disk() {
        let path = temp_path("store");
        let store = FileRecordStore::new(&path);
        let first = store.create(draft("Doge")).unwrap();
        let second = store.create(draft("Harlem Shake")).unwrap();
        assert_eq!(first.as_str(), "rec-1");
        assert_eq!(second.as_str(), "rec-2");

        let reopened = FileRecordStore::new(&path);
        let listed = reopened.list(Some(1)).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].primary_label, "Harlem Shake");

        reopened.delete(&first).unwrap();
        assert_eq!(store.list(None).unwrap().len(), 1);
        assert_eq!(store.create(draft("Wow")).unwrap().as_str(), "rec-3");
    }

    #[test]
    fn malformed_store_is_an_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();
        let err = FileRecordStore::new(&path).list(None).unwrap_err();
        assert!(matches!(err, StorageError::Json { .. }));
    }

    #[test]
    fn ledger_persists_score() {
        let path = temp_path("ledger");
        let ledger = FileLedger::new(&path);
        ledger.set(12.5).unwrap();
        assert!((FileLedger::new(&path).get().unwrap() - 12.5).abs() < f64::EPSILON);
    }
}
