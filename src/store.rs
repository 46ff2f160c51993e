use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::BlobStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("persistent storage unavailable")]
    Unavailable,
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("schedule serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One scheduled day. `date` is the unique key of the collection; `slots`
/// holds one entry per roster position, empty string meaning unassigned.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AssignmentRecord {
    pub date: NaiveDate,
    pub service: String,
    pub coordinator: String,
    pub slots: Vec<String>,
}

/// Authoritative collection of committed assignments, mirrored to the
/// backend blob after every mutation.
pub struct ScheduleStore {
    records: Vec<AssignmentRecord>,
    backend: Box<dyn BlobStore>,
}

impl ScheduleStore {
    /// Reads the persisted blob once. A missing or unreadable blob means an
    /// empty schedule; no error reaches the user.
    pub fn load(backend: Box<dyn BlobStore>) -> Self {
        let records = match backend.read() {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(records) => records,
                Err(err) => {
                    tracing::debug!(%err, "stored schedule unreadable, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        Self { records, backend }
    }

    pub fn records(&self) -> &[AssignmentRecord] {
        &self.records
    }

    pub fn find(&self, date: NaiveDate) -> Option<&AssignmentRecord> {
        self.records.iter().find(|record| record.date == date)
    }

    /// Replaces the record with the same date wholesale, or appends.
    pub fn upsert(&mut self, record: AssignmentRecord) -> Result<(), StoreError> {
        match self.records.iter_mut().find(|r| r.date == record.date) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
        self.persist()
    }

    /// No-op when no record matches `date`.
    pub fn remove(&mut self, date: NaiveDate) -> Result<(), StoreError> {
        self.records.retain(|record| record.date != date);
        self.persist()
    }

    // Whole-collection write-through. A failed write gets one retry; the
    // second failure is the caller's to surface.
    fn persist(&self) -> Result<(), StoreError> {
        let blob = serde_json::to_string(&self.records)?;
        if let Err(err) = self.backend.write(&blob) {
            tracing::warn!(%err, "schedule write failed, retrying once");
            self.backend.write(&blob)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use std::cell::Cell;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn record(d: &str, service: &str, slots: &[&str]) -> AssignmentRecord {
        AssignmentRecord {
            date: date(d),
            service: service.into(),
            coordinator: "Carlos Larez".into(),
            slots: slots.iter().map(|s| s.to_string()).collect(),
        }
    }

    struct FlakyStore {
        inner: MemoryStore,
        failures_left: Cell<u32>,
    }

    impl BlobStore for FlakyStore {
        fn read(&self) -> Option<String> {
            self.inner.read()
        }
        fn write(&self, blob: &str) -> Result<(), StoreError> {
            if self.failures_left.get() > 0 {
                self.failures_left.set(self.failures_left.get() - 1);
                return Err(StoreError::Write("quota exceeded".into()));
            }
            self.inner.write(blob)
        }
    }

    #[test]
    fn empty_backend_loads_empty_schedule() {
        let store = ScheduleStore::load(Box::new(MemoryStore::new()));
        assert!(store.records().is_empty());
    }

    #[test]
    fn corrupt_blob_falls_back_to_empty_schedule() {
        let backend = MemoryStore::new();
        backend.write("{definitely not an array").unwrap();
        let mut store = ScheduleStore::load(Box::new(backend.clone()));
        assert!(store.records().is_empty());

        // the next mutation replaces the corrupt blob with a clean one
        store.upsert(record("2024-06-05", "Miércoles", &["", ""])).unwrap();
        let reloaded = ScheduleStore::load(Box::new(backend));
        assert_eq!(reloaded.records().len(), 1);
    }

    #[test]
    fn upsert_appends_then_replaces_by_date() {
        let mut store = ScheduleStore::load(Box::new(MemoryStore::new()));
        store.upsert(record("2024-06-02", "Domingo", &["Omar Acosta", "", "", ""])).unwrap();
        store.upsert(record("2024-06-05", "Miércoles", &["", ""])).unwrap();
        assert_eq!(store.records().len(), 2);

        // idempotent under identical input, second commit's values win
        let replacement = record("2024-06-02", "Domingo", &["Cesar Silvera", "", "", ""]);
        store.upsert(replacement.clone()).unwrap();
        store.upsert(replacement.clone()).unwrap();
        assert_eq!(store.records().len(), 2);
        assert_eq!(store.find(date("2024-06-02")), Some(&replacement));
    }

    #[test]
    fn remove_missing_date_is_a_noop() {
        let backend = MemoryStore::new();
        let mut store = ScheduleStore::load(Box::new(backend.clone()));
        store.upsert(record("2024-06-05", "Miércoles", &["", ""])).unwrap();
        store.remove(date("2024-06-12")).unwrap();
        assert_eq!(store.records().len(), 1);

        // the mirrored blob stays intact
        let reloaded = ScheduleStore::load(Box::new(backend));
        assert_eq!(reloaded.records().len(), 1);
    }

    #[test]
    fn every_mutation_is_mirrored_to_the_backend() {
        let backend = MemoryStore::new();
        let mut store = ScheduleStore::load(Box::new(backend.clone()));
        let rec = record("2024-06-05", "Miércoles", &["Omar Acosta", "Jesús Pimentel"]);
        store.upsert(rec.clone()).unwrap();

        let reloaded = ScheduleStore::load(Box::new(backend.clone()));
        assert_eq!(reloaded.records(), &[rec]);

        store.remove(date("2024-06-05")).unwrap();
        let reloaded = ScheduleStore::load(Box::new(backend));
        assert!(reloaded.records().is_empty());
    }

    #[test]
    fn single_write_failure_is_retried() {
        let inner = MemoryStore::new();
        let backend = FlakyStore { inner: inner.clone(), failures_left: Cell::new(1) };
        let mut store = ScheduleStore::load(Box::new(backend));
        store.upsert(record("2024-06-05", "Miércoles", &["", ""])).unwrap();

        let reloaded = ScheduleStore::load(Box::new(inner));
        assert_eq!(reloaded.records().len(), 1);
    }

    #[test]
    fn blob_keeps_the_legacy_field_names() {
        let backend = MemoryStore::new();
        let mut store = ScheduleStore::load(Box::new(backend.clone()));
        store.upsert(record("2024-06-05", "Miércoles", &["Omar Acosta", ""])).unwrap();

        let blob: serde_json::Value = serde_json::from_str(&backend.read().unwrap()).unwrap();
        let entry = &blob.as_array().unwrap()[0];
        assert_eq!(entry["date"], "2024-06-05");
        assert_eq!(entry["service"], "Miércoles");
        assert_eq!(entry["coordinator"], "Carlos Larez");
        assert_eq!(entry["slots"], serde_json::json!(["Omar Acosta", ""]));
    }

    #[test]
    fn persistent_write_failure_is_surfaced() {
        let backend = FlakyStore { inner: MemoryStore::new(), failures_left: Cell::new(10) };
        let mut store = ScheduleStore::load(Box::new(backend));
        let result = store.upsert(record("2024-06-05", "Miércoles", &["", ""]));
        assert!(matches!(result, Err(StoreError::Write(_))));
    }
}
