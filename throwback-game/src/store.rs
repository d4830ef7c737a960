//! Record store abstraction and an in-memory implementation.
use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use crate::record::{GuessableRecord, NewRecord, RecordId, sort_newest_first};

/// Persistence for guessable records.
/// Platform-specific implementations should provide this.
pub trait RecordStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a record and return its new identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn create(&self, record: NewRecord) -> Result<RecordId, Self::Error>;

    /// Records ordered newest first, truncated to `limit` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be read.
    fn list(&self, limit: Option<usize>) -> Result<Vec<GuessableRecord>, Self::Error>;

    /// Remove a record. Deleting an unknown id is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be updated.
    fn delete(&self, id: &RecordId) -> Result<(), Self::Error>;
}

/// Process-local store; clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Rc<RefCell<Vec<GuessableRecord>>>,
    clock: Rc<Cell<i64>>,
}

impl MemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with drafts, oldest first.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = NewRecord>) -> Self {
        let store = Self::new();
        for record in records {
            let Ok(_) = store.create(record);
        }
        store
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl RecordStore for MemoryRecordStore {
    type Error = Infallible;

    fn create(&self, record: NewRecord) -> Result<RecordId, Self::Error> {
        let tick = self.clock.get() + 1;
        self.clock.set(tick);
        let id = RecordId::new(format!("rec-{tick:04}"));
        self.records
            .borrow_mut()
            .push(record.into_record(id.clone(), tick));
        Ok(id)
    }

    fn list(&self, limit: Option<usize>) -> Result<Vec<GuessableRecord>, Self::Error> {
        let mut records = self.records.borrow().clone();
        sort_newest_first(&mut records);
        if let Some(limit) = limit {
            records.truncate(limit);
        }
        Ok(records)
    }

    fn delete(&self, id: &RecordId) -> Result<(), Self::Error> {
        self.records.borrow_mut().retain(|record| &record.id != id);
        Ok(())
    }
}
