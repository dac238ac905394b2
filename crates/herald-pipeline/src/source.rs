//! Where message records come from.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use herald_core::{MessageRecord, RecordKey};

/// Lookup of message records by key.
///
/// Hosts implement this over their own message files; records are shared
/// read-only between compositions.
pub trait RecordSource: Send + Sync {
    /// Record registered under `key`, if any.
    fn record(&self, key: &RecordKey) -> Option<Arc<MessageRecord>>;
}

/// In-memory record source.
///
/// # Example
///
/// ```
/// use herald_core::{MessageRecord, RecordKey};
/// use herald_pipeline::{MemoryRecordSource, RecordSource};
///
/// let key = RecordKey::new("WELCOME").unwrap();
/// let source = MemoryRecordSource::new()
///     .with_record(MessageRecord::new(key.clone()).with_message("Welcome, %PLAYER%!"));
///
/// assert_eq!(source.record(&key).unwrap().message, "Welcome, %PLAYER%!");
/// ```
#[derive(Debug, Default)]
pub struct MemoryRecordSource {
    records: RwLock<HashMap<RecordKey, Arc<MessageRecord>>>,
}

impl MemoryRecordSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, keyed by its own key.
    #[must_use]
    pub fn with_record(self, record: MessageRecord) -> Self {
        self.insert(record);
        self
    }

    /// Add or replace a record. Returns the record it replaced.
    pub fn insert(&self, record: MessageRecord) -> Option<Arc<MessageRecord>> {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(record.key.clone(), Arc::new(record))
    }

    pub fn remove(&self, key: &RecordKey) -> Option<Arc<MessageRecord>> {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordSource for MemoryRecordSource {
    fn record(&self, key: &RecordKey) -> Option<Arc<MessageRecord>> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}
