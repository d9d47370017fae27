//! Key-value persistence seam shared by the budget and loan ledgers.

use std::{
    collections::{BTreeMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, RwLock,
    },
};

use finlit_domain::{Identifiable, SchemaCheck};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::CoreError;

/// Abstraction over device-local stores that hold one serialized value per key.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    /// Replaces the whole value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
    fn keys(&self) -> Result<Vec<String>, CoreError>;
}

/// In-process store, used by tests and as a scratch backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut entries) = store.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }

    /// Number of successful `set` calls since creation.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CoreError::Persistence("memory store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CoreError::Persistence("memory store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CoreError::Persistence("memory store lock poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CoreError::Persistence("memory store lock poisoned".into()))?;
        Ok(entries.keys().cloned().collect())
    }
}

/// Receives persistence failures that ledgers swallow to keep working in memory.
pub trait PersistenceReporter: Send + Sync {
    fn load_failed(&self, key: &str, err: &CoreError);
    fn save_failed(&self, key: &str, err: &CoreError);
    fn entry_discarded(&self, key: &str, index: usize, reason: &str);
}

/// Default reporter: forwards everything to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl PersistenceReporter for TracingReporter {
    fn load_failed(&self, key: &str, err: &CoreError) {
        warn!(key, error = %err, "failed to load persisted list; starting empty");
    }

    fn save_failed(&self, key: &str, err: &CoreError) {
        error!(key, error = %err, "failed to persist list; keeping in-memory state");
    }

    fn entry_discarded(&self, key: &str, index: usize, reason: &str) {
        warn!(key, index, reason, "discarding malformed stored entry");
    }
}

/// Store handle plus failure reporter, cloned into each ledger.
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn KeyValueStore>,
    reporter: Arc<dyn PersistenceReporter>,
}

impl Persistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_reporter(store, Arc::new(TracingReporter))
    }

    pub fn with_reporter(
        store: Arc<dyn KeyValueStore>,
        reporter: Arc<dyn PersistenceReporter>,
    ) -> Self {
        Self { store, reporter }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Reads and validates the list stored under `key`.
    ///
    /// Never fails: a missing key is an empty list, an unreadable payload is
    /// reported and treated as empty, and individual entries that fail to
    /// decode or violate their schema are reported and skipped.
    pub fn load_list<T>(&self, key: &str) -> Vec<T>
    where
        T: DeserializeOwned + SchemaCheck + Identifiable,
    {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                self.reporter.load_failed(key, &err);
                return Vec::new();
            }
        };
        let items = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                let err = CoreError::Serde("stored value is not a list".into());
                self.reporter.load_failed(key, &err);
                return Vec::new();
            }
            Err(err) => {
                self.reporter.load_failed(key, &CoreError::from(err));
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let record: T = match serde_json::from_value(item) {
                Ok(record) => record,
                Err(err) => {
                    self.reporter.entry_discarded(key, index, &err.to_string());
                    continue;
                }
            };
            if let Err(reason) = record.check() {
                self.reporter.entry_discarded(key, index, &reason);
                continue;
            }
            if !seen.insert(record.id()) {
                self.reporter
                    .entry_discarded(key, index, &format!("duplicate id {}", record.id()));
                continue;
            }
            records.push(record);
        }
        records
    }

    /// Overwrites the list stored under `key`. Failures are reported, not returned.
    pub fn save_list<T: Serialize>(&self, key: &str, items: &[T]) -> bool {
        let result = serde_json::to_string(items)
            .map_err(CoreError::from)
            .and_then(|json| self.store.set(key, &json));
        match result {
            Ok(()) => {
                debug!(key, count = items.len(), "persisted list");
                true
            }
            Err(err) => {
                self.reporter.save_failed(key, &err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_counts_writes() {
        let store = MemoryStore::new();
        assert_eq!(store.get("records").unwrap(), None);

        store.set("records", "[]").unwrap();
        store.set("loans", "[]").unwrap();
        assert_eq!(store.get("records").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.keys().unwrap(), vec!["loans", "records"]);
        assert_eq!(store.write_count(), 2);

        store.remove("records").unwrap();
        assert_eq!(store.get("records").unwrap(), None);
    }
}
