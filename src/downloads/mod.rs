//! Download counter
//!
//! Advisory per-asset download tallies. The in-memory map is authoritative for
//! the life of the process; persistence is best-effort and its failures are
//! only logged.

mod persist;

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::logger;

pub use persist::{CounterPersistence, Counts, FilePersistence, NoopPersistence};

pub struct DownloadStore {
    counts: Mutex<HashMap<String, u64>>,
    persistence: Box<dyn CounterPersistence>,
}

impl DownloadStore {
    /// Empty store; nothing is loaded
    pub fn new(persistence: Box<dyn CounterPersistence>) -> Self {
        Self {
            counts: Mutex::new(HashMap::new()),
            persistence,
        }
    }

    /// Store seeded from persistence, starting empty if loading fails
    pub async fn open(persistence: Box<dyn CounterPersistence>) -> Self {
        let loaded = match persistence.load().await {
            Ok(counts) => {
                logger::log_info(&format!(
                    "[Downloads] Loaded {} counters from {}",
                    counts.len(),
                    persistence.describe()
                ));
                counts
            }
            Err(e) => {
                logger::log_warning(&format!("[Downloads] Starting with empty counters: {e}"));
                Counts::new()
            }
        };

        let store = Self::new(persistence);
        store.lock().extend(loaded);
        store
    }

    /// Current count, 0 for unseen ids
    pub fn get(&self, asset_id: &str) -> u64 {
        self.lock().get(asset_id).copied().unwrap_or(0)
    }

    /// Bump a counter and try to flush; returns the new count
    pub async fn increment(&self, asset_id: &str) -> u64 {
        let (count, snapshot) = {
            let mut counts = self.lock();
            let entry = counts.entry(asset_id.to_string()).or_insert(0);
            *entry = entry.saturating_add(1);
            let count = *entry;
            (count, counts.iter().map(|(k, v)| (k.clone(), *v)).collect::<Counts>())
        };

        if let Err(e) = self.persistence.flush(&snapshot).await {
            logger::log_warning(&format!("[Downloads] Flush skipped: {e}"));
        }
        count
    }

    /// All counters, ordered by id
    pub fn snapshot(&self) -> Counts {
        self.lock()
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, u64>> {
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
