//! Bounded, persisted log of past identifications

use parking_lot::Mutex;

use super::kv::ByteStore;
use crate::models::IdentificationRecord;

/// Storage key of the serialized history log
pub const HISTORY_KEY: &str = "botanix_history_v2";

/// Maximum number of records kept; the oldest are evicted first
pub const MAX_HISTORY: usize = 50;

/// Whether a mutation reached the backing store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Persisted {
    Yes,
    /// The write failed; the in-memory log still holds the change
    No,
}

/// History of identifications, newest first.
///
/// The in-memory log is loaded once when the store is opened and written back in full after
/// every mutation. Mutations hold the lock across the read-modify-write so concurrent appends
/// cannot lose each other's records.
pub struct HistoryStore {
    store: Box<dyn ByteStore>,
    records: Mutex<Vec<IdentificationRecord>>,
}

impl HistoryStore {
    /// Open the history over a byte store, loading whatever it currently holds
    pub fn open(store: impl ByteStore + 'static) -> Self {
        let records = load(&store);
        Self { store: Box::new(store), records: Mutex::new(records) }
    }

    /// Re-read the persisted log, replacing the in-memory copy
    pub fn load(&self) -> Vec<IdentificationRecord> {
        let records = load(self.store.as_ref());
        *self.records.lock() = records.clone();
        records
    }

    /// Insert a record at the head, evict beyond [`MAX_HISTORY`], and persist the result
    pub fn append(&self, record: IdentificationRecord) -> Persisted {
        let mut records = self.records.lock();
        let id = record.id.clone();

        records.insert(0, record);
        if records.len() > MAX_HISTORY {
            let evicted = records.len() - MAX_HISTORY;
            records.truncate(MAX_HISTORY);
            log::debug!("HISTORY_EVICTED count={}", evicted);
        }

        let persisted = persist(self.store.as_ref(), &records);
        log::info!("HISTORY_APPENDED id={} size={} persisted={:?}", id, records.len(), persisted);
        persisted
    }

    /// Snapshot of all records, newest first
    pub fn all(&self) -> Vec<IdentificationRecord> {
        self.records.lock().clone()
    }

    /// Look up a single record by id
    pub fn get(&self, id: &str) -> Option<IdentificationRecord> {
        self.records.lock().iter().find(|r| r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Drop every record and remove the persisted log
    pub fn clear(&self) -> Persisted {
        let mut records = self.records.lock();
        let count = records.len();
        records.clear();

        match self.store.remove(HISTORY_KEY) {
            Ok(()) => {
                log::info!("HISTORY_CLEARED count={}", count);
                Persisted::Yes
            }
            Err(e) => {
                log::error!("HISTORY_CLEAR_FAILED error={:#}", e);
                Persisted::No
            }
        }
    }
}

/// Best-effort load: any failure yields an empty log
fn load(store: &dyn ByteStore) -> Vec<IdentificationRecord> {
    let bytes = match store.get(HISTORY_KEY) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            log::debug!("HISTORY_NOT_FOUND key={}", HISTORY_KEY);
            return Vec::new();
        }
        Err(e) => {
            log::warn!("HISTORY_READ_FAILED key={} error={:#}", HISTORY_KEY, e);
            return Vec::new();
        }
    };

    let mut records: Vec<IdentificationRecord> = match serde_json::from_slice(&bytes) {
        Ok(records) => records,
        Err(e) => {
            log::warn!(
                "HISTORY_CORRUPT key={} bytes={} error={} - starting with empty history",
                HISTORY_KEY,
                bytes.len(),
                e
            );
            return Vec::new();
        }
    };

    if records.len() > MAX_HISTORY {
        log::warn!("HISTORY_OVERSIZED count={} max={} - truncating", records.len(), MAX_HISTORY);
        records.truncate(MAX_HISTORY);
    }

    log::debug!("HISTORY_LOADED count={}", records.len());
    records
}

fn persist(store: &dyn ByteStore, records: &[IdentificationRecord]) -> Persisted {
    let bytes = match serde_json::to_vec(records) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("HISTORY_SERIALIZE_FAILED error={}", e);
            return Persisted::No;
        }
    };

    match store.set(HISTORY_KEY, &bytes) {
        Ok(()) => Persisted::Yes,
        Err(e) => {
            log::error!("HISTORY_WRITE_FAILED key={} error={:#}", HISTORY_KEY, e);
            Persisted::No
        }
    }
}
