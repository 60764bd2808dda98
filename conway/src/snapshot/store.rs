// store.rs - Snapshot store abstraction and the in-memory backend.

use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{LifeError, LifeResult};

/// Fields of one stored snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotFields {
    /// Row strings, top row first
    pub state: Vec<String>,
}

/// A snapshot together with the id the store assigned to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    pub fields: SnapshotFields,
}

/// Keyed record collection holding snapshots.
///
/// Implementations must be shareable across tasks; every call may be slow
/// or fail, so all of them are async.
pub trait SnapshotStore: Send + Sync + 'static {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Every record, in the store's natural order.
    fn list_all(&self) -> impl Future<Output = LifeResult<Vec<StoredRecord>>> + Send;

    /// Store a new record and return its id.
    fn insert(&self, fields: SnapshotFields) -> impl Future<Output = LifeResult<String>> + Send;

    /// Fetch one record; `NotFound` if the id is unknown.
    fn get_by_id(&self, id: &str) -> impl Future<Output = LifeResult<SnapshotFields>> + Send;
}

/// In-process store. Records keep insertion order and get sequential ids.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
    unavailable: AtomicBool,
}

#[derive(Debug, Default)]
struct MemoryInner {
    next_id: u64,
    records: Vec<StoredRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store; ids continue after the highest numeric id given.
    pub fn with_records(records: Vec<StoredRecord>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| r.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            inner: Mutex::new(MemoryInner { next_id, records }),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every following call fail as if the store were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.lock().map(|inner| inner.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> LifeResult<std::sync::MutexGuard<'_, MemoryInner>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LifeError::transport("memory store is unavailable"));
        }
        self.inner
            .lock()
            .map_err(|_| LifeError::transport("memory store lock poisoned"))
    }
}

impl SnapshotStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    async fn list_all(&self) -> LifeResult<Vec<StoredRecord>> {
        Ok(self.lock()?.records.clone())
    }

    async fn insert(&self, fields: SnapshotFields) -> LifeResult<String> {
        let mut inner = self.lock()?;
        inner.next_id += 1;
        let id = inner.next_id.to_string();
        inner.records.push(StoredRecord { id: id.clone(), fields });
        Ok(id)
    }

    async fn get_by_id(&self, id: &str) -> LifeResult<SnapshotFields> {
        self.lock()?
            .records
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.fields.clone())
            .ok_or_else(|| LifeError::NotFound(id.to_string()))
    }
}
