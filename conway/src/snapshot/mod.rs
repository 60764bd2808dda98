// snapshot/mod.rs - Saving and restoring boards through a a `SnapshotStore`

mod codec;
mod file_store;
mod store;

use std::sync::atomic::{AtomicBool, Ordering};

pub use codec::{decode, encode};
pub use file_store::FileStore;
pub use store::{MemoryStore, SnapshotFields, SnapshotStore, StoredRecord};

use crate::error::{LifeError, LifeResult};
use crate::grid::Grid;

/// Front door to the snapshot store for one session. Constructed with
/// [`SnapshotGateway::open`] and shut with [`SnapshotGateway::close`]; calls
/// made after closing fail with a transport error.
#[derive(Debug)]
pub struct SnapshotGateway<S> {
    store: S,
    closed: AtomicBool,
}

impl<S: SnapshotStore> SnapshotGateway<S> {
    pub fn open(store: S) -> Self {
        tracing::info!(store = store.name(), "snapshot gateway opened");
        Self {
            store,
            closed: AtomicBool::new(false),
        }
    }

    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            tracing::info!(store = self.store.name(), "snapshot gateway closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn ensure_open(&self) -> LifeResult<()> {
        if self.is_closed() {
            Err(LifeError::transport("snapshot gateway is closed"))
        } else {
            Ok(())
        }
    }

    /// Ids of every stored snapshot, in store order.
    pub async fn list_saves(&self) -> LifeResult<Vec<String>> {
        self.ensure_open()?;
        let records = self.store.list_all().await?;
        tracing::debug!(count = records.len(), "listed snapshots");
        Ok(records.into_iter().map(|r| r.id).collect())
    }

    /// Store `grid` as a new snapshot and return its id.
    pub async fn save(&self, grid: &Grid) -> LifeResult<String> {
        self.ensure_open()?;
        let fields = SnapshotFields { state: encode(grid) };
        let id = self.store.insert(fields).await?;
        tracing::info!(%id, alive = grid.alive_count(), "saved snapshot");
        Ok(id)
    }

    /// Fetch and decode the snapshot `id`.
    pub async fn load(&self, id: &str) -> LifeResult<Grid> {
        self.ensure_open()?;
        let fields = self.store.get_by_id(id).await?;
        let grid = decode(&fields.state)?;
        tracing::info!(%id, alive = grid.alive_count(), "loaded snapshot");
        Ok(grid)
    }
}

/// One entry of the save list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveEntry {
    pub id: String,
    pub label: String,
}

/// Saves known to the session, oldest first. Labels come from list position
/// (`State 1`, `State 2`, ...) rather than from anything in the record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveList {
    entries: Vec<SaveEntry>,
}

impl SaveList {
    pub fn from_ids(ids: impl IntoIterator<Item = String>) -> Self {
        let mut list = Self::default();
        for id in ids {
            list.push(id);
        }
        list
    }

    /// Replace the entries with a fresh listing from the store. Ids saved
    /// locally that the listing does not contain yet (it was read before the
    /// insert landed) are kept at the end.
    pub fn merge_listing(&mut self, ids: impl IntoIterator<Item = String>) {
        let mut merged = Self::from_ids(ids);
        for entry in &self.entries {
            if !merged.contains(&entry.id) {
                merged.push(entry.id.clone());
            }
        }
        *self = merged;
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Append a newly saved id.
    pub fn push(&mut self, id: String) -> &SaveEntry {
        let label = format!("State {}", self.entries.len() + 1);
        self.entries.push(SaveEntry { id, label });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[SaveEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&SaveEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;

    #[test]
    fn labels_follow_position() {
        let mut list = SaveList::from_ids(["b7".to_string(), "a1".to_string()]);
        let added = list.push("zz".to_string()).clone();
        let labels: Vec<_> = list.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["State 1", "State 2", "State 3"]);
        assert_eq!(added, SaveEntry { id: "zz".into(), label: "State 3".into() });
    }

    #[test]
    fn stale_listing_keeps_local_saves() {
        let mut list = SaveList::default();
        list.push("3".to_string());
        list.merge_listing(["1".to_string(), "2".to_string()]);
        let ids: Vec<_> = list.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(list.get(2).unwrap().label, "State 3");

        list.merge_listing(["1".to_string(), "2".to_string(), "3".to_string()]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.position("3"), Some(2));
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let gateway = SnapshotGateway::open(MemoryStore::new());
        let grid = Grid::with_alive(6, 4, [Position::new(5, 3), Position::new(0, 1)]);
        let id = gateway.save(&grid).await.unwrap();
        assert_eq!(gateway.load(&id).await.unwrap(), grid);
        assert_eq!(gateway.list_saves().await.unwrap(), vec![id]);
    }

    #[tokio::test]
    async fn load_unknown_id_is_not_found() {
        let gateway = SnapshotGateway::open(MemoryStore::new());
        assert_eq!(
            gateway.load("missing").await,
            Err(LifeError::NotFound("missing".into()))
        );
    }

    #[tokio::test]
    async fn malformed_record_is_a_transport_error() {
        let store = MemoryStore::with_records(vec![StoredRecord {
            id: "1".into(),
            fields: SnapshotFields { state: vec!["012".into()] },
        }]);
        let gateway = SnapshotGateway::open(store);
        assert!(matches!(gateway.load("1").await, Err(LifeError::Transport(_))));
    }

    #[tokio::test]
    async fn closed_gateway_refuses_calls() {
        let gateway = SnapshotGateway::open(MemoryStore::new());
        gateway.close();
        assert!(gateway.is_closed());
        assert!(matches!(gateway.save(&Grid::new(2, 2)).await, Err(LifeError::Transport(_))));
        assert!(gateway.store().is_empty());
    }
}
