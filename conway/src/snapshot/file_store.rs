// file_store.rs - JSON file backend for snapshots.
//
// File format:
//
// ```json
// {
//   "format_version": 1,
//   "next_id": 2,
//   "records": [
//     { "id": "1", "fields": { "state": ["010", "010", "010"] } },
//     { "id": "2", "fields": { "state": ["000", "111", "000"] } }
//   ]
// }
// ```
//
// Writes go to `{path}.tmp` first and are renamed over the real file, so a
// crash mid-write leaves the previous contents intact.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::store::{SnapshotFields, SnapshotStore, StoredRecord};
use crate::error::{LifeError, LifeResult};

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    format_version: u32,
    next_id: u64,
    records: Vec<StoredRecord>,
}

impl StoreFile {
    const FORMAT_VERSION: u32 = 1;

    fn new() -> Self {
        Self {
            format_version: Self::FORMAT_VERSION,
            next_id: 0,
            records: Vec::new(),
        }
    }
}

/// Snapshot store persisted to a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Store at `path`. The file does not need to exist; its parent
    /// directory is created here.
    pub async fn open(path: impl AsRef<Path>) -> LifeResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tracing::info!(path = %path.display(), "opened snapshot file store");
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");
        tmp
    }

    async fn read(&self) -> LifeResult<StoreFile> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(StoreFile::new()),
            Err(err) => return Err(err.into()),
        };
        let file: StoreFile = serde_json::from_str(&text)?;
        if file.format_version != StoreFile::FORMAT_VERSION {
            return Err(LifeError::transport(format!(
                "unsupported store format version {}",
                file.format_version
            )));
        }
        Ok(file)
    }

    async fn write(&self, file: &StoreFile) -> LifeResult<()> {
        let json = serde_json::to_vec_pretty(file)?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        tracing::debug!(path = %self.path.display(), records = file.records.len(), "wrote snapshot store");
        Ok(())
    }
}

impl SnapshotStore for FileStore {
    fn name(&self) -> &str {
        "FileStore"
    }

    async fn list_all(&self) -> LifeResult<Vec<StoredRecord>> {
        Ok(self.read().await?.records)
    }

    async fn insert(&self, fields: SnapshotFields) -> LifeResult<String> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.read().await?;
        file.next_id += 1;
        let id = file.next_id.to_string();
        file.records.push(StoredRecord { id: id.clone(), fields });
        self.write(&file).await?;
        Ok(id)
    }

    async fn get_by_id(&self, id: &str) -> LifeResult<SnapshotFields> {
        self.read()
            .await?
            .records
            .into_iter()
            .find(|r| r.id == id)
            .map(|r| r.fields)
            .ok_or_else(|| LifeError::NotFound(id.to_string()))
    }
}
