//! Key-value storage and the task repository built on top of it.
//!
//! `Storage` mirrors a browser-style local store: string keys mapped to
//! string values. `FileStorage` keeps the whole map in one JSON file and
//! writes it atomically; `MemoryStorage` backs tests. `TaskRepository`
//! owns the layout of the task collection inside the store.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::task::Task;

/// Key holding the serialized task array.
pub const TASKS_KEY: &str = "todoResult";
/// Key holding the next id to hand out.
pub const NEXT_ID_KEY: &str = "todoNextId";

/// A string-to-string store with get/set semantics.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store, used by tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store persisted as a single JSON object on disk.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the store at `path`, starting empty if the file doesn't exist.
    ///
    /// A file that is not a JSON object of strings is logged and treated as
    /// empty; it is replaced on the next write.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let items = if path.exists() {
            let mut buf = String::new();
            File::open(path)
                .and_then(|mut f| f.read_to_string(&mut buf))
                .map_err(|source| StorageError::Io { path: path.to_path_buf(), source })?;
            match serde_json::from_str(&buf) {
                Ok(items) => items,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "store file unreadable, starting fresh");
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), keys = items.len(), "opened store");
        Ok(Self { path: path.to_path_buf(), items })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io { path: self.path.clone(), source };
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        // Atomic-ish write via temp + rename.
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(&self.items)?;
        let mut f = File::create(&tmp).map_err(io_err)?;
        f.write_all(data.as_bytes()).map_err(io_err)?;
        f.flush().map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Contents of the store as seen by the board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub next_id: u64,
}

impl Snapshot {
    pub fn empty() -> Self {
        Snapshot { tasks: Vec::new(), next_id: 1 }
    }
}

/// Reads and writes the task collection under fixed keys.
pub struct TaskRepository<S: Storage> {
    storage: S,
}

impl<S: Storage> TaskRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the stored collection. `Ok(None)` when nothing was ever saved.
    ///
    /// The returned counter is always above every numeric id in the
    /// collection, whatever `todoNextId` says.
    pub fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        let Some(raw) = self.storage.get_item(TASKS_KEY)? else {
            return Ok(None);
        };
        let tasks: Vec<Task> = serde_json::from_str(&raw)
            .map_err(|source| StorageError::Decode { key: TASKS_KEY.to_string(), source })?;

        let stored_next = match self.storage.get_item(NEXT_ID_KEY)? {
            Some(v) => v.trim().parse::<u64>().unwrap_or_else(|_| {
                warn!(value = %v, "ignoring malformed id counter");
                0
            }),
            None => 0,
        };
        let above_existing = tasks
            .iter()
            .filter_map(Task::numeric_id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| StorageError::IdsExhausted { key: TASKS_KEY.to_string() })?;
        let next_id = stored_next.max(above_existing).max(tasks.len() as u64 + 1);

        Ok(Some(Snapshot { tasks, next_id }))
    }

    /// Load the stored collection, falling back to an empty one on any failure.
    pub fn load_or_default(&self) -> Snapshot {
        match self.load() {
            Ok(Some(snapshot)) => {
                info!(tasks = snapshot.tasks.len(), next_id = snapshot.next_id, "loaded tasks");
                snapshot
            }
            Ok(None) => {
                info!("no stored tasks, starting empty");
                Snapshot::empty()
            }
            Err(e) => {
                warn!(error = %e, "failed to load tasks, starting empty");
                Snapshot::empty()
            }
        }
    }

    /// Write the whole collection and the id counter.
    pub fn save(&mut self, tasks: &[Task], next_id: u64) -> Result<(), StorageError> {
        let data = serde_json::to_string(tasks)?;
        self.storage.set_item(NEXT_ID_KEY, &next_id.to_string())?;
        self.storage.set_item(TASKS_KEY, &data)?;
        debug!(tasks = tasks.len(), next_id, "saved tasks");
        Ok(())
    }
}
