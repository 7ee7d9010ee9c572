//! Persistent key/byte stores and the task collection codec on top of them.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use sled::Db;
use tracing::debug;

use crate::error::{PlannerError, Result, StoreError};
use crate::Task;

/// Key the task collection is stored under.
pub const TASKS_KEY: &str = "tasks";

/// A synchronous string-keyed byte store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

pub struct SledStore {
    db: Db,
}

impl SledStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.db.get(key.as_bytes())?.map(|bytes| bytes.to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.db.insert(key.as_bytes(), value)?;
        self.db.flush()?;
        Ok(())
    }
}

/// In-process store; contents are lost when dropped.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.entries.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// Encoding of the task array inside the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreFormat {
    #[default]
    Json,
    Bincode,
}

impl FromStr for StoreFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "bincode" => Ok(Self::Bincode),
            other => Err(format!("unknown store format '{other}', expected json or bincode")),
        }
    }
}

/// Reads and writes the whole task collection under a single key.
#[derive(Clone)]
pub struct TaskStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    format: StoreFormat,
}

impl TaskStore {
    pub fn new(store: Arc<dyn KeyValueStore>, format: StoreFormat) -> Self {
        Self {
            store,
            key: TASKS_KEY.to_string(),
            format,
        }
    }

    /// Loads the collection; an absent key is an empty collection.
    pub fn load(&self) -> Result<Vec<Task>> {
        let Some(bytes) = self
            .store
            .get(&self.key)
            .map_err(|e| PlannerError::store(&self.key, e))?
        else {
            debug!(key = %self.key, "no stored tasks, starting empty");
            return Ok(Vec::new());
        };

        let tasks: Vec<Task> = match self.format {
            StoreFormat::Json => serde_json::from_slice(&bytes).map_err(|e| self.decode_error(e))?,
            StoreFormat::Bincode => {
                let config = bincode::config::standard();
                let (tasks, _) = bincode::serde::decode_from_slice(&bytes, config)
                    .map_err(|e| self.decode_error(e))?;
                tasks
            }
        };
        debug!(key = %self.key, count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let bytes = match self.format {
            StoreFormat::Json => serde_json::to_vec(tasks).map_err(|e| self.encode_error(e))?,
            StoreFormat::Bincode => {
                let config = bincode::config::standard();
                bincode::serde::encode_to_vec(tasks, config).map_err(|e| self.encode_error(e))?
            }
        };
        self.store
            .set(&self.key, &bytes)
            .map_err(|e| PlannerError::store(&self.key, e))
    }

    fn encode_error(&self, err: impl std::fmt::Display) -> PlannerError {
        PlannerError::Encode {
            key: self.key.clone(),
            reason: err.to_string(),
        }
    }

    fn decode_error(&self, err: impl std::fmt::Display) -> PlannerError {
        PlannerError::Decode {
            key: self.key.clone(),
            reason: err.to_string(),
        }
    }
}
