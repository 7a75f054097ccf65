// persistence.rs — Key-value blob storage for goal tracker state.
//
// State lives under two keys:
//   "goals"    → JSON array of goal records
//   "playTime" → balance as decimal text
//
// The store reads both keys once at startup and writes both after every
// applied mutation. Adapters only move strings; encoding and the fallback
// rules for malformed data live in `PersistedState`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::GoalError;
use crate::goal::Goal;

/// Key holding the serialized goal list.
pub const GOALS_KEY: &str = "goals";

/// Key holding the serialized balance.
pub const BALANCE_KEY: &str = "playTime";

/// A key-value blob store the goal store loads from and saves to.
pub trait PersistenceAdapter {
    /// Read a value. `Ok(None)` means the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, GoalError>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), GoalError>;
}

/// In-process adapter. Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryAdapter {
    values: HashMap<String, String>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, as if a previous session had written it.
    pub fn with_value(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }
}

impl PersistenceAdapter for MemoryAdapter {
    fn get(&self, key: &str) -> Result<Option<String>, GoalError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GoalError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed adapter: each key is stored as `<data_dir>/<key>`.
///
/// The directory is created on first write, so pointing the adapter at a
/// fresh location behaves like empty storage.
#[derive(Debug, Clone)]
pub struct FileAdapter {
    data_dir: PathBuf,
}

impl FileAdapter {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    fn key_file(&self, key: &str) -> PathBuf {
        self.data_dir.join(key)
    }
}

impl PersistenceAdapter for FileAdapter {
    fn get(&self, key: &str) -> Result<Option<String>, GoalError> {
        let path = self.key_file(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GoalError> {
        fs::create_dir_all(&self.data_dir).map_err(|source| GoalError::IoError {
            path: self.data_dir.display().to_string(),
            source,
        })?;
        let path = self.key_file(key);
        fs::write(&path, value).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(())
    }
}

/// The `(goals, balance)` pair as it is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub goals: Vec<Goal>,
    pub balance: u64,
}

impl PersistedState {
    /// Read both keys from the adapter.
    ///
    /// Each key falls back to its default independently: a missing,
    /// unreadable or malformed goal list becomes `[]`, and anything other
    /// than a non-negative decimal integer under the balance key becomes 0.
    pub fn load(adapter: &impl PersistenceAdapter) -> Self {
        let goals = read_key(adapter, GOALS_KEY)
            .and_then(|raw| match serde_json::from_str::<Vec<Goal>>(&raw) {
                Ok(goals) => Some(goals),
                Err(e) => {
                    tracing::warn!("ignoring malformed persisted goals: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        let balance = read_key(adapter, BALANCE_KEY)
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(balance) => Some(balance),
                Err(e) => {
                    tracing::warn!("ignoring malformed persisted balance {:?}: {}", raw, e);
                    None
                }
            })
            .unwrap_or(0);

        Self { goals, balance }
    }

}

/// Write both keys. Stops at the first failing write.
pub(crate) fn write_state(
    adapter: &mut impl PersistenceAdapter,
    goals: &[Goal],
    balance: u64,
) -> Result<(), GoalError> {
    let goals = serde_json::to_string(goals)?;
    adapter.set(GOALS_KEY, &goals)?;
    adapter.set(BALANCE_KEY, &balance.to_string())?;
    Ok(())
}

fn read_key(adapter: &impl PersistenceAdapter, key: &str) -> Option<String> {
    match adapter.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("failed to read persisted key {}: {}", key, e);
            None
        }
    }
}
