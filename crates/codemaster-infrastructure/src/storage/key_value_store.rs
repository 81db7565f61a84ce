//! String key-value stores backing the progress repository.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use codemaster_core::error::{CodemasterError, Result};

use super::atomic_json::{AtomicJsonError, AtomicJsonFile};

/// A durable map of string keys to string values.
///
/// Each `put_string` must be durable by the time it returns; there is no
/// batching or explicit flush.
pub trait KeyValueStore: Send + Sync {
    fn get_string(&self, key: &str) -> Result<Option<String>>;

    fn put_string(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| CodemasterError::internal(format!("store lock poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn put_string(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CodemasterError::internal(format!("store lock poisoned: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CodemasterError::internal(format!("store lock poisoned: {}", e)))?;
        entries.remove(key);
        Ok(())
    }
}

/// Store persisted as a single JSON object file of `key → string`.
///
/// The file is read at open and cached. Every write merges into the
/// current file contents under the file lock and replaces the file
/// atomically.
pub struct FileKeyValueStore {
    file: AtomicJsonFile<BTreeMap<String, String>>,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    /// Opens the store at `path`.
    ///
    /// A missing or empty file opens as an empty store. So does a malformed
    /// one: its contents are logged and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let file = AtomicJsonFile::new(path.into());
        let entries = match file.load() {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    "[FileKeyValueStore] Ignoring unreadable store {}: {}",
                    file.path().display(),
                    e
                );
                BTreeMap::new()
            }
        };

        tracing::debug!(
            "[FileKeyValueStore] Opened {} with {} keys",
            file.path().display(),
            entries.len()
        );

        Self {
            file,
            entries: RwLock::new(entries),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    /// Applies `f` to the latest file contents under the file lock, then
    /// refreshes the cache from what was written.
    ///
    /// Keys written by other handles since `open` are preserved. A file that
    /// no longer parses is replaced by the cached map with `f` applied.
    fn write_with<F>(&self, f: F) -> Result<()>
    where
        F: Fn(&mut BTreeMap<String, String>),
    {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CodemasterError::internal(format!("store lock poisoned: {}", e)))?;

        let saved = match self.file.update(BTreeMap::new(), |latest| {
            f(latest);
            Ok(())
        }) {
            Ok(saved) => saved,
            Err(AtomicJsonError::JsonError(e)) => {
                tracing::warn!(
                    "[FileKeyValueStore] Replacing unreadable store {}: {}",
                    self.file.path().display(),
                    e
                );
                let mut replacement = entries.clone();
                f(&mut replacement);
                self.file.save(&replacement)?;
                replacement
            }
            Err(e) => return Err(e.into()),
        };

        *entries = saved;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| CodemasterError::internal(format!("store lock poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn put_string(&self, key: &str, value: &str) -> Result<()> {
        self.write_with(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.write_with(|entries| {
            entries.remove(key);
        })
    }
}
