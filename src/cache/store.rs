//! Key-value cache store.
//!
//! A store holds response copies under flat string keys of the form
//! `"{cache_name}|{url}"`. Named caches are the distinct key prefixes, so
//! dropping a cache is a delete-by-prefix.

use super::error::{CacheError, SnapshotError};
use super::request::CachedResponse;
use super::snapshot::{CacheSnapshot, SnapshotFormat};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::RwLock;
use tracing::debug;

/// Separates the cache name from the URL in a store key.
pub const KEY_SEPARATOR: char = '|';

/// Store key for `url` in the cache called `cache_name`.
pub fn cache_key(cache_name: &str, url: &str) -> String {
    format!("{cache_name}{KEY_SEPARATOR}{url}")
}

/// Prefix shared by every key of `cache_name`.
pub fn cache_prefix(cache_name: &str) -> String {
    format!("{cache_name}{KEY_SEPARATOR}")
}

/// Persistent key-value store of cached responses.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<CachedResponse>, CacheError>;

    fn put(&self, key: &str, entry: CachedResponse) -> Result<(), CacheError>;

    /// Delete every key starting with `prefix`, returning how many went.
    fn delete_prefix(&self, prefix: &str) -> Result<usize, CacheError>;

    fn keys(&self) -> Result<Vec<String>, CacheError>;

    /// Names of the caches currently present in the store.
    fn cache_names(&self) -> Result<BTreeSet<String>, CacheError> {
        Ok(self
            .keys()?
            .iter()
            .filter_map(|key| key.split_once(KEY_SEPARATOR))
            .map(|(name, _)| name.to_string())
            .collect())
    }
}

/// In-memory store, persistable through snapshots.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, CachedResponse>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy the current contents into a snapshot.
    pub fn snapshot(&self) -> Result<CacheSnapshot, CacheError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(CacheSnapshot::new(entries.clone()))
    }

    /// Build a store from a snapshot, rejecting unsupported versions.
    pub fn restore(snapshot: CacheSnapshot) -> Result<Self, CacheError> {
        snapshot.check_version()?;
        Ok(Self {
            entries: RwLock::new(snapshot.entries),
        })
    }

    /// Write a snapshot of the store to `path`.
    pub fn save(&self, path: &Path, format: SnapshotFormat) -> Result<(), CacheError> {
        let snapshot = self.snapshot()?;
        let bytes = snapshot.encode(format)?;
        std::fs::write(path, bytes).map_err(SnapshotError::from)?;
        debug!(path = %path.display(), entries = snapshot.entries.len(), "cache snapshot saved");
        Ok(())
    }

    /// Load a store from a snapshot file written by [`MemoryStore::save`].
    pub fn load(path: &Path, format: SnapshotFormat) -> Result<Self, CacheError> {
        let bytes = std::fs::read(path).map_err(SnapshotError::from)?;
        let snapshot = CacheSnapshot::decode(&bytes, format)?;
        debug!(path = %path.display(), id = %snapshot.id, "cache snapshot loaded");
        Self::restore(snapshot)
    }
}

fn poisoned<T>(_: T) -> CacheError {
    CacheError::Store("cache store lock poisoned".to_string())
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<CachedResponse>, CacheError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, entry: CachedResponse) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    fn delete_prefix(&self, prefix: &str) -> Result<usize, CacheError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok(before - entries.len())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}
