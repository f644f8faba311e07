//! Remembered GitHub access tokens.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;

/// A thread-safe store of per-sender GitHub tokens.
///
/// Populated by the `remember` command; consulted by every GitHub action.
/// When a persistence path is configured, the store is written back after
/// each change so remembered tokens survive a restart.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<DashMap<String, String>>,
    persistence_path: Option<String>,
}

impl TokenStore {
    /// Create an empty store.
    pub fn new(persistence_path: Option<String>) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            persistence_path,
        }
    }

    /// Load from file if it exists; a missing file yields an empty store.
    pub fn load_from_file(path: &str) -> std::io::Result<Self> {
        let store = Self::new(Some(path.to_string()));
        if Path::new(path).exists() {
            let file = File::open(path)?;
            let reader = BufReader::new(file);
            let map: HashMap<String, String> = serde_json::from_reader(reader)?;
            for (sender, token) in map {
                store.inner.insert(sender, token);
            }
            tracing::info!(count = store.inner.len(), "loaded remembered tokens");
        }
        Ok(store)
    }

    /// Save to the configured file. No-op without a persistence path.
    pub fn save_to_file(&self) -> std::io::Result<()> {
        if let Some(path) = &self.persistence_path {
            let file = File::create(path)?;
            let writer = BufWriter::new(file);
            let map: HashMap<String, String> = self
                .inner
                .iter()
                .map(|r| (r.key().clone(), r.value().clone()))
                .collect();
            serde_json::to_writer(writer, &map)?;
        }
        Ok(())
    }

    /// Store `sender`'s token, persisting if configured. A persistence
    /// failure is logged and otherwise swallowed; the in-memory token is
    /// still usable.
    pub fn remember(&self, sender: &str, token: &str) {
        self.inner.insert(sender.to_string(), token.to_string());
        if let Err(e) = self.save_to_file() {
            tracing::warn!(error = %e, "failed to persist token store");
        }
    }

    /// The token remembered for `sender`, if any.
    pub fn get(&self, sender: &str) -> Option<String> {
        self.inner.get(sender).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remember_and_get() {
        let store = TokenStore::new(None);
        assert!(store.get("alice").is_none());

        store.remember("alice", "gh-token-1");
        assert_eq!(store.get("alice").as_deref(), Some("gh-token-1"));

        store.remember("alice", "gh-token-2");
        assert_eq!(store.get("alice").as_deref(), Some("gh-token-2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let path = path.to_str().unwrap();

        let store = TokenStore::new(Some(path.to_string()));
        store.remember("bob", "gh-token");

        let loaded = TokenStore::load_from_file(path).unwrap();
        assert_eq!(loaded.get("bob").as_deref(), Some("gh-token"));
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let loaded = TokenStore::load_from_file(path.to_str().unwrap()).unwrap();
        assert!(loaded.is_empty());
    }
}
