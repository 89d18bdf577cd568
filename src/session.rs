//! Session-scoped key-value storage
//!
//! The latest search filter lives here between the search, results and detail
//! flows. Storage is an injected port so the flows stay functions of their
//! inputs; two adapters are provided: an in-memory map and a fjall-backed
//! store whose entries expire after the session TTL.

use async_trait::async_trait;
use dashmap::DashMap;
use fjall::Keyspace;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task;

use crate::{Result, TripFinderError};

/// Key-value port for per-session state
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Namespace a well-known key under one session
#[must_use]
pub fn session_key(session_id: &str, key: &str) -> String {
    format!("session:{session_id}:{key}")
}

/// In-memory implementation of `SessionStore`
#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    entries: Arc<DashMap<String, String>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct StoredEntry {
    value: String,
    expires_at: u64, // Unix timestamp (seconds)
}

fn session_err(context: &str, err: impl std::fmt::Display) -> TripFinderError {
    TripFinderError::session(format!("{context}: {err}"))
}

fn now_secs() -> Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| session_err("System clock before epoch", e))?
        .as_secs())
}

/// Persistent implementation of `SessionStore` with per-entry TTL
pub struct PersistentSessionStore {
    store: Keyspace,
    ttl: Duration,
}

impl PersistentSessionStore {
    /// Open (or create) the store at `path`
    pub fn open(path: impl AsRef<Path>, ttl: Duration) -> Result<Self> {
        let db = fjall::Database::builder(&path)
            .open()
            .map_err(|e| session_err("Failed to open session database", e))?;
        let store = db
            .keyspace("sessions", fjall::KeyspaceCreateOptions::default)
            .map_err(|e| session_err("Failed to open session keyspace", e))?;
        Ok(Self { store, ttl })
    }
}

#[async_trait]
impl SessionStore for PersistentSessionStore {
    /// Returns `None` for misses and expired entries; expired entries are removed.
    #[tracing::instrument(name = "session_get", level = "debug", skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes = task::spawn_blocking(move || {
            store.get(key_bytes).map(|v| v.map(|bytes| bytes.to_vec()))
        })
        .await
        .map_err(|e| session_err("Session read task failed", e))?
        .map_err(|e| session_err("Session read failed", e))?;

        let Some(bytes) = maybe_bytes else {
            tracing::debug!("Key not found");
            return Ok(None);
        };

        let entry: StoredEntry =
            postcard::from_bytes(&bytes).map_err(|e| session_err("Corrupt session entry", e))?;

        if now_secs()? < entry.expires_at {
            tracing::debug!("Key found and still fresh");
            Ok(Some(entry.value))
        } else {
            tracing::debug!("Key found but expired");
            self.remove(key).await?;
            Ok(None)
        }
    }

    #[tracing::instrument(name = "session_set", level = "debug", skip(self, value))]
    async fn set(&self, key: &str, value: String) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let expires_at = now_secs()?.saturating_add(self.ttl.as_secs());
        let bytes = postcard::to_stdvec(&StoredEntry { value, expires_at })
            .map_err(|e| session_err("Failed to encode session entry", e))?;

        task::spawn_blocking(move || store.insert(key, bytes))
            .await
            .map_err(|e| session_err("Session write task failed", e))?
            .map_err(|e| session_err("Session write failed", e))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        task::spawn_blocking(move || store.remove(key))
            .await
            .map_err(|e| session_err("Session remove task failed", e))?
            .map_err(|e| session_err("Session remove failed", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key() {
        assert_eq!(
            session_key("abc", "travelFilters"),
            "session:abc:travelFilters"
        );
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v1".to_string()).await.unwrap();
        store.set("k", "v2".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));

        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_persistent_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            PersistentSessionStore::open(dir.path().join("sessions"), Duration::from_secs(3600))
                .unwrap();

        store
            .set("session:1:travelFilters", "{\"duration\":5}".to_string())
            .await
            .unwrap();
        assert_eq!(
            store.get("session:1:travelFilters").await.unwrap().as_deref(),
            Some("{\"duration\":5}")
        );
        assert_eq!(store.get("session:2:travelFilters").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_persistent_store_expires_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            PersistentSessionStore::open(dir.path().join("sessions"), Duration::ZERO).unwrap();

        store.set("k", "v".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
