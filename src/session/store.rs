use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub const SESSION_NAMESPACE: &str = "assistant_flows:sessions";
pub const ACTIVE_POINTER_NAMESPACE: &str = "assistant_flows:active";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session store backend failure for `{namespace}:{key}`: {reason}")]
    Backend {
        namespace: String,
        key: String,
        reason: String,
    },
    #[error("session store lock poisoned")]
    LockPoisoned,
}

/// Key/value store with per-key TTL and logical namespacing. All operations
/// are idempotent; an expired key reads as absent; every `set` resets the TTL.
pub trait SessionStore: Send + Sync {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>, StoreError>;
    fn set(
        &self,
        namespace: &str,
        key: &str,
        value: Value,
        ttl_seconds: u64,
    ) -> Result<(), StoreError>;
    fn delete(&self, namespace: &str, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug)]
struct StoreEntry {
    value: Value,
    expires_at: Instant,
}

// A TTL beyond what Instant can represent saturates to roughly 136 years.
fn expiry_deadline(ttl_seconds: u64) -> Instant {
    let now = Instant::now();
    now.checked_add(Duration::from_secs(ttl_seconds))
        .unwrap_or_else(|| now + Duration::from_secs(u64::from(u32::MAX)))
}

/// Expired entries are evicted lazily on read. A TTL of zero means already
/// expired, which tests use in place of sleeping.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<(String, String), StoreEntry>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        let map_key = (namespace.to_string(), key.to_string());
        match entries.get(&map_key) {
            Some(entry) if Instant::now() < entry.expires_at => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(&map_key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn set(
        &self,
        namespace: &str,
        key: &str,
        value: Value,
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        entries.insert(
            (namespace.to_string(), key.to_string()),
            StoreEntry {
                value,
                expires_at: expiry_deadline(ttl_seconds),
            },
        );
        Ok(())
    }

    fn delete(&self, namespace: &str, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        entries.remove(&(namespace.to_string(), key.to_string()));
        Ok(())
    }
}
