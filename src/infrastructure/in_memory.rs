use crate::domain::checkout::Customer;
use crate::domain::ports::SessionStore;
use crate::error::{RelayError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Clone)]
struct Entry {
    customer: Customer,
    expires_at: Instant,
}

/// A thread-safe in-memory session store with per-entry expiry.
///
/// Uses `Arc<RwLock<HashMap<String, Entry>>>` so clones share the same entries.
/// Expired entries are never returned. They are dropped on access, on every
/// `set`, or by [`InMemorySessionStore::purge_expired`].
#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl InMemorySessionStore {
    /// Creates a new, empty in-memory session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every expired entry and returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<Customer>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Ok(Some(entry.customer.clone()));
                }
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        if entries
            .get(key)
            .is_some_and(|entry| entry.expires_at <= Instant::now())
        {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, customer: Customer, ttl: Duration) -> Result<()> {
        let now = Instant::now();
        let expires_at = now.checked_add(ttl).ok_or_else(|| {
            RelayError::StoreError(format!("session TTL of {}s is out of range", ttl.as_secs()))
        })?;

        let mut entries = self.entries.write().await;
        // Abandoned checkouts are never read again, so sweep them here.
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(key.to_string(), Entry { customer, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}
