use crate::domain::checkout::Customer;
use crate::domain::ports::SessionStore;
use crate::error::{RelayError, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Entry {
    customer: Customer,
    expires_at: DateTime<Utc>,
}

type Entries = HashMap<String, Entry>;

/// A session store persisted as a single JSON file.
///
/// Lets separate relay processes share cached customers, e.g. `initiate` and
/// a later `verify` run from the CLI. Expiry uses wall-clock time so entries
/// survive restarts with their original deadline. Expired entries are never
/// returned and are swept on every `set`.
///
/// Clones share the same lock, but the file itself is not locked against other
/// processes writing concurrently.
#[derive(Clone)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileSessionStore {
    /// Uses the file at `path`, which is created on the first `set`.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Arc::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Entries> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Entries::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                RelayError::StoreError(format!(
                    "session file {} is corrupt: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, entries: &Entries) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(entries)?;
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, bytes).await?;
        fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<Customer>> {
        let _guard = self.lock.lock().await;
        let entries = self.load().await?;
        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > Utc::now())
            .map(|entry| entry.customer.clone()))
    }

    async fn set(&self, key: &str, customer: Customer, ttl: Duration) -> Result<()> {
        let now = Utc::now();
        let expires_at = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                RelayError::StoreError(format!("session TTL of {}s is out of range", ttl.as_secs()))
            })?;

        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(key.to_string(), Entry { customer, expires_at });
        self.save(&entries).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn customer(city: &str) -> Customer {
        Customer {
            city: Some(city.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_entries_survive_reopening() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sessions.json");

        FileSessionStore::open(&path)
            .set("5521", customer("Beirut"), Duration::from_secs(60))
            .await
            .unwrap();

        let reopened = FileSessionStore::open(&path);
        let cached = reopened.get("5521").await.unwrap().unwrap();
        assert_eq!(cached.city.as_deref(), Some("Beirut"));

        reopened.delete("5521").await.unwrap();
        assert!(FileSessionStore::open(&path).get("5521").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::open(dir.path().join("absent.json"));

        assert!(store.get("1").await.unwrap().is_none());
        store.delete("1").await.unwrap();
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_expired_entries_are_hidden_and_swept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sessions.json");
        let store = FileSessionStore::open(&path);

        store.set("stale", customer("Tyre"), Duration::ZERO).await.unwrap();
        assert!(store.get("stale").await.unwrap().is_none());

        store
            .set("fresh", customer("Sidon"), Duration::from_secs(60))
            .await
            .unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("stale"));
        assert!(raw.contains("fresh"));
    }

    #[tokio::test]
    async fn test_out_of_range_ttl_is_a_store_error() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::open(dir.path().join("sessions.json"));

        let result = store
            .set("1", customer("Zahle"), Duration::from_secs(u64::MAX))
            .await;
        assert!(matches!(result, Err(RelayError::StoreError(_))));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_store_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sessions.json");
        std::fs::write(&path, "not json").unwrap();

        let result = FileSessionStore::open(&path).get("1").await;
        assert!(matches!(result, Err(RelayError::StoreError(_))));
    }
}
