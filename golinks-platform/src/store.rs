//! Settings store contract and backends
//!
//! Models the host's synced key-value storage: asynchronous `get`/`set`
//! plus a change-notification feed delivering `{key, old, new}` events to
//! subscribers whenever a writer updates the store.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use golinks_core::{GoLinksError, Result, SYNC_NAMESPACE};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, error};

/// Capacity of the change-notification channel. Events are tiny and
/// consumers reconcile from current state, so lagging receivers lose
/// nothing they cannot recover.
const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// A change notification emitted after a store write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsChange {
    /// Storage namespace the write landed in (always `sync` here).
    pub namespace: String,
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// Trait for the durable, synced settings store.
///
/// This is the injectable seam between handler logic and the host
/// platform: tests use [`MemoryStore`], the CLI uses [`FileStore`].
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read a value. Returns `None` when the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value and notify subscribers.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Subscribe to change notifications for all subsequent writes.
    fn subscribe(&self) -> broadcast::Receiver<SettingsChange>;
}

/// In-memory settings store, the test double for the synced store.
pub struct MemoryStore {
    values: RwLock<BTreeMap<String, String>>,
    changes: broadcast::Sender<SettingsChange>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            values: RwLock::new(BTreeMap::new()),
            changes,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let old_value = {
            let mut values = self.values.write().await;
            values.insert(key.to_string(), value.to_string())
        };

        debug!(key, value, "settings store updated");

        // A send error only means no subscriber is currently listening.
        let _ = self.changes.send(SettingsChange {
            namespace: SYNC_NAMESPACE.to_string(),
            key: key.to_string(),
            old_value,
            new_value: Some(value.to_string()),
        });

        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SettingsChange> {
        self.changes.subscribe()
    }
}

/// File-backed settings store.
///
/// Persists the key-value map as a TOML document so Configuration
/// survives restarts. Change notifications have the same semantics as
/// [`MemoryStore`]; they are delivered to in-process subscribers only.
pub struct FileStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
    changes: broadcast::Sender<SettingsChange>,
    fresh: bool,
}

impl FileStore {
    /// Load the store from `path`, creating an empty one when the file
    /// does not exist yet.
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let (values, fresh) = match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let values: BTreeMap<String, String> = toml::from_str(&content)?;
                debug!(path = %path.display(), entries = values.len(), "settings file loaded");
                (values, false)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file yet, starting empty");
                (BTreeMap::new(), true)
            }
            Err(e) => {
                error!(path = %path.display(), "failed to read settings file: {}", e);
                return Err(e.into());
            }
        };

        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Ok(Self {
            path,
            values: RwLock::new(values),
            changes,
            fresh,
        })
    }

    /// Whether the settings file did not exist at load time, i.e. this
    /// is the first run on this profile.
    pub fn is_fresh_install(&self) -> bool {
        self.fresh
    }

    /// Path of the backing file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    async fn persist(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = toml::to_string_pretty(values)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let old_value = {
            let mut values = self.values.write().await;
            let old = values.insert(key.to_string(), value.to_string());
            // Persist while holding the lock so the file matches the map.
            self.persist(&values)
                .await
                .map_err(|e| GoLinksError::Storage(format!("failed to persist settings: {}", e)))?;
            old
        };

        debug!(key, value, path = %self.path.display(), "settings file updated");

        let _ = self.changes.send(SettingsChange {
            namespace: SYNC_NAMESPACE.to_string(),
            key: key.to_string(),
            old_value,
            new_value: Some(value.to_string()),
        });

        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SettingsChange> {
        self.changes.subscribe()
    }
}
