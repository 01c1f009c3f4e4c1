//! Keyed persistent storage used to hand the PKCE verifier from the
//! authorization step over to the token exchange.
//!
//! The verifier is written once before the user is sent to the authorization
//! server and read once when the callback arrives. [`FileStore`] keeps it on
//! disk so the handoff survives a restart of the process; [`MemoryStore`]
//! keeps it in memory for tests and embedding.

use std::{collections::HashMap, future::Future, io::ErrorKind, path::PathBuf, sync::Arc};

use tokio::sync::Mutex;

use crate::error::Result;

/// Key under which the PKCE verifier is stored.
pub const VERIFIER_KEY: &str = "verifier";

/// String-keyed storage shared between the authorization step and the
/// callback handler.
///
/// Implementations must be safe to use from several tasks at once: the
/// callback server may run two handlers concurrently when the browser
/// reloads the redirect.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read or decoded.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Arguments
    ///
    /// * `key` - Entry name, e.g. [`VERIFIER_KEY`]
    /// * `value` - New content of the entry
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;

    /// Removing a key that does not exist is not an error.
    fn delete(&self, key: &str) -> impl Future<Output = Result<()>> + Send;

    /// Reads and removes the value under `key` in one step.
    ///
    /// Two concurrent callers never both receive the same value: one gets
    /// `Some`, the other `None`.
    ///
    /// # Returns
    ///
    /// The removed value, or `None` if the key was not set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read or written.
    fn take(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// JSON object on disk, one entry per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileStore {
    /// Creates a store backed by the JSON file at `path`.
    ///
    /// Nothing is touched on disk until the first write; the parent
    /// directories are created then.
    ///
    /// # Example
    ///
    /// ```
    /// let store = FileStore::new(PathBuf::from("/tmp/sportop/store.json"));
    /// store.set(VERIFIER_KEY, "abc").await?;
    /// ```
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Store in the platform's local data directory, e.g.
    /// `~/.local/share/sportop/state/store.json` on Linux.
    pub fn in_data_dir() -> Self {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("sportop/state/store.json");
        Self::new(path)
    }

    /// Location of the backing JSON file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn read_all(&self) -> Result<HashMap<String, String>> {
        match async_fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        if entries.remove(key).is_some() {
            self.write_all(&entries).await?;
        }
        Ok(())
    }

    async fn take(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        let value = entries.remove(key);
        if value.is_some() {
            self.write_all(&entries).await?;
        }
        Ok(value)
    }
}

/// In-process store; clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn take(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.remove(key))
    }
}
