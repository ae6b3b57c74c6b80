//! Persistence of queue state between invocations.
//!
//! Directory layout of the JSON store:
//! ```text
//! {state_dir}/
//! └── {sha256(account)}.json   # one queue per account
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use review_queue::QueueState;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::StoreError;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Loads and saves one queue per account.
pub trait StateStore<C>: Send + Sync {
    fn load(&self, account: &str) -> StoreResult<Option<QueueState<C>>>;

    fn save(&self, account: &str, state: &QueueState<C>) -> StoreResult<()>;

    /// Returns whether anything was stored for the account.
    fn remove(&self, account: &str) -> StoreResult<bool>;
}

/// In-process store.
pub struct MemoryStore<C> {
    queues: Mutex<HashMap<String, QueueState<C>>>,
}

impl<C> MemoryStore<C> {
    pub fn new() -> Self {
        Self {
            queues: Mutex::new(HashMap::new()),
        }
    }
}

impl<C> Default for MemoryStore<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clone + Send> StateStore<C> for MemoryStore<C> {
    fn load(&self, account: &str) -> StoreResult<Option<QueueState<C>>> {
        let queues = self.queues.lock().expect("memory store lock");
        Ok(queues.get(account).cloned())
    }

    fn save(&self, account: &str, state: &QueueState<C>) -> StoreResult<()> {
        let mut queues = self.queues.lock().expect("memory store lock");
        queues.insert(account.to_string(), state.clone());
        Ok(())
    }

    fn remove(&self, account: &str) -> StoreResult<bool> {
        let mut queues = self.queues.lock().expect("memory store lock");
        Ok(queues.remove(account).is_some())
    }
}

#[derive(Serialize)]
struct StoredQueueRef<'a, C> {
    account: &'a str,
    updated_at: DateTime<Utc>,
    state: &'a QueueState<C>,
}

#[derive(Deserialize)]
struct StoredQueue<C> {
    account: String,
    updated_at: DateTime<Utc>,
    state: QueueState<C>,
}

/// One pretty-printed JSON file per account.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of an account's state file.
    pub fn path_for(&self, account: &str) -> PathBuf {
        self.dir.join(format!("{}.json", hash_account(account)))
    }
}

impl<C> StateStore<C> for JsonFileStore
where
    C: Serialize + DeserializeOwned,
{
    fn load(&self, account: &str) -> StoreResult<Option<QueueState<C>>> {
        let path = self.path_for(account);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let stored: StoredQueue<C> = serde_json::from_str(&content)?;
        if stored.account != account {
            tracing::warn!(account, stored = %stored.account, "state file names another account");
        }
        tracing::debug!(account, updated_at = %stored.updated_at, "loaded queue");
        Ok(Some(stored.state))
    }

    fn save(&self, account: &str, state: &QueueState<C>) -> StoreResult<()> {
        fs::create_dir_all(&self.dir)?;

        let stored = StoredQueueRef {
            account,
            updated_at: Utc::now(),
            state,
        };
        let content = serde_json::to_string_pretty(&stored)?;

        // Write then rename so a crash never leaves a half-written file.
        let path = self.path_for(account);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;

        tracing::info!(account, items = state.items.len(), "saved queue");
        Ok(())
    }

    fn remove(&self, account: &str) -> StoreResult<bool> {
        let path = self.path_for(account);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        Ok(true)
    }
}

/// Calculate the SHA256 hex digest used as an account's file name.
pub fn hash_account(account: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(account.as_bytes());
    format!("{:x}", hasher.finalize())
}
