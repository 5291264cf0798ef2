//! In-memory collaborators.
//!
//! Useful for tests and for embedding the client where nothing should touch
//! disk.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::Result;
use crate::error::StorageError;
use crate::traits::{CredentialStore, Navigator};

/// A credential store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn values(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.values.lock().map_err(|_| {
            StorageError::Other {
                message: "memory store lock poisoned".to_string(),
            }
            .into()
        })
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values()?.remove(key);
        Ok(())
    }
}

/// A navigator that records every transition.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All paths navigated to, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }

    /// The most recent path, if any.
    pub fn current(&self) -> Option<String> {
        self.history.lock().ok().and_then(|h| h.last().cloned())
    }

    /// How many times `path` was navigated to.
    pub fn count(&self, path: &str) -> usize {
        self.history
            .lock()
            .map(|h| h.iter().filter(|p| p.as_str() == path).count())
            .unwrap_or(0)
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, path: &str) {
        if let Ok(mut history) = self.history.lock() {
            history.push(path.to_string());
        }
    }
}
