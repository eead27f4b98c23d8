//! In-process key-value store

use std::{collections::HashMap, sync::Mutex};

use super::KvStore;
use crate::error::{AppError, AppResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs
    pub fn len(&self) -> usize {
        self.blobs.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| AppError::Storage("Memory store lock poisoned".to_string()))?;
        Ok(blobs.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> AppResult<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| AppError::Storage("Memory store lock poisoned".to_string()))?;
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
