//! In-memory key-value store for testing.

use super::KeyValueStore;
use crate::error::StoreError;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// Non-persistent store backed by a map
#[derive(Default)]
pub struct InMemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, namespace: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.read().map_err(|_| StoreError::Corrupted {
            path: PathBuf::from("memory"),
        })?;
        Ok(values.get(namespace).cloned())
    }

    fn set(&self, namespace: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.write().map_err(|_| StoreError::Corrupted {
            path: PathBuf::from("memory"),
        })?;
        values.insert(namespace.to_string(), value.to_string());
        Ok(())
    }
}
