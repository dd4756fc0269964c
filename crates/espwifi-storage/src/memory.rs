//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};

use crate::config::{ConfigError, ConfigStorage};

/// Values held as JSON strings in a map; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryConfigStorage {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryConfigStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E>(_: E) -> ConfigError {
    ConfigError::StorageUnavailable("memory storage lock poisoned".to_string())
}

impl ConfigStorage for MemoryConfigStorage {
    fn load_value<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let data = self.data.read().map_err(poisoned)?;
        let json = data
            .get(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidData(e.to_string()))
    }

    fn save_value<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConfigError> {
        let json =
            serde_json::to_string(value).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        self.data
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), json);
        Ok(())
    }

    fn has_key(&self, key: &str) -> bool {
        self.data
            .read()
            .map(|data| data.contains_key(key))
            .unwrap_or(false)
    }

    fn delete_key(&self, key: &str) -> Result<(), ConfigError> {
        self.data.write().map_err(poisoned)?.remove(key);
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<String>, ConfigError> {
        let data = self.data.read().map_err(poisoned)?;
        let mut keys: Vec<String> = data.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
