//! Configuration storage abstraction.
//!
//! Backends implement the generic key-value methods; the WiFi document
//! helpers are provided on top of them:
//! - Host: [`FileConfigStorage`](crate::FileConfigStorage), one JSON file per key
//! - Tests and RAM-only setups: [`MemoryConfigStorage`](crate::MemoryConfigStorage)
//!
//! A device build implements the same trait over its non-volatile storage.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use espwifi_core::{WifiInterface, WifiMode, WifiTypeError};
use espwifi_protocol::ConfigDocument;

/// Key under which the WiFi [`ConfigDocument`] is stored.
pub const WIFI_CONFIG_KEY: &str = "wifi";

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested configuration was not found.
    #[error("Configuration not found: {0}")]
    NotFound(String),

    /// Failed to read configuration.
    #[error("Read error: {0}")]
    ReadError(String),

    /// Failed to write configuration.
    #[error("Write error: {0}")]
    WriteError(String),

    /// Stored data could not be parsed or the key is malformed.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Storage is not available.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The configuration holds a value the driver would reject.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] WifiTypeError),

    /// A config was given for an interface the current mode does not run.
    #[error("The {interface} interface is not enabled in mode {mode:?}")]
    ModeMismatch {
        interface: WifiInterface,
        mode: WifiMode,
    },
}

/// Abstract configuration storage.
///
/// All methods are synchronous to support embedded platforms.
pub trait ConfigStorage: Send + Sync {
    /// Load a value by key.
    fn load_value<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError>;

    /// Save a value by key.
    fn save_value<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConfigError>;

    /// Check if a key exists.
    fn has_key(&self, key: &str) -> bool;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete_key(&self, key: &str) -> Result<(), ConfigError>;

    /// List stored keys.
    fn list_keys(&self) -> Result<Vec<String>, ConfigError>;

    // ========================================================================
    // WiFi document
    // ========================================================================

    /// Load and validate the stored WiFi configuration.
    fn load_wifi(&self) -> Result<ConfigDocument, ConfigError> {
        let doc: ConfigDocument = self.load_value(WIFI_CONFIG_KEY)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Save the WiFi configuration.
    fn save_wifi(&self, doc: &ConfigDocument) -> Result<(), ConfigError> {
        self.save_value(WIFI_CONFIG_KEY, doc)
    }
}
