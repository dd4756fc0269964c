//! # espwifi-storage
//!
//! Persistence for the WiFi configuration.
//!
//! [`ConfigStorage`] abstracts the key-value backend so the same settings
//! logic runs against flash on a device and against files or memory on a
//! host. [`WifiSettings`] keeps the current configuration in memory and
//! writes it through to the backend only while the storage policy is
//! [`StoragePolicy::Flash`](espwifi_core::StoragePolicy::Flash).

pub mod config;
pub mod file;
pub mod memory;
pub mod settings;

pub use config::{ConfigError, ConfigStorage, WIFI_CONFIG_KEY};
pub use file::FileConfigStorage;
pub use memory::MemoryConfigStorage;
pub use settings::WifiSettings;
