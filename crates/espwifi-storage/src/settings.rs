//! Current WiFi configuration, written through to storage per policy.

use tracing::{debug, info};

use espwifi_core::{StoragePolicy, WifiConfig, WifiInterface, WifiMode};
use espwifi_protocol::ConfigDocument;

use crate::config::{ConfigError, ConfigStorage, WIFI_CONFIG_KEY};

/// The configuration the driver would be running with.
///
/// Every change is applied in memory. Under [`StoragePolicy::Flash`] it is
/// also saved to the backend; under [`StoragePolicy::Ram`] the backend is
/// left untouched, and switching back to `Flash` does not save the changes
/// made in the meantime until the next change.
pub struct WifiSettings<S> {
    storage: S,
    policy: StoragePolicy,
    current: ConfigDocument,
}

impl<S: ConfigStorage> WifiSettings<S> {
    /// Start from an empty configuration with the default `Flash` policy.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            policy: StoragePolicy::default(),
            current: ConfigDocument::default(),
        }
    }

    /// Start from the configuration saved in `storage`, or an empty one if
    /// nothing was saved.
    pub fn restore(storage: S) -> Result<Self, ConfigError> {
        let current = match storage.load_wifi() {
            Ok(doc) => {
                info!("Restored WiFi config (mode {:?})", doc.mode);
                doc
            }
            Err(ConfigError::NotFound(_)) => {
                debug!("No saved WiFi config, starting empty");
                ConfigDocument::default()
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            storage,
            policy: StoragePolicy::default(),
            current,
        })
    }

    pub fn storage_policy(&self) -> StoragePolicy {
        self.policy
    }

    /// Select where later changes are kept.
    pub fn set_storage(&mut self, policy: StoragePolicy) {
        debug!("WiFi storage policy {:?} -> {:?}", self.policy, policy);
        self.policy = policy;
    }

    pub fn mode(&self) -> WifiMode {
        self.current.mode
    }

    pub fn set_mode(&mut self, mode: WifiMode) -> Result<(), ConfigError> {
        let mut doc = self.current.clone();
        doc.mode = mode;
        self.commit(doc)
    }

    /// The config of `interface`, if one was set.
    pub fn get_config(&self, interface: WifiInterface) -> Option<WifiConfig> {
        self.current.config(interface)
    }

    /// Validate and apply a config. The current mode must enable its
    /// interface. On error the current configuration is unchanged.
    pub fn set_config(&mut self, config: WifiConfig) -> Result<(), ConfigError> {
        let interface = config.interface();
        if !self.current.mode.enables(interface) {
            return Err(ConfigError::ModeMismatch {
                interface,
                mode: self.current.mode,
            });
        }
        config.validate()?;
        let mut doc = self.current.clone();
        doc.set_config(config);
        self.commit(doc)
    }

    /// Clear the in-memory configuration and, under `Flash`, the saved one.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        if self.policy.is_persistent() {
            self.storage.delete_key(WIFI_CONFIG_KEY)?;
            info!("Erased saved WiFi config");
        }
        self.current = ConfigDocument::default();
        Ok(())
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.current
    }

    pub fn backend(&self) -> &S {
        &self.storage
    }

    /// Save `doc` per policy, then make it current. A failed save leaves
    /// the in-memory configuration as it was.
    fn commit(&mut self, doc: ConfigDocument) -> Result<(), ConfigError> {
        if self.policy.is_persistent() {
            self.storage.save_wifi(&doc)?;
            info!("Saved WiFi config (mode {:?})", doc.mode);
        } else {
            debug!("RAM storage policy, WiFi config kept in memory only");
        }
        self.current = doc;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryConfigStorage;
    use espwifi_core::{ApConfig, AuthMode, Password, Ssid, StaConfig};
    use pretty_assertions::assert_eq;
    use serde::{de::DeserializeOwned, Serialize};

    /// Backend whose writes always fail.
    struct FullStorage;

    impl ConfigStorage for FullStorage {
        fn load_value<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
            Err(ConfigError::NotFound(key.to_string()))
        }

        fn save_value<T: Serialize>(&self, _key: &str, _value: &T) -> Result<(), ConfigError> {
            Err(ConfigError::WriteError("disk full".into()))
        }

        fn has_key(&self, _key: &str) -> bool {
            false
        }

        fn delete_key(&self, _key: &str) -> Result<(), ConfigError> {
            Err(ConfigError::WriteError("disk full".into()))
        }

        fn list_keys(&self) -> Result<Vec<String>, ConfigError> {
            Ok(Vec::new())
        }
    }

    fn home() -> WifiConfig {
        StaConfig::new(
            Ssid::try_from("home").unwrap(),
            Password::try_from("secret-pass").unwrap(),
        )
        .into()
    }

    #[test]
    fn test_set_config_requires_mode() {
        let mut settings = WifiSettings::new(MemoryConfigStorage::new());
        assert!(matches!(
            settings.set_config(home()),
            Err(ConfigError::ModeMismatch {
                interface: WifiInterface::Sta,
                mode: WifiMode::Null
            })
        ));

        settings.set_mode(WifiMode::Sta).unwrap();
        settings.set_config(home()).unwrap();
        assert_eq!(settings.get_config(WifiInterface::Sta), Some(home()));
        assert_eq!(settings.get_config(WifiInterface::Ap), None);
    }

    #[test]
    fn test_set_config_validates() {
        let mut settings = WifiSettings::new(MemoryConfigStorage::new());
        settings.set_mode(WifiMode::Ap).unwrap();
        let wep = ApConfig::new(
            Ssid::try_from("esp-ap").unwrap(),
            Password::try_from("12345").unwrap(),
            AuthMode::Wep,
        );
        assert!(matches!(
            settings.set_config(wep.into()),
            Err(ConfigError::InvalidConfig(_))
        ));
        assert!(settings.get_config(WifiInterface::Ap).is_none());
    }

    #[test]
    fn test_flash_policy_persists() {
        let mut settings = WifiSettings::new(MemoryConfigStorage::new());
        settings.set_mode(WifiMode::Sta).unwrap();
        settings.set_config(home()).unwrap();

        let saved = settings.backend().load_wifi().unwrap();
        assert_eq!(&saved, settings.document());
    }

    #[test]
    fn test_ram_policy_skips_backend() {
        let mut settings = WifiSettings::new(MemoryConfigStorage::new());
        settings.set_storage(StoragePolicy::Ram);
        settings.set_mode(WifiMode::Sta).unwrap();
        settings.set_config(home()).unwrap();

        assert_eq!(settings.mode(), WifiMode::Sta);
        assert!(!settings.backend().has_key(WIFI_CONFIG_KEY));

        // Back to flash: nothing is written until the next change.
        settings.set_storage(StoragePolicy::Flash);
        assert!(!settings.backend().has_key(WIFI_CONFIG_KEY));
        settings.set_mode(WifiMode::ApSta).unwrap();
        assert_eq!(
            settings.backend().load_wifi().unwrap().mode,
            WifiMode::ApSta
        );
    }

    #[test]
    fn test_failed_save_keeps_current_config() {
        let mut settings = WifiSettings::new(FullStorage);
        assert!(matches!(
            settings.set_mode(WifiMode::Sta),
            Err(ConfigError::WriteError(_))
        ));
        assert_eq!(settings.mode(), WifiMode::Null);

        // Get into STA mode in RAM, then fail the flash write of a config.
        settings.set_storage(StoragePolicy::Ram);
        settings.set_mode(WifiMode::Sta).unwrap();
        settings.set_storage(StoragePolicy::Flash);
        assert!(matches!(
            settings.set_config(home()),
            Err(ConfigError::WriteError(_))
        ));
        assert_eq!(settings.get_config(WifiInterface::Sta), None);
        assert_eq!(settings.mode(), WifiMode::Sta);

        assert!(settings.reset().is_err());
        assert_eq!(settings.mode(), WifiMode::Sta);
    }

    #[test]
    fn test_reset() {
        let mut settings = WifiSettings::new(MemoryConfigStorage::new());
        settings.set_mode(WifiMode::Sta).unwrap();
        settings.reset().unwrap();
        assert_eq!(settings.mode(), WifiMode::Null);
        assert!(!settings.backend().has_key(WIFI_CONFIG_KEY));
    }
}
