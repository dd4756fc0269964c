//! Settings persisted through the file backend.

use std::fs;

use espwifi_core::{
    ApConfig, AuthMode, MacAddress, Password, Ssid, StaConfig, StoragePolicy, WifiConfig,
    WifiInterface, WifiMode,
};
use espwifi_storage::{ConfigError, ConfigStorage, FileConfigStorage, WifiSettings, WIFI_CONFIG_KEY};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn station() -> WifiConfig {
    StaConfig::new(
        Ssid::try_from("home").unwrap(),
        Password::try_from("secret-pass").unwrap(),
    )
    .with_bssid(MacAddress::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]))
    .into()
}

fn access_point() -> WifiConfig {
    ApConfig::new(
        Ssid::try_from("esp-ap").unwrap(),
        Password::try_from("password123").unwrap(),
        AuthMode::Wpa2Psk,
    )
    .with_channel(6)
    .with_hidden(true)
    .into()
}

#[test]
fn test_config_survives_restart() {
    let tmp_dir = TempDir::new().unwrap();

    {
        let storage = FileConfigStorage::new(tmp_dir.path()).unwrap();
        let mut settings = WifiSettings::new(storage);
        settings.set_mode(WifiMode::ApSta).unwrap();
        settings.set_config(station()).unwrap();
        settings.set_config(access_point()).unwrap();
    }

    let storage = FileConfigStorage::new(tmp_dir.path()).unwrap();
    let settings = WifiSettings::restore(storage).unwrap();
    assert_eq!(settings.mode(), WifiMode::ApSta);
    assert_eq!(settings.get_config(WifiInterface::Sta), Some(station()));
    assert_eq!(settings.get_config(WifiInterface::Ap), Some(access_point()));
}

#[test]
fn test_ram_changes_are_lost_on_restart() {
    let tmp_dir = TempDir::new().unwrap();

    {
        let storage = FileConfigStorage::new(tmp_dir.path()).unwrap();
        let mut settings = WifiSettings::new(storage);
        settings.set_mode(WifiMode::Sta).unwrap();
        settings.set_config(station()).unwrap();

        settings.set_storage(StoragePolicy::Ram);
        settings.set_mode(WifiMode::ApSta).unwrap();
        settings.set_config(access_point()).unwrap();
        assert!(settings.get_config(WifiInterface::Ap).is_some());
    }

    let storage = FileConfigStorage::new(tmp_dir.path()).unwrap();
    let settings = WifiSettings::restore(storage).unwrap();
    assert_eq!(settings.mode(), WifiMode::Sta);
    assert_eq!(settings.get_config(WifiInterface::Sta), Some(station()));
    assert!(settings.get_config(WifiInterface::Ap).is_none());
}

#[test]
fn test_restore_without_saved_config() {
    let tmp_dir = TempDir::new().unwrap();
    let storage = FileConfigStorage::new(tmp_dir.path()).unwrap();
    let settings = WifiSettings::restore(storage).unwrap();
    assert_eq!(settings.mode(), WifiMode::Null);
    assert_eq!(settings.storage_policy(), StoragePolicy::Flash);
}

#[test]
fn test_restore_rejects_corrupt_file() {
    let tmp_dir = TempDir::new().unwrap();
    let storage = FileConfigStorage::new(tmp_dir.path()).unwrap();
    fs::write(storage.path(WIFI_CONFIG_KEY).unwrap(), "{\"mode\": 7}").unwrap();

    assert!(matches!(
        WifiSettings::restore(storage),
        Err(ConfigError::InvalidData(_))
    ));
}

#[test]
fn test_restore_rejects_invalid_config() {
    let tmp_dir = TempDir::new().unwrap();
    let storage = FileConfigStorage::new(tmp_dir.path()).unwrap();
    let doc = serde_json::json!({
        "mode": "ap",
        "ap": { "ssid": "esp-ap", "authmode": "wpa2_psk", "password": "short" }
    });
    storage.save_value(WIFI_CONFIG_KEY, &doc).unwrap();

    assert!(matches!(
        WifiSettings::restore(storage),
        Err(ConfigError::InvalidConfig(_))
    ));
}

#[test]
fn test_saved_file_is_readable_json() {
    let tmp_dir = TempDir::new().unwrap();
    let storage = FileConfigStorage::new(tmp_dir.path()).unwrap();
    let mut settings = WifiSettings::new(storage);
    settings.set_mode(WifiMode::Sta).unwrap();
    settings.set_config(station()).unwrap();

    let path = settings.backend().path(WIFI_CONFIG_KEY).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["mode"], "sta");
    assert_eq!(json["sta"]["bssid"], "aa:bb:cc:dd:ee:ff");
}
