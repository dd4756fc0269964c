//! JSON documents built from the WiFi types.
//!
//! - [`ScanReport`]: the records of one scan, stamped with the time it ended
//! - [`ConfigDocument`]: the persisted form of the station and soft-AP configs
//!
//! Passwords are written in clear inside [`ConfigDocument`]; it is the form
//! handed to configuration storage, not a display format.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use espwifi_core::{
    ApConfig, ApRecord, ScanConfig, StaConfig, WifiConfig, WifiInterface, WifiMode,
    WifiTypeError,
};

// ============================================================================
// Scan Report
// ============================================================================

/// Results of one scan.
///
/// # Example
/// ```json
/// {
///   "timestamp": "2024-01-17T10:30:00.000Z",
///   "count": 1,
///   "records": [{
///     "bssid": "24:0a:c4:11:22:33",
///     "ssid": "cafe",
///     "primary": 6,
///     "second": "none",
///     "rssi": -61,
///     "authmode": "wpa2_psk"
///   }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// When the scan completed, RFC 3339 with milliseconds.
    pub timestamp: String,

    /// Number of records.
    pub count: usize,

    pub records: Vec<ApRecord>,
}

impl ScanReport {
    /// Create a report stamped with the current time.
    pub fn new(records: Vec<ApRecord>) -> Self {
        Self::with_timestamp(records, Utc::now())
    }

    pub fn with_timestamp(records: Vec<ApRecord>, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            count: records.len(),
            records,
        }
    }

    /// The record with the highest RSSI.
    pub fn strongest(&self) -> Option<&ApRecord> {
        self.records.iter().max_by_key(|r| r.rssi)
    }

    /// Order records from strongest to weakest signal.
    pub fn sort_by_signal(&mut self) {
        self.records.sort_by(|a, b| b.rssi.cmp(&a.rssi));
    }

    /// A copy holding only the records that pass `config`'s filters.
    pub fn filtered(&self, config: &ScanConfig<'_>) -> ScanReport {
        let records: Vec<ApRecord> = self
            .records
            .iter()
            .filter(|r| config.matches(r))
            .cloned()
            .collect();
        ScanReport {
            timestamp: self.timestamp.clone(),
            count: records.len(),
            records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// Config Document
// ============================================================================

/// Persisted WiFi configuration: the operating mode and the config of each
/// interface that has one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    pub mode: WifiMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sta: Option<StaConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ap: Option<ApConfig>,
}

impl ConfigDocument {
    /// Build a document whose mode enables exactly the given interfaces.
    pub fn from_configs(sta: Option<StaConfig>, ap: Option<ApConfig>) -> Self {
        Self {
            mode: WifiMode::from_interfaces(sta.is_some(), ap.is_some()),
            sta,
            ap,
        }
    }

    /// The stored config for `interface`.
    pub fn config(&self, interface: WifiInterface) -> Option<WifiConfig> {
        match interface {
            WifiInterface::Sta => self.sta.clone().map(WifiConfig::Station),
            WifiInterface::Ap => self.ap.clone().map(WifiConfig::AccessPoint),
        }
    }

    /// Replace the config of the interface `config` applies to. The mode is
    /// left unchanged.
    pub fn set_config(&mut self, config: WifiConfig) {
        match config {
            WifiConfig::Station(sta) => self.sta = Some(sta),
            WifiConfig::AccessPoint(ap) => self.ap = Some(ap),
        }
    }

    pub fn clear_config(&mut self, interface: WifiInterface) {
        match interface {
            WifiInterface::Sta => self.sta = None,
            WifiInterface::Ap => self.ap = None,
        }
    }

    /// Validate every config present in the document.
    pub fn validate(&self) -> Result<(), WifiTypeError> {
        if let Some(sta) = &self.sta {
            sta.validate()?;
        }
        if let Some(ap) = &self.ap {
            ap.validate()?;
        }
        Ok(())
    }
}
