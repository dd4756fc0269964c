//! Soft-AP and station configuration.
//!
//! The driver overlays both configurations in one union and relies on the
//! caller to pass the matching interface. Here the two are variants of
//! [`WifiConfig`], so the interface always travels with the data.

use serde::{Deserialize, Serialize};

use crate::auth::AuthMode;
use crate::error::WifiTypeError;
use crate::mode::{Country, WifiInterface};
use crate::primitives::{MacAddress, Password, Ssid};
use crate::scan::MAX_CHANNEL;

/// Most stations a soft-AP accepts.
pub const AP_MAX_CONNECTION: u8 = 4;

/// Default beacon interval in milliseconds.
pub const DEFAULT_BEACON_INTERVAL: u16 = 100;

/// Accepted beacon interval range in milliseconds.
pub const BEACON_INTERVAL_MIN: u16 = 100;
pub const BEACON_INTERVAL_MAX: u16 = 60000;

// ============================================================================
// Soft-AP
// ============================================================================

/// Configuration of the soft-AP interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApConfig {
    /// Network name broadcast by the soft-AP.
    pub ssid: Ssid,

    /// Passphrase; ignored for open networks.
    pub password: Password,

    /// Operating channel.
    pub channel: u8,

    /// Authentication mode. WEP is not supported on the soft-AP.
    pub authmode: AuthMode,

    /// Do not broadcast the SSID.
    pub ssid_hidden: bool,

    /// Maximum number of associated stations (1-4).
    pub max_connection: u8,

    /// Beacon interval in milliseconds (100-60000).
    pub beacon_interval: u16,
}

impl Default for ApConfig {
    fn default() -> Self {
        Self {
            ssid: Ssid::default(),
            password: Password::default(),
            channel: 1,
            authmode: AuthMode::Open,
            ssid_hidden: false,
            max_connection: AP_MAX_CONNECTION,
            beacon_interval: DEFAULT_BEACON_INTERVAL,
        }
    }
}

impl ApConfig {
    /// Create a soft-AP config with defaults for everything but the credentials.
    pub fn new(ssid: Ssid, password: Password, authmode: AuthMode) -> Self {
        Self {
            ssid,
            password,
            authmode,
            ..Default::default()
        }
    }

    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.ssid_hidden = hidden;
        self
    }

    pub fn with_max_connection(mut self, max_connection: u8) -> Self {
        self.max_connection = max_connection;
        self
    }

    pub fn with_beacon_interval(mut self, beacon_interval: u16) -> Self {
        self.beacon_interval = beacon_interval;
        self
    }

    /// Check the fields the driver would reject.
    pub fn validate(&self) -> Result<(), WifiTypeError> {
        if self.ssid.is_empty() {
            return Err(WifiTypeError::invalid("ssid", "soft-AP SSID cannot be empty"));
        }
        if self.channel == 0 || self.channel > MAX_CHANNEL {
            return Err(WifiTypeError::invalid(
                "channel",
                format!("{} is outside 1-{}", self.channel, MAX_CHANNEL),
            ));
        }
        if !self.authmode.supported_by_soft_ap() {
            return Err(WifiTypeError::invalid(
                "authmode",
                format!("{} is not supported on the soft-AP", self.authmode),
            ));
        }
        if self.password.len() < self.authmode.min_password_len() {
            return Err(WifiTypeError::invalid(
                "password",
                format!(
                    "{} requires at least {} bytes",
                    self.authmode,
                    self.authmode.min_password_len()
                ),
            ));
        }
        if self.max_connection == 0 || self.max_connection > AP_MAX_CONNECTION {
            return Err(WifiTypeError::invalid(
                "max_connection",
                format!("{} is outside 1-{}", self.max_connection, AP_MAX_CONNECTION),
            ));
        }
        if !(BEACON_INTERVAL_MIN..=BEACON_INTERVAL_MAX).contains(&self.beacon_interval) {
            return Err(WifiTypeError::invalid(
                "beacon_interval",
                format!(
                    "{} ms is outside {}-{} ms",
                    self.beacon_interval, BEACON_INTERVAL_MIN, BEACON_INTERVAL_MAX
                ),
            ));
        }
        Ok(())
    }

    /// Validate, then check the channel against a regulatory domain.
    pub fn validate_for_country(&self, country: Country) -> Result<(), WifiTypeError> {
        self.validate()?;
        if !country.allows_channel(self.channel) {
            let range = country.channel_range();
            return Err(WifiTypeError::invalid(
                "channel",
                format!(
                    "{} is not allowed in {:?} ({}-{})",
                    self.channel,
                    country,
                    range.start(),
                    range.end()
                ),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Station
// ============================================================================

/// Configuration of the station interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaConfig {
    /// SSID of the target AP.
    pub ssid: Ssid,

    /// Passphrase of the target AP.
    pub password: Password,

    /// Only associate with the AP that has this BSSID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bssid: Option<MacAddress>,
}

impl StaConfig {
    pub fn new(ssid: Ssid, password: Password) -> Self {
        Self {
            ssid,
            password,
            bssid: None,
        }
    }

    pub fn with_bssid(mut self, bssid: MacAddress) -> Self {
        self.bssid = Some(bssid);
        self
    }

    pub fn validate(&self) -> Result<(), WifiTypeError> {
        if self.ssid.is_empty() {
            return Err(WifiTypeError::invalid("ssid", "station SSID cannot be empty"));
        }
        if self.ssid.contains_nul() {
            return Err(WifiTypeError::ContainsNul { field: "ssid" });
        }
        Ok(())
    }
}

// ============================================================================
// WifiConfig
// ============================================================================

/// Configuration for one interface.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "interface", rename_all = "snake_case")]
pub enum WifiConfig {
    /// Soft-AP configuration.
    #[serde(rename = "ap")]
    AccessPoint(ApConfig),

    /// Station configuration.
    #[serde(rename = "sta")]
    Station(StaConfig),
}

impl WifiConfig {
    /// The interface this configuration applies to.
    pub fn interface(&self) -> WifiInterface {
        match self {
            Self::AccessPoint(_) => WifiInterface::Ap,
            Self::Station(_) => WifiInterface::Sta,
        }
    }

    pub fn validate(&self) -> Result<(), WifiTypeError> {
        match self {
            Self::AccessPoint(ap) => ap.validate(),
            Self::Station(sta) => sta.validate(),
        }
    }

    pub fn as_access_point(&self) -> Option<&ApConfig> {
        match self {
            Self::AccessPoint(ap) => Some(ap),
            Self::Station(_) => None,
        }
    }

    pub fn as_station(&self) -> Option<&StaConfig> {
        match self {
            Self::Station(sta) => Some(sta),
            Self::AccessPoint(_) => None,
        }
    }

    pub fn ssid(&self) -> &Ssid {
        match self {
            Self::AccessPoint(ap) => &ap.ssid,
            Self::Station(sta) => &sta.ssid,
        }
    }
}

impl From<ApConfig> for WifiConfig {
    fn from(config: ApConfig) -> Self {
        Self::AccessPoint(config)
    }
}

impl From<StaConfig> for WifiConfig {
    fn from(config: StaConfig) -> Self {
        Self::Station(config)
    }
}
