//! Scan parameters and the access point records a scan produces.

use std::ffi::CStr;

use serde::{Deserialize, Serialize};

use crate::auth::AuthMode;
use crate::error::WifiTypeError;
use crate::mode::Bandwidth;
use crate::primitives::{MacAddress, Ssid};

/// Highest 2.4 GHz channel number.
pub const MAX_CHANNEL: u8 = 14;

raw_enum! {
    /// Position of the secondary channel relative to the primary one.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SecondChannel as "second channel" {
        /// HT20, no secondary channel.
        #[default]
        None = 0,
        /// HT40, secondary channel above the primary.
        Above = 1,
        /// HT40, secondary channel below the primary.
        Below = 2,
    }
}

impl SecondChannel {
    pub fn bandwidth(&self) -> Bandwidth {
        match self {
            Self::None => Bandwidth::Ht20,
            Self::Above | Self::Below => Bandwidth::Ht40,
        }
    }
}

/// One access point found by a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApRecord {
    /// MAC address of the AP.
    pub bssid: MacAddress,

    /// Network name; empty for hidden networks.
    pub ssid: Ssid,

    /// Primary channel.
    pub primary: u8,

    /// Secondary channel position.
    #[serde(default)]
    pub second: SecondChannel,

    /// Signal strength in dBm.
    pub rssi: i8,

    /// Authentication mode advertised by the AP.
    pub authmode: AuthMode,
}

impl ApRecord {
    pub fn bandwidth(&self) -> Bandwidth {
        self.second.bandwidth()
    }

    /// True when the AP does not broadcast its SSID.
    pub fn is_hidden(&self) -> bool {
        self.ssid.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.authmode == AuthMode::Open
    }
}

/// Parameters for a scan.
///
/// The SSID and BSSID filters borrow caller-owned buffers for the duration of
/// the scan call. An SSID filter is handed to the driver as a C string, so it
/// must include its terminating NUL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanConfig<'a> {
    /// Only report this SSID (NUL-terminated).
    pub ssid: Option<&'a [u8]>,

    /// Only report this BSSID.
    pub bssid: Option<&'a MacAddress>,

    /// Only scan this channel; 0 scans all channels.
    pub channel: u8,

    /// Also report APs with a hidden SSID.
    pub show_hidden: bool,
}

impl<'a> ScanConfig<'a> {
    /// Scan every channel with no filters.
    pub fn all_channels() -> Self {
        Self::default()
    }

    pub fn with_ssid(mut self, ssid: &'a [u8]) -> Self {
        self.ssid = Some(ssid);
        self
    }

    pub fn with_bssid(mut self, bssid: &'a MacAddress) -> Self {
        self.bssid = Some(bssid);
        self
    }

    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    /// The SSID filter as a C string.
    pub fn ssid_cstr(&self) -> Result<Option<&'a CStr>, WifiTypeError> {
        self.ssid
            .map(|bytes| {
                CStr::from_bytes_with_nul(bytes).map_err(|_| WifiTypeError::SsidFilterNotTerminated)
            })
            .transpose()
    }

    /// Check the parameters before handing them to the driver.
    pub fn validate(&self) -> Result<(), WifiTypeError> {
        if self.channel > MAX_CHANNEL {
            return Err(WifiTypeError::invalid(
                "channel",
                format!("{} is above {}", self.channel, MAX_CHANNEL),
            ));
        }
        if let Some(ssid) = self.ssid_cstr()? {
            let len = ssid.to_bytes().len();
            if len > crate::primitives::SSID_MAX_LEN {
                return Err(WifiTypeError::SsidTooLong(len));
            }
        }
        Ok(())
    }

    /// Whether a record passes this config's filters.
    pub fn matches(&self, record: &ApRecord) -> bool {
        if let Some(ssid) = self.ssid {
            let wanted = ssid.strip_suffix(&[0u8]).unwrap_or(ssid);
            if record.ssid.as_bytes() != wanted {
                return false;
            }
        }
        if let Some(bssid) = self.bssid {
            if record.bssid != *bssid {
                return false;
            }
        }
        if self.channel != 0 && record.primary != self.channel {
            return false;
        }
        self.show_hidden || !record.is_hidden()
    }
}
