//! Operating mode, interface and radio selectors.

use std::fmt;
use std::ops::{BitOr, BitOrAssign, RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::error::WifiTypeError;

raw_enum! {
    /// WiFi operating mode.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum WifiMode as "wifi mode" {
        /// Radio off.
        #[default]
        Null = 0,
        /// Station only.
        Sta = 1,
        /// Soft-AP only.
        Ap = 2,
        /// Station and soft-AP at the same time.
        ApSta = 3,
    }
}

impl WifiMode {
    /// One past the last valid enumerant.
    pub const MAX: u32 = 4;

    /// Combine interface flags into a mode.
    pub fn from_interfaces(sta: bool, ap: bool) -> Self {
        match (sta, ap) {
            (false, false) => Self::Null,
            (true, false) => Self::Sta,
            (false, true) => Self::Ap,
            (true, true) => Self::ApSta,
        }
    }

    /// Returns true if this mode runs the station interface.
    pub fn is_sta(&self) -> bool {
        matches!(self, Self::Sta | Self::ApSta)
    }

    /// Returns true if this mode runs the soft-AP interface.
    pub fn is_ap(&self) -> bool {
        matches!(self, Self::Ap | Self::ApSta)
    }

    /// Returns true if the given interface is active in this mode.
    pub fn enables(&self, interface: WifiInterface) -> bool {
        match interface {
            WifiInterface::Sta => self.is_sta(),
            WifiInterface::Ap => self.is_ap(),
        }
    }

    /// This mode with `interface` switched on.
    pub fn with_interface(self, interface: WifiInterface) -> Self {
        match interface {
            WifiInterface::Sta => Self::from_interfaces(true, self.is_ap()),
            WifiInterface::Ap => Self::from_interfaces(self.is_sta(), true),
        }
    }
}

raw_enum! {
    /// Logical WiFi interface handle.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum WifiInterface as "wifi interface" {
        Sta = 0,
        Ap = 1,
    }
}

impl WifiInterface {
    pub const MAX: u32 = 2;
}

impl fmt::Display for WifiInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sta => f.write_str("station"),
            Self::Ap => f.write_str("soft-AP"),
        }
    }
}

raw_enum! {
    /// Regulatory domain, which bounds the usable 2.4 GHz channels.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Country as "country" {
        /// China, channels 1-14.
        #[default]
        Cn = 0,
        /// Japan, channels 1-14.
        Jp = 1,
        /// USA, channels 1-11.
        Us = 2,
        /// Europe, channels 1-13.
        Eu = 3,
    }
}

impl Country {
    pub const MAX: u32 = 4;

    pub fn channel_range(&self) -> RangeInclusive<u8> {
        match self {
            Self::Cn | Self::Jp => 1..=14,
            Self::Us => 1..=11,
            Self::Eu => 1..=13,
        }
    }

    pub fn allows_channel(&self, channel: u8) -> bool {
        self.channel_range().contains(&channel)
    }
}

raw_enum! {
    /// Station power-save type.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PowerSave as "power save type" {
        #[default]
        None = 0,
        Modem = 1,
        Light = 2,
        Mac = 3,
    }
}

raw_enum! {
    /// Channel bandwidth.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Bandwidth as "bandwidth" {
        #[default]
        Ht20 = 0,
        Ht40 = 1,
    }
}

raw_enum! {
    /// Where the driver keeps configuration set through it.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum StoragePolicy as "storage policy" {
        /// Memory and non-volatile flash.
        #[default]
        Flash = 0,
        /// Memory only; lost on restart.
        Ram = 1,
    }
}

impl StoragePolicy {
    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::Flash)
    }
}

// ============================================================================
// Protocol bitmask
// ============================================================================

/// 802.11 protocol bitmask (`WIFI_PROTOCOL_11B | 11G | 11N`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Protocols(u8);

impl Protocols {
    pub const NONE: Protocols = Protocols(0);
    pub const B: Protocols = Protocols(1);
    pub const G: Protocols = Protocols(2);
    pub const N: Protocols = Protocols(4);
    pub const ALL: Protocols = Protocols(1 | 2 | 4);

    /// Build from raw bits, rejecting bits outside 11b/11g/11n.
    pub fn from_bits(bits: u8) -> Result<Self, WifiTypeError> {
        if bits & !Self::ALL.0 != 0 {
            return Err(WifiTypeError::UnknownProtocolBits(bits));
        }
        Ok(Self(bits))
    }

    /// Build from raw bits, dropping unknown ones.
    pub fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub fn contains(&self, other: Protocols) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Protocols) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Protocols) {
        self.0 &= !other.0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Protocols {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for Protocols {
    type Output = Protocols;

    fn bitor(self, rhs: Self) -> Self::Output {
        Protocols(self.0 | rhs.0)
    }
}

impl BitOrAssign for Protocols {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl TryFrom<u8> for Protocols {
    type Error = WifiTypeError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(bits)
    }
}

impl From<Protocols> for u8 {
    fn from(p: Protocols) -> Self {
        p.0
    }
}

impl fmt::Debug for Protocols {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [(Self::B, "11b"), (Self::G, "11g"), (Self::N, "11n")]
            .iter()
            .filter(|(p, _)| self.contains(*p))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "Protocols({})", names.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_values() {
        assert_eq!(WifiMode::Null.to_raw(), 0);
        assert_eq!(WifiMode::Sta.to_raw(), 1);
        assert_eq!(WifiMode::Ap.to_raw(), 2);
        assert_eq!(WifiMode::ApSta.to_raw(), 3);
        assert_eq!(WifiMode::ALL.len() as u32, WifiMode::MAX);
        assert!(WifiMode::from_raw(WifiMode::MAX).is_err());
    }

    #[test]
    fn test_mode_interfaces() {
        assert!(WifiMode::ApSta.is_sta() && WifiMode::ApSta.is_ap());
        assert!(!WifiMode::Null.enables(WifiInterface::Sta));
        assert_eq!(WifiMode::from_interfaces(true, false), WifiMode::Sta);
        assert_eq!(
            WifiMode::Sta.with_interface(WifiInterface::Ap),
            WifiMode::ApSta
        );
        assert_eq!(
            WifiMode::Null.with_interface(WifiInterface::Ap),
            WifiMode::Ap
        );
    }

    #[test]
    fn test_interface_values() {
        assert_eq!(WifiInterface::Sta.to_raw(), 0);
        assert_eq!(WifiInterface::Ap.to_raw(), 1);
        assert_eq!(
            WifiInterface::from_raw(2).unwrap_err(),
            WifiTypeError::UnknownValue {
                kind: "wifi interface",
                value: 2
            }
        );
    }

    #[test]
    fn test_country_channels() {
        assert!(Country::Jp.allows_channel(14));
        assert!(!Country::Us.allows_channel(12));
        assert!(Country::Eu.allows_channel(13));
        assert!(!Country::Eu.allows_channel(0));
        assert_eq!(Country::Us.to_raw(), 2);
    }

    #[test]
    fn test_storage_and_power_values() {
        assert_eq!(StoragePolicy::Flash.to_raw(), 0);
        assert_eq!(StoragePolicy::Ram.to_raw(), 1);
        assert!(StoragePolicy::default().is_persistent());
        assert_eq!(PowerSave::Mac.to_raw(), 3);
        assert_eq!(Bandwidth::Ht40.to_raw(), 1);
    }

    #[test]
    fn test_protocol_bits() {
        let bg = Protocols::B | Protocols::G;
        assert_eq!(bg.bits(), 3);
        assert!(bg.contains(Protocols::G));
        assert!(!bg.contains(Protocols::N));
        assert_eq!(Protocols::default(), Protocols::ALL);
        assert_eq!(
            Protocols::from_bits(0x08).unwrap_err(),
            WifiTypeError::UnknownProtocolBits(0x08)
        );
        assert_eq!(Protocols::from_bits_truncate(0x0f), Protocols::ALL);
        assert_eq!(format!("{:?}", bg), "Protocols(11b|11g)");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&WifiMode::ApSta).unwrap(), "\"ap_sta\"");
        assert_eq!(serde_json::to_string(&StoragePolicy::Ram).unwrap(), "\"ram\"");
        assert_eq!(serde_json::to_string(&Protocols::ALL).unwrap(), "7");
        assert!(serde_json::from_str::<Protocols>("9").is_err());
    }
}
