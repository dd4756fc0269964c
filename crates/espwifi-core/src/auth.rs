//! Authentication schemes.

use std::fmt;

use serde::{Deserialize, Serialize};

raw_enum! {
    /// Authentication mode of an access point.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum AuthMode as "auth mode" {
        /// Open network, no authentication.
        #[default]
        Open = 0,
        /// Wired Equivalent Privacy.
        Wep = 1,
        /// WPA with pre-shared key.
        WpaPsk = 2,
        /// WPA2 with pre-shared key.
        Wpa2Psk = 3,
        /// WPA or WPA2 with pre-shared key.
        WpaWpa2Psk = 4,
    }
}

impl AuthMode {
    pub const MAX: u32 = 5;

    pub fn requires_password(&self) -> bool {
        !matches!(self, Self::Open)
    }

    /// Shortest passphrase the driver accepts for this mode.
    pub fn min_password_len(&self) -> usize {
        match self {
            Self::Open => 0,
            // 40-bit WEP key as 5 ASCII characters.
            Self::Wep => 5,
            Self::WpaPsk | Self::Wpa2Psk | Self::WpaWpa2Psk => 8,
        }
    }

    /// The soft-AP cannot serve WEP.
    pub fn supported_by_soft_ap(&self) -> bool {
        !matches!(self, Self::Wep)
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::Wep => "WEP",
            Self::WpaPsk => "WPA-PSK",
            Self::Wpa2Psk => "WPA2-PSK",
            Self::WpaWpa2Psk => "WPA/WPA2-PSK",
        };
        f.write_str(name)
    }
}
