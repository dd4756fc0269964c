//! # espwifi-core
//!
//! Types describing the configuration and status of the ESP32 WiFi driver.
//!
//! This crate provides:
//! - Operating mode, interface, country and power-save selectors
//! - Authentication modes and disconnect reason codes
//! - Scan records and borrowed scan parameters
//! - Soft-AP and station configuration, combined as a sum type
//! - The associated-station list of a soft-AP
//! - A `raw` module with `#[repr(C)]` mirrors of the driver's structs
//!
//! Like the driver contract it mirrors, this crate performs no I/O. The typed
//! values validate themselves and convert losslessly to and from the raw
//! layout, so the same types serve the firmware binding and host tooling.

/// Declares a C-compatible enum with explicit discriminants and the
/// `from_raw`/`to_raw` conversions used by the raw and wire layers.
macro_rules! raw_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $kind:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(u32)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value
            ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The enumerant value used by the driver.
            pub const fn to_raw(self) -> u32 {
                self as u32
            }

            /// Look up the variant for a driver enumerant value.
            pub fn from_raw(value: u32) -> Result<Self, $crate::error::WifiTypeError> {
                $(
                    if value == $value {
                        return Ok($name::$variant);
                    }
                )+
                Err($crate::error::WifiTypeError::UnknownValue {
                    kind: $kind,
                    value,
                })
            }
        }

        impl TryFrom<u32> for $name {
            type Error = $crate::error::WifiTypeError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                Self::from_raw(value)
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> Self {
                value.to_raw()
            }
        }
    };
}

pub mod auth;
pub mod config;
pub mod error;
pub mod mode;
pub mod primitives;
pub mod raw;
pub mod reason;
pub mod scan;
pub mod station;
pub mod vendor_ie;

pub use auth::AuthMode;
pub use config::{ApConfig, StaConfig, WifiConfig};
pub use error::WifiTypeError;
pub use mode::{Bandwidth, Country, PowerSave, Protocols, StoragePolicy, WifiInterface, WifiMode};
pub use primitives::{MacAddress, Password, Ssid};
pub use reason::DisconnectReason;
pub use scan::{ApRecord, ScanConfig, SecondChannel};
pub use station::{StationInfo, StationList, MAX_CONN_NUM};
pub use vendor_ie::{VendorIeId, VendorIeType};
