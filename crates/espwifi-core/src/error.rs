//! Errors raised while building, validating or converting WiFi types.

use thiserror::Error;

/// Errors that can occur when constructing or converting WiFi types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WifiTypeError {
    /// SSID does not fit the 32-byte driver buffer.
    #[error("SSID is {0} bytes, maximum is 32")]
    SsidTooLong(usize),

    /// Password does not fit the 64-byte driver buffer.
    #[error("Password is {0} bytes, maximum is 64")]
    PasswordTooLong(usize),

    /// MAC address string could not be parsed.
    #[error("Invalid MAC address: {0}")]
    InvalidMac(String),

    /// An enumerant value outside the known set.
    #[error("Unknown {kind} value: {value}")]
    UnknownValue { kind: &'static str, value: u32 },

    /// Protocol bitmask contains bits other than 11b/11g/11n.
    #[error("Unknown protocol bits: {0:#04x}")]
    UnknownProtocolBits(u8),

    /// No free slot left in the station list.
    #[error("Station list is full ({0} entries)")]
    StationListFull(usize),

    /// Station count read from the driver exceeds the list capacity.
    #[error("Station count {count} exceeds capacity {capacity}")]
    StationCountOutOfRange { count: u8, capacity: usize },

    /// A configuration field holds a value the driver rejects.
    #[error("Invalid {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// The field contains a NUL byte, which the driver's C-string
    /// buffers would truncate at.
    #[error("{field} must not contain NUL bytes")]
    ContainsNul { field: &'static str },

    /// SSID scan filter is not a NUL-terminated C string.
    #[error("SSID filter must end with a single NUL byte")]
    SsidFilterNotTerminated,
}

impl WifiTypeError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        WifiTypeError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
