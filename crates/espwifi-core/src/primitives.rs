//! MAC addresses and the bounded byte strings used for SSIDs and passwords.
//!
//! The driver stores SSIDs and passwords in fixed, NUL-padded buffers. The
//! newtypes here carry only the meaningful bytes and enforce the buffer
//! capacity at construction, so conversion to the C buffers cannot fail.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::WifiTypeError;

/// Length of a MAC address / BSSID in bytes.
pub const MAC_LEN: usize = 6;

/// Capacity of the driver's SSID buffer.
pub const SSID_MAX_LEN: usize = 32;

/// Capacity of the driver's password buffer.
pub const PASSWORD_MAX_LEN: usize = 64;

// ============================================================================
// MacAddress
// ============================================================================

/// A 48-bit IEEE 802 MAC address.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress(pub [u8; MAC_LEN]);

impl MacAddress {
    /// The broadcast address `ff:ff:ff:ff:ff:ff`.
    pub const BROADCAST: MacAddress = MacAddress([0xff; MAC_LEN]);

    /// The all-zero address, used by the driver for "not set".
    pub const ZERO: MacAddress = MacAddress([0; MAC_LEN]);

    pub const fn new(octets: [u8; MAC_LEN]) -> Self {
        Self(octets)
    }

    /// Get the raw octets.
    pub const fn octets(&self) -> [u8; MAC_LEN] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; MAC_LEN] {
        &self.0
    }

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// True when the group bit of the first octet is set.
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl From<[u8; MAC_LEN]> for MacAddress {
    fn from(octets: [u8; MAC_LEN]) -> Self {
        Self(octets)
    }
}

impl From<MacAddress> for [u8; MAC_LEN] {
    fn from(mac: MacAddress) -> Self {
        mac.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            a, b, c, d, e, g
        )
    }
}

impl fmt::Debug for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacAddress({})", self)
    }
}

fn mac_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Same separator throughout: either all ':' or all '-'.
        Regex::new(r"^[0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5}$|^[0-9A-Fa-f]{2}(?:-[0-9A-Fa-f]{2}){5}$")
            .expect("MAC address pattern is valid")
    })
}

impl FromStr for MacAddress {
    type Err = WifiTypeError;

    /// Parse `aa:bb:cc:dd:ee:ff` or `aa-bb-cc-dd-ee-ff` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !mac_pattern().is_match(s) {
            return Err(WifiTypeError::InvalidMac(s.to_string()));
        }

        let mut octets = [0u8; MAC_LEN];
        for (slot, part) in octets.iter_mut().zip(s.split(|c| c == ':' || c == '-')) {
            *slot = u8::from_str_radix(part, 16)
                .map_err(|_| WifiTypeError::InvalidMac(s.to_string()))?;
        }
        Ok(Self(octets))
    }
}

impl Serialize for MacAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MacAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ============================================================================
// C buffer helpers
// ============================================================================

/// Bytes of `buf` up to (not including) the first NUL.
fn until_nul(buf: &[u8]) -> &[u8] {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    &buf[..end]
}

/// Copy `bytes` into a zero-padded buffer. Caller guarantees `bytes.len() <= N`.
fn zero_padded<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut buf = [0u8; N];
    buf[..bytes.len()].copy_from_slice(bytes);
    buf
}

/// Serialize as a string when the bytes are UTF-8, otherwise as a byte array.
fn serialize_bytes<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    match std::str::from_utf8(bytes) {
        Ok(s) => serializer.serialize_str(s),
        Err(_) => bytes.serialize(serializer),
    }
}

/// Accepts either a string or a sequence of bytes.
struct BytesVisitor;

impl<'de> Visitor<'de> for BytesVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or an array of bytes")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.as_bytes().to_vec())
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        Ok(v.to_vec())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(b) = seq.next_element::<u8>()? {
            out.push(b);
        }
        Ok(out)
    }
}

// ============================================================================
// Ssid
// ============================================================================

/// A network name of at most 32 bytes.
///
/// SSIDs are arbitrary bytes on the air; most are UTF-8 but nothing requires it.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Ssid(Vec<u8>);

impl Ssid {
    /// Create an SSID, rejecting anything longer than 32 bytes.
    pub fn new(bytes: impl AsRef<[u8]>) -> Result<Self, WifiTypeError> {
        let bytes = bytes.as_ref();
        if bytes.len() > SSID_MAX_LEN {
            return Err(WifiTypeError::SsidTooLong(bytes.len()));
        }
        Ok(Self(bytes.to_vec()))
    }

    /// Read a NUL-terminated SSID from a driver buffer.
    ///
    /// At most 32 bytes are read even when no NUL is present.
    pub fn from_c_buffer(buf: &[u8]) -> Self {
        let bytes = until_nul(buf);
        Self(bytes[..bytes.len().min(SSID_MAX_LEN)].to_vec())
    }

    /// Read an SSID with an explicit length; a length of 0 means NUL-terminated.
    pub fn from_c_buffer_with_len(buf: &[u8], len: u8) -> Self {
        if len == 0 {
            return Self::from_c_buffer(buf);
        }
        let len = usize::from(len).min(SSID_MAX_LEN).min(buf.len());
        Self(buf[..len].to_vec())
    }

    /// Zero-padded copy for the driver's 32-byte buffer.
    pub fn to_c_buffer(&self) -> [u8; SSID_MAX_LEN] {
        zero_padded(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// True if any byte is NUL. Only the soft-AP config carries an explicit
    /// SSID length; elsewhere the driver stops at the first NUL.
    pub fn contains_nul(&self) -> bool {
        self.0.contains(&0)
    }

    /// The SSID as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<&str> for Ssid {
    type Error = WifiTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&[u8]> for Ssid {
    type Error = WifiTypeError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Ssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for Ssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ssid({:?})", String::from_utf8_lossy(&self.0))
    }
}

impl Serialize for Ssid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_bytes(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Ssid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = deserializer.deserialize_any(BytesVisitor)?;
        Ssid::new(bytes).map_err(de::Error::custom)
    }
}

// ============================================================================
// Password
// ============================================================================

/// A passphrase of at most 64 bytes. Its `Debug` output is redacted.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Password(Vec<u8>);

impl Password {
    /// Create a password, rejecting anything longer than 64 bytes or
    /// containing a NUL byte. The driver reads the password as a C string.
    pub fn new(bytes: impl AsRef<[u8]>) -> Result<Self, WifiTypeError> {
        let bytes = bytes.as_ref();
        if bytes.len() > PASSWORD_MAX_LEN {
            return Err(WifiTypeError::PasswordTooLong(bytes.len()));
        }
        if bytes.contains(&0) {
            return Err(WifiTypeError::ContainsNul { field: "password" });
        }
        Ok(Self(bytes.to_vec()))
    }

    /// Read a NUL-terminated password from a driver buffer.
    pub fn from_c_buffer(buf: &[u8]) -> Self {
        let bytes = until_nul(buf);
        Self(bytes[..bytes.len().min(PASSWORD_MAX_LEN)].to_vec())
    }

    /// Zero-padded copy for the driver's 64-byte buffer.
    pub fn to_c_buffer(&self) -> [u8; PASSWORD_MAX_LEN] {
        zero_padded(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<&str> for Password {
    type Error = WifiTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**REDACTED**)")
    }
}

impl Serialize for Password {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_bytes(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Password {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = deserializer.deserialize_any(BytesVisitor)?;
        Password::new(bytes).map_err(de::Error::custom)
    }
}
