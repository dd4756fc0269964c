//! # espwifi-protocol
//!
//! Serialized forms of the WiFi types.
//!
//! - [`messages`]: JSON documents for scan reports and persisted configuration
//! - [`codec`]: JSON encode/decode and the shared [`CodecError`]
//! - [`wire`]: packed little-endian records for transport between devices

pub mod codec;
pub mod messages;
pub mod wire;

pub use codec::CodecError;
pub use messages::*;
