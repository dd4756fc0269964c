//! JSON codec for the WiFi documents.
//!
//! Decoding a [`ConfigDocument`] also validates it, so a document read back
//! from storage is never handed out with a config the driver would reject.

use chrono::DateTime;
use espwifi_core::{WifiConfig, WifiTypeError};
use thiserror::Error;
use tracing::warn;

use crate::messages::{ConfigDocument, ScanReport};

/// Errors that can occur during encoding/decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Buffer ends before the record does.
    #[error("Buffer too short: need {needed} bytes, got {got}")]
    ShortBuffer { needed: usize, got: usize },

    /// A decoded field holds a value the WiFi types reject.
    #[error("Invalid field: {0}")]
    Invalid(#[from] WifiTypeError),

    /// Tagged config frame starts with an unknown interface byte.
    #[error("Unknown interface tag: {0}")]
    UnknownInterface(u8),

    /// Scan report timestamp is not RFC 3339.
    #[error("Invalid timestamp {timestamp:?}: {reason}")]
    InvalidTimestamp { timestamp: String, reason: String },

    /// Scan report `count` disagrees with its record list.
    #[error("Record count {count} does not match {records} records")]
    CountMismatch { count: usize, records: usize },
}

/// Encode a scan report to compact JSON.
pub fn encode_scan_report(report: &ScanReport) -> Result<String, CodecError> {
    serde_json::to_string(report).map_err(CodecError::from)
}

/// Decode a scan report. The timestamp must be RFC 3339 and `count` must
/// equal the number of records.
pub fn decode_scan_report(text: &str) -> Result<ScanReport, CodecError> {
    let report: ScanReport = serde_json::from_str(text)?;
    if let Err(e) = DateTime::parse_from_rfc3339(&report.timestamp) {
        warn!("Rejecting scan report timestamp {:?}: {}", report.timestamp, e);
        return Err(CodecError::InvalidTimestamp {
            timestamp: report.timestamp,
            reason: e.to_string(),
        });
    }
    if report.count != report.records.len() {
        warn!(
            "Rejecting scan report: count {} with {} records",
            report.count,
            report.records.len()
        );
        return Err(CodecError::CountMismatch {
            count: report.count,
            records: report.records.len(),
        });
    }
    Ok(report)
}

/// Encode a config document to pretty-printed JSON, the form kept on disk.
pub fn encode_config_document(doc: &ConfigDocument) -> Result<String, CodecError> {
    serde_json::to_string_pretty(doc).map_err(CodecError::from)
}

/// Decode and validate a config document.
pub fn decode_config_document(text: &str) -> Result<ConfigDocument, CodecError> {
    let doc: ConfigDocument = serde_json::from_str(text)?;
    if let Err(e) = doc.validate() {
        warn!("Rejecting config document: {}", e);
        return Err(e.into());
    }
    Ok(doc)
}

/// Encode a single interface config as `{"interface": "sta" | "ap", ...}`.
pub fn encode_config(config: &WifiConfig) -> Result<String, CodecError> {
    serde_json::to_string(config).map_err(CodecError::from)
}

/// Decode and validate a single interface config.
pub fn decode_config(text: &str) -> Result<WifiConfig, CodecError> {
    let config: WifiConfig = serde_json::from_str(text)?;
    config.validate()?;
    Ok(config)
}
