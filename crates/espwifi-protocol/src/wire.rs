//! Packed binary form of the WiFi records.
//!
//! Records are laid out with 1-byte alignment and 1-byte enum fields, and
//! multi-byte integers are little-endian. This is the form used between
//! devices built with packed structs and short enums; it is NOT the layout
//! of the `raw` structs, which follow natural alignment.
//!
//! Encoding goes typed -> raw -> bytes and decoding reverses it, so both
//! directions share the raw layer's conversions and checks.

use espwifi_core::raw::{
    wifi_ap_config_t, wifi_ap_record_t, wifi_sta_config_t, wifi_sta_info_t, wifi_sta_list_t,
    ESP_WIFI_MAX_CONN_NUM,
};
use espwifi_core::{
    ApConfig, ApRecord, StaConfig, StationList, WifiConfig, WifiInterface, WifiTypeError,
};
use tracing::debug;

use crate::codec::CodecError;

/// bssid 6, ssid 32, primary 1, second 1, rssi 1, authmode 1.
pub const AP_RECORD_LEN: usize = 42;

/// ssid 32, password 64, ssid_len 1, channel 1, authmode 1, ssid_hidden 1,
/// max_connection 1, beacon_interval 2.
pub const AP_CONFIG_LEN: usize = 103;

/// ssid 32, password 64, bssid_set 1, bssid 6.
pub const STA_CONFIG_LEN: usize = 103;

/// 10 x mac 6, num 1.
pub const STATION_LIST_LEN: usize = ESP_WIFI_MAX_CONN_NUM * 6 + 1;

/// Cursor over a buffer whose length was checked up front.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8], needed: usize) -> Result<Self, CodecError> {
        if buf.len() < needed {
            return Err(CodecError::ShortBuffer {
                needed,
                got: buf.len(),
            });
        }
        Ok(Self { buf, pos: 0 })
    }

    fn bytes<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    fn u8(&mut self) -> u8 {
        let [b] = self.bytes::<1>();
        b
    }

    /// A 1-byte enum field, widened to the raw enumerant width.
    fn enum_u8(&mut self) -> u32 {
        u32::from(self.u8())
    }

    fn u16_le(&mut self) -> u16 {
        u16::from_le_bytes(self.bytes())
    }
}

/// Narrow a raw enumerant to its 1-byte wire form. Every enumerant the
/// typed layer produces fits.
fn enum_byte(value: u32) -> u8 {
    value as u8
}

// ============================================================================
// AP record
// ============================================================================

pub fn write_ap_record(out: &mut Vec<u8>, record: &ApRecord) {
    let raw = wifi_ap_record_t::from(record);
    out.extend_from_slice(&raw.bssid);
    out.extend_from_slice(&raw.ssid);
    out.push(raw.primary);
    out.push(enum_byte(raw.second));
    out.extend_from_slice(&raw.rssi.to_le_bytes());
    out.push(enum_byte(raw.authmode));
}

pub fn encode_ap_record(record: &ApRecord) -> Vec<u8> {
    let mut out = Vec::with_capacity(AP_RECORD_LEN);
    write_ap_record(&mut out, record);
    out
}

/// Decode one AP record from the start of `buf`.
pub fn decode_ap_record(buf: &[u8]) -> Result<ApRecord, CodecError> {
    let mut r = Reader::new(buf, AP_RECORD_LEN)?;
    let raw = wifi_ap_record_t {
        bssid: r.bytes(),
        ssid: r.bytes(),
        primary: r.u8(),
        second: r.enum_u8(),
        rssi: i8::from_le_bytes(r.bytes()),
        authmode: r.enum_u8(),
    };
    Ok(ApRecord::try_from(&raw)?)
}

/// Encode records back to back.
pub fn encode_ap_records(records: &[ApRecord]) -> Vec<u8> {
    let mut out = Vec::with_capacity(records.len() * AP_RECORD_LEN);
    for record in records {
        write_ap_record(&mut out, record);
    }
    out
}

/// Decode a buffer of back-to-back records. The length must be a whole
/// number of records.
pub fn decode_ap_records(buf: &[u8]) -> Result<Vec<ApRecord>, CodecError> {
    let chunks = buf.chunks_exact(AP_RECORD_LEN);
    let rest = chunks.remainder().len();
    if rest != 0 {
        return Err(CodecError::ShortBuffer {
            needed: AP_RECORD_LEN,
            got: rest,
        });
    }
    let records = chunks.map(decode_ap_record).collect::<Result<Vec<_>, _>>()?;
    debug!("Decoded {} AP records", records.len());
    Ok(records)
}

// ============================================================================
// Configuration
// ============================================================================

pub fn write_ap_config(out: &mut Vec<u8>, config: &ApConfig) {
    let raw = wifi_ap_config_t::from(config);
    out.extend_from_slice(&raw.ssid);
    out.extend_from_slice(&raw.password);
    out.push(raw.ssid_len);
    out.push(raw.channel);
    out.push(enum_byte(raw.authmode));
    out.push(raw.ssid_hidden);
    out.push(raw.max_connection);
    out.extend_from_slice(&raw.beacon_interval.to_le_bytes());
}

pub fn decode_ap_config(buf: &[u8]) -> Result<ApConfig, CodecError> {
    let mut r = Reader::new(buf, AP_CONFIG_LEN)?;
    let raw = wifi_ap_config_t {
        ssid: r.bytes(),
        password: r.bytes(),
        ssid_len: r.u8(),
        channel: r.u8(),
        authmode: r.enum_u8(),
        ssid_hidden: r.u8(),
        max_connection: r.u8(),
        beacon_interval: r.u16_le(),
    };
    Ok(ApConfig::try_from(&raw)?)
}

pub fn write_sta_config(out: &mut Vec<u8>, config: &StaConfig) {
    let raw = wifi_sta_config_t::from(config);
    out.extend_from_slice(&raw.ssid);
    out.extend_from_slice(&raw.password);
    out.push(u8::from(raw.bssid_set));
    out.extend_from_slice(&raw.bssid);
}

pub fn decode_sta_config(buf: &[u8]) -> Result<StaConfig, CodecError> {
    let mut r = Reader::new(buf, STA_CONFIG_LEN)?;
    let raw = wifi_sta_config_t {
        ssid: r.bytes(),
        password: r.bytes(),
        bssid_set: r.u8() != 0,
        bssid: r.bytes(),
    };
    Ok(StaConfig::from(&raw))
}

/// Encode a config as a tagged frame: the interface byte, then the config.
pub fn encode_config(config: &WifiConfig) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + AP_CONFIG_LEN.max(STA_CONFIG_LEN));
    out.push(enum_byte(config.interface().to_raw()));
    match config {
        WifiConfig::AccessPoint(ap) => write_ap_config(&mut out, ap),
        WifiConfig::Station(sta) => write_sta_config(&mut out, sta),
    }
    out
}

/// Decode a tagged config frame.
pub fn decode_config(buf: &[u8]) -> Result<WifiConfig, CodecError> {
    let (&tag, body) = buf
        .split_first()
        .ok_or(CodecError::ShortBuffer { needed: 1, got: 0 })?;
    let interface = WifiInterface::from_raw(u32::from(tag))
        .map_err(|_| CodecError::UnknownInterface(tag))?;
    match interface {
        WifiInterface::Ap => decode_ap_config(body).map(WifiConfig::AccessPoint),
        WifiInterface::Sta => decode_sta_config(body).map(WifiConfig::Station),
    }
}

// ============================================================================
// Station list
// ============================================================================

pub fn encode_station_list(list: &StationList) -> Vec<u8> {
    let raw = wifi_sta_list_t::from(list);
    let mut out = Vec::with_capacity(STATION_LIST_LEN);
    for station in &raw.sta {
        out.extend_from_slice(&station.mac);
    }
    out.push(raw.num);
    out
}

/// Decode a station list. A count above the capacity is rejected.
pub fn decode_station_list(buf: &[u8]) -> Result<StationList, CodecError> {
    let mut r = Reader::new(buf, STATION_LIST_LEN)?;
    let mut raw = wifi_sta_list_t::default();
    for station in raw.sta.iter_mut() {
        *station = wifi_sta_info_t { mac: r.bytes() };
    }
    raw.num = r.u8();
    Ok(StationList::try_from(&raw)?)
}
