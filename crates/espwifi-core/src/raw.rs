//! `#[repr(C)]` mirrors of the driver's WiFi structs.
//!
//! CRITICAL: field order, widths and signedness must match the driver's
//! headers exactly. C enums are `int`-sized, so every enum field is a `u32`
//! holding the enumerant value.
//!
//! Conversions to the typed layer are `TryFrom` because the driver may hand
//! back enumerant values this crate does not know.

#![allow(non_camel_case_types)]

use std::ffi::{c_char, CStr};
use std::fmt;
use std::marker::PhantomData;
use std::ptr;

use tracing::debug;

use crate::auth::AuthMode;
use crate::config::{ApConfig, StaConfig, WifiConfig};
use crate::error::WifiTypeError;
use crate::mode::WifiInterface;
use crate::primitives::{
    MacAddress, Password, Ssid, MAC_LEN, PASSWORD_MAX_LEN, SSID_MAX_LEN,
};
use crate::scan::{ApRecord, ScanConfig, SecondChannel};
use crate::station::{StationInfo, StationList, MAX_CONN_NUM};

pub type wifi_mode_t = u32;
pub type wifi_interface_t = u32;
pub type wifi_country_t = u32;
pub type wifi_auth_mode_t = u32;
pub type wifi_second_chan_t = u32;
pub type wifi_ps_type_t = u32;
pub type wifi_bandwidth_t = u32;
pub type wifi_storage_t = u32;
pub type wifi_vendor_ie_type_t = u32;
pub type wifi_vendor_ie_id_t = u32;

pub const WIFI_PROTOCOL_11B: u8 = 1;
pub const WIFI_PROTOCOL_11G: u8 = 2;
pub const WIFI_PROTOCOL_11N: u8 = 4;

pub const ESP_WIFI_MAX_CONN_NUM: usize = MAX_CONN_NUM;

// ============================================================================
// Scan
// ============================================================================

/// Scan parameters as passed to the driver.
///
/// The pointers borrow the buffers of the [`ScanConfig`] this was built from,
/// which the lifetime ties to this value. Null means "no filter".
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct wifi_scan_config_t<'a> {
    pub ssid: *const c_char,
    pub bssid: *const u8,
    pub channel: u8,
    pub show_hidden: bool,
    _borrow: PhantomData<&'a [u8]>,
}

impl<'a> wifi_scan_config_t<'a> {
    pub fn from_typed(config: &ScanConfig<'a>) -> Result<Self, WifiTypeError> {
        config.validate()?;
        let ssid = config.ssid_cstr()?.map_or(ptr::null(), CStr::as_ptr);
        let bssid = config.bssid.map_or(ptr::null(), |mac| mac.0.as_ptr());

        Ok(Self {
            ssid,
            bssid,
            channel: config.channel,
            show_hidden: config.show_hidden,
            _borrow: PhantomData,
        })
    }
}

/// One scan result as written by the driver.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct wifi_ap_record_t {
    pub bssid: [u8; MAC_LEN],
    pub ssid: [u8; SSID_MAX_LEN],
    pub primary: u8,
    pub second: wifi_second_chan_t,
    pub rssi: i8,
    pub authmode: wifi_auth_mode_t,
}

impl From<&ApRecord> for wifi_ap_record_t {
    fn from(record: &ApRecord) -> Self {
        Self {
            bssid: record.bssid.octets(),
            ssid: record.ssid.to_c_buffer(),
            primary: record.primary,
            second: record.second.to_raw(),
            rssi: record.rssi,
            authmode: record.authmode.to_raw(),
        }
    }
}

impl TryFrom<&wifi_ap_record_t> for ApRecord {
    type Error = WifiTypeError;

    fn try_from(raw: &wifi_ap_record_t) -> Result<Self, Self::Error> {
        Ok(Self {
            bssid: MacAddress::new(raw.bssid),
            ssid: Ssid::from_c_buffer(&raw.ssid),
            primary: raw.primary,
            second: SecondChannel::from_raw(raw.second)?,
            rssi: raw.rssi,
            authmode: AuthMode::from_raw(raw.authmode)?,
        })
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Soft-AP configuration as stored by the driver.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct wifi_ap_config_t {
    pub ssid: [u8; SSID_MAX_LEN],
    pub password: [u8; PASSWORD_MAX_LEN],
    /// 0 means the SSID is NUL-terminated.
    pub ssid_len: u8,
    pub channel: u8,
    pub authmode: wifi_auth_mode_t,
    pub ssid_hidden: u8,
    pub max_connection: u8,
    pub beacon_interval: u16,
}

impl From<&ApConfig> for wifi_ap_config_t {
    fn from(config: &ApConfig) -> Self {
        Self {
            ssid: config.ssid.to_c_buffer(),
            password: config.password.to_c_buffer(),
            // The SSID may contain NUL bytes.
            ssid_len: config.ssid.len() as u8,
            channel: config.channel,
            authmode: config.authmode.to_raw(),
            ssid_hidden: u8::from(config.ssid_hidden),
            max_connection: config.max_connection,
            beacon_interval: config.beacon_interval,
        }
    }
}

impl TryFrom<&wifi_ap_config_t> for ApConfig {
    type Error = WifiTypeError;

    fn try_from(raw: &wifi_ap_config_t) -> Result<Self, Self::Error> {
        if usize::from(raw.ssid_len) > SSID_MAX_LEN {
            debug!(
                "Soft-AP ssid_len {} exceeds buffer, clamping to {}",
                raw.ssid_len, SSID_MAX_LEN
            );
        }
        Ok(Self {
            ssid: Ssid::from_c_buffer_with_len(&raw.ssid, raw.ssid_len),
            password: Password::from_c_buffer(&raw.password),
            channel: raw.channel,
            authmode: AuthMode::from_raw(raw.authmode)?,
            ssid_hidden: raw.ssid_hidden != 0,
            max_connection: raw.max_connection,
            beacon_interval: raw.beacon_interval,
        })
    }
}

/// Station configuration as stored by the driver.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct wifi_sta_config_t {
    pub ssid: [u8; SSID_MAX_LEN],
    pub password: [u8; PASSWORD_MAX_LEN],
    /// Only connect to `bssid` when set.
    pub bssid_set: bool,
    pub bssid: [u8; MAC_LEN],
}

impl From<&StaConfig> for wifi_sta_config_t {
    fn from(config: &StaConfig) -> Self {
        Self {
            ssid: config.ssid.to_c_buffer(),
            password: config.password.to_c_buffer(),
            bssid_set: config.bssid.is_some(),
            bssid: config.bssid.unwrap_or_default().octets(),
        }
    }
}

impl From<&wifi_sta_config_t> for StaConfig {
    fn from(raw: &wifi_sta_config_t) -> Self {
        Self {
            ssid: Ssid::from_c_buffer(&raw.ssid),
            password: Password::from_c_buffer(&raw.password),
            bssid: raw.bssid_set.then(|| MacAddress::new(raw.bssid)),
        }
    }
}

/// The driver's configuration union. The interface passed alongside it
/// selects the valid field.
#[repr(C)]
#[derive(Clone, Copy)]
pub union wifi_config_t {
    pub ap: wifi_ap_config_t,
    pub sta: wifi_sta_config_t,
}

impl wifi_config_t {
    pub fn from_typed(config: &WifiConfig) -> Self {
        match config {
            WifiConfig::AccessPoint(ap) => Self { ap: ap.into() },
            WifiConfig::Station(sta) => Self { sta: sta.into() },
        }
    }

    /// Read the field selected by `interface`.
    ///
    /// # Safety
    ///
    /// `interface` must name the field that was last written, either by
    /// [`wifi_config_t::from_typed`] with a config for that interface or by
    /// the driver when queried for that interface.
    pub unsafe fn to_typed(&self, interface: WifiInterface) -> Result<WifiConfig, WifiTypeError> {
        match interface {
            WifiInterface::Ap => {
                // SAFETY: caller guarantees `ap` is the active field.
                let ap = unsafe { &self.ap };
                ApConfig::try_from(ap).map(WifiConfig::AccessPoint)
            }
            WifiInterface::Sta => {
                // SAFETY: caller guarantees `sta` is the active field.
                let sta = unsafe { &self.sta };
                Ok(WifiConfig::Station(StaConfig::from(sta)))
            }
        }
    }
}

impl fmt::Debug for wifi_config_t {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("wifi_config_t { .. }")
    }
}

// ============================================================================
// Station list
// ============================================================================

/// A station associated with the soft-AP.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct wifi_sta_info_t {
    pub mac: [u8; MAC_LEN],
}

/// Stations associated with the soft-AP; only the first `num` are valid.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct wifi_sta_list_t {
    pub sta: [wifi_sta_info_t; ESP_WIFI_MAX_CONN_NUM],
    pub num: u8,
}

impl From<&StationList> for wifi_sta_list_t {
    fn from(list: &StationList) -> Self {
        let mut raw = Self::default();
        for (slot, station) in raw.sta.iter_mut().zip(list.iter()) {
            slot.mac = station.mac.octets();
        }
        raw.num = list.num();
        raw
    }
}

impl TryFrom<&wifi_sta_list_t> for StationList {
    type Error = WifiTypeError;

    fn try_from(raw: &wifi_sta_list_t) -> Result<Self, Self::Error> {
        let count = usize::from(raw.num);
        if count > ESP_WIFI_MAX_CONN_NUM {
            return Err(WifiTypeError::StationCountOutOfRange {
                count: raw.num,
                capacity: ESP_WIFI_MAX_CONN_NUM,
            });
        }
        let stations: Vec<StationInfo> = raw.sta[..count]
            .iter()
            .map(|s| StationInfo::from(MacAddress::new(s.mac)))
            .collect();
        StationList::try_from(stations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::mem::{align_of, offset_of, size_of};

    #[test]
    fn test_ap_record_layout() {
        assert_eq!(offset_of!(wifi_ap_record_t, bssid), 0);
        assert_eq!(offset_of!(wifi_ap_record_t, ssid), 6);
        assert_eq!(offset_of!(wifi_ap_record_t, primary), 38);
        assert_eq!(offset_of!(wifi_ap_record_t, second), 40);
        assert_eq!(offset_of!(wifi_ap_record_t, rssi), 44);
        assert_eq!(offset_of!(wifi_ap_record_t, authmode), 48);
        assert_eq!(size_of::<wifi_ap_record_t>(), 52);
    }

    #[test]
    fn test_ap_config_layout() {
        assert_eq!(offset_of!(wifi_ap_config_t, password), 32);
        assert_eq!(offset_of!(wifi_ap_config_t, ssid_len), 96);
        assert_eq!(offset_of!(wifi_ap_config_t, channel), 97);
        assert_eq!(offset_of!(wifi_ap_config_t, authmode), 100);
        assert_eq!(offset_of!(wifi_ap_config_t, ssid_hidden), 104);
        assert_eq!(offset_of!(wifi_ap_config_t, max_connection), 105);
        assert_eq!(offset_of!(wifi_ap_config_t, beacon_interval), 106);
        assert_eq!(size_of::<wifi_ap_config_t>(), 108);
    }

    #[test]
    fn test_sta_config_layout() {
        assert_eq!(offset_of!(wifi_sta_config_t, password), 32);
        assert_eq!(offset_of!(wifi_sta_config_t, bssid_set), 96);
        assert_eq!(offset_of!(wifi_sta_config_t, bssid), 97);
        assert_eq!(size_of::<wifi_sta_config_t>(), 103);
    }

    #[test]
    fn test_config_union_fits_larger_variant() {
        let larger = size_of::<wifi_ap_config_t>().max(size_of::<wifi_sta_config_t>());
        assert_eq!(size_of::<wifi_config_t>(), larger);
        assert_eq!(size_of::<wifi_config_t>(), 108);
        assert_eq!(align_of::<wifi_config_t>(), 4);
    }

    #[test]
    fn test_station_list_layout() {
        assert_eq!(size_of::<wifi_sta_info_t>(), 6);
        assert_eq!(offset_of!(wifi_sta_list_t, num), 60);
        assert_eq!(size_of::<wifi_sta_list_t>(), 61);
    }

    #[test]
    fn test_scan_config_layout() {
        let ptr = size_of::<*const u8>();
        assert_eq!(offset_of!(wifi_scan_config_t<'static>, bssid), ptr);
        assert_eq!(offset_of!(wifi_scan_config_t<'static>, channel), 2 * ptr);
        assert_eq!(offset_of!(wifi_scan_config_t<'static>, show_hidden), 2 * ptr + 1);
        assert_eq!(
            size_of::<wifi_scan_config_t<'static>>(),
            (2 * ptr + 2).next_multiple_of(ptr)
        );
    }

    #[test]
    fn test_scan_config_borrows_caller_buffers() {
        let ssid = b"cafe\0";
        let bssid = MacAddress::new([1, 2, 3, 4, 5, 6]);
        let config = ScanConfig::all_channels()
            .with_ssid(ssid)
            .with_bssid(&bssid)
            .with_channel(6);

        let raw = wifi_scan_config_t::from_typed(&config).unwrap();
        assert_eq!(raw.ssid as *const u8, ssid.as_ptr());
        assert_eq!(raw.bssid, bssid.0.as_ptr());
        assert_eq!(raw.channel, 6);
        assert!(!raw.show_hidden);
    }

    #[test]
    fn test_scan_config_without_filters_is_null() {
        let raw = wifi_scan_config_t::from_typed(&ScanConfig::all_channels()).unwrap();
        assert!(raw.ssid.is_null());
        assert!(raw.bssid.is_null());
        assert_eq!(raw.channel, 0);
    }

    #[test]
    fn test_scan_config_rejects_unterminated_ssid() {
        let config = ScanConfig::all_channels().with_ssid(b"cafe");
        assert_eq!(
            wifi_scan_config_t::from_typed(&config).unwrap_err(),
            WifiTypeError::SsidFilterNotTerminated
        );
    }

    #[test]
    fn test_ap_record_conversion() {
        let record = ApRecord {
            bssid: MacAddress::new([0x24, 0x0a, 0xc4, 0x11, 0x22, 0x33]),
            ssid: Ssid::try_from("cafe").unwrap(),
            primary: 6,
            second: SecondChannel::Below,
            rssi: -71,
            authmode: AuthMode::WpaWpa2Psk,
        };
        let raw = wifi_ap_record_t::from(&record);
        assert_eq!(raw.second, 2);
        assert_eq!(raw.authmode, 4);
        assert_eq!(raw.rssi, -71);
        assert_eq!(ApRecord::try_from(&raw).unwrap(), record);
    }

    #[test]
    fn test_ap_record_unknown_authmode() {
        let mut raw = wifi_ap_record_t::from(&ApRecord::default());
        raw.authmode = 9;
        assert_eq!(
            ApRecord::try_from(&raw).unwrap_err(),
            WifiTypeError::UnknownValue {
                kind: "auth mode",
                value: 9
            }
        );
    }

    #[test]
    fn test_config_union_ap() {
        let ap = ApConfig::new(
            Ssid::try_from("esp-ap").unwrap(),
            Password::try_from("password123").unwrap(),
            AuthMode::Wpa2Psk,
        )
        .with_hidden(true);
        let config = WifiConfig::AccessPoint(ap.clone());

        let raw = wifi_config_t::from_typed(&config);
        // SAFETY: written as an AP config just above.
        let fields = unsafe { raw.ap };
        assert_eq!(fields.ssid_len, 6);
        assert_eq!(fields.ssid_hidden, 1);
        assert_eq!(fields.authmode, AuthMode::Wpa2Psk.to_raw());

        // SAFETY: same field as written.
        let back = unsafe { raw.to_typed(WifiInterface::Ap) }.unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_config_union_sta() {
        let sta = StaConfig::new(
            Ssid::try_from("home").unwrap(),
            Password::try_from("secret-pass").unwrap(),
        )
        .with_bssid(MacAddress::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]));
        let config = WifiConfig::Station(sta);

        let raw = wifi_config_t::from_typed(&config);
        // SAFETY: written as a station config just above.
        let fields = unsafe { raw.sta };
        assert!(fields.bssid_set);
        assert_eq!(fields.bssid, [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);

        // SAFETY: same field as written.
        let back = unsafe { raw.to_typed(WifiInterface::Sta) }.unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_sta_without_bssid() {
        let raw = wifi_sta_config_t::from(&StaConfig::default());
        assert!(!raw.bssid_set);
        assert_eq!(raw.bssid, [0; 6]);
        assert_eq!(StaConfig::from(&raw).bssid, None);
    }

    #[test]
    fn test_ap_config_nul_terminated_ssid() {
        let mut raw = wifi_ap_config_t::from(&ApConfig::default());
        raw.ssid[..4].copy_from_slice(b"mesh");
        raw.ssid_len = 0;
        let ap = ApConfig::try_from(&raw).unwrap();
        assert_eq!(ap.ssid.as_str(), Some("mesh"));
    }

    #[test]
    fn test_station_list_conversion() {
        let mut list = StationList::new();
        list.push(MacAddress::new([2, 0, 0, 0, 0, 1]).into()).unwrap();
        list.push(MacAddress::new([2, 0, 0, 0, 0, 2]).into()).unwrap();

        let raw = wifi_sta_list_t::from(&list);
        assert_eq!(raw.num, 2);
        assert_eq!(raw.sta[1].mac, [2, 0, 0, 0, 0, 2]);
        assert_eq!(raw.sta[2].mac, [0; 6]);
        assert_eq!(StationList::try_from(&raw).unwrap(), list);
    }

    #[test]
    fn test_station_list_count_out_of_range() {
        let raw = wifi_sta_list_t {
            num: 11,
            ..Default::default()
        };
        assert_eq!(
            StationList::try_from(&raw).unwrap_err(),
            WifiTypeError::StationCountOutOfRange {
                count: 11,
                capacity: 10
            }
        );
    }
}
