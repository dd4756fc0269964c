//! Stations associated with the soft-AP.

use serde::{Deserialize, Serialize};

use crate::error::WifiTypeError;
use crate::primitives::MacAddress;

/// Capacity of the driver's station list (8 + 2).
pub const MAX_CONN_NUM: usize = 8 + 2;

/// A station associated with the soft-AP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StationInfo {
    pub mac: MacAddress,
}

impl From<MacAddress> for StationInfo {
    fn from(mac: MacAddress) -> Self {
        Self { mac }
    }
}

/// Stations currently associated with the soft-AP, at most [`MAX_CONN_NUM`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StationInfo>", into = "Vec<StationInfo>")]
pub struct StationList {
    stations: Vec<StationInfo>,
}

impl StationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a station. Fails once the list holds [`MAX_CONN_NUM`] entries.
    pub fn push(&mut self, station: StationInfo) -> Result<(), WifiTypeError> {
        if self.stations.len() >= MAX_CONN_NUM {
            return Err(WifiTypeError::StationListFull(MAX_CONN_NUM));
        }
        self.stations.push(station);
        Ok(())
    }

    /// Remove a station by MAC. Returns true if it was present.
    pub fn remove(&mut self, mac: &MacAddress) -> bool {
        let before = self.stations.len();
        self.stations.retain(|s| s.mac != *mac);
        self.stations.len() != before
    }

    pub fn contains(&self, mac: &MacAddress) -> bool {
        self.stations.iter().any(|s| s.mac == *mac)
    }

    /// Number of associated stations.
    pub fn num(&self) -> u8 {
        // Bounded by MAX_CONN_NUM.
        self.stations.len() as u8
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.stations.len() == MAX_CONN_NUM
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StationInfo> {
        self.stations.iter()
    }

    pub fn as_slice(&self) -> &[StationInfo] {
        &self.stations
    }
}

impl TryFrom<Vec<StationInfo>> for StationList {
    type Error = WifiTypeError;

    fn try_from(stations: Vec<StationInfo>) -> Result<Self, Self::Error> {
        if stations.len() > MAX_CONN_NUM {
            return Err(WifiTypeError::StationCountOutOfRange {
                count: stations.len().min(usize::from(u8::MAX)) as u8,
                capacity: MAX_CONN_NUM,
            });
        }
        Ok(Self { stations })
    }
}

impl From<StationList> for Vec<StationInfo> {
    fn from(list: StationList) -> Self {
        list.stations
    }
}

impl<'a> IntoIterator for &'a StationList {
    type Item = &'a StationInfo;
    type IntoIter = std::slice::Iter<'a, StationInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.stations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mac(n: u8) -> MacAddress {
        MacAddress::new([0x02, 0, 0, 0, 0, n])
    }

    #[test]
    fn test_capacity_is_ten() {
        let mut list = StationList::new();
        for n in 0..10 {
            list.push(mac(n).into()).unwrap();
        }
        assert!(list.is_full());
        assert_eq!(list.num(), 10);
        assert_eq!(
            list.push(mac(10).into()).unwrap_err(),
            WifiTypeError::StationListFull(10)
        );
    }

    #[test]
    fn test_remove_and_contains() {
        let mut list = StationList::new();
        list.push(mac(1).into()).unwrap();
        list.push(mac(2).into()).unwrap();
        assert!(list.contains(&mac(2)));
        assert!(list.remove(&mac(2)));
        assert!(!list.remove(&mac(2)));
        assert_eq!(list.iter().map(|s| s.mac).collect::<Vec<_>>(), vec![mac(1)]);
    }

    #[test]
    fn test_json_rejects_overflow() {
        let macs: Vec<String> = (0..11)
            .map(|n| format!("\"{}\"", mac(n)))
            .map(|m| format!("{{\"mac\":{}}}", m))
            .collect();
        let json = format!("[{}]", macs.join(","));
        assert!(serde_json::from_str::<StationList>(&json).is_err());

        let ok = format!("[{}]", macs[..3].join(","));
        let list: StationList = serde_json::from_str(&ok).unwrap();
        assert_eq!(list.len(), 3);
    }
}
