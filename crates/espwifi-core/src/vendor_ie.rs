//! Selectors for vendor-specific information elements.

use serde::{Deserialize, Serialize};

raw_enum! {
    /// Management frame subtype a vendor IE is attached to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum VendorIeType as "vendor IE type" {
        Beacon = 0,
        ProbeReq = 1,
        ProbeResp = 2,
        AssocReq = 3,
        AssocResp = 4,
    }
}

impl VendorIeType {
    /// True for frames a soft-AP sends (beacons and responses).
    pub fn sent_by_ap(&self) -> bool {
        matches!(self, Self::Beacon | Self::ProbeResp | Self::AssocResp)
    }
}

raw_enum! {
    /// Slot index; each frame type carries up to two vendor IEs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum VendorIeId as "vendor IE index" {
        Id0 = 0,
        Id1 = 1,
    }
}
