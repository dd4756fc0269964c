//! Deauthentication and disassociation reason codes.
//!
//! Codes 1-24 are the IEEE 802.11 reason codes (12 is unused by the driver).
//! Codes 200 and above are reported by the ESP32 driver itself.

use std::fmt;

use serde::{Deserialize, Serialize};

raw_enum! {
    /// Reason a station was disconnected from an access point.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum DisconnectReason as "disconnect reason" {
        Unspecified = 1,
        AuthExpire = 2,
        AuthLeave = 3,
        AssocExpire = 4,
        AssocTooMany = 5,
        NotAuthed = 6,
        NotAssoced = 7,
        AssocLeave = 8,
        AssocNotAuthed = 9,
        DisassocPwrcapBad = 10,
        DisassocSupchanBad = 11,
        IeInvalid = 13,
        MicFailure = 14,
        #[serde(rename = "4way_handshake_timeout")]
        FourWayHandshakeTimeout = 15,
        GroupKeyUpdateTimeout = 16,
        #[serde(rename = "ie_in_4way_differs")]
        IeIn4WayDiffers = 17,
        GroupCipherInvalid = 18,
        PairwiseCipherInvalid = 19,
        AkmpInvalid = 20,
        UnsuppRsnIeVersion = 21,
        InvalidRsnIeCap = 22,
        #[serde(rename = "802_1x_auth_failed")]
        Ieee8021xAuthFailed = 23,
        CipherSuiteRejected = 24,

        BeaconTimeout = 200,
        NoApFound = 201,
        AuthFail = 202,
        AssocFail = 203,
        HandshakeTimeout = 204,
    }
}

impl DisconnectReason {
    /// First code reported by the driver rather than the 802.11 peer.
    pub const VENDOR_BASE: u8 = 200;

    /// Look up a reason from the 8-bit code carried in disconnect events.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::from_raw(u32::from(code)).ok()
    }

    /// The 8-bit reason code.
    pub fn code(&self) -> u8 {
        // Every discriminant is below 256.
        self.to_raw() as u8
    }

    /// True for codes raised by the driver itself (200 and above).
    pub fn is_vendor(&self) -> bool {
        self.code() >= Self::VENDOR_BASE
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified reason",
            Self::AuthExpire => "previous authentication no longer valid",
            Self::AuthLeave => "deauthenticated because sending station is leaving",
            Self::AssocExpire => "disassociated due to inactivity",
            Self::AssocTooMany => "access point is unable to handle all associated stations",
            Self::NotAuthed => "class 2 frame received from nonauthenticated station",
            Self::NotAssoced => "class 3 frame received from nonassociated station",
            Self::AssocLeave => "disassociated because sending station is leaving",
            Self::AssocNotAuthed => "station requesting association is not authenticated",
            Self::DisassocPwrcapBad => "power capability element is unacceptable",
            Self::DisassocSupchanBad => "supported channels element is unacceptable",
            Self::IeInvalid => "invalid information element",
            Self::MicFailure => "message integrity code failure",
            Self::FourWayHandshakeTimeout => "4-way handshake timeout",
            Self::GroupKeyUpdateTimeout => "group key handshake timeout",
            Self::IeIn4WayDiffers => "information element in 4-way handshake differs",
            Self::GroupCipherInvalid => "invalid group cipher",
            Self::PairwiseCipherInvalid => "invalid pairwise cipher",
            Self::AkmpInvalid => "invalid AKMP",
            Self::UnsuppRsnIeVersion => "unsupported RSN information element version",
            Self::InvalidRsnIeCap => "invalid RSN information element capabilities",
            Self::Ieee8021xAuthFailed => "IEEE 802.1X authentication failed",
            Self::CipherSuiteRejected => "cipher suite rejected by security policy",
            Self::BeaconTimeout => "beacons from the access point stopped",
            Self::NoApFound => "no access point with the configured SSID found",
            Self::AuthFail => "authentication failed",
            Self::AssocFail => "association failed",
            Self::HandshakeTimeout => "handshake timed out",
        }
    }
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}
