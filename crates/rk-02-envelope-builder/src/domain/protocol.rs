//! Protocol-version constants
//!
//! The quirk value is an opaque compatibility field the remote service
//! expects per client version. It is looked up, never derived.

use std::fmt;
use std::str::FromStr;

/// Provider tag of every location fix.
pub const LOCATION_PROVIDER: &str = "fused";

/// Status code of every location fix.
pub const PROVIDER_STATUS: u64 = 3;

/// Location type code of every location fix.
pub const LOCATION_TYPE: u64 = 1;

/// Accelerometer axis count reported in the sensor block.
pub const ACCELEROMETER_AXES: u32 = 3;

/// Targeted client protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProtocolVersion {
    V0_33,
    #[default]
    V0_35,
}

impl ProtocolVersion {
    /// Every supported version, oldest first.
    pub const ALL: [ProtocolVersion; 2] = [ProtocolVersion::V0_33, ProtocolVersion::V0_35];

    /// Opaque quirk constant embedded in the signature.
    pub fn quirk_constant(&self) -> i64 {
        match self {
            ProtocolVersion::V0_33 => -8_537_042_734_809_897_855,
            ProtocolVersion::V0_35 => 7_363_665_268_261_373_700,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolVersion::V0_33 => "0.33",
            ProtocolVersion::V0_35 => "0.35",
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches(['v', 'V']);
        ProtocolVersion::ALL
            .into_iter()
            .find(|version| version.as_str() == trimmed)
            .ok_or_else(|| format!("unsupported protocol version: {s}"))
    }
}
