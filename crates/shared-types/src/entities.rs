//! # Core Domain Entities
//!
//! Identity, location and authentication values that feed an envelope.
//!
//! ## Clusters
//!
//! - **Identity**: `DeviceIdentityProfile`, `SessionNonce`
//! - **Location**: `GeoPosition`
//! - **Authentication**: `AuthType`, `AuthTicket`

use crate::wire::WireMessage;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::fmt;
use std::str::FromStr;

/// Milliseconds since the UNIX epoch.
pub type Timestamp = u64;

/// Identifier stamped on every outbound envelope.
pub type RequestId = u64;

/// Opaque fixed-size location hash produced by a collaborator.
pub type LocationHash = u64;

/// Opaque fixed-size sub-request hash produced by a collaborator.
pub type RequestHash = u64;

// =============================================================================
// IDENTITY
// =============================================================================

/// Length of the per-installation session nonce in bytes.
pub const SESSION_NONCE_LEN: usize = 16;

/// Per-installation random identifier reused across every signature.
///
/// It mimics a stable device install id. It is not a secret.
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionNonce(#[serde_as(as = "Bytes")] pub [u8; SESSION_NONCE_LEN]);

impl SessionNonce {
    /// Build a nonce from a persisted blob.
    ///
    /// Returns `None` unless the blob is exactly [`SESSION_NONCE_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let array: [u8; SESSION_NONCE_LEN] = bytes.try_into().ok()?;
        Some(Self(array))
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8; SESSION_NONCE_LEN] {
        &self.0
    }
}

impl fmt::Debug for SessionNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionNonce(")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

/// Spoofed hardware and firmware fingerprint.
///
/// Supplied by the host and passed through unmodified into every signature.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceIdentityProfile {
    pub device_id: String,
    pub android_board_name: String,
    pub android_bootloader: String,
    pub device_brand: String,
    pub device_model: String,
    pub device_model_identifier: String,
    pub device_model_boot: String,
    pub hardware_manufacturer: String,
    pub hardware_model: String,
    pub firmware_brand: String,
    pub firmware_tags: String,
    pub firmware_type: String,
    pub firmware_fingerprint: String,
}

// =============================================================================
// LOCATION
// =============================================================================

/// Latitude, longitude and altitude, fixed for one builder instance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
}

// =============================================================================
// AUTHENTICATION
// =============================================================================

/// Login provider that issued the raw auth token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuthType {
    #[default]
    Google,
    Ptc,
}

impl AuthType {
    /// Provider tag carried in the handshake credentials.
    pub fn provider_tag(&self) -> &'static str {
        match self {
            AuthType::Google => "google",
            AuthType::Ptc => "ptc",
        }
    }
}

impl FromStr for AuthType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(AuthType::Google),
            "ptc" => Ok(AuthType::Ptc),
            other => Err(format!("unknown auth type: {other}")),
        }
    }
}

/// Proof of authentication issued by the remote service after the handshake.
///
/// The core never interprets it; its wire bytes are key material for the
/// location and request hashes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthTicket {
    pub start: Vec<u8>,
    pub expire_timestamp_ms: Timestamp,
    pub end: Vec<u8>,
}

impl WireMessage for AuthTicket {
    const MESSAGE_NAME: &'static str = "AuthTicket";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_nonce_requires_exact_length() {
        assert!(SessionNonce::from_slice(&[0u8; 16]).is_some());
        assert!(SessionNonce::from_slice(&[0u8; 15]).is_none());
        assert!(SessionNonce::from_slice(&[0u8; 17]).is_none());
    }

    #[test]
    fn test_session_nonce_debug_is_hex() {
        let nonce = SessionNonce([0xAB; 16]);
        assert_eq!(format!("{:?}", nonce), format!("SessionNonce({})", "ab".repeat(16)));
    }

    #[test]
    fn test_auth_type_provider_tags() {
        assert_eq!(AuthType::Google.provider_tag(), "google");
        assert_eq!(AuthType::Ptc.provider_tag(), "ptc");
    }

    #[test]
    fn test_auth_type_parse() {
        assert_eq!("Google".parse::<AuthType>().unwrap(), AuthType::Google);
        assert_eq!(" ptc ".parse::<AuthType>().unwrap(), AuthType::Ptc);
        assert!("facebook".parse::<AuthType>().is_err());
    }

    #[test]
    fn test_auth_ticket_bytes_are_stable() {
        let ticket = AuthTicket {
            start: vec![1, 2, 3],
            expire_timestamp_ms: 1_700_000_000_000,
            end: vec![9, 9],
        };
        let decoded = AuthTicket::from_wire_bytes(&ticket.to_wire_bytes().unwrap()).unwrap();
        assert_eq!(decoded, ticket);
    }
}
