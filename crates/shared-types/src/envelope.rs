//! # `RequestEnvelope` and Signature Layout
//!
//! The top-level outbound message and the authenticity block embedded in it.
//!
//! ## Layout Rules
//!
//! - `status_code` is always [`RequestEnvelope::STATUS_CODE`].
//! - `auth` is either handshake credentials or an auth ticket, never both.
//! - `platform_requests` carries side-channel payloads. Signed envelopes
//!   hold exactly one: the encrypted [`Signature`].

use crate::entities::{
    AuthTicket, DeviceIdentityProfile, LocationHash, RequestHash, RequestId, SessionNonce,
    Timestamp,
};
use crate::errors::WireError;
use crate::wire::{self, WireMessage};
use serde::{Deserialize, Serialize};

// =============================================================================
// SUB-REQUESTS
// =============================================================================

/// Numeric type tag of a sub-request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestType(pub i32);

impl RequestType {
    pub const GET_PLAYER: RequestType = RequestType(2);
    pub const GET_INVENTORY: RequestType = RequestType(4);
    pub const DOWNLOAD_SETTINGS: RequestType = RequestType(5);
    pub const GET_MAP_OBJECTS: RequestType = RequestType(106);
    pub const CHECK_CHALLENGE: RequestType = RequestType(600);
}

/// A typed sub-request with its serialized message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub request_type: RequestType,
    pub request_message: Vec<u8>,
}

impl Request {
    pub fn new(request_type: RequestType, request_message: Vec<u8>) -> Self {
        Self {
            request_type,
            request_message,
        }
    }

    /// Pack any serializable message body into a sub-request.
    pub fn from_message<M: Serialize + ?Sized>(
        request_type: RequestType,
        message: &M,
    ) -> Result<Self, WireError> {
        Ok(Self::new(request_type, wire::encode("RequestMessage", message)?))
    }
}

impl WireMessage for Request {
    const MESSAGE_NAME: &'static str = "Request";
}

// =============================================================================
// AUTHENTICATION SECTION
// =============================================================================

/// JWT wrapper around the raw login token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtToken {
    pub contents: String,
    pub unknown2: i32,
}

/// Raw login credentials sent on the handshake envelope only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthInfo {
    pub provider: String,
    pub token: JwtToken,
}

impl AuthInfo {
    /// Constant second field of the JWT wrapper.
    pub const JWT_UNKNOWN2: i32 = 59;

    pub fn new(provider: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            token: JwtToken {
                contents: contents.into(),
                unknown2: Self::JWT_UNKNOWN2,
            },
        }
    }
}

/// Authentication carried by an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvelopeAuth {
    /// Handshake envelope: raw provider credentials.
    Credentials(AuthInfo),
    /// Every later envelope: the ticket issued by the handshake.
    Ticket(AuthTicket),
}

// =============================================================================
// PLATFORM REQUESTS
// =============================================================================

/// Side-channel payload kinds.
///
/// Encoded as the protocol's numeric value, not the variant index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum PlatformRequestType {
    SendEncryptedSignature,
}

impl PlatformRequestType {
    /// Numeric value used by the remote protocol.
    pub fn wire_value(&self) -> i32 {
        match self {
            PlatformRequestType::SendEncryptedSignature => 6,
        }
    }
}

impl From<PlatformRequestType> for i32 {
    fn from(kind: PlatformRequestType) -> Self {
        kind.wire_value()
    }
}

impl TryFrom<i32> for PlatformRequestType {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(PlatformRequestType::SendEncryptedSignature),
            other => Err(format!("unknown platform request type {other}")),
        }
    }
}

/// A side-channel payload, distinct from ordinary sub-requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformRequest {
    pub request_type: PlatformRequestType,
    pub request_message: Vec<u8>,
}

impl PlatformRequest {
    /// Wrap an already encrypted signature.
    pub fn encrypted_signature(ciphertext: Vec<u8>) -> Self {
        Self {
            request_type: PlatformRequestType::SendEncryptedSignature,
            request_message: ciphertext,
        }
    }
}

// =============================================================================
// ENVELOPE
// =============================================================================

/// The outbound envelope wrapping sub-requests, authentication and telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub status_code: i32,
    pub request_id: RequestId,
    pub requests: Vec<Request>,
    pub latitude: f64,
    pub longitude: f64,
    /// Filled with the altitude, as the targeted client version does.
    pub accuracy: f64,
    pub auth: EnvelopeAuth,
    pub ms_since_last_locationfix: i64,
    pub platform_requests: Vec<PlatformRequest>,
}

impl RequestEnvelope {
    /// Status code stamped on every outbound envelope.
    pub const STATUS_CODE: i32 = 2;

    /// The auth ticket, if this is a post-handshake envelope.
    pub fn auth_ticket(&self) -> Option<&AuthTicket> {
        match &self.auth {
            EnvelopeAuth::Ticket(ticket) => Some(ticket),
            EnvelopeAuth::Credentials(_) => None,
        }
    }

    /// The raw credentials, if this is the handshake envelope.
    pub fn auth_info(&self) -> Option<&AuthInfo> {
        match &self.auth {
            EnvelopeAuth::Credentials(info) => Some(info),
            EnvelopeAuth::Ticket(_) => None,
        }
    }

    /// The encrypted signature payload, if one is attached.
    pub fn encrypted_signature(&self) -> Option<&[u8]> {
        self.platform_requests
            .iter()
            .find(|p| p.request_type == PlatformRequestType::SendEncryptedSignature)
            .map(|p| p.request_message.as_slice())
    }
}

impl WireMessage for RequestEnvelope {
    const MESSAGE_NAME: &'static str = "RequestEnvelope";
}

// =============================================================================
// SIGNATURE
// =============================================================================

/// Synthetic accelerometer, magnetometer, rotation, gyroscope and gravity
/// readings of a stationary handheld device.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorInfo {
    pub timestamp_snapshot: Timestamp,
    pub linear_acceleration_x: f64,
    pub linear_acceleration_y: f64,
    pub linear_acceleration_z: f64,
    pub magnetic_field_x: f64,
    pub magnetic_field_y: f64,
    pub magnetic_field_z: f64,
    pub rotation_vector_x: f64,
    pub rotation_vector_y: f64,
    pub rotation_vector_z: f64,
    pub gyroscope_raw_x: f64,
    pub gyroscope_raw_y: f64,
    pub gyroscope_raw_z: f64,
    pub gravity_x: f64,
    pub gravity_y: f64,
    pub gravity_z: f64,
    pub accelerometer_axes: u32,
}

/// Device fingerprint as laid out inside the signature.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceInfo {
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

impl From<&DeviceIdentityProfile> for DeviceInfo {
    fn from(profile: &DeviceIdentityProfile) -> Self {
        Self {
            device_id: profile.device_id.clone(),
            android_board_name: profile.android_board_name.clone(),
            android_bootloader: profile.android_bootloader.clone(),
            device_brand: profile.device_brand.clone(),
            device_model: profile.device_model.clone(),
            device_model_identifier: profile.device_model_identifier.clone(),
            device_model_boot: profile.device_model_boot.clone(),
            hardware_manufacturer: profile.hardware_manufacturer.clone(),
            hardware_model: profile.hardware_model.clone(),
            firmware_brand: profile.firmware_brand.clone(),
            firmware_tags: profile.firmware_tags.clone(),
            firmware_type: profile.firmware_type.clone(),
            firmware_fingerprint: profile.firmware_fingerprint.clone(),
        }
    }
}

/// A reduced-precision location fix.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationFix {
    pub provider: String,
    pub timestamp_snapshot: Timestamp,
    pub latitude: f32,
    pub longitude: f32,
    pub altitude: f32,
    pub horizontal_accuracy: f32,
    pub vertical_accuracy: f32,
    pub provider_status: u64,
    pub location_type: u64,
}

/// The authenticity block, serialized and encrypted into a platform request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub timestamp: Timestamp,
    pub timestamp_since_start: Timestamp,
    pub location_hash1: LocationHash,
    pub location_hash2: LocationHash,
    pub sensor_info: SensorInfo,
    pub device_info: DeviceInfo,
    pub location_fix: Vec<LocationFix>,
    /// One hash per sub-request, in sub-request order.
    pub request_hash: Vec<RequestHash>,
    pub session_hash: SessionNonce,
    /// Opaque per-protocol-version compatibility value.
    pub protocol_quirk: i64,
}

impl WireMessage for Signature {
    const MESSAGE_NAME: &'static str = "Signature";
}
