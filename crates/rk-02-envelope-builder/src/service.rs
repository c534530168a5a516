//! # Envelope Builder Service
//!
//! Implements `EnvelopeBuilderApi` over a [`SessionTracker`] and the host's
//! hash and cipher collaborators.
//!
//! ## Signed Build Sequence
//!
//! 1. Require an auth ticket (before any id is consumed)
//! 2. Allocate a request id, capture the nonce and read the clock atomically
//! 3. Fill geo, auth and sub-request fields
//! 4. Sign: two location hashes, one hash per sub-request, synthetic
//!    telemetry, nonce, protocol quirk
//! 5. Serialize and encrypt the signature into a single platform request

use crate::domain::jitter::Jitter;
use crate::domain::profile::TelemetryProfile;
use crate::domain::protocol::ProtocolVersion;
use crate::domain::synthesis::{synthesize_location_fix, synthesize_sensor_info};
use crate::error::BuilderError;
use crate::ports::inbound::EnvelopeBuilderApi;
use crate::ports::outbound::{SignatureCipher, SignatureHasher};
use parking_lot::RwLock;
use rk_01_session_state::{SessionSnapshot, SessionStateApi, SessionTracker};
use shared_types::{
    AuthInfo, AuthTicket, AuthType, DeviceInfo, EnvelopeAuth, PlatformRequest, Request,
    RequestEnvelope, SessionNonce, Signature, WireMessage,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Raw login credentials, used for the handshake envelope only.
#[derive(Clone)]
pub struct AuthCredentials {
    pub token: String,
    pub auth_type: AuthType,
}

impl AuthCredentials {
    pub fn new(token: impl Into<String>, auth_type: AuthType) -> Self {
        Self {
            token: token.into(),
            auth_type,
        }
    }
}

impl std::fmt::Debug for AuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthCredentials")
            .field("token", &"<redacted>")
            .field("auth_type", &self.auth_type)
            .finish()
    }
}

/// Builds envelopes for one connection.
pub struct EnvelopeBuilder {
    tracker: Arc<SessionTracker>,
    credentials: AuthCredentials,
    auth_ticket: RwLock<Option<AuthTicket>>,
    hasher: Arc<dyn SignatureHasher>,
    cipher: Arc<dyn SignatureCipher>,
    protocol: ProtocolVersion,
    profile: TelemetryProfile,
}

impl EnvelopeBuilder {
    pub fn new(
        tracker: Arc<SessionTracker>,
        credentials: AuthCredentials,
        hasher: Arc<dyn SignatureHasher>,
        cipher: Arc<dyn SignatureCipher>,
    ) -> Self {
        Self {
            tracker,
            credentials,
            auth_ticket: RwLock::new(None),
            hasher,
            cipher,
            protocol: ProtocolVersion::default(),
            profile: TelemetryProfile::default(),
        }
    }

    /// Start with a ticket from an earlier login.
    pub fn with_auth_ticket(self, ticket: AuthTicket) -> Self {
        *self.auth_ticket.write() = Some(ticket);
        self
    }

    pub fn with_protocol(mut self, protocol: ProtocolVersion) -> Self {
        self.protocol = protocol;
        self
    }

    /// Replace the telemetry profile.
    ///
    /// # Errors
    /// * `BuilderError::InvalidProfile` - a range is empty, inverted or non-finite
    pub fn with_telemetry_profile(mut self, profile: TelemetryProfile) -> Result<Self, BuilderError> {
        profile.validate()?;
        self.profile = profile;
        Ok(self)
    }

    pub fn tracker(&self) -> &Arc<SessionTracker> {
        &self.tracker
    }

    pub fn protocol(&self) -> ProtocolVersion {
        self.protocol
    }

    fn sign(
        &self,
        ticket_bytes: &[u8],
        requests: &[Request],
        snapshot: &SessionSnapshot,
    ) -> Result<Signature, BuilderError> {
        let now = snapshot.timestamp;
        let elapsed = snapshot.elapsed_ms();
        let position = self.tracker.position();

        let location_hash1 = self
            .hasher
            .location_hash1(ticket_bytes, position)
            .map_err(BuilderError::collaborator("location hash 1"))?;
        let location_hash2 = self
            .hasher
            .location_hash2(position)
            .map_err(BuilderError::collaborator("location hash 2"))?;

        let mut request_hash = Vec::with_capacity(requests.len());
        for request in requests {
            let bytes = request.to_wire_bytes()?;
            let hash = self
                .hasher
                .request_hash(ticket_bytes, &bytes)
                .map_err(BuilderError::collaborator("request hash"))?;
            request_hash.push(hash);
        }

        let jitter = Jitter::new(self.tracker.random().as_ref());
        let sensor_info = synthesize_sensor_info(&jitter, &self.profile, elapsed);
        let location_fix = synthesize_location_fix(&jitter, &self.profile, position, elapsed);

        Ok(Signature {
            timestamp: now,
            timestamp_since_start: elapsed,
            location_hash1,
            location_hash2,
            sensor_info,
            device_info: DeviceInfo::from(self.tracker.device_profile()),
            location_fix: vec![location_fix],
            request_hash,
            session_hash: snapshot.session_nonce,
            protocol_quirk: self.protocol.quirk_constant(),
        })
    }

    fn assemble(
        &self,
        ticket: AuthTicket,
        requests: &[Request],
    ) -> Result<RequestEnvelope, BuilderError> {
        let ticket_bytes = ticket.to_wire_bytes()?;
        let snapshot = self.tracker.allocate();
        let position = self.tracker.position();

        let jitter = Jitter::new(self.tracker.random().as_ref());
        let ms_since_last_locationfix = jitter.integer(self.profile.ms_since_last_fix);

        let signature = self.sign(&ticket_bytes, requests, &snapshot)?;
        let plaintext = signature.to_wire_bytes()?;
        let ciphertext = self
            .cipher
            .encrypt(&plaintext)
            .map_err(BuilderError::collaborator("signature cipher"))?;

        debug!(
            request_id = snapshot.request_id,
            requests = requests.len(),
            signature_bytes = ciphertext.len(),
            "Built signed envelope"
        );

        Ok(RequestEnvelope {
            status_code: RequestEnvelope::STATUS_CODE,
            request_id: snapshot.request_id,
            requests: requests.to_vec(),
            latitude: position.latitude,
            longitude: position.longitude,
            accuracy: position.altitude,
            auth: EnvelopeAuth::Ticket(ticket),
            ms_since_last_locationfix,
            platform_requests: vec![PlatformRequest::encrypted_signature(ciphertext)],
        })
    }
}

impl EnvelopeBuilderApi for EnvelopeBuilder {
    fn build_handshake_envelope(&self, requests: &[Request]) -> RequestEnvelope {
        let snapshot = self.tracker.allocate();
        let position = self.tracker.position();
        let jitter = Jitter::new(self.tracker.random().as_ref());

        info!(
            request_id = snapshot.request_id,
            provider = self.credentials.auth_type.provider_tag(),
            "Built handshake envelope"
        );

        RequestEnvelope {
            status_code: RequestEnvelope::STATUS_CODE,
            request_id: snapshot.request_id,
            requests: requests.to_vec(),
            latitude: position.latitude,
            longitude: position.longitude,
            accuracy: position.altitude,
            auth: EnvelopeAuth::Credentials(AuthInfo::new(
                self.credentials.auth_type.provider_tag(),
                self.credentials.token.clone(),
            )),
            ms_since_last_locationfix: jitter.integer(self.profile.ms_since_last_fix),
            platform_requests: Vec::new(),
        }
    }

    fn build_envelope(&self, requests: &[Request]) -> Result<RequestEnvelope, BuilderError> {
        let ticket = self
            .auth_ticket
            .read()
            .clone()
            .ok_or(BuilderError::MissingAuthTicket)?;

        self.assemble(ticket, requests).inspect_err(|e| {
            warn!(error = %e, "Envelope build failed");
        })
    }

    fn attach_auth_ticket(&self, ticket: AuthTicket) {
        debug!(expires = ticket.expire_timestamp_ms, "Auth ticket attached");
        *self.auth_ticket.write() = Some(ticket);
    }

    fn has_auth_ticket(&self) -> bool {
        self.auth_ticket.read().is_some()
    }

    fn regenerate_nonce(&self) -> Result<SessionNonce, BuilderError> {
        Ok(self.tracker.regenerate_nonce()?)
    }
}
