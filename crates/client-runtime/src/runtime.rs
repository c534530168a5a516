//! # Client Runtime
//!
//! Drives one session through its two phases:
//!
//! 1. No ticket yet: the next envelope is the handshake, carrying raw
//!    credentials.
//! 2. Ticket accepted: every later envelope is signed.
//!
//! Transport is the caller's job; envelopes leave here as wire bytes.

use crate::container::{ClientContainer, RuntimeConfig, RuntimeError};
use rk_01_session_state::SessionStateApi;
use rk_02_envelope_builder::EnvelopeBuilderApi;
use rk_telemetry::subsystem_span;
use shared_types::{AuthTicket, Request, RequestEnvelope, RequestType, WireMessage};
use tracing::info;

/// Sub-requests sent right after login.
pub fn startup_requests() -> Vec<Request> {
    [
        RequestType::GET_PLAYER,
        RequestType::CHECK_CHALLENGE,
        RequestType::GET_INVENTORY,
        RequestType::DOWNLOAD_SETTINGS,
    ]
    .into_iter()
    .map(|request_type| Request::new(request_type, Vec::new()))
    .collect()
}

/// Session driver over a [`ClientContainer`].
pub struct ClientRuntime {
    container: ClientContainer,
}

impl ClientRuntime {
    pub fn new(config: &RuntimeConfig) -> Result<Self, RuntimeError> {
        Ok(Self {
            container: ClientContainer::new(config)?,
        })
    }

    pub fn container(&self) -> &ClientContainer {
        &self.container
    }

    /// Whether the handshake has completed.
    pub fn is_authenticated(&self) -> bool {
        self.container.builder.has_auth_ticket()
    }

    /// Handshake envelope before login, signed envelope after.
    pub fn next_envelope(&self, requests: &[Request]) -> Result<RequestEnvelope, RuntimeError> {
        let _span = subsystem_span!(
            "next_envelope",
            subsystem = "client-runtime",
            requests = requests.len()
        )
        .entered();

        if self.is_authenticated() {
            Ok(self.container.builder.build_envelope(requests)?)
        } else {
            Ok(self.container.builder.build_handshake_envelope(requests))
        }
    }

    /// Install the ticket from the handshake response.
    pub fn accept_ticket(&self, ticket: AuthTicket) {
        info!(
            expires = ticket.expire_timestamp_ms,
            next_request_id = self.container.tracker.peek_request_id(),
            "Handshake complete"
        );
        self.container.builder.attach_auth_ticket(ticket);
    }

    /// Serialize an envelope for transport.
    pub fn encode(&self, envelope: &RequestEnvelope) -> Result<Vec<u8>, RuntimeError> {
        Ok(envelope.to_wire_bytes()?)
    }
}
