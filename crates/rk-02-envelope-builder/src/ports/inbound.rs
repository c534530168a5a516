//! # Inbound Ports (Driving Ports / API)
//!
//! What the transport layer calls to obtain ready-to-serialize envelopes.

use crate::error::BuilderError;
use serde::Serialize;
use shared_types::{AuthTicket, Request, RequestEnvelope, RequestType, SessionNonce};

/// Primary Envelope Builder API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait EnvelopeBuilderApi: Send + Sync {
    /// Build the one-off handshake envelope carrying raw credentials.
    ///
    /// Consumes one request id. No signature is attached: without a ticket
    /// there is no key material for the location hashes.
    fn build_handshake_envelope(&self, requests: &[Request]) -> RequestEnvelope;

    /// Build a signed envelope around `requests`.
    ///
    /// # Errors
    /// * `BuilderError::MissingAuthTicket` - no ticket attached yet; no
    ///   request id is consumed
    /// * `BuilderError::Collaborator` - a hash or the cipher failed
    /// * `BuilderError::Wire` - a message could not be encoded
    fn build_envelope(&self, requests: &[Request]) -> Result<RequestEnvelope, BuilderError>;

    /// Signed envelope around a single sub-request packed from `message`.
    fn build_single<M: Serialize + ?Sized>(
        &self,
        request_type: RequestType,
        message: &M,
    ) -> Result<RequestEnvelope, BuilderError>
    where
        Self: Sized,
    {
        let request = Request::from_message(request_type, message)?;
        self.build_envelope(std::slice::from_ref(&request))
    }

    /// Install the ticket returned by the handshake response.
    fn attach_auth_ticket(&self, ticket: AuthTicket);

    /// Whether signed envelopes can be built.
    fn has_auth_ticket(&self) -> bool;

    /// Rotate the session nonce; every later signature carries the new one.
    fn regenerate_nonce(&self) -> Result<SessionNonce, BuilderError>;
}
