//! # Outbound Ports (Driven Ports / SPI)
//!
//! The hash functions and the cipher are owned by the host. Their
//! algorithms and key material track the remote protocol and are not
//! part of this crate.

use shared_types::{GeoPosition, LocationHash, RequestHash};
use thiserror::Error;

/// Error from a hash or cipher collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The collaborator is not available (missing key, unloaded module)
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),

    /// The collaborator refused its input
    #[error("Collaborator rejected input: {0}")]
    Rejected(String),
}

/// The three hash functions the signature block needs.
pub trait SignatureHasher: Send + Sync {
    /// Location hash keyed by the serialized auth ticket.
    fn location_hash1(
        &self,
        ticket: &[u8],
        position: GeoPosition,
    ) -> Result<LocationHash, CollaboratorError>;

    /// Location hash over the position alone.
    fn location_hash2(&self, position: GeoPosition) -> Result<LocationHash, CollaboratorError>;

    /// Hash of one serialized sub-request, keyed by the serialized auth ticket.
    fn request_hash(&self, ticket: &[u8], request: &[u8]) -> Result<RequestHash, CollaboratorError>;
}

/// Symmetric cipher that seals the serialized signature.
pub trait SignatureCipher: Send + Sync {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CollaboratorError>;
}
