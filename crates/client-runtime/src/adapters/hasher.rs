//! Keyed BLAKE3 signature hashes.

use rk_02_envelope_builder::{CollaboratorError, SignatureHasher};
use shared_crypto::{derive_key, digest64};
use shared_types::{GeoPosition, LocationHash, RequestHash};

const LOCATION_CONTEXT: &str = "rocket-envelope 2016-08 location hash";
const REQUEST_CONTEXT: &str = "rocket-envelope 2016-08 request hash";

/// `SignatureHasher` over two keys derived from one master key.
pub struct Blake3SignatureHasher {
    location_key: [u8; 32],
    request_key: [u8; 32],
}

impl Blake3SignatureHasher {
    pub fn new(master_key: &[u8; 32]) -> Self {
        Self {
            location_key: derive_key(LOCATION_CONTEXT, master_key),
            request_key: derive_key(REQUEST_CONTEXT, master_key),
        }
    }
}

fn position_bytes(position: GeoPosition) -> [u8; 24] {
    let mut out = [0u8; 24];
    out[..8].copy_from_slice(&position.latitude.to_le_bytes());
    out[8..16].copy_from_slice(&position.longitude.to_le_bytes());
    out[16..].copy_from_slice(&position.altitude.to_le_bytes());
    out
}

impl SignatureHasher for Blake3SignatureHasher {
    fn location_hash1(
        &self,
        ticket: &[u8],
        position: GeoPosition,
    ) -> Result<LocationHash, CollaboratorError> {
        if ticket.is_empty() {
            return Err(CollaboratorError::Rejected("empty auth ticket".to_string()));
        }
        Ok(digest64(&self.location_key, &[ticket, position_bytes(position).as_slice()]))
    }

    fn location_hash2(&self, position: GeoPosition) -> Result<LocationHash, CollaboratorError> {
        Ok(digest64(&self.location_key, &[position_bytes(position).as_slice()]))
    }

    fn request_hash(&self, ticket: &[u8], request: &[u8]) -> Result<RequestHash, CollaboratorError> {
        if ticket.is_empty() {
            return Err(CollaboratorError::Rejected("empty auth ticket".to_string()));
        }
        Ok(digest64(&self.request_key, &[ticket, request]))
    }
}
