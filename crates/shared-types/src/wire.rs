//! # Wire Codec
//!
//! Every outbound entity is turned into bytes through [`WireMessage`].
//! The codec is bincode over serde: deterministic, length-prefixed and
//! stable for a given type layout, which is all the hash and cipher
//! collaborators require from it.

use crate::errors::WireError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A message that can cross the wire.
pub trait WireMessage: Serialize + DeserializeOwned {
    /// Human-readable message name used in codec errors.
    const MESSAGE_NAME: &'static str;

    /// Serialize the message to its wire bytes.
    fn to_wire_bytes(&self) -> Result<Vec<u8>, WireError> {
        encode(Self::MESSAGE_NAME, self)
    }

    /// Parse a message from its wire bytes.
    fn from_wire_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        bincode::deserialize(bytes).map_err(|e| WireError::Decode {
            message: Self::MESSAGE_NAME,
            reason: e.to_string(),
        })
    }
}

/// Serialize any serde value with the wire codec.
///
/// Used for typed sub-request payloads that are not themselves
/// [`WireMessage`]s.
pub fn encode<T: Serialize + ?Sized>(message: &'static str, value: &T) -> Result<Vec<u8>, WireError> {
    bincode::serialize(value).map_err(|e| WireError::Encode {
        message,
        reason: e.to_string(),
    })
}
