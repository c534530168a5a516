//! # Error Types
//!
//! Defines error types used across crates.

use thiserror::Error;

/// Errors produced by the wire codec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WireError {
    /// A message could not be serialized.
    #[error("Failed to encode {message}: {reason}")]
    Encode {
        message: &'static str,
        reason: String,
    },

    /// Bytes could not be decoded into the requested message.
    #[error("Failed to decode {message}: {reason}")]
    Decode {
        message: &'static str,
        reason: String,
    },
}
