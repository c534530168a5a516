//! # Shared Crypto
//!
//! Primitives behind the stock signature collaborators.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | keyed BLAKE3 | Location and request hashes |
//! | `symmetric` | XChaCha20-Poly1305 | Sealing the signature block |
//!
//! ## Security Properties
//!
//! - **XChaCha20**: 192-bit random nonce per seal, prefixed to the ciphertext
//! - **BLAKE3**: keyed mode, domain-separated key derivation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod symmetric;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{derive_key, digest64, KeyedDigest};
pub use symmetric::{open, seal, SecretKey, NONCE_LEN};
