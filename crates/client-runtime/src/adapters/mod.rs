//! # Adapter Implementations
//!
//! Stock implementations of the outbound ports:
//!
//! | Adapter | Port | Backing |
//! |---------|------|---------|
//! | `Blake3SignatureHasher` | `SignatureHasher` | keyed BLAKE3 (shared-crypto) |
//! | `XChaChaSignatureCipher` | `SignatureCipher` | XChaCha20-Poly1305 (shared-crypto) |
//! | `FileSettingsStore` | `SettingsStore` | JSON file (serde_json) |
//!
//! The hasher and cipher stand in for the remote protocol's own
//! algorithms, which are supplied by the host in production.

pub mod cipher;
pub mod hasher;
pub mod settings_file;

pub use cipher::XChaChaSignatureCipher;
pub use hasher::Blake3SignatureHasher;
pub use settings_file::FileSettingsStore;
