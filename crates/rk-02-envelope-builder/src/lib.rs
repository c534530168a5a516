//! # Envelope/Signature Builder (RK-02)
//!
//! Turns a list of sub-requests into a complete outbound `RequestEnvelope`:
//! request id, position, authentication, and an encrypted signature block
//! carrying spoofed sensor telemetry, collaborator hashes and the session
//! nonce.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): jitter primitives, the telemetry profile
//!   table, protocol constants and telemetry synthesis
//! - **Ports Layer** (`ports/`): the builder API and the hash/cipher
//!   collaborators it drives
//! - **Service Layer** (`service.rs`): call sequencing
//!
//! ## Build Sequence
//!
//! ```text
//! sub-requests ──→ allocate id ──→ geo/auth fields
//!                                       │
//!            location hashes ←── sign ──┘
//!            request hashes           │
//!            sensors + fix            ↓
//!                         encrypt ──→ platform request ──→ envelope
//! ```

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::jitter::{Jitter, DEFAULT_SPREAD};
pub use domain::profile::{IntRange, SensorProfile, TelemetryProfile, ValueRange};
pub use domain::protocol::ProtocolVersion;
pub use error::BuilderError;
pub use ports::inbound::EnvelopeBuilderApi;
pub use ports::outbound::{CollaboratorError, SignatureCipher, SignatureHasher};
pub use service::{AuthCredentials, EnvelopeBuilder};
