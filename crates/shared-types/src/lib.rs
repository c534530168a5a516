//! # Shared Types Crate
//!
//! This crate contains the wire entities that travel inside an outbound
//! `RequestEnvelope`, plus the byte codec every entity shares.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Exclusive Authentication**: An envelope carries either raw credentials
//!   or an auth ticket, never both. The type system enforces it.
//! - **Opaque Collaborator Data**: Hashes, tickets and ciphertexts are carried
//!   verbatim and never interpreted.

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod wire;

pub use entities::*;
pub use envelope::*;
pub use errors::*;
pub use wire::WireMessage;
