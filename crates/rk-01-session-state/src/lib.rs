//! # Session State Tracker (RK-01)
//!
//! Owns the per-connection state that must persist and evolve across many
//! envelope builds: the request sequence, the process start timestamp and
//! the session nonce.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure state bookkeeping, no I/O
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound interfaces
//! - **Adapters Layer** (`adapters/`): Stock clock, random and settings adapters
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Lifecycle
//!
//! ```text
//! SessionTrackerBuilder ──build()──→ SessionTracker
//!    (Uninitialized)                     (Ready)
//! ```
//!
//! There is no closed or failed state. A tracker is valid for the lifetime
//! of the connection that owns it.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::{
    InMemorySettingsStore, ManualTimeSource, SeededRandomSource, ThreadRandomSource,
};
pub use domain::state::{SessionSnapshot, SessionState, REQUEST_ID_SEED_CEILING};
pub use error::SessionError;
pub use ports::inbound::SessionStateApi;
pub use ports::outbound::{
    RandomSource, SettingsError, SettingsStore, SystemTimeSource, TimeSource,
};
pub use service::{SessionTracker, SessionTrackerBuilder};
