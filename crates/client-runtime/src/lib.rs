//! # Client Runtime Library
//!
//! Wiring for a single client session. The `main.rs` binary is a thin
//! driver over [`ClientContainer`] and [`ClientRuntime`].

pub mod adapters;
pub mod container;
pub mod runtime;

pub use container::{default_device_profile, ClientContainer, ConfigError, RuntimeConfig, RuntimeError};
pub use runtime::ClientRuntime;
