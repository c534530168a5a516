//! # Adapters Layer
//!
//! Stock implementations of the outbound ports.

pub mod clock;
pub mod memory;
pub mod random;

pub use clock::ManualTimeSource;
pub use memory::InMemorySettingsStore;
pub use random::{SeededRandomSource, ThreadRandomSource};
