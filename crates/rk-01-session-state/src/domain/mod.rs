//! # Domain Layer
//!
//! Pure session bookkeeping with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod state;
