//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that the envelope builder uses
//! - **Outbound (Driven)**: Clock, randomness and persisted settings

pub mod inbound;
pub mod outbound;
