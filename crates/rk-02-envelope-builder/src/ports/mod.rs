//! # Ports Layer
//!
//! - **Inbound (Driving)**: the API the transport layer calls
//! - **Outbound (Driven)**: hash and cipher collaborators

pub mod inbound;
pub mod outbound;
