//! # Rocket-Envelope Test Suite
//!
//! Cross-crate tests that drive the session tracker, the envelope builder
//! and the stock collaborators together.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Multi-build properties over a real session
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rk-tests
//! cargo test -p rk-tests integration::
//! ```

pub mod integration;
