//! # Domain Layer
//!
//! Pure construction logic. Randomness enters only through the
//! `RandomSource` handed to [`jitter::Jitter`].

pub mod jitter;
pub mod profile;
pub mod protocol;
pub mod synthesis;
