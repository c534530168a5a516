//! # Integration Tests
//!
//! Every session here uses the stock BLAKE3 hasher and XChaCha cipher from
//! `client-runtime`, so signatures can be decrypted and checked end to end.

pub mod flows;
