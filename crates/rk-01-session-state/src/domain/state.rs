//! # Session State
//!
//! The mutable bookkeeping behind one logical connection.
//!
//! ## Invariants
//!
//! - The request sequence is strictly increasing per tracker.
//! - The nonce only changes through an explicit rotation.
//! - Elapsed time is measured against a start captured exactly once.

use crate::ports::outbound::RandomSource;
use shared_types::{RequestId, SessionNonce, Timestamp, SESSION_NONCE_LEN};

/// Exclusive upper bound of the initial request sequence seed (10^18).
pub const REQUEST_ID_SEED_CEILING: u64 = 1_000_000_000_000_000_000;

/// Per-connection mutable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    next_request_id: RequestId,
    process_start_ms: Timestamp,
    nonce: SessionNonce,
}

/// What one envelope build needs from the tracker, captured atomically.
///
/// `timestamp` is read under the same lock as `request_id`, so a higher id
/// never carries an earlier timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub request_id: RequestId,
    pub session_nonce: SessionNonce,
    pub process_start_ms: Timestamp,
    pub timestamp: Timestamp,
}

impl SessionSnapshot {
    /// `timestamp - process_start`, saturating at zero.
    pub fn elapsed_ms(&self) -> Timestamp {
        self.timestamp.saturating_sub(self.process_start_ms)
    }
}

impl SessionState {
    pub fn new(seed: RequestId, process_start_ms: Timestamp, nonce: SessionNonce) -> Self {
        Self {
            next_request_id: seed,
            process_start_ms,
            nonce,
        }
    }

    /// Return the current id and advance the sequence.
    pub fn allocate_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1);
        id
    }

    pub fn peek_request_id(&self) -> RequestId {
        self.next_request_id
    }

    pub fn process_start_ms(&self) -> Timestamp {
        self.process_start_ms
    }

    pub fn nonce(&self) -> SessionNonce {
        self.nonce
    }

    pub fn replace_nonce(&mut self, nonce: SessionNonce) {
        self.nonce = nonce;
    }

    /// Allocate an id and capture the nonce and `now` in one step.
    pub fn snapshot(&mut self, now: Timestamp) -> SessionSnapshot {
        SessionSnapshot {
            request_id: self.allocate_request_id(),
            session_nonce: self.nonce,
            process_start_ms: self.process_start_ms,
            timestamp: now,
        }
    }

    /// `now - process_start`, saturating at zero.
    pub fn elapsed_since_start(&self, now: Timestamp) -> Timestamp {
        now.saturating_sub(self.process_start_ms)
    }
}

/// Draw the initial request id uniformly from `[0, 10^18)`.
pub fn seed_request_sequence(random: &dyn RandomSource) -> RequestId {
    let seed = (random.next_f64() * REQUEST_ID_SEED_CEILING as f64) as u64;
    seed.min(REQUEST_ID_SEED_CEILING - 1)
}

/// Draw a fresh 16-byte session nonce.
pub fn generate_nonce(random: &dyn RandomSource) -> SessionNonce {
    let mut bytes = [0u8; SESSION_NONCE_LEN];
    random.fill_bytes(&mut bytes);
    SessionNonce(bytes)
}
