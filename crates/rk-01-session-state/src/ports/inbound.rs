//! # Inbound Ports (Driving Ports / API)
//!
//! The operations the envelope builder and the host drive on a tracker.

use crate::domain::state::SessionSnapshot;
use crate::error::SessionError;
use shared_types::{DeviceIdentityProfile, GeoPosition, RequestId, SessionNonce, Timestamp};

/// Primary Session State API.
///
/// Implementations must be thread-safe (`Send + Sync`) and must serialize
/// every state mutation internally.
pub trait SessionStateApi: Send + Sync {
    /// Return the current request id, then advance the sequence by one.
    fn next_request_id(&self) -> RequestId;

    /// The id the next call to `next_request_id` will return.
    fn peek_request_id(&self) -> RequestId;

    /// Allocate a request id, capture the nonce and read the clock under
    /// one lock.
    fn allocate(&self) -> SessionSnapshot;

    /// The nonce embedded in every signature until it is rotated.
    fn session_nonce(&self) -> SessionNonce;

    /// Force a fresh nonce and persist it immediately.
    ///
    /// # Errors
    /// * `SessionError::Settings` - the store rejected the write; the old
    ///   nonce stays in effect
    fn regenerate_nonce(&self) -> Result<SessionNonce, SessionError>;

    /// Timestamp captured when the tracker became ready (or supplied by the host).
    fn process_start_ms(&self) -> Timestamp;

    /// `now - process_start`, clamped at zero under clock skew.
    fn elapsed_since_start(&self, now: Timestamp) -> Timestamp;

    /// The fixed position for this session.
    fn position(&self) -> GeoPosition;

    /// The immutable device identity for this session.
    fn device_profile(&self) -> &DeviceIdentityProfile;
}
