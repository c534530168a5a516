//! # Outbound Ports (Driven Ports / SPI)
//!
//! Dependencies the tracker needs: a clock, a random source and the
//! settings store that persists the session nonce.

use shared_types::{DeviceIdentityProfile, Timestamp};
use thiserror::Error;

/// Error from settings store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// The backing store could not be read
    #[error("Settings read failed: {0}")]
    ReadFailed(String),

    /// The backing store could not be written
    #[error("Settings write failed: {0}")]
    WriteFailed(String),

    /// No device identity profile has been configured
    #[error("No device identity profile configured")]
    MissingDeviceProfile,
}

/// Persisted host settings.
///
/// The session nonce stored here is cross-session identity glue: a host that
/// persists it keeps the same nonce across tracker reconstruction.
pub trait SettingsStore: Send + Sync {
    /// The persisted session nonce, if one has ever been written.
    fn session_nonce(&self) -> Result<Option<Vec<u8>>, SettingsError>;

    /// Persist a new session nonce, replacing any previous value.
    fn set_session_nonce(&self, nonce: &[u8]) -> Result<(), SettingsError>;

    /// The spoofed device identity to embed in every signature.
    fn device_profile(&self) -> Result<DeviceIdentityProfile, SettingsError>;
}

/// Time source for consistent timestamp handling.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in milliseconds.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Uniform randomness shared by the tracker and the builder.
///
/// Implementations must be safe for concurrent use. Nothing here needs to
/// be cryptographically secure.
pub trait RandomSource: Send + Sync {
    /// Uniform sample in `[0, 1)`.
    fn next_f64(&self) -> f64;

    /// Uniform integer in `[low, high)`. Returns `low` when the range is empty.
    fn next_range(&self, low: i64, high: i64) -> i64;

    /// Fill `dest` with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]);
}
