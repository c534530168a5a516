//! Process-local settings store.

use crate::ports::outbound::{SettingsError, SettingsStore};
use parking_lot::RwLock;
use shared_types::DeviceIdentityProfile;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Settings kept in memory for the lifetime of the process.
///
/// Sharing one instance between trackers (via `Arc`) keeps the nonce stable
/// across tracker reconstruction within the process.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    nonce: RwLock<Option<Vec<u8>>>,
    profile: Option<DeviceIdentityProfile>,
    nonce_writes: AtomicUsize,
}

impl InMemorySettingsStore {
    pub fn new(profile: DeviceIdentityProfile) -> Self {
        Self {
            nonce: RwLock::new(None),
            profile: Some(profile),
            nonce_writes: AtomicUsize::new(0),
        }
    }

    /// Seed the store with a previously persisted nonce blob.
    pub fn with_nonce(self, nonce: Vec<u8>) -> Self {
        *self.nonce.write() = Some(nonce);
        self
    }

    /// Number of nonce writes since construction.
    pub fn nonce_writes(&self) -> usize {
        self.nonce_writes.load(Ordering::SeqCst)
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn session_nonce(&self) -> Result<Option<Vec<u8>>, SettingsError> {
        Ok(self.nonce.read().clone())
    }

    fn set_session_nonce(&self, nonce: &[u8]) -> Result<(), SettingsError> {
        *self.nonce.write() = Some(nonce.to_vec());
        self.nonce_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn device_profile(&self) -> Result<DeviceIdentityProfile, SettingsError> {
        self.profile
            .clone()
            .ok_or(SettingsError::MissingDeviceProfile)
    }
}
