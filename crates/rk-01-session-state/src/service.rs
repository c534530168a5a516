//! # Session Tracker Service
//!
//! Application service layer that implements the `SessionStateApi` trait.
//!
//! ## Construction
//!
//! `SessionTrackerBuilder` is the uninitialized state. `build()` performs
//! the one-time work and yields a ready `SessionTracker`:
//! - seeds the request sequence uniformly in `[0, 10^18)`
//! - captures the process start time unless the host supplied one
//! - reuses the persisted nonce, or generates and persists a fresh one

use crate::adapters::ThreadRandomSource;
use crate::domain::state::{self, SessionSnapshot, SessionState};
use crate::error::SessionError;
use crate::ports::inbound::SessionStateApi;
use crate::ports::outbound::{RandomSource, SettingsStore, SystemTimeSource, TimeSource};
use parking_lot::Mutex;
use shared_types::{
    DeviceIdentityProfile, GeoPosition, RequestId, SessionNonce, Timestamp, SESSION_NONCE_LEN,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Uninitialized tracker: collects collaborators and host-supplied values.
pub struct SessionTrackerBuilder {
    position: GeoPosition,
    settings: Option<Arc<dyn SettingsStore>>,
    random: Option<Arc<dyn RandomSource>>,
    clock: Option<Arc<dyn TimeSource>>,
    device_profile: Option<DeviceIdentityProfile>,
    process_start_ms: Option<Timestamp>,
}

impl SessionTrackerBuilder {
    pub fn new(position: GeoPosition) -> Self {
        Self {
            position,
            settings: None,
            random: None,
            clock: None,
            device_profile: None,
            process_start_ms: None,
        }
    }

    /// Replace the position given to [`SessionTrackerBuilder::new`].
    pub fn position(mut self, position: GeoPosition) -> Self {
        self.position = position;
        self
    }

    /// Required. Persists the session nonce.
    pub fn settings_store(mut self, settings: Arc<dyn SettingsStore>) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Defaults to [`ThreadRandomSource`].
    pub fn random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = Some(random);
        self
    }

    /// Defaults to [`SystemTimeSource`].
    pub fn time_source(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Overrides the profile held by the settings store.
    pub fn device_profile(mut self, profile: DeviceIdentityProfile) -> Self {
        self.device_profile = Some(profile);
        self
    }

    /// Reuse a start time captured by an earlier tracker of the same process.
    pub fn process_start_ms(mut self, start: Timestamp) -> Self {
        self.process_start_ms = Some(start);
        self
    }

    /// Transition to the ready state.
    ///
    /// # Errors
    /// * `SessionError::MissingCollaborator` - no settings store was supplied
    /// * `SessionError::Settings` - the store failed a read or write
    pub fn build(self) -> Result<SessionTracker, SessionError> {
        let settings = self
            .settings
            .ok_or(SessionError::MissingCollaborator("settings store"))?;
        let random = self
            .random
            .unwrap_or_else(|| Arc::new(ThreadRandomSource));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemTimeSource));

        let device_profile = match self.device_profile {
            Some(profile) => profile,
            None => settings.device_profile()?,
        };

        let seed = state::seed_request_sequence(random.as_ref());
        let process_start_ms = self.process_start_ms.unwrap_or_else(|| clock.now());
        let nonce = load_or_create_nonce(settings.as_ref(), random.as_ref())?;

        info!(
            request_seed = seed,
            process_start_ms,
            device_id = %device_profile.device_id,
            "Session tracker ready"
        );

        Ok(SessionTracker {
            state: Mutex::new(SessionState::new(seed, process_start_ms, nonce)),
            settings,
            random,
            clock,
            position: self.position,
            device_profile,
        })
    }
}

fn load_or_create_nonce(
    settings: &dyn SettingsStore,
    random: &dyn RandomSource,
) -> Result<SessionNonce, SessionError> {
    if let Some(bytes) = settings.session_nonce()? {
        match SessionNonce::from_slice(&bytes) {
            Some(nonce) => {
                debug!(nonce = ?nonce, "Reusing persisted session nonce");
                return Ok(nonce);
            }
            None => warn!(
                len = bytes.len(),
                expected = SESSION_NONCE_LEN,
                "Persisted session nonce has the wrong length; replacing it"
            ),
        }
    }

    let nonce = state::generate_nonce(random);
    settings.set_session_nonce(nonce.as_bytes())?;
    info!(nonce = ?nonce, "Generated new session nonce");
    Ok(nonce)
}

/// Ready tracker for one logical connection.
///
/// All mutation goes through an internal mutex, so a tracker may be shared
/// behind `Arc` while id allocation and nonce rotation stay serialized.
pub struct SessionTracker {
    state: Mutex<SessionState>,
    settings: Arc<dyn SettingsStore>,
    random: Arc<dyn RandomSource>,
    clock: Arc<dyn TimeSource>,
    position: GeoPosition,
    device_profile: DeviceIdentityProfile,
}

impl SessionTracker {
    pub fn builder(position: GeoPosition) -> SessionTrackerBuilder {
        SessionTrackerBuilder::new(position)
    }

    /// The random source shared with envelope construction.
    pub fn random(&self) -> &Arc<dyn RandomSource> {
        &self.random
    }
}

impl SessionStateApi for SessionTracker {
    fn next_request_id(&self) -> RequestId {
        self.state.lock().allocate_request_id()
    }

    fn peek_request_id(&self) -> RequestId {
        self.state.lock().peek_request_id()
    }

    fn allocate(&self) -> SessionSnapshot {
        let mut state = self.state.lock();
        let now = self.clock.now();
        state.snapshot(now)
    }

    fn session_nonce(&self) -> SessionNonce {
        self.state.lock().nonce()
    }

    fn regenerate_nonce(&self) -> Result<SessionNonce, SessionError> {
        let mut state = self.state.lock();
        let nonce = state::generate_nonce(self.random.as_ref());
        self.settings.set_session_nonce(nonce.as_bytes())?;
        let previous = state.nonce();
        state.replace_nonce(nonce);

        info!(previous = ?previous, nonce = ?nonce, "Rotated session nonce");
        Ok(nonce)
    }

    fn process_start_ms(&self) -> Timestamp {
        self.state.lock().process_start_ms()
    }

    fn elapsed_since_start(&self, now: Timestamp) -> Timestamp {
        self.state.lock().elapsed_since_start(now)
    }

    fn position(&self) -> GeoPosition {
        self.position
    }

    fn device_profile(&self) -> &DeviceIdentityProfile {
        &self.device_profile
    }
}
