//! # Client Container
//!
//! Builds one session: settings store, tracker, collaborators and the
//! envelope builder, in dependency order.
//!
//! ```text
//! RuntimeConfig ──→ SettingsStore ──→ SessionTracker ──┐
//!                   Hasher, Cipher ────────────────────┴──→ EnvelopeBuilder
//! ```

pub mod config;

pub use config::{ConfigError, RuntimeConfig};

use crate::adapters::{Blake3SignatureHasher, FileSettingsStore, XChaChaSignatureCipher};
use rk_01_session_state::{
    InMemorySettingsStore, SessionError, SessionTracker, SettingsError, SettingsStore,
};
use rk_02_envelope_builder::{AuthCredentials, BuilderError, EnvelopeBuilder};
use shared_types::{DeviceIdentityProfile, WireError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while assembling a session.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Builder(#[from] BuilderError),

    #[error(transparent)]
    Wire(#[from] WireError),
}

/// Device identity installed into fresh settings.
pub fn default_device_profile() -> DeviceIdentityProfile {
    DeviceIdentityProfile {
        device_id: "8525f5d8201f78b5".to_string(),
        device_brand: "Apple".to_string(),
        device_model: "iPhone".to_string(),
        device_model_boot: "iPhone8,1".to_string(),
        hardware_manufacturer: "Apple".to_string(),
        hardware_model: "N71AP".to_string(),
        firmware_brand: "iPhone OS".to_string(),
        firmware_type: "9.3.3".to_string(),
        ..Default::default()
    }
}

/// One fully wired session.
pub struct ClientContainer {
    pub settings: Arc<dyn SettingsStore>,
    pub tracker: Arc<SessionTracker>,
    pub builder: EnvelopeBuilder,
}

impl ClientContainer {
    pub fn new(config: &RuntimeConfig) -> Result<Self, RuntimeError> {
        if config.uses_dev_hash_key() {
            warn!("RK_HASH_KEY not set; using the development hash key");
        }

        let settings: Arc<dyn SettingsStore> = match &config.settings_path {
            Some(path) => {
                info!(path = %path.display(), "Using file settings store");
                Arc::new(FileSettingsStore::open_or_init(path, default_device_profile())?)
            }
            None => Arc::new(InMemorySettingsStore::new(default_device_profile())),
        };

        let tracker = Arc::new(
            SessionTracker::builder(config.position)
                .settings_store(Arc::clone(&settings))
                .build()?,
        );

        let mut builder = EnvelopeBuilder::new(
            Arc::clone(&tracker),
            AuthCredentials::new(config.auth_token.clone(), config.auth_type),
            Arc::new(Blake3SignatureHasher::new(&config.hash_key)),
            Arc::new(XChaChaSignatureCipher::new(&config.hash_key)),
        )
        .with_protocol(config.protocol)
        .with_telemetry_profile(config.telemetry_profile()?)?;

        if let Some(ticket) = &config.auth_ticket {
            builder = builder.with_auth_ticket(ticket.clone());
        }

        info!(
            protocol = %config.protocol,
            auth_type = config.auth_type.provider_tag(),
            has_ticket = config.auth_ticket.is_some(),
            "Client container ready"
        );

        Ok(Self {
            settings,
            tracker,
            builder,
        })
    }
}
