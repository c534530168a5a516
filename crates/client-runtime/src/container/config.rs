//! # Runtime Configuration
//!
//! Everything the client needs to assemble a session, read from `RK_*`
//! environment variables with typed defaults.
//!
//! ## Security Requirements
//!
//! - `RK_AUTH_TOKEN` has no default
//! - The built-in hash key is for development only; a warning is logged
//!   whenever it is in effect

use rk_02_envelope_builder::{ProtocolVersion, TelemetryProfile};
use shared_types::{AuthTicket, AuthType, GeoPosition, WireMessage};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Development hash key (hex, 32 bytes).
pub const DEV_HASH_KEY: &str = "726f636b65742d656e76656c6f70652d6465762d6b65792d3030303030303030";

/// Default position: Central Park, New York.
pub const DEFAULT_POSITION: GeoPosition = GeoPosition {
    latitude: 40.785091,
    longitude: -73.968285,
    altitude: 10.0,
};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be used.
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    /// The telemetry profile file could not be read.
    #[error("Cannot read telemetry profile {path}: {reason}")]
    ProfileUnreadable { path: PathBuf, reason: String },
}

/// Complete client configuration.
#[derive(Clone)]
pub struct RuntimeConfig {
    /// Raw login token for the handshake envelope.
    pub auth_token: String,
    /// Login provider.
    pub auth_type: AuthType,
    /// Fixed session position.
    pub position: GeoPosition,
    /// Targeted client protocol.
    pub protocol: ProtocolVersion,
    /// JSON settings file; `None` keeps settings in memory.
    pub settings_path: Option<PathBuf>,
    /// JSON telemetry profile; `None` uses the built-in table.
    pub telemetry_profile_path: Option<PathBuf>,
    /// Key material for the stock hasher and cipher.
    pub hash_key: [u8; 32],
    /// Ticket from an earlier login, skipping the handshake.
    pub auth_ticket: Option<AuthTicket>,
}

impl std::fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("auth_token", &"<redacted>")
            .field("auth_type", &self.auth_type)
            .field("position", &self.position)
            .field("protocol", &self.protocol)
            .field("settings_path", &self.settings_path)
            .field("telemetry_profile_path", &self.telemetry_profile_path)
            .field("hash_key", &"<redacted>")
            .field("auth_ticket", &self.auth_ticket.is_some())
            .finish()
    }
}

impl RuntimeConfig {
    /// Configuration with defaults around a token.
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            auth_type: AuthType::default(),
            position: DEFAULT_POSITION,
            protocol: ProtocolVersion::default(),
            settings_path: None,
            telemetry_profile_path: None,
            hash_key: dev_hash_key(),
            auth_ticket: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `RK_AUTH_TOKEN`: login token (required)
    /// - `RK_AUTH_TYPE`: `google` or `ptc` (default: google)
    /// - `RK_LATITUDE` / `RK_LONGITUDE` / `RK_ALTITUDE`: position
    /// - `RK_PROTOCOL_VERSION`: `0.33` or `0.35` (default: 0.35)
    /// - `RK_SETTINGS_PATH`: JSON settings file (default: in memory)
    /// - `RK_TELEMETRY_PROFILE`: JSON telemetry profile (default: built in)
    /// - `RK_HASH_KEY`: 32-byte hex key (default: development key)
    /// - `RK_AUTH_TICKET`: hex wire bytes of an existing ticket
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RuntimeConfig::from_env`] over any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth_token = lookup("RK_AUTH_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing("RK_AUTH_TOKEN"))?;
        let mut config = Self::new(auth_token);

        if let Some(raw) = lookup("RK_AUTH_TYPE") {
            config.auth_type = raw.parse().map_err(|reason| ConfigError::Invalid {
                var: "RK_AUTH_TYPE",
                reason,
            })?;
        }

        config.position = GeoPosition::new(
            parse_or(&lookup, "RK_LATITUDE", DEFAULT_POSITION.latitude)?,
            parse_or(&lookup, "RK_LONGITUDE", DEFAULT_POSITION.longitude)?,
            parse_or(&lookup, "RK_ALTITUDE", DEFAULT_POSITION.altitude)?,
        );

        if let Some(raw) = lookup("RK_PROTOCOL_VERSION") {
            config.protocol = raw.parse().map_err(|reason| ConfigError::Invalid {
                var: "RK_PROTOCOL_VERSION",
                reason,
            })?;
        }

        config.settings_path = lookup("RK_SETTINGS_PATH").map(PathBuf::from);
        config.telemetry_profile_path = lookup("RK_TELEMETRY_PROFILE").map(PathBuf::from);

        if let Some(raw) = lookup("RK_HASH_KEY") {
            config.hash_key = decode_key(&raw).map_err(|reason| ConfigError::Invalid {
                var: "RK_HASH_KEY",
                reason,
            })?;
        }

        if let Some(raw) = lookup("RK_AUTH_TICKET") {
            config.auth_ticket = Some(decode_ticket(&raw).map_err(|reason| {
                ConfigError::Invalid {
                    var: "RK_AUTH_TICKET",
                    reason,
                }
            })?);
        }

        Ok(config)
    }

    /// Whether the development hash key is in effect.
    pub fn uses_dev_hash_key(&self) -> bool {
        self.hash_key == dev_hash_key()
    }

    /// Load the telemetry profile named by the configuration.
    pub fn telemetry_profile(&self) -> Result<TelemetryProfile, ConfigError> {
        let Some(path) = &self.telemetry_profile_path else {
            return Ok(TelemetryProfile::default());
        };
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileUnreadable {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        TelemetryProfile::from_json(&json).map_err(|e| ConfigError::Invalid {
            var: "RK_TELEMETRY_PROFILE",
            reason: e.to_string(),
        })
    }
}

fn parse_or<F>(lookup: &F, var: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ConfigError::Invalid {
                var,
                reason: format!("not a finite number: {raw}"),
            }),
    }
}

fn decode_key(raw: &str) -> Result<[u8; 32], String> {
    let bytes = hex::decode(raw.trim()).map_err(|e| e.to_string())?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| format!("expected 32 bytes, got {}", bytes.len()))
}

fn decode_ticket(raw: &str) -> Result<AuthTicket, String> {
    let bytes = hex::decode(raw.trim()).map_err(|e| e.to_string())?;
    AuthTicket::from_wire_bytes(&bytes).map_err(|e| e.to_string())
}

fn dev_hash_key() -> [u8; 32] {
    decode_key(DEV_HASH_KEY).unwrap_or_default()
}
