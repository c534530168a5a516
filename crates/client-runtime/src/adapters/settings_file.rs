//! JSON-file settings store.
//!
//! File layout:
//!
//! ```json
//! {
//!   "session_nonce": "9f3c...",          // hex, optional
//!   "device_profile": { "device_id": "..." }
//! }
//! ```
//!
//! Writes go to a sibling temporary file that is then renamed over the
//! original, so a crash never leaves a half-written file behind.

use parking_lot::Mutex;
use rk_01_session_state::{SettingsError, SettingsStore};
use serde::{Deserialize, Serialize};
use shared_types::DeviceIdentityProfile;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SettingsDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session_nonce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    device_profile: Option<DeviceIdentityProfile>,
}

/// `SettingsStore` persisted as one JSON document.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    document: Mutex<SettingsDocument>,
}

impl FileSettingsStore {
    /// Open an existing settings file.
    ///
    /// A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let document = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)
                .map_err(|e| SettingsError::ReadFailed(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == ErrorKind::NotFound => SettingsDocument::default(),
            Err(e) => return Err(SettingsError::ReadFailed(format!("{}: {e}", path.display()))),
        };
        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    /// Open `path`, installing `profile` if the file has none yet.
    pub fn open_or_init(
        path: impl Into<PathBuf>,
        profile: DeviceIdentityProfile,
    ) -> Result<Self, SettingsError> {
        let store = Self::open(path)?;
        {
            let mut document = store.document.lock();
            if document.device_profile.is_none() {
                document.device_profile = Some(profile);
                write_document(&store.path, &document)?;
            }
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_document(path: &Path, document: &SettingsDocument) -> Result<(), SettingsError> {
    let json = serde_json::to_string_pretty(document)
        .map_err(|e| SettingsError::WriteFailed(e.to_string()))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)
        .and_then(|()| fs::rename(&tmp, path))
        .map_err(|e| SettingsError::WriteFailed(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), "Settings written");
    Ok(())
}

impl SettingsStore for FileSettingsStore {
    fn session_nonce(&self) -> Result<Option<Vec<u8>>, SettingsError> {
        self.document
            .lock()
            .session_nonce
            .as_deref()
            .map(|hex_nonce| {
                hex::decode(hex_nonce)
                    .map_err(|e| SettingsError::ReadFailed(format!("session_nonce: {e}")))
            })
            .transpose()
    }

    fn set_session_nonce(&self, nonce: &[u8]) -> Result<(), SettingsError> {
        let mut document = self.document.lock();
        let mut updated = document.clone();
        updated.session_nonce = Some(hex::encode(nonce));
        write_document(&self.path, &updated)?;
        *document = updated;
        Ok(())
    }

    fn device_profile(&self) -> Result<DeviceIdentityProfile, SettingsError> {
        self.document
            .lock()
            .device_profile
            .clone()
            .ok_or(SettingsError::MissingDeviceProfile)
    }
}
