//! # Session Errors
//!
//! Error types for session state operations.

use crate::ports::outbound::SettingsError;
use thiserror::Error;

/// Errors that can occur while initializing or mutating session state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A required collaborator was never supplied.
    #[error("Missing required collaborator: {0}")]
    MissingCollaborator(&'static str),

    /// The settings store failed a read or write.
    #[error("Settings store failure: {0}")]
    Settings(#[from] SettingsError),
}

impl SessionError {
    /// Fatal setup problems the caller must fix before retrying.
    pub fn is_configuration(&self) -> bool {
        matches!(self, SessionError::MissingCollaborator(_))
    }
}
