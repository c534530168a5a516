//! # Builder Errors
//!
//! Two categories exist: configuration errors (caller must fix, never
//! retried) and collaborator failures (fatal for one build attempt).

use crate::ports::outbound::CollaboratorError;
use rk_01_session_state::SessionError;
use shared_types::WireError;
use thiserror::Error;

/// Errors that can occur while building an envelope.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuilderError {
    /// A signed envelope was requested before any auth ticket was attached.
    #[error("No auth ticket attached; only the handshake envelope can be built")]
    MissingAuthTicket,

    /// A telemetry profile bound is unusable.
    #[error("Invalid telemetry profile field `{field}`: {reason}")]
    InvalidProfile { field: String, reason: String },

    /// A hash or cipher collaborator failed.
    #[error("{collaborator} failed: {reason}")]
    Collaborator {
        collaborator: &'static str,
        #[source]
        reason: CollaboratorError,
    },

    /// Session state could not be read or rotated.
    #[error("Session state error: {0}")]
    Session(#[from] SessionError),

    /// A message could not be encoded.
    #[error("Wire codec error: {0}")]
    Wire(#[from] WireError),
}

impl BuilderError {
    /// Fatal, non-retryable caller or setup error.
    pub fn is_configuration(&self) -> bool {
        match self {
            BuilderError::MissingAuthTicket | BuilderError::InvalidProfile { .. } => true,
            BuilderError::Session(e) => e.is_configuration(),
            BuilderError::Collaborator { .. } | BuilderError::Wire(_) => false,
        }
    }

    /// Failure inside a collaborator; the transport layer may retry the
    /// whole request, which produces a fresh signature.
    pub fn is_collaborator_failure(&self) -> bool {
        !self.is_configuration()
    }

    pub(crate) fn collaborator(collaborator: &'static str) -> impl FnOnce(CollaboratorError) -> Self {
        move |reason| BuilderError::Collaborator {
            collaborator,
            reason,
        }
    }
}
