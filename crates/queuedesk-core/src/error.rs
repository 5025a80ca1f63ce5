// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Queuedesk client.

use thiserror::Error;

/// The primary error type used across all Queuedesk crates.
#[derive(Debug, Error)]
pub enum QueueDeskError {
    /// Configuration errors (invalid TOML, bad URLs, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced an HTTP response (DNS, connect, body read).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The backend answered 401. The staff session has already been cleared.
    #[error("unauthorized: sign in again")]
    Unauthorized,

    /// Sign-in was rejected. The message is shown to staff as-is.
    #[error("{0}")]
    Authentication(String),

    /// A lookup found nothing.
    #[error("{what} not found")]
    NotFound { what: String },

    /// A client-side precondition refused the action before any backend call.
    #[error("{0}")]
    Guard(String),

    /// A user-initiated action failed. `message` is the text shown on screen;
    /// the backend or transport cause is kept as the source.
    #[error("{message}")]
    Failed {
        message: String,
        #[source]
        source: Box<QueueDeskError>,
    },

    /// An intake step action was invoked from the wrong step.
    #[error("cannot {action} from step {from}")]
    InvalidTransition { from: String, action: String },

    /// Input rejected before it reached the backend.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Local state persistence errors.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl QueueDeskError {
    /// Returns the HTTP status carried by the error, if the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            QueueDeskError::Api { status, .. } => Some(*status),
            QueueDeskError::Unauthorized => Some(401),
            QueueDeskError::Failed { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Wraps `self` under a user-facing message.
    pub fn with_message(self, message: impl Into<String>) -> QueueDeskError {
        QueueDeskError::Failed {
            message: message.into(),
            source: Box::new(self),
        }
    }

    /// True when the error came from the network layer rather than the backend.
    pub fn is_transport(&self) -> bool {
        matches!(self, QueueDeskError::Transport { .. })
    }
}
