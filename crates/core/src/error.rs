//! Error types
//!
//! One variant per failure site. Callers decide how each surfaces: the relay
//! logs and moves on, the HTTP layer maps variants to status codes.

use thiserror::Error;

/// Result alias used across the workspace
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Queue client or HTTP client could not deliver/receive
    #[error("transport error: {0}")]
    Transport(String),

    /// Payload could not be decoded
    #[error("failed to decode payload: {0}")]
    Decode(String),

    /// Caller supplied an unusable request
    #[error("{0}")]
    Validation(String),

    /// A downstream service answered with a non-success status
    #[error("{service} responded with status {status}: {details}")]
    Downstream {
        service: String,
        status: u16,
        details: String,
    },

    /// Local disk I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn downstream(service: impl Into<String>, status: u16, details: impl Into<String>) -> Self {
        Self::Downstream {
            service: service.into(),
            status,
            details: details.into(),
        }
    }

    /// Text suitable for an HTTP `details` field.
    ///
    /// For downstream failures this is the raw provider body, not the
    /// formatted error line.
    pub fn details(&self) -> String {
        match self {
            Self::Downstream { details, .. } => details.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
