//! Error types for pagesync.

use std::time::Duration;
use thiserror::Error;

/// Ways a single fetch against the REST resource can fail.
///
/// Every variant is locally recoverable by re-issuing the command that
/// produced it. Cloneable so it can live in published state snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
    },

    /// The request never completed (DNS, connect, reset, timeout).
    #[error("{message}")]
    Transport {
        /// Human-readable description from the transport.
        message: String,
    },

    /// The server answered 2xx but the body was not the expected JSON.
    #[error("invalid response body: {message}")]
    Decode {
        /// Decoder error description.
        message: String,
    },
}

impl FetchError {
    /// Create a transport failure from any displayable cause.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// The transport failure reported when a request exceeds its deadline.
    pub fn timeout(after: Duration) -> Self {
        Self::Transport {
            message: format!("request timed out after {}ms", after.as_millis()),
        }
    }

    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure is a 404 from the server.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode {
            message: e.to_string(),
        }
    }
}
