// Standard library
use std::time::Duration;

// 3rd party crates
use reqwest::StatusCode;
use thiserror::Error;

/// Failure kinds surfaced by the request throttle.
///
/// Cloneable so a single outcome can fan out to every caller that
/// coalesced onto the same physical request.
#[derive(Debug, Clone, Error)]
pub enum ThrottleError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {status}: {snippet}")]
    Http { status: StatusCode, snippet: String },

    #[error("failed to decode response body: {0}")]
    Decode(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ThrottleError {
    fn from(error: reqwest::Error) -> Self {
        ThrottleError::Transport(error.to_string())
    }
}

impl ThrottleError {
    /// The HTTP status carried by an `Http` error, if that is what this is.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ThrottleError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ThrottleError::Timeout(_))
    }
}
