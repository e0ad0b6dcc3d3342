//! Failure taxonomy for endpoint calls.
//!
//! ERROR HANDLING
//! ==============
//! The binder keys its commit policy off these variants: `Unauthorized`
//! forces a sign-out and is never shown, `Aborted` is dropped at the
//! commit boundary, and everything else surfaces through the resource
//! envelope's `error` field with the prior value preserved.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use thiserror::Error;

/// HTTP status the backend uses for an invalid or expired credential.
pub const UNAUTHORIZED_STATUS: u16 = 401;

/// Classified failure of an endpoint call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Raised locally when a bound resource is asked to fetch without a token.
    #[error("authentication required")]
    AuthenticationRequired,
    /// The bearer credential was rejected; the session is no longer valid.
    #[error("session expired")]
    Unauthorized,
    /// The server answered with a non-success status other than 401.
    #[error("request failed with status {status}")]
    Status {
        /// HTTP status code of the response.
        status: u16,
        /// Response body text, if any.
        message: String,
    },
    /// The request never produced a response (DNS, connection, CORS, ...).
    #[error("network error: {0}")]
    Network(String),
    /// The request was cancelled through its abort signal.
    #[error("request aborted")]
    Aborted,
}

impl ApiError {
    /// Whether this failure must cascade into a forced sign-out.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Whether this failure is a cancellation that must never commit state.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }

    /// Classify a non-success HTTP response.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        if status == UNAUTHORIZED_STATUS {
            Self::Unauthorized
        } else {
            Self::Status { status, message }
        }
    }

    /// Classify a transport-level failure message.
    ///
    /// Fetch rejections caused by an abort carry an `AbortError` marker in
    /// their message; those map to [`ApiError::Aborted`].
    #[must_use]
    pub fn from_transport(message: &str) -> Self {
        if message.to_ascii_lowercase().contains("abort") {
            Self::Aborted
        } else {
            Self::Network(message.to_owned())
        }
    }
}
