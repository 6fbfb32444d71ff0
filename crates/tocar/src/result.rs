//! Result and error types for Tocar.

use thiserror::Error;

/// Result type for Tocar operations
pub type TocarResult<T> = Result<T, TocarError>;

/// Errors that can occur in Tocar
#[derive(Debug, Error)]
pub enum TocarError {
    /// The host collaborator cannot be reached (snapshot provider or
    /// event executor). Fatal for the current operation.
    #[error("Host unavailable: {message}")]
    HostUnavailable {
        /// Error message
        message: String,
    },

    /// Input simulation error
    #[error("Input simulation failed: {message}")]
    InputError {
        /// Error message
        message: String,
    },

    /// JSON error (snapshot fixtures)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TocarError {
    /// Create a host-unavailable error
    #[must_use]
    pub fn host_unavailable(message: impl Into<String>) -> Self {
        Self::HostUnavailable {
            message: message.into(),
        }
    }

    /// Create an input simulation error
    #[must_use]
    pub fn input(message: impl Into<String>) -> Self {
        Self::InputError {
            message: message.into(),
        }
    }
}
