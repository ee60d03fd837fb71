//! Unified error type for the dashboard core.

use thiserror::Error;

/// Unified error type for Pulseboard.
///
/// Data clients never return this across their boundary; they fold it into
/// an [`ApiResponse`](crate::ApiResponse) instead. Store intents use it to
/// re-raise a recorded failure to their direct caller.
#[derive(Error, Debug)]
pub enum DashboardError {
    // ============ Lookup Errors ============
    /// Resource not found
    #[error("{resource_type} with id {id} not found")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict error (e.g., duplicate identifier)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Failure reported by a data client through a failure envelope.
    ///
    /// The message is the envelope's message, verbatim.
    #[error("{0}")]
    Api(String),

    // ============ Transport Errors ============
    /// Network or transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Payload could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    // ============ Infrastructure Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Api(_) => "API_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Status { .. } => "HTTP_STATUS",
            Self::Timeout(_) => "TIMEOUT",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error is worth retrying.
    ///
    /// Only transport-level trouble and server-side statuses qualify;
    /// lookups and payload problems fail the same way every time.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
