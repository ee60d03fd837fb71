//! The result envelope exchanged with data clients.
//!
//! Every data-client operation answers with an [`ApiResponse`]; failures
//! travel as `success == false` plus a human-readable message, never as a
//! Rust error crossing the client boundary.

use crate::{DashboardError, DashboardResult, UserId};
use serde::{Deserialize, Serialize};

/// Message used when an operation failed without saying why.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred";

/// Standard result envelope: `{ data, message, success }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Payload, present on success.
    pub data: Option<T>,
    /// Human-readable outcome.
    #[serde(default)]
    pub message: String,
    /// Whether the operation succeeded.
    pub success: bool,
}

impl<T> ApiResponse<T> {
    /// Creates a successful envelope.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: message.into(),
            success: true,
        }
    }

    /// Creates a failure envelope.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: message.into(),
            success: false,
        }
    }

    /// Folds an error into a failure envelope.
    pub fn from_error(error: &DashboardError) -> Self {
        Self::failure(error.to_string())
    }

    /// Builds an envelope from a result, using `message` on success.
    pub fn from_result(result: DashboardResult<T>, message: impl Into<String>) -> Self {
        match result {
            Ok(data) => Self::ok(data, message),
            Err(e) => Self::from_error(&e),
        }
    }

    /// Returns the failure message, falling back to a generic one when the
    /// client left it blank.
    #[must_use]
    pub fn failure_message(&self) -> &str {
        if self.message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE
        } else {
            &self.message
        }
    }

    /// Converts the envelope into a result.
    ///
    /// A failure envelope becomes [`DashboardError::Api`] carrying the
    /// envelope's message. A success envelope without payload is treated as
    /// a failure as well.
    pub fn into_result(self) -> DashboardResult<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(DashboardError::Api(format!(
                "Response reported success without data: {}",
                self.message
            ))),
            (false, _) => {
                let message = if self.message.trim().is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    self.message
                };
                Err(DashboardError::Api(message))
            }
        }
    }
}

/// Acknowledgement returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope() {
        let envelope = ApiResponse::ok(5, "Fetched");
        assert!(envelope.success);
        assert_eq!(envelope.into_result().unwrap(), 5);
    }

    #[test]
    fn test_failure_envelope_into_result_keeps_message() {
        let envelope: ApiResponse<u32> = ApiResponse::failure("User with id x not found");
        match envelope.into_result().unwrap_err() {
            DashboardError::Api(msg) => assert_eq!(msg, "User with id x not found"),
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_failure_message_falls_back() {
        let envelope: ApiResponse<u32> = ApiResponse::failure("  ");
        assert_eq!(envelope.failure_message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(envelope.into_result().unwrap_err().to_string(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_success_without_data_is_an_error() {
        let envelope: ApiResponse<u32> = ApiResponse {
            data: None,
            message: "OK".to_string(),
            success: true,
        };
        assert!(envelope.into_result().is_err());
    }

    #[test]
    fn test_from_error() {
        let envelope: ApiResponse<()> = ApiResponse::from_error(&DashboardError::not_found("User", "u-9"));
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message, "User with id u-9 not found");
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(ApiResponse::ok(DeleteAck { id: UserId::new("u-1") }, "Deleted")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "data": { "id": "u-1" }, "message": "Deleted", "success": true })
        );

        let failure: ApiResponse<DeleteAck> =
            serde_json::from_value(serde_json::json!({ "data": null, "message": "nope", "success": false })).unwrap();
        assert!(!failure.success);
    }
}
