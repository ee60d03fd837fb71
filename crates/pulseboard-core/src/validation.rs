//! Validation helpers for collaborators that build payloads (forms).
//!
//! The store and data clients never call these; they accept any payload
//! that type-checks.

use crate::DashboardError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `DashboardError` on failure.
    fn validate_request(&self) -> Result<(), DashboardError> {
        self.validate().map_err(validation_errors_to_dashboard_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into a single message.
///
/// Fields are reported in name order so the message is stable.
#[must_use]
pub fn validation_errors_to_dashboard_error(errors: ValidationErrors) -> DashboardError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                format!("{field}: {message}")
            })
        })
        .collect();
    messages.sort();

    DashboardError::Validation(messages.join("; "))
}
