//! Result type aliases for Pulseboard.

use crate::DashboardError;

/// A specialized `Result` type for dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;
