//! Timeout wrapper for async operations.

use pulseboard_core::DashboardError;
use std::time::Duration;

/// Wraps an async operation with a timeout.
pub async fn with_timeout<F, Fut, T>(duration: Duration, f: F) -> Result<T, DashboardError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, DashboardError>>,
{
    tokio::time::timeout(duration, f())
        .await
        .map_err(|_| DashboardError::Timeout(format!("no response within {:?}", duration)))?
}
