//! # Pulseboard Resilience
//!
//! Resilience patterns for the network data client.
//! Provides retry with exponential backoff and timeouts.

pub mod retry;
pub mod timeout;

pub use retry::*;
pub use timeout::*;
