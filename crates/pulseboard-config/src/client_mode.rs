//! Data client selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which data client backs the dashboard store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientMode {
    /// In-memory fixtures with simulated latency.
    #[default]
    Mock,
    /// HTTP/JSON backend.
    Http,
}

impl ClientMode {
    /// Returns true if the in-memory client is selected.
    #[must_use]
    pub const fn is_mock(&self) -> bool {
        matches!(self, Self::Mock)
    }

    /// Returns true if the network client is selected.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Http)
    }
}

impl fmt::Display for ClientMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => write!(f, "mock"),
            Self::Http => write!(f, "http"),
        }
    }
}
