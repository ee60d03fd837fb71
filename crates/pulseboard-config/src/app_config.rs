//! Application configuration structures.

use crate::ClientMode;
use pulseboard_core::telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Data client configuration.
    #[serde(default)]
    pub client: ClientConfig,

    /// Retry policy for the network client.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Response cache for the network client.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration.
    #[serde(default)]
    pub observability: TelemetryConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "pulseboard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Data client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Which client implementation to use.
    pub mode: ClientMode,
    /// Base URL of the HTTP backend.
    pub base_url: String,
    /// Transport timeout in seconds (HTTP client only).
    pub timeout_secs: u64,
    /// Fixed simulated latency in milliseconds (mock client only).
    pub mock_latency_ms: u64,
    /// Upper bound of random latency added on top (mock client only).
    pub mock_jitter_ms: u64,
    /// Whether the mock client starts with the built-in fixtures.
    pub seed_fixtures: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            mode: ClientMode::Mock,
            base_url: "http://localhost:3001/api".to_string(),
            timeout_secs: 10,
            mock_latency_ms: 500,
            mock_jitter_ms: 0,
            seed_fixtures: true,
        }
    }
}

impl ClientConfig {
    /// Returns the transport timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the fixed mock latency as a Duration.
    #[must_use]
    pub const fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }

    /// Returns the mock jitter bound as a Duration.
    #[must_use]
    pub const fn mock_jitter(&self) -> Duration {
        Duration::from_millis(self.mock_jitter_ms)
    }
}

/// Retry configuration for idempotent network reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds.
    pub initial_delay_ms: u64,
    /// Delay cap in milliseconds.
    pub max_delay_ms: u64,
    /// Multiplier for exponential backoff.
    pub multiplier: f64,
    /// Whether to add jitter to delays.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 200,
            max_delay_ms: 5_000,
            multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Returns the initial delay as a Duration.
    #[must_use]
    pub const fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Returns the delay cap as a Duration.
    #[must_use]
    pub const fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

/// Response cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable caching of successful reads.
    pub enabled: bool,
    /// Entry time-to-live in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_secs: 30,
        }
    }
}

impl CacheConfig {
    /// Returns the TTL as a Duration.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}
