//! Shared fixtures for HTTP client integration tests.

use pulseboard_client::HttpDataClient;
use pulseboard_resilience::RetryPolicy;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::MockServer;

/// A wiremock server plus a client pointed at it.
pub struct TestBackend {
    pub server: MockServer,
}

impl TestBackend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL including the `/api` prefix the client is configured with.
    pub fn base_url(&self) -> String {
        format!("{}/api", self.server.uri())
    }

    pub fn client(&self) -> HttpDataClient {
        HttpDataClient::new(&self.base_url(), Duration::from_secs(2)).expect("Failed to build client")
    }

    pub fn retrying_client(&self, attempts: u32) -> HttpDataClient {
        self.client().with_retry(RetryPolicy {
            max_attempts: attempts,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            multiplier: 2.0,
            jitter: false,
        })
    }
}

pub fn user_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "role": "user",
        "isActive": true,
        "createdAt": "2024-01-15T09:00:00Z"
    })
}
