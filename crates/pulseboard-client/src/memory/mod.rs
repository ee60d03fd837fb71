//! In-memory data client backed by fixtures.

mod fixtures;

pub use fixtures::{seed_metrics, seed_users};

use crate::{DataClient, ResourcePath};
use async_trait::async_trait;
use parking_lot::RwLock;
use pulseboard_config::ClientConfig;
use pulseboard_core::{
    ApiResponse, DashboardError, DashboardResult, DeleteAck, Metric, NewUser, User, UserId,
    UserPatch,
};
use rand::Rng;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Fixed latency used when none is configured.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// Fixture-backed client with simulated latency.
///
/// Writes mutate the fixtures in place, so later fetches observe earlier
/// writes for the lifetime of the client. No I/O is performed.
pub struct InMemoryDataClient {
    users: RwLock<Vec<User>>,
    metrics: RwLock<Vec<Metric>>,
    latency: Duration,
    jitter: Duration,
}

impl InMemoryDataClient {
    /// Creates a client over the given fixtures.
    #[must_use]
    pub fn new(users: Vec<User>, metrics: Vec<Metric>) -> Self {
        Self {
            users: RwLock::new(users),
            metrics: RwLock::new(metrics),
            latency: DEFAULT_LATENCY,
            jitter: Duration::ZERO,
        }
    }

    /// Creates a client with the built-in seed users and metrics.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed_users(), seed_metrics())
    }

    /// Creates a client with no users and no metrics.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Creates a client from configuration.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        let client = if config.seed_fixtures {
            Self::seeded()
        } else {
            Self::empty()
        };
        client.with_latency(config.mock_latency(), config.mock_jitter())
    }

    /// Sets the fixed latency and the upper bound of random jitter.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration, jitter: Duration) -> Self {
        self.latency = latency;
        self.jitter = jitter;
        self
    }

    /// Returns a copy of the current user fixtures.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.users.read().clone()
    }

    /// Returns a copy of the current metric fixtures.
    #[must_use]
    pub fn metrics(&self) -> Vec<Metric> {
        self.metrics.read().clone()
    }

    async fn simulate_latency(&self) {
        let extra = if self.jitter.is_zero() {
            Duration::ZERO
        } else {
            let bound = u64::try_from(self.jitter.as_millis()).unwrap_or(u64::MAX);
            Duration::from_millis(rand::thread_rng().gen_range(0..=bound))
        };

        let delay = self.latency + extra;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn read(&self, path: &ResourcePath) -> DashboardResult<Value> {
        match path {
            ResourcePath::Users => Ok(serde_json::to_value(&*self.users.read())?),
            ResourcePath::User(id) => {
                let users = self.users.read();
                let user = users
                    .iter()
                    .find(|u| &u.id == id)
                    .ok_or_else(|| DashboardError::not_found("User", id))?;
                Ok(serde_json::to_value(user)?)
            }
            ResourcePath::Metrics => Ok(serde_json::to_value(&*self.metrics.read())?),
            ResourcePath::Metric(id) => {
                let metrics = self.metrics.read();
                let metric = metrics
                    .iter()
                    .find(|m| &m.id == id)
                    .ok_or_else(|| DashboardError::not_found("Metric", id))?;
                Ok(serde_json::to_value(metric)?)
            }
        }
    }

    fn insert(&self, path: &ResourcePath, payload: Value) -> DashboardResult<Value> {
        if *path != ResourcePath::Users {
            return Err(read_only(path));
        }

        let new_user: NewUser = serde_json::from_value(payload)?;
        let mut users = self.users.write();

        let mut id = UserId::generate();
        while users.iter().any(|u| u.id == id) {
            id = UserId::generate();
        }

        let user = User::from_new_with(new_user, id, chrono::Utc::now());
        let body = serde_json::to_value(&user)?;
        users.push(user);
        Ok(body)
    }

    fn merge(&self, path: &ResourcePath, payload: Value) -> DashboardResult<Value> {
        let ResourcePath::User(id) = path else {
            return Err(read_only(path));
        };

        let patch: UserPatch = serde_json::from_value(payload)?;
        let mut users = self.users.write();
        let user = users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| DashboardError::not_found("User", id))?;
        user.apply_patch(&patch);
        Ok(serde_json::to_value(&*user)?)
    }

    fn remove(&self, path: &ResourcePath) -> DashboardResult<Value> {
        let ResourcePath::User(id) = path else {
            return Err(read_only(path));
        };

        let mut users = self.users.write();
        let index = users
            .iter()
            .position(|u| &u.id == id)
            .ok_or_else(|| DashboardError::not_found("User", id))?;
        users.remove(index);
        Ok(serde_json::to_value(DeleteAck { id: id.clone() })?)
    }
}

impl Default for InMemoryDataClient {
    fn default() -> Self {
        Self::seeded()
    }
}

fn read_only(path: &ResourcePath) -> DashboardError {
    DashboardError::validation(format!("Operation not supported on {}", path))
}

fn respond(result: DashboardResult<Value>, message: &str) -> ApiResponse<Value> {
    ApiResponse::from_result(result, message)
}

#[async_trait]
impl DataClient for InMemoryDataClient {
    fn name(&self) -> &'static str {
        "in-memory"
    }

    async fn fetch(&self, path: &str) -> ApiResponse<Value> {
        debug!("In-memory fetch {}", path);
        self.simulate_latency().await;
        let result = path.parse::<ResourcePath>().and_then(|p| self.read(&p));
        respond(result, "Fetched successfully")
    }

    async fn create(&self, path: &str, payload: Value) -> ApiResponse<Value> {
        debug!("In-memory create {}", path);
        self.simulate_latency().await;
        let result = path.parse::<ResourcePath>().and_then(|p| self.insert(&p, payload));
        respond(result, "User created successfully")
    }

    async fn update(&self, path: &str, payload: Value) -> ApiResponse<Value> {
        debug!("In-memory update {}", path);
        self.simulate_latency().await;
        let result = path.parse::<ResourcePath>().and_then(|p| self.merge(&p, payload));
        respond(result, "User updated successfully")
    }

    async fn delete(&self, path: &str) -> ApiResponse<Value> {
        debug!("In-memory delete {}", path);
        self.simulate_latency().await;
        let result = path.parse::<ResourcePath>().and_then(|p| self.remove(&p));
        respond(result, "User deleted successfully")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataClientExt;
    use pulseboard_core::UserRole;
    use serde_json::json;

    fn instant(client: InMemoryDataClient) -> InMemoryDataClient {
        client.with_latency(Duration::ZERO, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_fetch_seeded_users() {
        let client = instant(InMemoryDataClient::seeded());
        let response: ApiResponse<Vec<User>> = client.fetch_as("/users").await;
        assert!(response.success);
        assert_eq!(response.data.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_single_user_and_metric() {
        let client = instant(InMemoryDataClient::seeded());

        let user: ApiResponse<User> = client.fetch_as("/users/2").await;
        assert_eq!(user.data.unwrap().name, "Jane Smith");

        let metric: ApiResponse<Metric> = client.fetch_as("/metrics/3").await;
        assert_eq!(metric.data.unwrap().unit, "sessions");
    }

    #[tokio::test]
    async fn test_fetch_missing_user_is_failure_envelope() {
        let client = instant(InMemoryDataClient::seeded());
        let response = client.fetch("/users/missing").await;
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.message, "User with id missing not found");
    }

    #[tokio::test]
    async fn test_unknown_resource() {
        let client = instant(InMemoryDataClient::seeded());
        let response = client.fetch("/orders").await;
        assert!(!response.success);
        assert_eq!(response.message, "Unknown resource: /orders");
    }

    #[tokio::test]
    async fn test_create_stamps_id_and_timestamp() {
        let client = instant(InMemoryDataClient::empty());
        let before = chrono::Utc::now();

        let response: ApiResponse<User> = client
            .create_as("/users", &NewUser::new("Jane", "jane@x.com", UserRole::User, true))
            .await;
        let user = response.into_result().unwrap();

        assert!(!user.id.as_str().is_empty());
        assert!(user.created_at >= before);
        assert_eq!(client.users(), vec![user]);
    }

    #[tokio::test]
    async fn test_create_ids_are_unique() {
        let client = instant(InMemoryDataClient::empty());
        let payload = NewUser::new("Same", "same@x.com", UserRole::User, true);

        let a: User = client.create_as("/users", &payload).await.into_result().unwrap();
        let b: User = client.create_as("/users", &payload).await.into_result().unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_update_merges_only_present_fields() {
        let client = instant(InMemoryDataClient::seeded());
        let original = client.users()[0].clone();

        let response: ApiResponse<User> = client
            .update_as("/users/1", &UserPatch::new().is_active(false))
            .await;
        let updated = response.into_result().unwrap();

        assert!(!updated.is_active);
        assert_eq!(updated.name, original.name);
        assert_eq!(updated.email, original.email);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(client.users()[0], updated);
    }

    #[tokio::test]
    async fn test_update_ignores_identity_fields_in_payload() {
        let client = instant(InMemoryDataClient::seeded());
        let response = client
            .update("/users/1", json!({ "id": "hijack", "name": "Johnny" }))
            .await;
        let updated: User = serde_json::from_value(response.data.unwrap()).unwrap();
        assert_eq!(updated.id.as_str(), "1");
        assert_eq!(updated.name, "Johnny");
    }

    #[tokio::test]
    async fn test_update_missing_user_fails() {
        let client = instant(InMemoryDataClient::seeded());
        let response = client.update("/users/404", json!({ "name": "x" })).await;
        assert!(!response.success);
        assert_eq!(client.users(), seed_users());
    }

    #[tokio::test]
    async fn test_delete_returns_ack_and_removes() {
        let client = instant(InMemoryDataClient::seeded());
        let ack: ApiResponse<DeleteAck> = client.delete_as("/users/3").await;
        assert_eq!(ack.into_result().unwrap().id.as_str(), "3");
        assert_eq!(client.users().len(), 2);

        let again = client.delete("/users/3").await;
        assert!(!again.success);
        assert_eq!(client.users().len(), 2);
    }

    #[tokio::test]
    async fn test_metrics_are_read_only() {
        let client = instant(InMemoryDataClient::seeded());
        assert!(!client.create("/metrics", json!({})).await.success);
        assert!(!client.update("/metrics/1", json!({ "value": 1 })).await.success);
        assert!(!client.delete("/metrics/1").await.success);
        assert_eq!(client.metrics(), seed_metrics());
    }

    #[tokio::test]
    async fn test_malformed_create_payload() {
        let client = instant(InMemoryDataClient::empty());
        let response = client.create("/users", json!({ "name": 5 })).await;
        assert!(!response.success);
        assert!(response.message.starts_with("Decode error"));
        assert!(client.users().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let client = InMemoryDataClient::empty().with_latency(Duration::from_millis(300), Duration::from_millis(50));
        let start = tokio::time::Instant::now();
        client.fetch("/users").await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed <= Duration::from_millis(351));
    }

    #[test]
    fn test_from_config() {
        let config = ClientConfig {
            seed_fixtures: false,
            ..ClientConfig::default()
        };
        let client = InMemoryDataClient::from_config(&config);
        assert!(client.users().is_empty());
        assert_eq!(client.latency, Duration::from_millis(500));
    }
}
