//! Shared helpers for store integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use pulseboard_client::{DataClient, InMemoryDataClient};
use pulseboard_core::{ApiResponse, NewUser, UserRole};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;

/// In-memory client without simulated latency.
pub fn instant(client: InMemoryDataClient) -> InMemoryDataClient {
    client.with_latency(Duration::ZERO, Duration::ZERO)
}

pub fn new_user(name: &str) -> NewUser {
    NewUser::new(name, format!("{}@x.com", name.to_lowercase()), UserRole::User, true)
}

/// Polls `condition` until it holds, failing the test after five seconds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

/// Wraps a client and holds every call until the test releases it,
/// recording when each call starts and ends.
pub struct GatedClient {
    inner: Box<dyn DataClient>,
    permits: Semaphore,
    started: AtomicUsize,
    log: Mutex<Vec<String>>,
}

impl GatedClient {
    pub fn new(inner: InMemoryDataClient) -> Self {
        Self::wrapping(instant(inner))
    }

    pub fn wrapping(inner: impl DataClient + 'static) -> Self {
        Self {
            inner: Box::new(inner),
            permits: Semaphore::new(0),
            started: AtomicUsize::new(0),
            log: Mutex::new(Vec::new()),
        }
    }

    /// Lets `n` held calls proceed.
    pub fn release(&self, n: usize) {
        self.permits.add_permits(n);
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    async fn enter(&self, label: &str) {
        self.log.lock().push(format!("start {label}"));
        self.started.fetch_add(1, Ordering::SeqCst);
        self.permits
            .acquire()
            .await
            .expect("gate closed")
            .forget();
    }

    fn leave(&self, label: &str) {
        self.log.lock().push(format!("end {label}"));
    }
}

#[async_trait]
impl DataClient for GatedClient {
    fn name(&self) -> &'static str {
        "gated"
    }

    async fn fetch(&self, path: &str) -> ApiResponse<Value> {
        let label = format!("fetch {path}");
        self.enter(&label).await;
        let response = self.inner.fetch(path).await;
        self.leave(&label);
        response
    }

    async fn create(&self, path: &str, payload: Value) -> ApiResponse<Value> {
        let label = format!("create {path}");
        self.enter(&label).await;
        let response = self.inner.create(path, payload).await;
        self.leave(&label);
        response
    }

    async fn update(&self, path: &str, payload: Value) -> ApiResponse<Value> {
        let label = format!("update {path}");
        self.enter(&label).await;
        let response = self.inner.update(path, payload).await;
        self.leave(&label);
        response
    }

    async fn delete(&self, path: &str) -> ApiResponse<Value> {
        let label = format!("delete {path}");
        self.enter(&label).await;
        let response = self.inner.delete(path).await;
        self.leave(&label);
        response
    }
}

/// A client whose every call panics.
pub struct PanickingClient;

#[async_trait]
impl DataClient for PanickingClient {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn fetch(&self, _path: &str) -> ApiResponse<Value> {
        panic!("fetch exploded")
    }

    async fn create(&self, _path: &str, _payload: Value) -> ApiResponse<Value> {
        panic!("create exploded")
    }

    async fn update(&self, _path: &str, _payload: Value) -> ApiResponse<Value> {
        panic!("update exploded")
    }

    async fn delete(&self, _path: &str) -> ApiResponse<Value> {
        panic!("delete exploded")
    }
}
