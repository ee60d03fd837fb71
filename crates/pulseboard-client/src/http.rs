//! HTTP/JSON data client.
//!
//! Maps the four operations onto `GET`, `POST`, `PATCH` and `DELETE` under a
//! configurable base URL. The backend may answer with a full envelope or
//! with the bare payload; both are normalized into an [`ApiResponse`].

use crate::{DataClient, ResourcePath, ResponseCache};
use async_trait::async_trait;
use pulseboard_config::AppConfig;
use pulseboard_core::{ApiResponse, DashboardError, DashboardResult};
use pulseboard_resilience::{with_timeout, RetryPolicy};
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// Network-backed data client.
pub struct HttpDataClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
    cache: Option<ResponseCache>,
}

impl HttpDataClient {
    /// Creates a new HTTP data client.
    ///
    /// `timeout` bounds each request, from connect to the last body byte.
    pub fn new(base_url: &str, timeout: Duration) -> DashboardResult<Self> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| DashboardError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, base_url, timeout))
    }

    /// Creates a client around a preconfigured reqwest client.
    pub fn with_client(client: Client, base_url: &str, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            retry: RetryPolicy::no_retry(),
            cache: None,
        }
    }

    /// Creates a client with timeout, retry and cache taken from configuration.
    pub fn from_config(config: &AppConfig) -> DashboardResult<Self> {
        let mut client = Self::new(&config.client.base_url, config.client.timeout())?
            .with_retry(RetryPolicy::from(&config.retry));
        client.cache = ResponseCache::from_config(&config.cache);
        Ok(client)
    }

    /// Sets the retry policy applied to reads.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Enables response caching for reads.
    #[must_use]
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Returns the response cache, if enabled.
    #[must_use]
    pub const fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> DashboardResult<ApiResponse<Value>> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        with_timeout(self.timeout, || async move {
            let response = request.send().await.map_err(map_transport_error)?;
            let status = response.status();
            let text = response.text().await.map_err(map_transport_error)?;
            interpret_response(status, &text)
        })
        .await
    }

    async fn write(&self, method: Method, path: &str, body: Option<Value>) -> (Option<ResourcePath>, ApiResponse<Value>) {
        let resource = match path.parse::<ResourcePath>() {
            Ok(resource) => resource,
            Err(e) => return (None, ApiResponse::from_error(&e)),
        };

        let result = self.send(method.clone(), &resource.to_string(), body.as_ref()).await;

        if let Some(cache) = &self.cache {
            cache.invalidate_collection(&resource.collection_path());
        }

        let response = into_envelope(result);
        if !response.success {
            warn!("HTTP {} {} failed: {}", method, resource, response.message);
        }
        (Some(resource), response)
    }
}

#[async_trait]
impl DataClient for HttpDataClient {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, path: &str) -> ApiResponse<Value> {
        debug!("HTTP GET {}", path);

        let resource = match path.parse::<ResourcePath>() {
            Ok(resource) => resource.to_string(),
            Err(e) => return ApiResponse::from_error(&e),
        };

        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(&resource)) {
            return cached;
        }
        let generation = self.cache.as_ref().map(|c| c.generation(&resource));

        let result = self
            .retry
            .execute_if(|| self.send(Method::GET, &resource, None), DashboardError::is_retriable)
            .await;

        let response = into_envelope(result);
        if response.success {
            if let (Some(cache), Some(generation)) = (&self.cache, generation) {
                cache.put(&resource, generation, &response);
            }
        } else {
            warn!("HTTP GET {} failed: {}", resource, response.message);
        }
        response
    }

    async fn create(&self, path: &str, payload: Value) -> ApiResponse<Value> {
        debug!("HTTP POST {}", path);
        self.write(Method::POST, path, Some(payload)).await.1
    }

    async fn update(&self, path: &str, payload: Value) -> ApiResponse<Value> {
        debug!("HTTP PATCH {}", path);
        self.write(Method::PATCH, path, Some(payload)).await.1
    }

    async fn delete(&self, path: &str) -> ApiResponse<Value> {
        debug!("HTTP DELETE {}", path);
        let (resource, mut response) = self.write(Method::DELETE, path, None).await;

        // 204 and friends carry no body; acknowledge with the id from the path
        if response.success && response.data.as_ref().map_or(true, Value::is_null) {
            response.data = match resource {
                Some(ResourcePath::User(id)) => Some(json!({ "id": id })),
                Some(ResourcePath::Metric(id)) => Some(json!({ "id": id })),
                _ => None,
            };
        }
        response
    }
}

/// Normalizes a raw HTTP response into an envelope.
///
/// Success statuses yield the body's envelope when it has one, or wrap the
/// bare body. Other statuses become [`DashboardError::Status`], carrying the
/// body's `message` when present.
fn interpret_response(status: StatusCode, body: &str) -> DashboardResult<ApiResponse<Value>> {
    let trimmed = body.trim();
    let parsed: Option<Value> = if trimmed.is_empty() {
        None
    } else {
        serde_json::from_str(trimmed).ok()
    };

    if !status.is_success() {
        return Err(map_http_error(status, parsed.as_ref()));
    }

    let reason = status.canonical_reason().unwrap_or("OK");
    match parsed {
        Some(value) if is_envelope(&value) => Ok(serde_json::from_value(value)?),
        Some(value) => Ok(ApiResponse::ok(value, reason)),
        None if trimmed.is_empty() => Ok(ApiResponse {
            data: None,
            message: reason.to_string(),
            success: true,
        }),
        None => Err(DashboardError::Decode(format!(
            "Response body is not valid JSON (status {})",
            status
        ))),
    }
}

fn is_envelope(value: &Value) -> bool {
    value.get("success").is_some_and(Value::is_boolean)
}

fn map_http_error(status: StatusCode, body: Option<&Value>) -> DashboardError {
    let message = body
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map_or_else(|| format!("Request failed with status {}", status), ToString::to_string);

    DashboardError::Status {
        status: status.as_u16(),
        message,
    }
}

fn map_transport_error(err: reqwest::Error) -> DashboardError {
    if err.is_timeout() {
        DashboardError::Timeout(err.to_string())
    } else if err.is_decode() {
        DashboardError::Decode(err.to_string())
    } else {
        DashboardError::Transport(err.to_string())
    }
}

fn into_envelope(result: DashboardResult<ApiResponse<Value>>) -> ApiResponse<Value> {
    match result {
        Ok(response) => response,
        Err(DashboardError::Status { message, .. }) => ApiResponse::failure(message),
        Err(e) => ApiResponse::from_error(&e),
    }
}
