//! The data client contract.

use async_trait::async_trait;
use pulseboard_core::{ApiResponse, DashboardError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Uniform four-operation interface over a logical resource path.
///
/// Implementations must answer every call with an envelope. Not-found,
/// transport failures and bad statuses all become `success == false`.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait DataClient: Send + Sync {
    /// Short name of the implementation, for logs.
    fn name(&self) -> &'static str;

    /// Fetches a collection (`/users`) or a single item (`/users/{id}`).
    async fn fetch(&self, path: &str) -> ApiResponse<Value>;

    /// Creates an entity under a collection path. The client assigns the
    /// identifier and creation timestamp.
    async fn create(&self, path: &str, payload: Value) -> ApiResponse<Value>;

    /// Merges a partial payload into the item at `path`.
    async fn update(&self, path: &str, payload: Value) -> ApiResponse<Value>;

    /// Deletes the item at `path`, answering with `{ "id": ... }`.
    async fn delete(&self, path: &str) -> ApiResponse<Value>;
}

/// Typed convenience layer over [`DataClient`].
///
/// Payload (de)serialization failures surface as failure envelopes, so the
/// no-error-crosses-the-boundary rule holds for typed calls too.
#[async_trait]
pub trait DataClientExt: DataClient {
    /// Fetches and decodes a resource.
    async fn fetch_as<T>(&self, path: &str) -> ApiResponse<T>
    where
        T: DeserializeOwned + Send,
    {
        decode_envelope(self.fetch(path).await)
    }

    /// Serializes `payload`, creates, and decodes the created entity.
    async fn create_as<P, T>(&self, path: &str, payload: &P) -> ApiResponse<T>
    where
        P: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        match serde_json::to_value(payload) {
            Ok(body) => decode_envelope(self.create(path, body).await),
            Err(e) => ApiResponse::from_error(&DashboardError::from(e)),
        }
    }

    /// Serializes `patch`, updates, and decodes the merged entity.
    async fn update_as<P, T>(&self, path: &str, patch: &P) -> ApiResponse<T>
    where
        P: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        match serde_json::to_value(patch) {
            Ok(body) => decode_envelope(self.update(path, body).await),
            Err(e) => ApiResponse::from_error(&DashboardError::from(e)),
        }
    }

    /// Deletes and decodes the acknowledgement.
    async fn delete_as<T>(&self, path: &str) -> ApiResponse<T>
    where
        T: DeserializeOwned + Send,
    {
        decode_envelope(self.delete(path).await)
    }
}

impl<C: DataClient + ?Sized> DataClientExt for C {}

/// Decodes the payload of an untyped envelope.
pub fn decode_envelope<T: DeserializeOwned>(envelope: ApiResponse<Value>) -> ApiResponse<T> {
    let ApiResponse { data, message, success } = envelope;

    if !success {
        return ApiResponse::failure(message);
    }

    match data {
        Some(value) => match serde_json::from_value(value) {
            Ok(decoded) => ApiResponse::ok(decoded, message),
            Err(e) => ApiResponse::from_error(&DashboardError::from(e)),
        },
        None => ApiResponse {
            data: None,
            message,
            success,
        },
    }
}
