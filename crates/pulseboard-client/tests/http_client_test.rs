//! Integration tests for HttpDataClient against a wiremock backend.

mod common;

use common::{user_json, TestBackend};
use pulseboard_client::{DataClient, DataClientExt, ResponseCache};
use pulseboard_core::{ApiResponse, DeleteAck, NewUser, User, UserPatch, UserRole};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_fetch_bare_collection() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_json("1", "Ann"), user_json("2", "Bo")])))
        .mount(&backend.server)
        .await;

    let response: ApiResponse<Vec<User>> = backend.client().fetch_as("/users").await;

    assert!(response.success);
    let users = response.data.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[1].name, "Bo");
}

#[tokio::test]
async fn test_fetch_envelope_body() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": user_json("1", "Ann"),
            "message": "User loaded",
            "success": true
        })))
        .mount(&backend.server)
        .await;

    let response: ApiResponse<User> = backend.client().fetch_as("/users/1").await;

    assert_eq!(response.message, "User loaded");
    assert_eq!(response.data.unwrap().id.as_str(), "1");
}

#[tokio::test]
async fn test_not_found_becomes_failure_envelope() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "data": null,
            "message": "User with id missing not found",
            "success": false
        })))
        .mount(&backend.server)
        .await;

    let response = backend.client().fetch("/users/missing").await;

    assert!(!response.success);
    assert!(response.data.is_none());
    assert_eq!(response.message, "User with id missing not found");
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/metrics"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&backend.server)
        .await;

    let response = backend.retrying_client(3).fetch("/metrics").await;

    assert!(response.success);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&backend.server)
        .await;

    let response = backend.retrying_client(3).fetch("/users").await;

    assert!(!response.success);
    assert_eq!(response.message, "Request failed with status 400 Bad Request");
}

#[tokio::test]
async fn test_create_posts_payload() {
    let backend = TestBackend::start().await;
    let payload = NewUser::new("Jane", "jane@x.com", UserRole::User, true);
    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(body_json(json!({
            "name": "Jane",
            "email": "jane@x.com",
            "role": "user",
            "isActive": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_json("9", "Jane")))
        .expect(1)
        .mount(&backend.server)
        .await;

    let response: ApiResponse<User> = backend.client().create_as("/users", &payload).await;

    assert!(response.success);
    assert_eq!(response.message, "Created");
    assert_eq!(response.data.unwrap().id.as_str(), "9");
}

#[tokio::test]
async fn test_update_sends_only_patch_fields() {
    let backend = TestBackend::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/users/1"))
        .and(body_json(json!({ "isActive": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("1", "Ann")))
        .expect(1)
        .mount(&backend.server)
        .await;

    let response: ApiResponse<User> = backend
        .client()
        .update_as("/users/1", &UserPatch::new().is_active(false))
        .await;

    assert!(response.success);
}

#[tokio::test]
async fn test_delete_no_content_is_acknowledged() {
    let backend = TestBackend::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/7"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&backend.server)
        .await;

    let response: ApiResponse<DeleteAck> = backend.client().delete_as("/users/7").await;

    assert!(response.success);
    assert_eq!(response.data.unwrap().id.as_str(), "7");
}

#[tokio::test]
async fn test_unknown_resource_never_hits_network() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;

    let response = backend.client().fetch("/orders").await;

    assert!(!response.success);
    assert_eq!(response.message, "Unknown resource: /orders");
}

#[tokio::test]
async fn test_connection_refused_is_failure_envelope() {
    let client = pulseboard_client::HttpDataClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();

    let response = client.fetch("/users").await;

    assert!(!response.success);
    assert!(response.message.starts_with("Transport error"));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])).set_delay(Duration::from_millis(500)))
        .mount(&backend.server)
        .await;

    let client = pulseboard_client::HttpDataClient::new(&backend.base_url(), Duration::from_millis(50)).unwrap();
    let response = client.fetch("/users").await;

    assert!(!response.success);
    assert!(response.message.starts_with("Operation timed out"));
}

#[tokio::test]
async fn test_cache_serves_reads_until_write() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_json("1", "Ann")])))
        .expect(2)
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "1" })))
        .mount(&backend.server)
        .await;

    let client = backend.client().with_cache(ResponseCache::new(Duration::from_secs(60)));

    assert!(client.fetch("/users").await.success);
    assert!(client.fetch("/users").await.success);
    assert!(client.delete("/users/1").await.success);
    assert!(client.fetch("/users").await.success);
}

#[tokio::test]
async fn test_read_overtaken_by_write_is_not_cached() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([user_json("1", "Ann")]))
                .set_delay(Duration::from_millis(300)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&backend.server)
        .await;

    let client = Arc::new(backend.client().with_cache(ResponseCache::new(Duration::from_secs(60))));

    let slow_read = tokio::spawn({
        let client = client.clone();
        async move { client.fetch("/users").await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(client.delete("/users/1").await.success);
    let stale = slow_read.await.unwrap();
    assert_eq!(stale.data, Some(json!([user_json("1", "Ann")])));

    let fresh = client.fetch("/users").await;
    assert!(fresh.success);
    assert_eq!(fresh.data, Some(json!([])));
}
