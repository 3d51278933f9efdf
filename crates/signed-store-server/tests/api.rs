//! Integration tests for the HTTP API.
//!
//! These tests drive the router in-process:
//! - Reading the signed value
//! - Issuing signatures without committing
//! - Committing with valid, invalid, absent and malformed signatures
//! - Public key export and CORS

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::TestServer;
use serde_json::json;
use signed_store_core::{KeyAuthority, Signature};
use tower::ServiceExt;

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
async fn test_read_seed_value_is_signed() {
    let server = TestServer::new();

    let (status, body) = server.json("GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "Hello World");

    let signature = Signature::from_base64(body["signature"].as_str().unwrap()).unwrap();
    assert!(server
        .state
        .authority()
        .verify(b"Hello World", signature.as_bytes()));
}

#[tokio::test]
async fn test_read_has_only_data_and_signature() {
    let server = TestServer::new();

    let (_, body) = server.json("GET", "/", None).await;

    let fields: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
    assert_eq!(fields.len(), 2);
    assert!(fields.contains(&"data".to_string()));
    assert!(fields.contains(&"signature".to_string()));
}

#[tokio::test]
async fn test_read_custom_seed() {
    let server = TestServer::with_seed("Seeded");
    assert_eq!(server.current_value().await, "Seeded");
}

// =============================================================================
// Two-step update
// =============================================================================

#[tokio::test]
async fn test_sign_then_write() {
    let server = TestServer::new();

    let signature = server.sign("New Value").await;

    let (status, body) = server
        .raw(
            "POST",
            "/",
            Some(json!({ "data": "New Value", "signature": signature })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    assert_eq!(server.current_value().await, "New Value");
}

#[tokio::test]
async fn test_sign_does_not_commit() {
    let server = TestServer::new();

    let _ = server.sign("New Value").await;

    assert_eq!(server.current_value().await, "Hello World");
}

#[tokio::test]
async fn test_sign_missing_data() {
    let server = TestServer::new();

    let (status, body) = server.json("POST", "/sign", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing required field: data" }));
}

// =============================================================================
// Rejected writes
// =============================================================================

#[tokio::test]
async fn test_write_garbage_signature_rejected() {
    let server = TestServer::new();

    let (status, body) = server
        .json(
            "POST",
            "/",
            Some(json!({ "data": "New Value", "signature": "bm9uc2Vuc2U=" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid signature" }));
    assert_eq!(server.current_value().await, "Hello World");
}

#[tokio::test]
async fn test_write_missing_signature_rejected() {
    let server = TestServer::new();

    let (status, body) = server
        .json("POST", "/", Some(json!({ "data": "New Value" })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid signature" }));
    assert_eq!(server.current_value().await, "Hello World");
}

#[tokio::test]
async fn test_write_non_base64_signature_rejected() {
    let server = TestServer::new();

    let (status, body) = server
        .json(
            "POST",
            "/",
            Some(json!({ "data": "New Value", "signature": "othersignature" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid signature" }));
}

#[tokio::test]
async fn test_write_missing_data() {
    let server = TestServer::new();
    let signature = server.sign("New Value").await;

    let (status, body) = server
        .json("POST", "/", Some(json!({ "signature": signature })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing required field: data" }));
    assert_eq!(server.current_value().await, "Hello World");
}

#[tokio::test]
async fn test_write_unpadded_signature_accepted() {
    let server = TestServer::new();
    let signature = server.sign("New Value").await;
    let unpadded = signature.trim_end_matches('=');
    assert_ne!(unpadded, signature);

    let (status, _) = server
        .raw(
            "POST",
            "/",
            Some(json!({ "data": "New Value", "signature": unpadded })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(server.current_value().await, "New Value");
}

// =============================================================================
// Unreadable bodies
// =============================================================================

async fn send_text(
    server: &TestServer,
    uri: &str,
    content_type: Option<&str>,
    text: &str,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    let request = builder.body(Body::from(text.to_string())).unwrap();
    let response = server.router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_malformed_json_is_json_error() {
    let server = TestServer::new();

    for uri in ["/", "/sign"] {
        let (status, body) =
            send_text(&server, uri, Some("application/json"), "{\"data\": ").await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].is_string(), "{}", uri);
    }
    assert_eq!(server.current_value().await, "Hello World");
}

#[tokio::test]
async fn test_missing_content_type_is_json_error() {
    let server = TestServer::new();

    let (status, body) = send_text(&server, "/", None, "{\"data\": \"New Value\"}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_sign_non_string_data_rejected() {
    let server = TestServer::new();

    let (status, body) = server.json("POST", "/sign", Some(json!({ "data": 42 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

// =============================================================================
// Public key
// =============================================================================

#[tokio::test]
async fn test_public_key_is_plain_text_pem() {
    let server = TestServer::new();

    let request = Request::builder()
        .uri("/public-key")
        .body(Body::empty())
        .unwrap();
    let response = server.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let pem = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----"));
    assert_eq!(pem, server.state.authority().public_key_pem().as_str());
}

#[tokio::test]
async fn test_public_key_served_verbatim_each_time() {
    let server = TestServer::new();

    let (_, first) = server.raw("GET", "/public-key", None).await;
    let (_, second) = server.raw("GET", "/public-key", None).await;

    assert_eq!(first, second);
}

// =============================================================================
// Plumbing
// =============================================================================

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let server = TestServer::new();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/sign")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = server.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::new();

    let (status, body) = server.json("GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["kid"], "test-server");
}

#[tokio::test]
async fn test_instances_are_isolated() {
    let first = TestServer::new();
    let second = TestServer::new();

    let signature = first.sign("Only First").await;
    let (status, _) = first
        .json(
            "POST",
            "/",
            Some(json!({ "data": "Only First", "signature": signature })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(first.current_value().await, "Only First");
    assert_eq!(second.current_value().await, "Hello World");
}
