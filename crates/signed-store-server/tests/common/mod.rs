//! Shared helpers for the server integration tests.
//! Note: #[allow(dead_code)] because each test file compiles common/ separately.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use signed_store_core::{RsaKeyAuthority, DEFAULT_SEED};
use signed_store_server::{create_router, AppState};
use std::sync::Arc;
use tower::ServiceExt;

pub const KEY_A: &str = include_str!("../../../../fixtures/rsa-2048-a.pem");
#[allow(dead_code)]
pub const KEY_B: &str = include_str!("../../../../fixtures/rsa-2048-b.pem");

/// An isolated server instance: fresh store, fixture key.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestServer {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: &str) -> Self {
        let authority = RsaKeyAuthority::from_pkcs8_pem("test-server", KEY_A)
            .expect("Failed to load fixture key");
        let state = Arc::new(AppState::new(Arc::new(authority), seed));
        let router = create_router(state.clone());
        Self { router, state }
    }

    /// Send a request and return status and body as JSON (Null when empty).
    pub async fn json(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = self.raw(method, uri, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Send a request and return status and raw body bytes.
    pub async fn raw(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = match body {
            Some(v) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(serde_json::to_vec(&v).unwrap())
            }
            None => Body::empty(),
        };

        let request = builder.body(body).unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    /// Current value as seen through `GET /`.
    pub async fn current_value(&self) -> String {
        let (status, body) = self.json("GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        body["data"].as_str().unwrap().to_string()
    }

    /// Ask the server to sign `data`.
    pub async fn sign(&self, data: &str) -> String {
        let (status, body) = self
            .json("POST", "/sign", Some(serde_json::json!({ "data": data })))
            .await;
        assert_eq!(status, StatusCode::OK);
        body["signature"].as_str().unwrap().to_string()
    }
}
