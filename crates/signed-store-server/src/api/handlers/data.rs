//! Value Handlers
//!
//! Reading the current value (always with a fresh signature) and
//! committing a new one (only with a signature that verifies).

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use signed_store_core::{KeyAuthority, SignedValue, WriteRequest};
use std::sync::Arc;
use tracing::info;

use crate::api::error::ApiError;
use crate::store::SignedStore;

/// Application state shared across handlers
#[derive(Debug)]
pub struct AppState {
    /// The single-value store, which owns the key authority
    pub store: SignedStore,
}

impl AppState {
    /// Build state around an authority and the initial value
    pub fn new(authority: Arc<dyn KeyAuthority>, seed: impl Into<String>) -> Self {
        Self {
            store: SignedStore::new(authority, seed),
        }
    }

    /// The key authority behind the store
    pub fn authority(&self) -> &Arc<dyn KeyAuthority> {
        self.store.authority()
    }
}

/// Read the current value with its signature
///
/// GET /
pub async fn read_value(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SignedValue>, ApiError> {
    let signed = state.store.read()?;
    Ok(Json(signed))
}

/// Commit a new value
///
/// POST /
///
/// Responds `200` with an empty body when the signature verifies, and
/// `400 {"error": "Invalid signature"}` otherwise. A rejected write leaves
/// the stored value as it was. A body that is not a JSON object gets
/// `400` with the parse error.
pub async fn write_value(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<WriteRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    let data = request
        .data
        .ok_or_else(|| ApiError::MissingField("data".into()))?;

    state.store.write_encoded(&data, request.signature.as_deref())?;

    info!(value_len = data.len(), "Value updated");
    Ok(StatusCode::OK)
}
