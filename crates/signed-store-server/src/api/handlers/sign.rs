//! Signature Issuance Handler
//!
//! Signs a candidate value on request. Issuing a signature never changes
//! the stored value; committing is a separate `POST /`.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use signed_store_core::{SignRequest, SignResponse};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::handlers::data::AppState;

/// Sign a candidate value
///
/// POST /sign
pub async fn request_signature(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SignRequest>, JsonRejection>,
) -> Result<Json<SignResponse>, ApiError> {
    let Json(request) = payload?;
    let data = request
        .data
        .ok_or_else(|| ApiError::MissingField("data".into()))?;

    let signature = state.store.request_signature(&data)?;

    Ok(Json(SignResponse {
        signature: signature.to_base64(),
    }))
}
