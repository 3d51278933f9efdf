//! Public Key Handler

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::api::handlers::data::AppState;

/// Fetch the public key as PEM/SPKI text
///
/// GET /public-key
///
/// The PEM is computed once when the authority is created and served
/// verbatim.
pub async fn public_key(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.authority().public_key_pem().to_string(),
    )
}
