//! Signed Store Server
//!
//! Holds a single value and only accepts updates that carry a valid
//! signature over the new value:
//! - Every read returns the value with a signature made at read time
//! - Signatures for candidate values are issued on request, without
//!   touching the store
//! - A write is re-verified before it commits; a failed write changes
//!   nothing
//!
//! ## API Endpoints
//!
//! - `GET /` - Current value and its signature
//! - `POST /` - Commit `{data, signature}`; `400 {"error": "Invalid signature"}` on failure
//! - `POST /sign` - Sign `{data}` without committing it
//! - `GET /public-key` - PEM/SPKI public key as plain text
//! - `GET /health` - Liveness check

pub mod api;
pub mod config;
pub mod store;

pub use api::create_router;
pub use api::error::ApiError;
pub use api::handlers::AppState;
pub use config::{ConfigError, ServerConfig};
pub use store::SignedStore;
