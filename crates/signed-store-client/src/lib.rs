//! Signed Store Client
//!
//! Talks to a signed store server and checks what it gets back without
//! trusting the server's own verification.
//!
//! ## Components
//!
//! - **StoreClient**: one call per endpoint, plus the two-step
//!   sign-then-write `update`
//! - **PublicKeyHandle**: verify-only key imported from the PEM export
//! - **ClientSession**: the locally held `(data, signature)` with verify,
//!   tamper, recover and update actions
//!
//! ## Usage
//!
//! ```ignore
//! use signed_store_client::{ClientSession, Integrity, StoreClient};
//!
//! let mut session = ClientSession::connect(StoreClient::new("http://localhost:8080")).await?;
//! assert_eq!(session.verify(), Integrity::Verified);
//!
//! session.set_data("New Value");
//! session.update().await?;
//! ```

pub mod client;
pub mod error;
pub mod session;
pub mod verifier;

pub use client::{StoreClient, DEFAULT_URL};
pub use error::{ClientError, Result};
pub use session::{ClientSession, Integrity, TAMPERED_SIGNATURE};
pub use verifier::PublicKeyHandle;
