//! # Signed Store Core
//!
//! Key authority, signature types and wire bodies for a store that holds a
//! single value and only accepts updates carrying a valid signature.
//!
//! ## Key Concepts
//!
//! - **Key Authority**: sole holder of the RSA private key; signs, verifies
//!   and exports the public key as PEM/SPKI
//! - **Signed Value**: a value with a fresh RSASSA-PKCS1-v1_5/SHA-256
//!   signature over its UTF-8 bytes, base64 on the wire
//! - **Two-step write**: a signature is requested for a candidate value,
//!   then the (value, signature) pair is submitted and re-verified
//!
//! ## Invariants
//!
//! 1. **Round-trip**: `verify(v, sign(v))` holds for every value
//! 2. **Tamper detection**: any other signature for `v` fails verification
//! 3. **Equivalence**: anyone holding only the exported public key reaches
//!    the same verdict as the authority

pub mod crypto;
pub mod error;
pub mod wire;

pub use crypto::{
    KeyAuthority, KeyPair, PublicKeyPem, RsaKeyAuthority, Signature, DEFAULT_KEY_BITS,
    MIN_KEY_BITS, SIGNATURE_BASE64,
};
pub use error::{Result, StoreError};
pub use wire::{ErrorBody, SignRequest, SignResponse, SignedValue, WriteRequest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seed value of a freshly started store
pub const DEFAULT_SEED: &str = "Hello World";
