//! The signed store
//!
//! Holds exactly one value. Reads return the value with a fresh signature;
//! writes only land when the submitted signature verifies for the new value
//! under the authority's key. Data is lost on restart.

use signed_store_core::{KeyAuthority, Result, Signature, SignedValue, StoreError};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

/// Single-value store guarded by signature verification
///
/// There is one state, the committed value. `write` is the only
/// transition: it either replaces the value or leaves it as it was.
pub struct SignedStore {
    authority: Arc<dyn KeyAuthority>,
    value: RwLock<String>,
}

impl fmt::Debug for SignedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedStore")
            .field("kid", &self.authority.kid())
            .finish_non_exhaustive()
    }
}

impl SignedStore {
    /// Create a store holding `seed`
    pub fn new(authority: Arc<dyn KeyAuthority>, seed: impl Into<String>) -> Self {
        let seed = seed.into();
        info!(kid = %authority.kid(), seed_len = seed.len(), "Signed store initialized");

        Self {
            authority,
            value: RwLock::new(seed),
        }
    }

    /// The authority that signs and verifies for this store
    pub fn authority(&self) -> &Arc<dyn KeyAuthority> {
        &self.authority
    }

    /// The current value, without a signature
    pub fn value(&self) -> String {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Read the current value together with a signature made now
    pub fn read(&self) -> Result<SignedValue> {
        let value = self.value();
        let signature = self.authority.sign(value.as_bytes())?;
        Ok(SignedValue::new(value, &signature))
    }

    /// Sign a candidate value without touching the store
    pub fn request_signature(&self, candidate: &str) -> Result<Signature> {
        let signature = self.authority.sign(candidate.as_bytes())?;
        info!(candidate_len = candidate.len(), "Issued signature for candidate value");
        Ok(signature)
    }

    /// Replace the value if `signature` verifies for `candidate`
    ///
    /// Verification and replacement happen under the write lock, so no
    /// other write can land in between. On `Err(InvalidSignature)` the
    /// store is unchanged.
    pub fn write(&self, candidate: &str, signature: &Signature) -> Result<()> {
        let mut value = self.value.write().unwrap_or_else(PoisonError::into_inner);

        if !self.authority.verify(candidate.as_bytes(), signature.as_bytes()) {
            warn!(
                candidate_len = candidate.len(),
                signature_len = signature.len(),
                "Rejected write: signature does not verify"
            );
            return Err(StoreError::InvalidSignature);
        }

        *value = candidate.to_owned();
        info!(value_len = candidate.len(), "Committed new value");
        Ok(())
    }

    /// `write` with the signature still in its base64 wire form
    ///
    /// An absent or undecodable signature is an invalid signature.
    pub fn write_encoded(&self, candidate: &str, signature: Option<&str>) -> Result<()> {
        let Some(encoded) = signature else {
            warn!(candidate_len = candidate.len(), "Rejected write: no signature");
            return Err(StoreError::InvalidSignature);
        };

        let signature = Signature::from_base64(encoded).inspect_err(|_| {
            warn!(candidate_len = candidate.len(), "Rejected write: signature is not base64");
        })?;

        self.write(candidate, &signature)
    }
}
