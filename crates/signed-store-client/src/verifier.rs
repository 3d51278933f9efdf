//! Client-side signature verification
//!
//! Checks a `(value, signature)` pair using nothing but the exported
//! public key. The check runs here, on data already fetched, and never
//! asks the server whether the pair is valid.

use base64::Engine;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::pkcs8::DecodePublicKey;
use rsa::signature::Verifier;
use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;
use sha2::Sha256;
use signed_store_core::{SignedValue, SIGNATURE_BASE64};
use std::fmt;

use crate::error::{ClientError, Result};

/// Verify-only handle to the store's public key
///
/// Imported from the PEM/SPKI export. There is no way to sign with it.
pub struct PublicKeyHandle {
    key: VerifyingKey<Sha256>,
    bits: usize,
}

impl fmt::Debug for PublicKeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKeyHandle")
            .field("bits", &self.bits)
            .finish()
    }
}

impl PublicKeyHandle {
    /// Parse PEM/SPKI text (`-----BEGIN PUBLIC KEY-----`)
    ///
    /// Surrounding whitespace is ignored.
    pub fn import(pem: &str) -> Result<Self> {
        let key = RsaPublicKey::from_public_key_pem(pem.trim())
            .map_err(|e| ClientError::KeyImport(e.to_string()))?;
        let bits = key.size() * 8;

        Ok(Self {
            key: VerifyingKey::new(key),
            bits,
        })
    }

    /// Modulus size in bits
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Check a base64 signature over the UTF-8 bytes of `value`
    ///
    /// Padding is optional. Malformed base64 or a signature of the wrong
    /// size is simply not valid.
    pub fn verify_locally(&self, value: &str, signature: &str) -> bool {
        let Ok(bytes) = SIGNATURE_BASE64.decode(signature) else {
            return false;
        };
        let Ok(signature) = Signature::try_from(bytes.as_slice()) else {
            return false;
        };

        self.key.verify(value.as_bytes(), &signature).is_ok()
    }

    /// Check a value as returned by `GET /`
    pub fn verify_signed(&self, signed: &SignedValue) -> bool {
        self.verify_locally(&signed.data, &signed.signature)
    }
}
