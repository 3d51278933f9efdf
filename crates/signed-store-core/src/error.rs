//! Error types for the signed store

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in the signed store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Key pair could not be generated (fatal at startup)
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// Public key could not be exported to PEM
    #[error("Key encoding failed: {0}")]
    KeyEncoding(String),

    /// Key material could not be parsed
    #[error("Key parsing failed: {0}")]
    KeyParsing(String),

    /// The private key failed to produce a signature
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Signature absent, malformed, or not matching the value
    #[error("Invalid signature")]
    InvalidSignature,

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),
}
