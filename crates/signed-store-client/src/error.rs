//! Error types for the signed store client

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur talking to a signed store
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, bad body)
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered with a status the operation does not expect
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The server refused a write
    #[error("Write rejected: {0}")]
    Rejected(String),

    /// The exported public key could not be parsed
    #[error("Invalid public key: {0}")]
    KeyImport(String),
}

impl ClientError {
    /// Whether the server refused the write because the signature did not verify
    pub fn is_invalid_signature(&self) -> bool {
        matches!(self, ClientError::Rejected(msg) if msg == "Invalid signature")
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http(err.to_string())
    }
}
