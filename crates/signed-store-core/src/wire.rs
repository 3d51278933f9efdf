//! JSON bodies exchanged between the server and its clients
//!
//! Field names are part of the protocol and must not change.

use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

use crate::crypto::Signature;
use crate::error::Result;

/// A value together with a fresh signature over its UTF-8 bytes
///
/// Returned by `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedValue {
    /// The stored value
    pub data: String,

    /// Base64-encoded signature over `data`
    pub signature: String,
}

impl SignedValue {
    /// Pair a value with its signature
    pub fn new(data: impl Into<String>, signature: &Signature) -> Self {
        Self {
            data: data.into(),
            signature: signature.to_base64(),
        }
    }

    /// Decode the base64 signature
    pub fn decode_signature(&self) -> Result<Signature> {
        Signature::from_base64(&self.signature)
    }
}

/// Request a signature for a candidate value
///
/// Body of `POST /sign`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignRequest {
    /// Candidate value to be signed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl SignRequest {
    /// Request a signature for `data`
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }
}

/// Signature issued for a candidate value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignResponse {
    /// Base64-encoded signature
    pub signature: String,
}

/// Commit a new value
///
/// Body of `POST /`. Both fields are optional on the wire so that a missing
/// signature is reported as an invalid signature rather than a parse error.
/// A signature that is not a JSON string reads as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WriteRequest {
    /// New value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// Base64-encoded signature over `data`
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub signature: Option<String>,
}

impl WriteRequest {
    /// Pair a new value with its base64 signature
    pub fn new(data: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            signature: Some(signature.into()),
        }
    }
}

fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Text(String),
        Other(#[allow(dead_code)] IgnoredAny),
    }

    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        Some(Lenient::Text(text)) => Some(text),
        Some(Lenient::Other(_)) | None => None,
    })
}

/// Error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason
    pub error: String,
}
