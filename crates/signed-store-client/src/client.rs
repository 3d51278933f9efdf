//! HTTP client for a signed store server
//!
//! One method per endpoint, plus `update`, which performs the two-step
//! sign-then-write sequence.

use signed_store_core::{ErrorBody, SignRequest, SignResponse, SignedValue, WriteRequest};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};

/// Default server location
pub const DEFAULT_URL: &str = "http://localhost:8080";

/// Client for the four signed store operations
#[derive(Debug, Clone)]
pub struct StoreClient {
    base_url: String,
    http: reqwest::Client,
}

impl StoreClient {
    /// Create a client for the server at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self::with_http_client(base_url, http)
    }

    /// Create a client reusing an existing `reqwest::Client`
    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    /// Server location, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the current value and its signature
    ///
    /// GET /
    pub async fn fetch(&self) -> Result<SignedValue> {
        let response = self.http.get(self.url("/")).send().await?;
        let response = expect_success(response).await?;

        let signed: SignedValue = response.json().await?;
        debug!(value_len = signed.data.len(), "Fetched signed value");
        Ok(signed)
    }

    /// Fetch the PEM/SPKI public key
    ///
    /// GET /public-key
    pub async fn fetch_public_key(&self) -> Result<String> {
        let response = self.http.get(self.url("/public-key")).send().await?;
        let response = expect_success(response).await?;
        Ok(response.text().await?)
    }

    /// Ask the server to sign a candidate value
    ///
    /// POST /sign
    pub async fn request_signature(&self, data: &str) -> Result<String> {
        let response = self
            .http
            .post(self.url("/sign"))
            .json(&SignRequest::new(data))
            .send()
            .await?;
        let response = expect_success(response).await?;

        let body: SignResponse = response.json().await?;
        Ok(body.signature)
    }

    /// Submit a value with its signature
    ///
    /// POST /
    ///
    /// Any `4xx` answer is a rejected write and carries the server's
    /// error message.
    pub async fn write(&self, data: &str, signature: &str) -> Result<()> {
        let response = self
            .http
            .post(self.url("/"))
            .json(&WriteRequest::new(data, signature))
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            let message = error_message(response).await;
            warn!(status = status.as_u16(), error = %message, "Write rejected");
            return Err(ClientError::Rejected(message));
        }

        expect_success(response).await?;
        info!(value_len = data.len(), "Write accepted");
        Ok(())
    }

    /// Request a signature for `data`, then write it
    pub async fn update(&self, data: &str) -> Result<()> {
        let signature = self.request_signature(data).await?;
        self.write(data, &signature).await
    }
}

async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::UnexpectedStatus {
        status: status.as_u16(),
        body,
    })
}

async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request rejected")
            .to_string(),
    }
}
