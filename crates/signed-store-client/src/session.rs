//! Client-held view of the store
//!
//! Mirrors what an interactive client keeps in memory: the last fetched
//! value, its signature and the imported public key. Editing, tampering
//! and verifying only touch this local copy; the server's value changes
//! only through `update`, which the server re-verifies.

use signed_store_core::SignedValue;
use tracing::{info, warn};

use crate::client::StoreClient;
use crate::error::Result;
use crate::verifier::PublicKeyHandle;

/// Signature written by `tamper`
pub const TAMPERED_SIGNATURE: &str = "othersignature";

/// Outcome of checking the held value locally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integrity {
    /// The held signature verifies for the held value
    Verified,
    /// The held signature does not verify for the held value
    Tampered,
    /// No public key or no signature is held yet
    Unavailable,
}

impl std::fmt::Display for Integrity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Integrity::Verified => write!(f, "Data integrity verified!"),
            Integrity::Tampered => write!(f, "Data has been tampered with!"),
            Integrity::Unavailable => write!(f, "Public key or signature not available."),
        }
    }
}

/// A client session over one signed store
#[derive(Debug)]
pub struct ClientSession {
    client: StoreClient,
    data: String,
    signature: String,
    public_key: Option<PublicKeyHandle>,
}

impl ClientSession {
    /// Fetch the current value and the public key
    pub async fn connect(client: StoreClient) -> Result<Self> {
        let signed = client.fetch().await?;
        let pem = client.fetch_public_key().await?;
        let public_key = PublicKeyHandle::import(&pem)?;

        info!(url = %client.base_url(), key_bits = public_key.bits(), "Session connected");
        Ok(Self::from_parts(client, signed, Some(public_key)))
    }

    /// Assemble a session from state fetched elsewhere
    pub fn from_parts(
        client: StoreClient,
        signed: SignedValue,
        public_key: Option<PublicKeyHandle>,
    ) -> Self {
        Self {
            client,
            data: signed.data,
            signature: signed.signature,
            public_key,
        }
    }

    /// The held value
    pub fn data(&self) -> &str {
        &self.data
    }

    /// The held base64 signature
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The underlying client
    pub fn client(&self) -> &StoreClient {
        &self.client
    }

    /// Edit the held value locally; nothing is sent
    pub fn set_data(&mut self, data: impl Into<String>) {
        self.data = data.into();
    }

    /// Check the held pair with the public key alone
    pub fn verify(&self) -> Integrity {
        let Some(public_key) = &self.public_key else {
            return Integrity::Unavailable;
        };
        if self.signature.is_empty() {
            return Integrity::Unavailable;
        }

        if public_key.verify_locally(&self.data, &self.signature) {
            Integrity::Verified
        } else {
            Integrity::Tampered
        }
    }

    /// Corrupt the held signature; the server is not contacted
    pub fn tamper(&mut self) {
        warn!("Replacing held signature with a forged one");
        self.signature = TAMPERED_SIGNATURE.to_string();
    }

    /// Replace the held pair with the server's authoritative one
    pub async fn recover(&mut self) -> Result<()> {
        let signed = self.client.fetch().await?;
        self.data = signed.data;
        self.signature = signed.signature;
        Ok(())
    }

    /// Commit the held value: request a signature, write, then re-fetch
    ///
    /// On rejection the held state is left as it was and the error is
    /// returned.
    pub async fn update(&mut self) -> Result<()> {
        self.client.update(&self.data).await?;
        self.recover().await
    }
}
