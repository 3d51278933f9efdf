//! Server configuration
//!
//! Read from environment variables:
//! - `SIGNED_STORE_BIND` - bind address (default `0.0.0.0`)
//! - `SIGNED_STORE_PORT` - listen port (default `8080`)
//! - `SIGNED_STORE_SEED` - initial value (default `Hello World`)
//! - `SIGNED_STORE_KEY_BITS` - RSA modulus size, at least 2048 (default `2048`)
//! - `SIGNED_STORE_KID` - key identifier for logs (default `signed-store-<uuid>`)
//! - `SIGNED_STORE_LOG_LEVEL` - tracing level (default `info`)

use signed_store_core::{DEFAULT_KEY_BITS, DEFAULT_SEED, MIN_KEY_BITS};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;
use tracing::Level;

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind
    pub bind: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Value the store starts with
    pub seed: String,
    /// RSA modulus size for the generated key
    pub key_bits: usize,
    /// Key identifier
    pub kid: String,
    /// Maximum tracing level
    pub log_level: Level,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            seed: DEFAULT_SEED.into(),
            key_bits: DEFAULT_KEY_BITS,
            kid: default_kid(),
            log_level: Level::INFO,
        }
    }
}

fn default_kid() -> String {
    format!("signed-store-{}", uuid::Uuid::new_v4())
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(bind) = lookup("SIGNED_STORE_BIND") {
            config.bind = bind.parse().map_err(|e| ConfigError::Invalid {
                var: "SIGNED_STORE_BIND",
                reason: format!("{}", e),
            })?;
        }

        if let Some(port) = lookup("SIGNED_STORE_PORT") {
            config.port = port.parse().map_err(|e| ConfigError::Invalid {
                var: "SIGNED_STORE_PORT",
                reason: format!("{}", e),
            })?;
        }

        if let Some(seed) = lookup("SIGNED_STORE_SEED") {
            config.seed = seed;
        }

        if let Some(bits) = lookup("SIGNED_STORE_KEY_BITS") {
            let bits: usize = bits.parse().map_err(|e| ConfigError::Invalid {
                var: "SIGNED_STORE_KEY_BITS",
                reason: format!("{}", e),
            })?;
            if bits < MIN_KEY_BITS {
                return Err(ConfigError::Invalid {
                    var: "SIGNED_STORE_KEY_BITS",
                    reason: format!("must be at least {}", MIN_KEY_BITS),
                });
            }
            config.key_bits = bits;
        }

        if let Some(kid) = lookup("SIGNED_STORE_KID").filter(|kid| !kid.is_empty()) {
            config.kid = kid;
        }

        // An unparseable level falls back to info
        if let Some(level) = lookup("SIGNED_STORE_LOG_LEVEL") {
            config.log_level = level.parse().unwrap_or(Level::INFO);
        }

        Ok(config)
    }

    /// Socket address to bind
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
