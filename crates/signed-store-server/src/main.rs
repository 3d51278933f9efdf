//! Signed Store Server Binary
//!
//! Runs the signed store HTTP server with a key pair generated at startup.

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use signed_store_core::RsaKeyAuthority;
use signed_store_server::{create_router, AppState, ServerConfig};

#[tokio::main]
async fn main() {
    // Configuration
    let config = ServerConfig::from_env().expect("Invalid configuration");

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_target(true)
        .with_thread_ids(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    // The process cannot serve anything without its key pair
    let authority = RsaKeyAuthority::generate_with_bits(&config.kid, config.key_bits)
        .expect("Failed to generate key pair");

    info!(
        kid = %config.kid,
        key_bits = config.key_bits,
        port = config.port,
        "Starting signed store server"
    );

    // Create application state
    let state = Arc::new(AppState::new(Arc::new(authority), config.seed.clone()));

    // Build router
    let app = create_router(state);

    // Start server
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    info!(addr = %addr, "Signed store listening");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
