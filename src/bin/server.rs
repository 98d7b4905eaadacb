//! Rendezvous HTTP server binary.
//!
//! Starts an axum HTTP server through which two peers exchange their local
//! network addresses ahead of a direct connection.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `RUST_LOG` — Tracing filter (default: "info")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use std::net::SocketAddr;

use rendezvous::server::{app_router, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rendezvous=debug".into()),
        )
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{}", port);

    let state = AppState::new();
    let app = app_router(state);

    tracing::info!("rendezvous server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET /health — liveness probe");
    tracing::info!("  GET /update — peer address exchange");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind");

    // ConnectInfo gives handlers the transport-level peer address as a
    // fallback when no reverse proxy sets X-Real-IP.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server failed");
}
