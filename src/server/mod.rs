//! HTTP server for the rendezvous exchange.
//!
//! Exposes the slot registry as an HTTP service that two peers poll to
//! discover each other's local address.
//!
//! # Endpoints
//!
//! - `GET /health` — Liveness probe
//! - `GET /update` — Record this peer's address, return the other peer's

pub mod routes;

pub use routes::{app_router, AppState};
