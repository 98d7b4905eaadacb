//! Axum route handlers for the rendezvous HTTP server.
//!
//! # Routes
//!
//! - `GET /health` — Returns `{"status": "ok", "version": ...}`
//! - `GET /update` — Records `localIP` under slot `id`, returns the other
//!   slot's stored address as plain text

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;

use crate::registry::SlotRegistry;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The two-slot address registry, shared by all handlers.
    pub registry: Arc<SlotRegistry>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(SlotRegistry::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/update", get(update_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "rendezvous",
    }))
}

/// Query parameters for `GET /update`.
///
/// `id` arrives as a raw string so that missing and non-integer values can
/// be rejected with a 400 instead of a deserialization failure.
#[derive(Debug, Deserialize)]
struct UpdateParams {
    id: Option<String>,
    #[serde(rename = "localIP")]
    local_ip: Option<String>,
}

/// GET /update — record this peer's address and return the other peer's.
///
/// `id` must be `0` or `1`; anything else (including missing or
/// non-integer) is a 400. `localIP` is optional and defaults to the
/// sentinel. The response body is the other slot's stored address,
/// HTML-escaped since the stored string is entirely caller-supplied.
async fn update_handler(
    State(state): State<AppState>,
    Query(params): Query<UpdateParams>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
) -> Result<String, (StatusCode, Json<Value>)> {
    let slot = params
        .id
        .as_deref()
        .and_then(|raw| raw.parse::<i64>().ok())
        .ok_or_else(|| {
            tracing::warn!(id = params.id.as_deref(), "rejected update: bad 'id'");
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": "Missing or non-integer 'id' parameter — must be 0 or 1",
                })),
            )
        })?;

    // The proxy- or transport-observed caller address is accepted for
    // interface compatibility but never stored: the registry holds only
    // the address the caller claims via `localIP`.
    let observed = headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or_else(|| peer.map(|ConnectInfo(addr)| addr.ip().to_string()));

    let local_ip = params.local_ip.as_deref().unwrap_or("");

    let other = state.registry.update(slot, local_ip).map_err(|err| {
        tracing::warn!(%err, "rejected update");
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": err.to_string() })),
        )
    })?;

    tracing::debug!(
        slot,
        local_ip,
        observed = observed.as_deref(),
        "recorded peer address"
    );

    Ok(escape_html(&other))
}

/// Minimal HTML escaping for the plain-text response body. The stored
/// address is an arbitrary caller-supplied string, so markup in it must
/// not survive verbatim.
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
