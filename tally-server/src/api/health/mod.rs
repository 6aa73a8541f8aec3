//! Health check route
//!
//! # Routes
//!
//! | Path | Method | Meaning | Auth |
//! |------|--------|---------|------|
//! | /health | GET | Liveness plus engine position | none |
//!
//! # Response example
//!
//! ```json
//! {
//!   "status": "ok",
//!   "version": "0.1.0",
//!   "epoch": "0d9b2e61-...",
//!   "sequence": 42
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

/// Health check router - public (no identity required)
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Status (ok | error)
    status: &'static str,
    /// Build version
    version: &'static str,
    /// Engine epoch, regenerated on every startup
    epoch: String,
    /// Highest event sequence committed so far
    sequence: u64,
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let (status, sequence) = match state.orders.get_current_sequence() {
        Ok(seq) => ("ok", seq),
        Err(_) => ("error", 0),
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        epoch: state.orders.epoch().to_string(),
        sequence,
    })
}
