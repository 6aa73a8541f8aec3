//! API routing module
//!
//! # Structure
//!
//! - [`health`] - liveness and engine position
//! - [`orders`] - order commands and read models
//! - [`notifications`] - per-user notification inbox
//!
//! Identity comes from the trusted gateway headers (see [`crate::auth`]);
//! every `/api` route rejects requests without them. `/health` is public.

pub mod health;
pub mod notifications;
pub mod orders;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(notifications::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
