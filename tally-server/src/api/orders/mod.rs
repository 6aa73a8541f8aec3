//! Order API Module
//!
//! Every mutation goes through the command engine; reads serve the stored
//! snapshot or a view computed over it.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Collection
        .route("/", post(handler::create).get(handler::list))
        .route("/{id}", get(handler::get_by_id).patch(handler::update_info))
        // Items
        .route("/{id}/items", post(handler::add_items))
        .route("/{id}/items/{item_id}", delete(handler::remove_item))
        .route(
            "/{id}/items/{item_id}/quantity",
            put(handler::set_item_quantity),
        )
        // Participants
        .route("/{id}/participants", post(handler::add_participant))
        .route(
            "/{id}/participants/{participant_id}",
            delete(handler::remove_participant),
        )
        .route(
            "/{id}/participants/{participant_id}/share",
            put(handler::set_participant_share),
        )
        // Split policy and totals
        .route("/{id}/split-policy", put(handler::set_split_policy))
        .route("/{id}/total", put(handler::set_total_override))
        .route("/{id}/split-preview", get(handler::split_preview))
        // Lifecycle
        .route("/{id}/finalize", post(handler::finalize))
        .route("/{id}/cancel", post(handler::cancel))
        .route("/{id}/archive", post(handler::archive))
        // Payment ledger
        .route(
            "/{id}/payments/{payment_id}/submit",
            post(handler::submit_payment),
        )
        .route(
            "/{id}/payments/{payment_id}/confirm",
            post(handler::confirm_payment),
        )
        .route(
            "/{id}/payments/{payment_id}/dispute",
            post(handler::dispute_payment),
        )
        .route(
            "/{id}/payments/{payment_id}/reopen",
            post(handler::reopen_payment),
        )
        // Reminders
        .route("/{id}/reminders", post(handler::request_reminder))
        // Read models
        .route("/{id}/progress", get(handler::progress))
        .route("/{id}/events", get(handler::events))
}
