//! Notification API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::models::Notification;

/// List the caller's notifications, newest first
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = state
        .orders
        .storage()
        .get_notifications_for_user(&user.user_id)
        .map_err(|e| AppError::internal(e.to_string()))?;
    Ok(Json(notifications))
}

/// Mark-read response
#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    pub notification_id: String,
    pub read: bool,
}

/// Mark one of the caller's notifications as read
///
/// 404 when the id does not exist or belongs to someone else.
pub async fn mark_read(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MarkReadResponse>> {
    let updated = state
        .orders
        .storage()
        .mark_notification_read(&user.user_id, &id)
        .map_err(|e| AppError::internal(e.to_string()))?;

    if !updated {
        return Err(AppError::not_found(format!("Notification {} not found", id)));
    }

    Ok(Json(MarkReadResponse {
        notification_id: id,
        read: true,
    }))
}
