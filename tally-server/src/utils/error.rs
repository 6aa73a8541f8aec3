//! Unified error handling
//!
//! Application-level error type for the HTTP surface:
//! - [`AppError`] - error enum, converts into a JSON error response
//! - [`AppResult`] - handler result alias
//!
//! Engine rejections arrive as [`CommandError`] values inside a failed
//! `CommandResponse` and pass through with their code preserved, so API
//! clients see the same SCREAMING_SNAKE_CASE codes the event engine uses.
//!
//! ```json
//! {
//!   "code": "ORDER_NOT_FOUND",
//!   "message": "Order order-1 not found"
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::order::{CommandError, CommandErrorCode};
use tracing::error;

use crate::orders::manager::ManagerError;

/// Wire shape of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A command the engine rejected; carries the engine's code
    #[error("{}", .0.message)]
    Command(CommandError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Handler Result type alias
pub type AppResult<T> = Result<T, AppError>;

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<CommandError> for AppError {
    fn from(err: CommandError) -> Self {
        AppError::Command(err)
    }
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        AppError::Command(err.into())
    }
}

/// HTTP status class for an engine error code
fn command_status(code: &CommandErrorCode) -> StatusCode {
    use CommandErrorCode::*;
    match code {
        OrderNotFound | ParticipantNotFound | PaymentNotFound => StatusCode::NOT_FOUND,
        NotOrganizer => StatusCode::FORBIDDEN,
        InvalidAmount => StatusCode::BAD_REQUEST,
        ConcurrentModification | DuplicateCommand => StatusCode::CONFLICT,
        DuplicateParticipant | OrderLocked | InvalidSplit | AmountMismatch
        | InvalidTransition | InvalidOperation => StatusCode::UNPROCESSABLE_ENTITY,
        SystemBusy => StatusCode::SERVICE_UNAVAILABLE,
        InternalError | StorageFull | OutOfMemory | StorageCorrupted => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Wire name of an engine error code, matching its serde rename
fn command_code_str(code: &CommandErrorCode) -> &'static str {
    use CommandErrorCode::*;
    match code {
        OrderNotFound => "ORDER_NOT_FOUND",
        ParticipantNotFound => "PARTICIPANT_NOT_FOUND",
        PaymentNotFound => "PAYMENT_NOT_FOUND",
        DuplicateParticipant => "DUPLICATE_PARTICIPANT",
        OrderLocked => "ORDER_LOCKED",
        InvalidSplit => "INVALID_SPLIT",
        AmountMismatch => "AMOUNT_MISMATCH",
        InvalidTransition => "INVALID_TRANSITION",
        InvalidOperation => "INVALID_OPERATION",
        InvalidAmount => "INVALID_AMOUNT",
        NotOrganizer => "NOT_ORGANIZER",
        ConcurrentModification => "CONCURRENT_MODIFICATION",
        DuplicateCommand => "DUPLICATE_COMMAND",
        InternalError => "INTERNAL_ERROR",
        StorageFull => "STORAGE_FULL",
        OutOfMemory => "OUT_OF_MEMORY",
        StorageCorrupted => "STORAGE_CORRUPTED",
        SystemBusy => "SYSTEM_BUSY",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                self.to_string(),
            ),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED", msg.clone())
            }
            AppError::Command(err) => (
                command_status(&err.code),
                command_code_str(&err.code),
                err.message.clone(),
            ),
            AppError::Internal(msg) => {
                // Log the detail but do not expose it
                error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorBody {
            code: code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
