use thiserror::Error;

/// Server lifecycle errors
///
/// Request-level failures use [`crate::utils::AppError`] instead; this type
/// only covers startup and shutdown paths.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Result alias for server lifecycle code
pub type Result<T> = std::result::Result<T, ServerError>;
