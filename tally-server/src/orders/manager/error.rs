use shared::order::{CommandError, CommandErrorCode};
use thiserror::Error;

use super::super::storage::StorageError;
use super::super::traits::OrderError;

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("expected version {expected}, order is at {actual}")]
    ConcurrentModification { expected: u64, actual: u64 },
}

impl From<ManagerError> for CommandError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Storage(e) | ManagerError::Order(OrderError::Storage(e)) => {
                let code = e.code();
                tracing::error!(error = %e, error_code = ?code, "Storage error during command processing");
                CommandError::new(code, e.to_string())
            }
            ManagerError::Order(e) => CommandError::new(e.code(), e.to_string()),
            ManagerError::ConcurrentModification { expected, actual } => CommandError::new(
                CommandErrorCode::ConcurrentModification,
                format!("expected version {expected}, order is at {actual}"),
            ),
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;
