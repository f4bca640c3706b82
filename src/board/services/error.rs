//! Failure taxonomy surfaced to callers of board services.

use crate::board::{
    domain::{BoardDomainError, EntityRef},
    ports::BoardRepositoryError,
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for board operations.
///
/// Every multi-row operation either succeeds with all of its effects
/// durable or fails with none of them durable.
#[derive(Debug, Clone, Error)]
pub enum BoardServiceError {
    /// A referenced cycle, column, task or user does not exist.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// The request conflicts with the current state of the board.
    #[error(transparent)]
    InvalidState(#[from] BoardDomainError),

    /// The store could not be reached in time.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// A multi-row operation failed partway and nothing was persisted.
    #[error("transaction aborted: {0}")]
    TransactionAborted(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardServiceError {
    /// Returns whether re-issuing the whole call may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::StorageUnavailable(_) | Self::TransactionAborted(_)
        )
    }
}

impl From<BoardRepositoryError> for BoardServiceError {
    fn from(err: BoardRepositoryError) -> Self {
        match err {
            BoardRepositoryError::NotFound(entity) => Self::NotFound(entity),
            BoardRepositoryError::ForeignParent { item, parent } => {
                Self::InvalidState(BoardDomainError::ForeignParent { item, parent })
            }
            BoardRepositoryError::Rejected(source) => {
                Self::InvalidState(BoardDomainError::Rejected(source.to_string()))
            }
            BoardRepositoryError::Unavailable(source) => Self::StorageUnavailable(source),
            BoardRepositoryError::TransactionAborted(source) => Self::TransactionAborted(source),
        }
    }
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;
