//! Atomic bulk reordering of tasks and columns.

use super::{BoardService, BoardServiceResult};
use crate::board::{
    domain::{BoardDomainError, ColumnPlacement, CycleId, TaskPlacement},
    ports::BoardRepository,
};
use mockable::Clock;

impl<R, C> BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Applies a batch of task placements in one transaction.
    ///
    /// Either every placement is persisted or none is. Placements are not
    /// checked for uniqueness; callers are trusted to send a coherent order.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::InvalidState`] for an empty
    /// batch or a destination column in another cycle,
    /// [`super::BoardServiceError::NotFound`] for unknown tasks or columns,
    /// and [`super::BoardServiceError::TransactionAborted`] when the batch
    /// was rolled back.
    #[tracing::instrument(skip(self, placements), fields(count = placements.len()))]
    pub async fn reorder_tasks(&self, placements: &[TaskPlacement]) -> BoardServiceResult<()> {
        if placements.is_empty() {
            return Err(BoardDomainError::EmptyPlacementList.into());
        }
        self.repository.apply_task_placements(placements).await?;
        tracing::info!("tasks reordered");
        Ok(())
    }

    /// Applies a batch of column placements within one cycle in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::InvalidState`] for an empty
    /// batch or a column from another cycle,
    /// [`super::BoardServiceError::NotFound`] for an unknown cycle or
    /// unknown columns, and
    /// [`super::BoardServiceError::TransactionAborted`] when the batch was
    /// rolled back.
    #[tracing::instrument(skip(self, placements), fields(count = placements.len()))]
    pub async fn reorder_columns(
        &self,
        cycle_id: CycleId,
        placements: &[ColumnPlacement],
    ) -> BoardServiceResult<()> {
        if placements.is_empty() {
            return Err(BoardDomainError::EmptyPlacementList.into());
        }
        self.require_cycle(cycle_id).await?;
        self.repository
            .apply_column_placements(cycle_id, placements)
            .await?;
        tracing::info!("columns reordered");
        Ok(())
    }
}
