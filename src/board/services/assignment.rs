//! Cascading task reassignment when members leave.

use super::{BoardService, BoardServiceResult};
use crate::board::{
    domain::{ProjectId, UserId},
    ports::BoardRepository,
};
use mockable::Clock;

impl<R, C> BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Hands every task assigned to `from` over to `to`.
    ///
    /// Columns, ranks and statuses are untouched. Returns the number of
    /// tasks updated, which is zero on a repeated call. Handing tasks to the
    /// user who already holds them changes nothing and returns zero without
    /// touching the store.
    ///
    /// # Errors
    ///
    /// Returns a retryable error when the bulk update fails.
    #[tracing::instrument(skip(self))]
    pub async fn reassign_tasks(&self, from: UserId, to: UserId) -> BoardServiceResult<u64> {
        self.reassign(from, to, None).await
    }

    /// Hands a departing member's tasks in one project over to `fallback`.
    ///
    /// A `fallback` equal to `member` is a no-op that returns zero.
    ///
    /// # Errors
    ///
    /// Returns a retryable error when the bulk update fails.
    #[tracing::instrument(skip(self))]
    pub async fn remove_member(
        &self,
        project_id: ProjectId,
        member: UserId,
        fallback: UserId,
    ) -> BoardServiceResult<u64> {
        self.reassign(member, fallback, Some(project_id)).await
    }

    async fn reassign(
        &self,
        from: UserId,
        to: UserId,
        project_id: Option<ProjectId>,
    ) -> BoardServiceResult<u64> {
        if from == to {
            return Ok(0);
        }
        let updated = self.repository.reassign_tasks(from, to, project_id).await?;
        tracing::info!(updated, "tasks reassigned");
        Ok(updated)
    }
}
