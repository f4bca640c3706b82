//! Appending and moving single columns and tasks.

use super::{BoardService, BoardServiceResult, CreateTaskRequest, MoveTaskRequest};
use crate::board::{
    domain::{
        BoardDomainError, Column, ColumnId, CycleId, EntityRef, SequenceScope, Task,
        VacatedSlotPolicy,
    },
    ports::BoardRepository,
};
use mockable::Clock;

impl<R, C> BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Appends a new column to the end of a cycle.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::NotFound`] for an unknown cycle
    /// and [`super::BoardServiceError::InvalidState`] for a blank name.
    #[tracing::instrument(skip(self, name))]
    pub async fn add_column(
        &self,
        cycle_id: CycleId,
        name: impl Into<String> + Send,
    ) -> BoardServiceResult<Column> {
        let cycle = self.require_cycle(cycle_id).await?;
        let sequence = self
            .repository
            .next_sequence(SequenceScope::Cycle(cycle_id))
            .await?;
        let column = Column::new(&cycle, name, sequence)?;
        self.repository.insert_column(&column).await?;
        tracing::info!(column_id = %column.id(), %sequence, "column added");
        Ok(column)
    }

    /// Renames a column without touching its rank.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::NotFound`] for an unknown column
    /// and [`super::BoardServiceError::InvalidState`] for a blank name.
    #[tracing::instrument(skip(self, name))]
    pub async fn rename_column(
        &self,
        column_id: ColumnId,
        name: impl Into<String> + Send,
    ) -> BoardServiceResult<Column> {
        let mut column = self.require_column(column_id).await?;
        column.rename(name)?;
        self.repository.rename_column(&column).await?;
        Ok(column)
    }

    /// Appends a task to the end of a column.
    ///
    /// The task snapshots the cycle's current status.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::NotFound`] for an unknown cycle
    /// or column and [`super::BoardServiceError::InvalidState`] when the
    /// column belongs to another cycle.
    #[tracing::instrument(
        skip(self, request),
        fields(cycle_id = %request.cycle_id, column_id = %request.column_id)
    )]
    pub async fn create_task(&self, request: CreateTaskRequest) -> BoardServiceResult<Task> {
        let cycle = self.require_cycle(request.cycle_id).await?;
        let column = self.require_column(request.column_id).await?;
        if column.cycle_id() != cycle.id() {
            return Err(BoardDomainError::ForeignParent {
                item: EntityRef::Column(column.id()),
                parent: EntityRef::Cycle(cycle.id()),
            }
            .into());
        }
        let sequence = self
            .repository
            .next_sequence(SequenceScope::Column(column.id()))
            .await?;
        let task = Task::new(&column, request.details, cycle.status(), sequence);
        self.repository.insert_task(&task).await?;
        tracing::info!(task_id = %task.id(), %sequence, "task created");
        Ok(task)
    }

    /// Applies edited details to a task and moves it when the requested
    /// column differs from its current one.
    ///
    /// A moved task is appended to the end of the destination column and
    /// takes over the destination's cycle and project. The slot it leaves
    /// behind is handled by the configured [`VacatedSlotPolicy`].
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::NotFound`] for an unknown task or
    /// destination column.
    #[tracing::instrument(
        skip(self, request),
        fields(task_id = %request.task_id, column_id = %request.column_id)
    )]
    pub async fn move_task(&self, request: MoveTaskRequest) -> BoardServiceResult<Task> {
        let mut task = self.require_task(request.task_id).await?;
        let vacated = task.column_id();
        task.apply_details(request.details);

        if request.column_id == vacated {
            self.repository.save_task(&task).await?;
            tracing::info!("task updated in place");
            return Ok(task);
        }

        let column = self.require_column(request.column_id).await?;
        let sequence = self
            .repository
            .next_sequence(SequenceScope::Column(column.id()))
            .await?;
        task.relocate(&column, sequence);
        match self.vacated_slot_policy {
            VacatedSlotPolicy::LeaveGap => self.repository.save_task(&task).await?,
            VacatedSlotPolicy::Compact => {
                self.repository
                    .save_task_compacting(&task, vacated)
                    .await?;
            }
        }
        tracing::info!(
            from_column = %vacated,
            %sequence,
            policy = self.vacated_slot_policy.as_str(),
            "task moved"
        );
        Ok(task)
    }
}
