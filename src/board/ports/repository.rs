//! Repository port for cycles, columns and tasks.
//!
//! This is the only write path for sequence values. Adapters must not expose
//! raw row updates that could change a rank outside these operations.

use crate::board::domain::{
    Column, ColumnId, ColumnPlacement, Cycle, CycleId, EntityRef, ProjectId, Sequence,
    SequenceScope, Task, TaskId, TaskPlacement, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Board persistence contract.
///
/// Methods documented as atomic run inside one store transaction: on any
/// error nothing they wrote is visible afterwards. All other methods touch
/// at most one row and need no transaction.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Finds a cycle by identifier.
    async fn find_cycle(&self, id: CycleId) -> BoardRepositoryResult<Option<Cycle>>;

    /// Finds a column by identifier.
    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>>;

    /// Finds a task by identifier.
    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>>;

    /// Returns the cycles of a project ordered by start date.
    async fn cycles_of(&self, project_id: ProjectId) -> BoardRepositoryResult<Vec<Cycle>>;

    /// Returns the columns of a cycle ordered by sequence.
    async fn columns_of(&self, cycle_id: CycleId) -> BoardRepositoryResult<Vec<Column>>;

    /// Returns the tasks of a column ordered by sequence.
    async fn tasks_of(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>>;

    /// Returns one past the highest sequence in `scope`, or
    /// [`Sequence::FIRST`] when the scope is empty.
    ///
    /// # Errors
    ///
    /// Read failures are returned as-is; no retry is attempted.
    async fn next_sequence(&self, scope: SequenceScope) -> BoardRepositoryResult<Sequence>;

    /// Atomically inserts a cycle together with its columns.
    async fn insert_cycle_with_columns(
        &self,
        cycle: &Cycle,
        columns: &[Column],
    ) -> BoardRepositoryResult<()>;

    /// Rewrites a cycle's name, dates and status.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::NotFound`] when the cycle does not
    /// exist.
    async fn update_cycle(&self, cycle: &Cycle) -> BoardRepositoryResult<()>;

    /// Inserts a single column.
    async fn insert_column(&self, column: &Column) -> BoardRepositoryResult<()>;

    /// Rewrites a column's display name. The sequence is not written.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::NotFound`] when the column does not
    /// exist.
    async fn rename_column(&self, column: &Column) -> BoardRepositoryResult<()>;

    /// Inserts a single task.
    async fn insert_task(&self, task: &Task) -> BoardRepositoryResult<()>;

    /// Rewrites every field of a task, including its parents and sequence,
    /// in one single-row update.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn save_task(&self, task: &Task) -> BoardRepositoryResult<()>;

    /// Atomically saves `task` and renumbers the tasks remaining in
    /// `vacated` to `1..=n`, preserving their relative order.
    async fn save_task_compacting(
        &self,
        task: &Task,
        vacated: ColumnId,
    ) -> BoardRepositoryResult<()>;

    /// Atomically applies a task reorder.
    ///
    /// A placement naming a destination column moves the task there and
    /// rewrites all three of its parent references.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::NotFound`] for unknown tasks or
    /// columns and [`BoardRepositoryError::ForeignParent`] when a
    /// destination column belongs to a different cycle than the task.
    async fn apply_task_placements(
        &self,
        placements: &[TaskPlacement],
    ) -> BoardRepositoryResult<()>;

    /// Atomically applies a column reorder within one cycle.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::NotFound`] for unknown columns and
    /// [`BoardRepositoryError::ForeignParent`] for columns of another cycle.
    async fn apply_column_placements(
        &self,
        cycle_id: CycleId,
        placements: &[ColumnPlacement],
    ) -> BoardRepositoryResult<()>;

    /// Reassigns every task held by `from` to `to`, optionally restricted to
    /// one project, in one bulk update. Ranks are not touched.
    ///
    /// Returns the number of tasks updated.
    async fn reassign_tasks(
        &self,
        from: UserId,
        to: UserId,
        project_id: Option<ProjectId>,
    ) -> BoardRepositoryResult<u64>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// The referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// An item was placed under a parent outside its own scope.
    #[error("{item} does not belong to {parent}")]
    ForeignParent {
        /// Item being placed.
        item: EntityRef,
        /// Parent the item was placed under.
        parent: EntityRef,
    },

    /// The store could not be reached in time. Safe to retry.
    #[error("storage unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// The store refused a statement or returned unreadable data.
    #[error("rejected by store: {0}")]
    Rejected(Arc<dyn std::error::Error + Send + Sync>),

    /// A multi-row operation failed partway and was rolled back.
    #[error("transaction aborted: {0}")]
    TransactionAborted(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a transient store failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Wraps a statement the store refused.
    pub fn rejected(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Rejected(Arc::new(err))
    }

    /// Converts an infrastructure failure raised inside a rolled-back
    /// transaction into [`BoardRepositoryError::TransactionAborted`].
    ///
    /// Semantic failures (`NotFound`, `ForeignParent`) keep their variant.
    #[must_use]
    pub fn into_aborted(self) -> Self {
        match self {
            Self::Unavailable(source) | Self::Rejected(source) => Self::TransactionAborted(source),
            other => other,
        }
    }
}
