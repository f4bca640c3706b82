//! Read-side views over cycles, columns and tasks.

use super::{BoardLane, BoardService, BoardServiceResult};
use crate::board::{
    domain::{Column, ColumnId, CycleId, Task, is_dense},
    ports::BoardRepository,
};
use mockable::Clock;

impl<R, C> BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Lists the columns of a cycle by ascending sequence.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::NotFound`] for an unknown cycle.
    pub async fn columns_of(&self, cycle_id: CycleId) -> BoardServiceResult<Vec<Column>> {
        self.require_cycle(cycle_id).await?;
        Ok(self.repository.columns_of(cycle_id).await?)
    }

    /// Lists the tasks of a column by ascending sequence.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::NotFound`] for an unknown column.
    pub async fn tasks_of(&self, column_id: ColumnId) -> BoardServiceResult<Vec<Task>> {
        self.require_column(column_id).await?;
        Ok(self.repository.tasks_of(column_id).await?)
    }

    /// Loads a whole board: every column of the cycle with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::NotFound`] for an unknown cycle.
    #[tracing::instrument(skip(self))]
    pub async fn board(&self, cycle_id: CycleId) -> BoardServiceResult<Vec<BoardLane>> {
        let columns = self.columns_of(cycle_id).await?;
        let mut lanes = Vec::with_capacity(columns.len());
        for column in columns {
            let tasks = self.repository.tasks_of(column.id()).await?;
            if !is_dense(tasks.iter().map(Task::sequence)) {
                tracing::debug!(column_id = %column.id(), "column has sequence gaps");
            }
            lanes.push(BoardLane { column, tasks });
        }
        Ok(lanes)
    }
}
