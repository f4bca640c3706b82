//! The board service and its shared lookups.

use super::{BoardServiceError, BoardServiceResult};
use crate::board::{
    domain::{
        Column, ColumnId, Cycle, CycleId, EntityRef, Sequence, SequenceScope, Task, TaskId,
        VacatedSlotPolicy,
    },
    ports::BoardRepository,
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;

/// Orchestrates ordering and lifecycle operations on project boards.
///
/// Each operation owns its own transaction boundary through the repository
/// and returns either the updated entities or one [`BoardServiceError`].
#[derive(Clone)]
pub struct BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    pub(super) repository: Arc<R>,
    clock: Arc<C>,
    pub(super) vacated_slot_policy: VacatedSlotPolicy,
}

impl<R, C> BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Creates a board service that leaves gaps behind moved tasks.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            vacated_slot_policy: VacatedSlotPolicy::default(),
        }
    }

    /// Sets the policy applied to a task's old column when it moves.
    #[must_use]
    pub fn with_vacated_slot_policy(mut self, policy: VacatedSlotPolicy) -> Self {
        self.vacated_slot_policy = policy;
        self
    }

    /// Returns the configured vacated slot policy.
    #[must_use]
    pub const fn vacated_slot_policy(&self) -> VacatedSlotPolicy {
        self.vacated_slot_policy
    }

    /// Returns the next append position in `scope`.
    ///
    /// # Errors
    ///
    /// Propagates storage failures unchanged.
    pub async fn next_sequence(&self, scope: SequenceScope) -> BoardServiceResult<Sequence> {
        Ok(self.repository.next_sequence(scope).await?)
    }

    /// Today's date in UTC, used to resolve cycle statuses.
    pub(super) fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    pub(super) async fn require_cycle(&self, id: CycleId) -> BoardServiceResult<Cycle> {
        self.repository
            .find_cycle(id)
            .await?
            .ok_or(BoardServiceError::NotFound(EntityRef::Cycle(id)))
    }

    pub(super) async fn require_column(&self, id: ColumnId) -> BoardServiceResult<Column> {
        self.repository
            .find_column(id)
            .await?
            .ok_or(BoardServiceError::NotFound(EntityRef::Column(id)))
    }

    pub(super) async fn require_task(&self, id: TaskId) -> BoardServiceResult<Task> {
        self.repository
            .find_task(id)
            .await?
            .ok_or(BoardServiceError::NotFound(EntityRef::Task(id)))
    }
}
