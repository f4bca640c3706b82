//! In-memory board repository.
//!
//! Transactions are modelled copy-on-write: a multi-row operation works on a
//! clone of the state and only replaces the shared state when every write
//! succeeded. Write faults can be injected to exercise rollback paths.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex, RwLock};

use crate::board::{
    domain::{
        Column, ColumnId, ColumnPlacement, Cycle, CycleId, EntityRef, ProjectId, Sequence,
        SequenceScope, Task, TaskId, TaskPlacement, UserId,
    },
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};

/// Thread-safe in-memory board repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardRepository {
    state: Arc<RwLock<BoardState>>,
    faults: Arc<Mutex<FaultPlan>>,
}

#[derive(Debug, Clone, Default)]
struct BoardState {
    cycles: HashMap<CycleId, Cycle>,
    columns: HashMap<ColumnId, Column>,
    tasks: HashMap<TaskId, Task>,
}

#[derive(Debug, Default)]
struct FaultPlan {
    offline: bool,
    writes_before_failure: Option<usize>,
}

impl FaultPlan {
    fn check_online(&self) -> BoardRepositoryResult<()> {
        if self.offline {
            return Err(BoardRepositoryError::unavailable(io::Error::new(
                io::ErrorKind::NotConnected,
                "store is offline",
            )));
        }
        Ok(())
    }

    fn consume_write(&mut self) -> BoardRepositoryResult<()> {
        self.check_online()?;
        match self.writes_before_failure {
            Some(0) => {
                self.writes_before_failure = None;
                Err(BoardRepositoryError::unavailable(io::Error::other(
                    "injected write failure",
                )))
            }
            Some(remaining) => {
                self.writes_before_failure = Some(remaining - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// Scratch state for one operation, counting row writes against the plan.
struct Writer<'a> {
    state: &'a mut BoardState,
    faults: &'a Mutex<FaultPlan>,
}

impl Writer<'_> {
    fn write(&mut self) -> BoardRepositoryResult<&mut BoardState> {
        self.faults.lock().map_err(poisoned)?.consume_write()?;
        Ok(&mut *self.state)
    }
}

fn poisoned<E: ToString>(err: E) -> BoardRepositoryError {
    BoardRepositoryError::unavailable(io::Error::other(err.to_string()))
}

impl InMemoryBoardRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets the next `writes` row writes succeed and fails the one after.
    ///
    /// The fault fires once and then clears itself.
    pub fn fail_after_writes(&self, writes: usize) {
        if let Ok(mut plan) = self.faults.lock() {
            plan.writes_before_failure = Some(writes);
        }
    }

    /// Makes every subsequent call fail as unavailable until switched back.
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut plan) = self.faults.lock() {
            plan.offline = offline;
        }
    }

    fn read<T>(&self, f: impl FnOnce(&BoardState) -> T) -> BoardRepositoryResult<T> {
        self.faults.lock().map_err(poisoned)?.check_online()?;
        let state = self.state.read().map_err(poisoned)?;
        Ok(f(&state))
    }

    /// Runs a single-row write directly against the shared state.
    fn write_row<T>(
        &self,
        f: impl FnOnce(&mut Writer<'_>) -> BoardRepositoryResult<T>,
    ) -> BoardRepositoryResult<T> {
        let mut state = self.state.write().map_err(poisoned)?;
        let mut writer = Writer {
            state: &mut *state,
            faults: &self.faults,
        };
        f(&mut writer)
    }

    /// Runs a multi-row write against a scratch copy, publishing it only if
    /// every step succeeds.
    fn transaction<T>(
        &self,
        f: impl FnOnce(&mut Writer<'_>) -> BoardRepositoryResult<T>,
    ) -> BoardRepositoryResult<T> {
        let mut state = self.state.write().map_err(poisoned)?;
        let mut scratch = state.clone();
        let mut writer = Writer {
            state: &mut scratch,
            faults: &self.faults,
        };
        let outcome = f(&mut writer).map_err(BoardRepositoryError::into_aborted)?;
        *state = scratch;
        Ok(outcome)
    }
}

fn sorted_by_sequence<T>(mut items: Vec<T>, sequence: impl Fn(&T) -> Sequence) -> Vec<T> {
    items.sort_by_key(|item| sequence(item));
    items
}

fn require_column(state: &BoardState, id: ColumnId) -> BoardRepositoryResult<Column> {
    state
        .columns
        .get(&id)
        .cloned()
        .ok_or(BoardRepositoryError::NotFound(EntityRef::Column(id)))
}

fn require_task(state: &BoardState, id: TaskId) -> BoardRepositoryResult<Task> {
    state
        .tasks
        .get(&id)
        .cloned()
        .ok_or(BoardRepositoryError::NotFound(EntityRef::Task(id)))
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn find_cycle(&self, id: CycleId) -> BoardRepositoryResult<Option<Cycle>> {
        self.read(|state| state.cycles.get(&id).cloned())
    }

    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        self.read(|state| state.columns.get(&id).cloned())
    }

    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        self.read(|state| state.tasks.get(&id).cloned())
    }

    async fn cycles_of(&self, project_id: ProjectId) -> BoardRepositoryResult<Vec<Cycle>> {
        self.read(|state| {
            let mut cycles: Vec<Cycle> = state
                .cycles
                .values()
                .filter(|cycle| cycle.project_id() == project_id)
                .cloned()
                .collect();
            cycles.sort_by_key(Cycle::starts_on);
            cycles
        })
    }

    async fn columns_of(&self, cycle_id: CycleId) -> BoardRepositoryResult<Vec<Column>> {
        self.read(|state| {
            let columns = state
                .columns
                .values()
                .filter(|column| column.cycle_id() == cycle_id)
                .cloned()
                .collect();
            sorted_by_sequence(columns, Column::sequence)
        })
    }

    async fn tasks_of(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>> {
        self.read(|state| {
            let tasks = state
                .tasks
                .values()
                .filter(|task| task.column_id() == column_id)
                .cloned()
                .collect();
            sorted_by_sequence(tasks, Task::sequence)
        })
    }

    async fn next_sequence(&self, scope: SequenceScope) -> BoardRepositoryResult<Sequence> {
        self.read(|state| {
            let current_max = match scope {
                SequenceScope::Cycle(cycle_id) => state
                    .columns
                    .values()
                    .filter(|column| column.cycle_id() == cycle_id)
                    .map(Column::sequence)
                    .max(),
                SequenceScope::Column(column_id) => state
                    .tasks
                    .values()
                    .filter(|task| task.column_id() == column_id)
                    .map(Task::sequence)
                    .max(),
            };
            Sequence::after(current_max)
        })
    }

    async fn insert_cycle_with_columns(
        &self,
        cycle: &Cycle,
        columns: &[Column],
    ) -> BoardRepositoryResult<()> {
        self.transaction(|writer| {
            writer.write()?.cycles.insert(cycle.id(), cycle.clone());
            for column in columns {
                writer.write()?.columns.insert(column.id(), column.clone());
            }
            Ok(())
        })
    }

    async fn update_cycle(&self, cycle: &Cycle) -> BoardRepositoryResult<()> {
        self.write_row(|writer| {
            let state = writer.write()?;
            let stored = state
                .cycles
                .get_mut(&cycle.id())
                .ok_or(BoardRepositoryError::NotFound(EntityRef::Cycle(cycle.id())))?;
            *stored = cycle.clone();
            Ok(())
        })
    }

    async fn insert_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        self.write_row(|writer| {
            writer.write()?.columns.insert(column.id(), column.clone());
            Ok(())
        })
    }

    async fn rename_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        self.write_row(|writer| {
            let state = writer.write()?;
            let stored = state
                .columns
                .get_mut(&column.id())
                .ok_or(BoardRepositoryError::NotFound(EntityRef::Column(column.id())))?;
            stored.rename(column.name()).map_err(BoardRepositoryError::rejected)?;
            Ok(())
        })
    }

    async fn insert_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        self.write_row(|writer| {
            writer.write()?.tasks.insert(task.id(), task.clone());
            Ok(())
        })
    }

    async fn save_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        self.write_row(|writer| {
            let state = writer.write()?;
            let stored = state
                .tasks
                .get_mut(&task.id())
                .ok_or(BoardRepositoryError::NotFound(EntityRef::Task(task.id())))?;
            *stored = task.clone();
            Ok(())
        })
    }

    async fn save_task_compacting(
        &self,
        task: &Task,
        vacated: ColumnId,
    ) -> BoardRepositoryResult<()> {
        self.transaction(|writer| {
            let state = writer.write()?;
            let stored = state
                .tasks
                .get_mut(&task.id())
                .ok_or(BoardRepositoryError::NotFound(EntityRef::Task(task.id())))?;
            *stored = task.clone();

            let siblings: Vec<Task> = state
                .tasks
                .values()
                .filter(|sibling| sibling.column_id() == vacated)
                .cloned()
                .collect();
            let remaining = sorted_by_sequence(siblings, Task::sequence);
            for (sibling, rank) in remaining.iter().zip(Sequence::dense(remaining.len())) {
                if sibling.sequence() == rank {
                    continue;
                }
                if let Some(stored) = writer.write()?.tasks.get_mut(&sibling.id()) {
                    stored.place_at(rank);
                }
            }
            Ok(())
        })
    }

    async fn apply_task_placements(
        &self,
        placements: &[TaskPlacement],
    ) -> BoardRepositoryResult<()> {
        self.transaction(|writer| {
            for placement in placements {
                let state = writer.write()?;
                let mut task = require_task(state, placement.task_id)?;
                match placement.column_id {
                    Some(column_id) => {
                        let column = require_column(state, column_id)?;
                        if column.cycle_id() != task.cycle_id() {
                            return Err(BoardRepositoryError::ForeignParent {
                                item: EntityRef::Task(task.id()),
                                parent: EntityRef::Column(column_id),
                            });
                        }
                        task.relocate(&column, placement.sequence);
                    }
                    None => task.place_at(placement.sequence),
                }
                state.tasks.insert(task.id(), task);
            }
            Ok(())
        })
    }

    async fn apply_column_placements(
        &self,
        cycle_id: CycleId,
        placements: &[ColumnPlacement],
    ) -> BoardRepositoryResult<()> {
        self.transaction(|writer| {
            for placement in placements {
                let state = writer.write()?;
                let mut column = require_column(state, placement.column_id)?;
                if column.cycle_id() != cycle_id {
                    return Err(BoardRepositoryError::ForeignParent {
                        item: EntityRef::Column(column.id()),
                        parent: EntityRef::Cycle(cycle_id),
                    });
                }
                column.place_at(placement.sequence);
                state.columns.insert(column.id(), column);
            }
            Ok(())
        })
    }

    async fn reassign_tasks(
        &self,
        from: UserId,
        to: UserId,
        project_id: Option<ProjectId>,
    ) -> BoardRepositoryResult<u64> {
        self.write_row(|writer| {
            let state = writer.write()?;
            let mut updated = 0_u64;
            for task in state.tasks.values_mut() {
                let in_scope = project_id.is_none_or(|project| task.project_id() == project);
                if task.assignee() == from && in_scope {
                    task.reassign(to);
                    updated += 1;
                }
            }
            Ok(updated)
        })
    }
}
