//! `PostgreSQL` repository implementation for board storage.

use super::{
    connection::{BoardPgPool, ElapsedPolicy, build_pool, run_bounded},
    models::{ColumnRow, CycleRow, TaskRow, sequence_from_sql, sequence_to_sql},
    schema::{board_columns, cycles, tasks},
};
use crate::{
    board::{
        domain::{
            Column, ColumnId, ColumnPlacement, Cycle, CycleId, EntityRef, ProjectId, Sequence,
            SequenceScope, Task, TaskId, TaskPlacement, UserId,
        },
        ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
    },
    config::StoreConfig,
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::time::Duration;

/// `PostgreSQL`-backed board repository.
///
/// Every call is offloaded to the blocking pool and bounded by the
/// configured call timeout. A read that overruns reports
/// [`BoardRepositoryError::Unavailable`]. A write that overruns is awaited
/// until the server commits or cancels it, so its reported outcome is the
/// stored one. Multi-row operations run inside [`Connection::transaction`],
/// which rolls back on any error.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    pool: BoardPgPool,
    call_timeout: Duration,
}

impl PostgresBoardRepository {
    /// Creates a repository from a pool and a per-call timeout.
    #[must_use]
    pub const fn new(pool: BoardPgPool, call_timeout: Duration) -> Self {
        Self { pool, call_timeout }
    }

    /// Builds a pool from `config` and bounds each call by its call timeout.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Unavailable`] when the pool cannot be
    /// established.
    pub fn connect(config: &StoreConfig) -> BoardRepositoryResult<Self> {
        let pool = build_pool(config)?;
        tracing::info!(
            max_pool_size = config.max_pool_size(),
            call_timeout_ms = config.call_timeout().as_millis(),
            "board store pool ready"
        );
        Ok(Self::new(pool, config.call_timeout()))
    }

    async fn run<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        run_bounded(&self.pool, self.call_timeout, ElapsedPolicy::Detach, f).await
    }

    async fn run_write<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        run_bounded(&self.pool, self.call_timeout, ElapsedPolicy::AwaitOutcome, f).await
    }

    async fn run_in_transaction<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        self.run_write(move |connection| {
            connection
                .transaction::<_, BoardRepositoryError, _>(f)
                .map_err(|err| {
                    tracing::warn!(error = %err, "board transaction rolled back");
                    err.into_aborted()
                })
        })
        .await
    }
}

fn ensure_updated(rows: usize, entity: EntityRef) -> BoardRepositoryResult<()> {
    if rows == 0 {
        return Err(BoardRepositoryError::NotFound(entity));
    }
    Ok(())
}

fn load_task(connection: &mut PgConnection, id: TaskId) -> BoardRepositoryResult<Task> {
    tasks::table
        .filter(tasks::id.eq(id.into_inner()))
        .select(TaskRow::as_select())
        .first::<TaskRow>(connection)
        .optional()?
        .ok_or(BoardRepositoryError::NotFound(EntityRef::Task(id)))?
        .try_into()
}

fn load_column(connection: &mut PgConnection, id: ColumnId) -> BoardRepositoryResult<Column> {
    board_columns::table
        .filter(board_columns::id.eq(id.into_inner()))
        .select(ColumnRow::as_select())
        .first::<ColumnRow>(connection)
        .optional()?
        .ok_or(BoardRepositoryError::NotFound(EntityRef::Column(id)))?
        .try_into()
}

fn write_task(connection: &mut PgConnection, row: &TaskRow) -> BoardRepositoryResult<()> {
    let rows = diesel::update(tasks::table.filter(tasks::id.eq(row.id)))
        .set((
            tasks::project_id.eq(row.project_id),
            tasks::cycle_id.eq(row.cycle_id),
            tasks::column_id.eq(row.column_id),
            tasks::name.eq(&row.name),
            tasks::info.eq(&row.info),
            tasks::assignee_id.eq(row.assignee_id),
            tasks::sequence.eq(row.sequence),
        ))
        .execute(connection)?;
    ensure_updated(rows, EntityRef::Task(TaskId::from_uuid(row.id)))
}

fn write_task_sequence(
    connection: &mut PgConnection,
    id: uuid::Uuid,
    sequence: Sequence,
) -> BoardRepositoryResult<()> {
    let rows = diesel::update(tasks::table.filter(tasks::id.eq(id)))
        .set(tasks::sequence.eq(sequence_to_sql(sequence)?))
        .execute(connection)?;
    ensure_updated(rows, EntityRef::Task(TaskId::from_uuid(id)))
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn find_cycle(&self, id: CycleId) -> BoardRepositoryResult<Option<Cycle>> {
        self.run(move |connection| {
            cycles::table
                .filter(cycles::id.eq(id.into_inner()))
                .select(CycleRow::as_select())
                .first::<CycleRow>(connection)
                .optional()?
                .map(Cycle::try_from)
                .transpose()
        })
        .await
    }

    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        self.run(move |connection| {
            board_columns::table
                .filter(board_columns::id.eq(id.into_inner()))
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()?
                .map(Column::try_from)
                .transpose()
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        self.run(move |connection| {
            tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?
                .map(Task::try_from)
                .transpose()
        })
        .await
    }

    async fn cycles_of(&self, project_id: ProjectId) -> BoardRepositoryResult<Vec<Cycle>> {
        self.run(move |connection| {
            cycles::table
                .filter(cycles::project_id.eq(project_id.into_inner()))
                .order((cycles::starts_on.asc(), cycles::id.asc()))
                .select(CycleRow::as_select())
                .load::<CycleRow>(connection)?
                .into_iter()
                .map(Cycle::try_from)
                .collect()
        })
        .await
    }

    async fn columns_of(&self, cycle_id: CycleId) -> BoardRepositoryResult<Vec<Column>> {
        self.run(move |connection| {
            board_columns::table
                .filter(board_columns::cycle_id.eq(cycle_id.into_inner()))
                .order(board_columns::sequence.asc())
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)?
                .into_iter()
                .map(Column::try_from)
                .collect()
        })
        .await
    }

    async fn tasks_of(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>> {
        self.run(move |connection| {
            tasks::table
                .filter(tasks::column_id.eq(column_id.into_inner()))
                .order(tasks::sequence.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?
                .into_iter()
                .map(Task::try_from)
                .collect()
        })
        .await
    }

    async fn next_sequence(&self, scope: SequenceScope) -> BoardRepositoryResult<Sequence> {
        self.run(move |connection| {
            let raw_max: Option<i32> = match scope {
                SequenceScope::Cycle(cycle_id) => board_columns::table
                    .filter(board_columns::cycle_id.eq(cycle_id.into_inner()))
                    .select(diesel::dsl::max(board_columns::sequence))
                    .first(connection)?,
                SequenceScope::Column(column_id) => tasks::table
                    .filter(tasks::column_id.eq(column_id.into_inner()))
                    .select(diesel::dsl::max(tasks::sequence))
                    .first(connection)?,
            };
            let current_max = raw_max.map(sequence_from_sql).transpose()?;
            Ok(Sequence::after(current_max))
        })
        .await
    }

    async fn insert_cycle_with_columns(
        &self,
        cycle: &Cycle,
        columns: &[Column],
    ) -> BoardRepositoryResult<()> {
        let cycle_row = CycleRow::from(cycle);
        let column_rows = columns
            .iter()
            .map(ColumnRow::from_domain)
            .collect::<BoardRepositoryResult<Vec<_>>>()?;

        self.run_in_transaction(move |connection| {
            diesel::insert_into(cycles::table)
                .values(&cycle_row)
                .execute(connection)?;
            for row in &column_rows {
                diesel::insert_into(board_columns::table)
                    .values(row)
                    .execute(connection)?;
            }
            Ok(())
        })
        .await
    }

    async fn update_cycle(&self, cycle: &Cycle) -> BoardRepositoryResult<()> {
        let row = CycleRow::from(cycle);
        self.run_write(move |connection| {
            let rows = diesel::update(cycles::table.filter(cycles::id.eq(row.id)))
                .set((
                    cycles::name.eq(&row.name),
                    cycles::starts_on.eq(row.starts_on),
                    cycles::ends_on.eq(row.ends_on),
                    cycles::status.eq(&row.status),
                ))
                .execute(connection)?;
            ensure_updated(rows, EntityRef::Cycle(CycleId::from_uuid(row.id)))
        })
        .await
    }

    async fn insert_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let row = ColumnRow::from_domain(column)?;
        self.run_write(move |connection| {
            diesel::insert_into(board_columns::table)
                .values(&row)
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn rename_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let id = column.id();
        let name = column.name().to_owned();
        self.run_write(move |connection| {
            let rows =
                diesel::update(board_columns::table.filter(board_columns::id.eq(id.into_inner())))
                    .set(board_columns::name.eq(&name))
                    .execute(connection)?;
            ensure_updated(rows, EntityRef::Column(id))
        })
        .await
    }

    async fn insert_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        let row = TaskRow::from_domain(task)?;
        self.run_write(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn save_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        let row = TaskRow::from_domain(task)?;
        self.run_write(move |connection| write_task(connection, &row)).await
    }

    async fn save_task_compacting(
        &self,
        task: &Task,
        vacated: ColumnId,
    ) -> BoardRepositoryResult<()> {
        let row = TaskRow::from_domain(task)?;
        self.run_in_transaction(move |connection| {
            write_task(connection, &row)?;
            let remaining: Vec<(uuid::Uuid, i32)> = tasks::table
                .filter(tasks::column_id.eq(vacated.into_inner()))
                .order(tasks::sequence.asc())
                .select((tasks::id, tasks::sequence))
                .load(connection)?;
            for ((id, current), rank) in remaining.iter().zip(Sequence::dense(remaining.len())) {
                if sequence_from_sql(*current)? != rank {
                    write_task_sequence(connection, *id, rank)?;
                }
            }
            Ok(())
        })
        .await
    }

    async fn apply_task_placements(
        &self,
        placements: &[TaskPlacement],
    ) -> BoardRepositoryResult<()> {
        let batch = placements.to_vec();
        self.run_in_transaction(move |connection| {
            for placement in &batch {
                let mut task = load_task(connection, placement.task_id)?;
                match placement.column_id {
                    Some(column_id) => {
                        let column = load_column(connection, column_id)?;
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
                write_task(connection, &TaskRow::from_domain(&task)?)?;
            }
            Ok(())
        })
        .await
    }

    async fn apply_column_placements(
        &self,
        cycle_id: CycleId,
        placements: &[ColumnPlacement],
    ) -> BoardRepositoryResult<()> {
        let batch = placements.to_vec();
        self.run_in_transaction(move |connection| {
            for placement in &batch {
                let column = load_column(connection, placement.column_id)?;
                if column.cycle_id() != cycle_id {
                    return Err(BoardRepositoryError::ForeignParent {
                        item: EntityRef::Column(column.id()),
                        parent: EntityRef::Cycle(cycle_id),
                    });
                }
                diesel::update(
                    board_columns::table.filter(board_columns::id.eq(column.id().into_inner())),
                )
                .set(board_columns::sequence.eq(sequence_to_sql(placement.sequence)?))
                .execute(connection)?;
            }
            Ok(())
        })
        .await
    }

    async fn reassign_tasks(
        &self,
        from: UserId,
        to: UserId,
        project_id: Option<ProjectId>,
    ) -> BoardRepositoryResult<u64> {
        self.run_write(move |connection| {
            let held_by = tasks::assignee_id.eq(from.into_inner());
            let rows = match project_id {
                Some(project_id) => diesel::update(
                    tasks::table
                        .filter(held_by)
                        .filter(tasks::project_id.eq(project_id.into_inner())),
                )
                .set(tasks::assignee_id.eq(to.into_inner()))
                .execute(connection)?,
                None => diesel::update(tasks::table.filter(held_by))
                    .set(tasks::assignee_id.eq(to.into_inner()))
                    .execute(connection)?,
            };
            u64::try_from(rows).map_err(BoardRepositoryError::rejected)
        })
        .await
    }
}
