//! Diesel row models and their conversions to domain values.

use super::schema::{board_columns, cycles, tasks};
use crate::board::{
    domain::{
        Column, ColumnId, Cycle, CycleId, CycleStatus, PersistedColumnData, PersistedCycleData,
        PersistedTaskData, ProjectId, Sequence, Task, TaskDetails, TaskId, UserId,
    },
    ports::{BoardRepositoryError, BoardRepositoryResult},
};
use chrono::NaiveDate;
use diesel::prelude::*;

/// Row shape of the `cycles` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = cycles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CycleRow {
    /// Cycle identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// First day of the cycle.
    pub starts_on: NaiveDate,
    /// Last day of the cycle.
    pub ends_on: NaiveDate,
    /// Materialized lifecycle status.
    pub status: String,
}

/// Row shape of the `board_columns` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = board_columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColumnRow {
    /// Column identifier.
    pub id: uuid::Uuid,
    /// Owning cycle.
    pub cycle_id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Rank within the cycle.
    pub sequence: i32,
}

/// Row shape of the `tasks` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Owning cycle.
    pub cycle_id: uuid::Uuid,
    /// Owning column.
    pub column_id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Free-text info.
    pub info: String,
    /// Assigned user.
    pub assignee_id: uuid::Uuid,
    /// Status snapshot.
    pub status: String,
    /// Rank within the column.
    pub sequence: i32,
}

pub(super) fn sequence_to_sql(sequence: Sequence) -> BoardRepositoryResult<i32> {
    i32::try_from(sequence.value()).map_err(BoardRepositoryError::rejected)
}

pub(super) fn sequence_from_sql(value: i32) -> BoardRepositoryResult<Sequence> {
    let raw = u32::try_from(value).map_err(BoardRepositoryError::rejected)?;
    Sequence::new(raw).map_err(BoardRepositoryError::rejected)
}

fn status_from_sql(value: &str) -> BoardRepositoryResult<CycleStatus> {
    CycleStatus::try_from(value).map_err(BoardRepositoryError::rejected)
}

impl From<&Cycle> for CycleRow {
    fn from(cycle: &Cycle) -> Self {
        Self {
            id: cycle.id().into_inner(),
            project_id: cycle.project_id().into_inner(),
            name: cycle.name().to_owned(),
            starts_on: cycle.starts_on(),
            ends_on: cycle.ends_on(),
            status: cycle.status().as_str().to_owned(),
        }
    }
}

impl TryFrom<CycleRow> for Cycle {
    type Error = BoardRepositoryError;

    fn try_from(row: CycleRow) -> Result<Self, Self::Error> {
        let status = status_from_sql(&row.status)?;
        Ok(Self::from_persisted(PersistedCycleData {
            id: CycleId::from_uuid(row.id),
            project_id: ProjectId::from_uuid(row.project_id),
            name: row.name,
            starts_on: row.starts_on,
            ends_on: row.ends_on,
            status,
        }))
    }
}

impl ColumnRow {
    pub(super) fn from_domain(column: &Column) -> BoardRepositoryResult<Self> {
        Ok(Self {
            id: column.id().into_inner(),
            cycle_id: column.cycle_id().into_inner(),
            project_id: column.project_id().into_inner(),
            name: column.name().to_owned(),
            sequence: sequence_to_sql(column.sequence())?,
        })
    }
}

impl TryFrom<ColumnRow> for Column {
    type Error = BoardRepositoryError;

    fn try_from(row: ColumnRow) -> Result<Self, Self::Error> {
        let sequence = sequence_from_sql(row.sequence)?;
        Ok(Self::from_persisted(PersistedColumnData {
            id: ColumnId::from_uuid(row.id),
            cycle_id: CycleId::from_uuid(row.cycle_id),
            project_id: ProjectId::from_uuid(row.project_id),
            name: row.name,
            sequence,
        }))
    }
}

impl TaskRow {
    pub(super) fn from_domain(task: &Task) -> BoardRepositoryResult<Self> {
        Ok(Self {
            id: task.id().into_inner(),
            project_id: task.project_id().into_inner(),
            cycle_id: task.cycle_id().into_inner(),
            column_id: task.column_id().into_inner(),
            name: task.details().name().to_owned(),
            info: task.details().info().to_owned(),
            assignee_id: task.assignee().into_inner(),
            status: task.status().as_str().to_owned(),
            sequence: sequence_to_sql(task.sequence())?,
        })
    }
}

impl TryFrom<TaskRow> for Task {
    type Error = BoardRepositoryError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let details = TaskDetails::new(row.name, UserId::from_uuid(row.assignee_id))
            .map_err(BoardRepositoryError::rejected)?
            .with_info(row.info);
        Ok(Self::from_persisted(PersistedTaskData {
            id: TaskId::from_uuid(row.id),
            project_id: ProjectId::from_uuid(row.project_id),
            cycle_id: CycleId::from_uuid(row.cycle_id),
            column_id: ColumnId::from_uuid(row.column_id),
            details,
            status: status_from_sql(&row.status)?,
            sequence: sequence_from_sql(row.sequence)?,
        }))
    }
}
