//! Request and response payloads for board services.

use crate::board::domain::{Column, ColumnId, Cycle, CycleId, ProjectId, Task, TaskDetails, TaskId};
use chrono::NaiveDate;

/// Request payload for provisioning a cycle with its default columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionCycleRequest {
    pub(super) project_id: ProjectId,
    pub(super) name: String,
    pub(super) starts_on: NaiveDate,
    pub(super) ends_on: NaiveDate,
}

impl ProvisionCycleRequest {
    /// Creates a provisioning request for `project_id`.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
    ) -> Self {
        Self {
            project_id,
            name: name.into(),
            starts_on,
            ends_on,
        }
    }
}

/// Request payload for renaming a cycle or moving its end date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCycleRequest {
    pub(super) cycle_id: CycleId,
    pub(super) name: String,
    pub(super) ends_on: NaiveDate,
}

impl UpdateCycleRequest {
    /// Creates an update request. The start date of a cycle is fixed.
    #[must_use]
    pub fn new(cycle_id: CycleId, name: impl Into<String>, ends_on: NaiveDate) -> Self {
        Self {
            cycle_id,
            name: name.into(),
            ends_on,
        }
    }
}

/// Request payload for appending a task to a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) cycle_id: CycleId,
    pub(super) column_id: ColumnId,
    pub(super) details: TaskDetails,
}

impl CreateTaskRequest {
    /// Creates a request to append a task at the end of `column_id`.
    #[must_use]
    pub const fn new(cycle_id: CycleId, column_id: ColumnId, details: TaskDetails) -> Self {
        Self {
            cycle_id,
            column_id,
            details,
        }
    }
}

/// Request payload for editing a task and optionally moving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTaskRequest {
    pub(super) task_id: TaskId,
    pub(super) column_id: ColumnId,
    pub(super) details: TaskDetails,
}

impl MoveTaskRequest {
    /// Creates a request that leaves the task in `column_id` with `details`.
    ///
    /// When `column_id` differs from the task's current column the task is
    /// appended to the end of the destination.
    #[must_use]
    pub const fn new(task_id: TaskId, column_id: ColumnId, details: TaskDetails) -> Self {
        Self {
            task_id,
            column_id,
            details,
        }
    }
}

/// A freshly provisioned cycle and its default columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedCycle {
    /// The persisted cycle.
    pub cycle: Cycle,
    /// The default columns, ranked 1 to 3.
    pub columns: [Column; 3],
}

/// One column of a board together with its ranked tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLane {
    /// The column.
    pub column: Column,
    /// Tasks ordered by ascending sequence.
    pub tasks: Vec<Task>,
}
