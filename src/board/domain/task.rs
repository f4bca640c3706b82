//! Task entity: a unit of work positioned within one column.

use super::{
    BoardDomainError, Column, ColumnId, CycleId, CycleStatus, ProjectId, Sequence, TaskId, UserId,
};
use serde::{Deserialize, Serialize};

/// Mutable, non-ordering fields of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    name: String,
    info: String,
    assignee: UserId,
}

impl TaskDetails {
    /// Creates validated task details with empty free-text info.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskName`] for a blank name.
    pub fn new(name: impl Into<String>, assignee: UserId) -> Result<Self, BoardDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskName);
        }
        Ok(Self {
            name: trimmed.to_owned(),
            info: String::new(),
            assignee,
        })
    }

    /// Sets the free-text info.
    #[must_use]
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the free-text info.
    #[must_use]
    pub fn info(&self) -> &str {
        &self.info
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee(&self) -> UserId {
        self.assignee
    }
}

/// A unit of work assigned to a user and ranked within its column.
///
/// The project and cycle references mirror the owning column's parents.
/// They are only ever changed together with the column reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    cycle_id: CycleId,
    column_id: ColumnId,
    details: TaskDetails,
    status: CycleStatus,
    sequence: Sequence,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Owning cycle.
    pub cycle_id: CycleId,
    /// Owning column.
    pub column_id: ColumnId,
    /// Name, info and assignee.
    pub details: TaskDetails,
    /// Status snapshot taken at creation.
    pub status: CycleStatus,
    /// Rank within the column.
    pub sequence: Sequence,
}

impl Task {
    /// Creates a task in `column`, snapshotting the cycle status.
    #[must_use]
    pub fn new(
        column: &Column,
        details: TaskDetails,
        cycle_status: CycleStatus,
        sequence: Sequence,
    ) -> Self {
        Self {
            id: TaskId::new(),
            project_id: column.project_id(),
            cycle_id: column.cycle_id(),
            column_id: column.id(),
            details,
            status: cycle_status,
            sequence,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            cycle_id: data.cycle_id,
            column_id: data.column_id,
            details: data.details,
            status: data.status,
            sequence: data.sequence,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the owning cycle.
    #[must_use]
    pub const fn cycle_id(&self) -> CycleId {
        self.cycle_id
    }

    /// Returns the owning column.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// Returns name, info and assignee.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee(&self) -> UserId {
        self.details.assignee
    }

    /// Returns the status snapshot taken at creation.
    #[must_use]
    pub const fn status(&self) -> CycleStatus {
        self.status
    }

    /// Returns the rank within the column.
    #[must_use]
    pub const fn sequence(&self) -> Sequence {
        self.sequence
    }

    /// Replaces name, info and assignee.
    pub fn apply_details(&mut self, details: TaskDetails) {
        self.details = details;
    }

    /// Moves the task into `column` at `sequence`, rewriting all three
    /// parent references together.
    pub(crate) const fn relocate(&mut self, column: &Column, sequence: Sequence) {
        self.project_id = column.project_id();
        self.cycle_id = column.cycle_id();
        self.column_id = column.id();
        self.sequence = sequence;
    }

    /// Changes the rank within the current column.
    pub(crate) const fn place_at(&mut self, sequence: Sequence) {
        self.sequence = sequence;
    }

    /// Hands the task to another assignee.
    pub(crate) const fn reassign(&mut self, assignee: UserId) {
        self.details.assignee = assignee;
    }
}
