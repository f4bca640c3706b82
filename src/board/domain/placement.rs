//! Placement inputs for bulk reorders and the vacated-slot policy for moves.

use super::{ColumnId, ParseVacatedSlotPolicyError, Sequence, TaskId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Target position of one task in a drag-and-drop reorder.
///
/// When `column_id` is `None` the task keeps its current column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPlacement {
    /// Task being placed.
    pub task_id: TaskId,
    /// Destination column, if the task changes column.
    #[serde(default)]
    pub column_id: Option<ColumnId>,
    /// Rank within the destination column.
    pub sequence: Sequence,
}

impl TaskPlacement {
    /// Places a task at `sequence` within its current column.
    #[must_use]
    pub const fn in_place(task_id: TaskId, sequence: Sequence) -> Self {
        Self {
            task_id,
            column_id: None,
            sequence,
        }
    }

    /// Places a task at `sequence` within `column_id`.
    #[must_use]
    pub const fn into_column(task_id: TaskId, column_id: ColumnId, sequence: Sequence) -> Self {
        Self {
            task_id,
            column_id: Some(column_id),
            sequence,
        }
    }
}

/// Target position of one column in a drag-and-drop reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPlacement {
    /// Column being placed.
    pub column_id: ColumnId,
    /// Rank within the cycle.
    pub sequence: Sequence,
}

impl ColumnPlacement {
    /// Places a column at `sequence`.
    #[must_use]
    pub const fn new(column_id: ColumnId, sequence: Sequence) -> Self {
        Self {
            column_id,
            sequence,
        }
    }
}

/// What happens to the column a task leaves during a single-task move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacatedSlotPolicy {
    /// Leave the remaining tasks untouched, keeping a gap at the old rank.
    /// A single-row write.
    #[default]
    LeaveGap,
    /// Renumber the remaining tasks to `1..=n` in the same transaction as
    /// the move.
    Compact,
}

impl VacatedSlotPolicy {
    /// Returns the canonical configuration representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeaveGap => "leave_gap",
            Self::Compact => "compact",
        }
    }
}

impl FromStr for VacatedSlotPolicy {
    type Err = ParseVacatedSlotPolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "leave_gap" => Ok(Self::LeaveGap),
            "compact" => Ok(Self::Compact),
            _ => Err(ParseVacatedSlotPolicyError(value.to_owned())),
        }
    }
}
