//! Domain model for project boards.
//!
//! Cycles, their ordered columns and the tasks ranked inside those columns.
//! Everything here is free of I/O; persistence lives behind
//! [`crate::board::ports::BoardRepository`].

mod column;
mod cycle;
mod error;
mod ids;
mod placement;
mod sequence;
mod status;
mod task;

pub use column::{Column, DEFAULT_COLUMN_NAMES, PersistedColumnData};
pub use cycle::{Cycle, PersistedCycleData};
pub use error::{BoardDomainError, ParseCycleStatusError, ParseVacatedSlotPolicyError};
pub use ids::{ColumnId, CycleId, EntityRef, ProjectId, TaskId, UserId};
pub use placement::{ColumnPlacement, TaskPlacement, VacatedSlotPolicy};
pub use sequence::{Sequence, SequenceScope, is_dense};
pub use status::CycleStatus;
pub use task::{PersistedTaskData, Task, TaskDetails};
