//! Identifier types for board entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_identifier!(
    /// Identifier of the project that owns cycles, columns and tasks.
    ProjectId
);
uuid_identifier!(
    /// Identifier of a time-boxed cycle within a project.
    CycleId
);
uuid_identifier!(
    /// Identifier of an ordered column within a cycle.
    ColumnId
);
uuid_identifier!(
    /// Identifier of a task positioned within a column.
    TaskId
);
uuid_identifier!(
    /// Identifier of a user referenced as a task assignee.
    UserId
);

/// Typed reference to any board entity, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// A cycle.
    Cycle(CycleId),
    /// A column.
    Column(ColumnId),
    /// A task.
    Task(TaskId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle(id) => write!(f, "cycle {id}"),
            Self::Column(id) => write!(f, "column {id}"),
            Self::Task(id) => write!(f, "task {id}"),
        }
    }
}
