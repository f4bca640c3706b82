//! Column entity: an ordered lane within a cycle.

use super::{BoardDomainError, ColumnId, Cycle, CycleId, ProjectId, Sequence};
use serde::{Deserialize, Serialize};

/// Names of the lanes every cycle is provisioned with, left to right.
pub const DEFAULT_COLUMN_NAMES: [&str; 3] = ["To Do", "In Progress", "Done"];

/// An ordered lane within a cycle.
///
/// The project reference is a denormalized copy of the owning cycle's
/// project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    cycle_id: CycleId,
    project_id: ProjectId,
    name: String,
    sequence: Sequence,
}

/// Parameter object for reconstructing a persisted column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedColumnData {
    /// Persisted column identifier.
    pub id: ColumnId,
    /// Owning cycle.
    pub cycle_id: CycleId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Display name.
    pub name: String,
    /// Rank within the cycle.
    pub sequence: Sequence,
}

impl Column {
    /// Creates a column bound to `cycle` at the given rank.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnName`] for a blank name.
    pub fn new(
        cycle: &Cycle,
        name: impl Into<String>,
        sequence: Sequence,
    ) -> Result<Self, BoardDomainError> {
        Ok(Self {
            id: ColumnId::new(),
            cycle_id: cycle.id(),
            project_id: cycle.project_id(),
            name: normalized_name(name.into())?,
            sequence,
        })
    }

    /// Builds the three default lanes for a freshly created cycle.
    #[must_use]
    pub fn defaults_for(cycle: &Cycle) -> [Self; 3] {
        let mut ranks = Sequence::dense(DEFAULT_COLUMN_NAMES.len());
        DEFAULT_COLUMN_NAMES.map(|name| Self {
            id: ColumnId::new(),
            cycle_id: cycle.id(),
            project_id: cycle.project_id(),
            name: name.to_owned(),
            sequence: ranks.next().unwrap_or(Sequence::FIRST),
        })
    }

    /// Reconstructs a column from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedColumnData) -> Self {
        Self {
            id: data.id,
            cycle_id: data.cycle_id,
            project_id: data.project_id,
            name: data.name,
            sequence: data.sequence,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the owning cycle.
    #[must_use]
    pub const fn cycle_id(&self) -> CycleId {
        self.cycle_id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rank within the cycle.
    #[must_use]
    pub const fn sequence(&self) -> Sequence {
        self.sequence
    }

    /// Changes the display name.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnName`] for a blank name.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), BoardDomainError> {
        self.name = normalized_name(name.into())?;
        Ok(())
    }

    /// Moves the column to a new rank. Only repository adapters call this.
    pub(crate) const fn place_at(&mut self, sequence: Sequence) {
        self.sequence = sequence;
    }
}

fn normalized_name(raw: String) -> Result<String, BoardDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyColumnName);
    }
    Ok(trimmed.to_owned())
}
