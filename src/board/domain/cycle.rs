//! Cycle aggregate: a time-boxed phase of a project.

use super::{BoardDomainError, CycleId, CycleStatus, ProjectId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A time-boxed phase of a project with a derived lifecycle status.
///
/// The stored status is a materialized value. Every mutation of the dates
/// recomputes it against the supplied `today`, so a persisted cycle is
/// never written with a status that disagrees with its own dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    id: CycleId,
    project_id: ProjectId,
    name: String,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
    status: CycleStatus,
}

/// Parameter object for reconstructing a persisted cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCycleData {
    /// Persisted cycle identifier.
    pub id: CycleId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Display name.
    pub name: String,
    /// First day of the cycle.
    pub starts_on: NaiveDate,
    /// Last day of the cycle.
    pub ends_on: NaiveDate,
    /// Stored status as last written.
    pub status: CycleStatus,
}

impl Cycle {
    /// Creates a new cycle whose status is resolved against `today`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyCycleName`] for a blank name and
    /// [`BoardDomainError::InvalidDateRange`] when `starts_on > ends_on`.
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
        today: NaiveDate,
    ) -> Result<Self, BoardDomainError> {
        let name = normalized_name(name.into())?;
        ensure_range(starts_on, ends_on)?;
        Ok(Self {
            id: CycleId::new(),
            project_id,
            name,
            starts_on,
            ends_on,
            status: CycleStatus::resolve(starts_on, ends_on, today),
        })
    }

    /// Reconstructs a cycle from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCycleData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            name: data.name,
            starts_on: data.starts_on,
            ends_on: data.ends_on,
            status: data.status,
        }
    }

    /// Returns the cycle identifier.
    #[must_use]
    pub const fn id(&self) -> CycleId {
        self.id
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

    /// Returns the first day of the cycle.
    #[must_use]
    pub const fn starts_on(&self) -> NaiveDate {
        self.starts_on
    }

    /// Returns the last day of the cycle.
    #[must_use]
    pub const fn ends_on(&self) -> NaiveDate {
        self.ends_on
    }

    /// Returns the stored status.
    #[must_use]
    pub const fn status(&self) -> CycleStatus {
        self.status
    }

    /// Renames the cycle and moves its end date, refreshing the status.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyCycleName`] for a blank name and
    /// [`BoardDomainError::InvalidDateRange`] when the new end date falls
    /// before the start date. The cycle is left untouched on error.
    pub fn reschedule(
        &mut self,
        name: impl Into<String>,
        ends_on: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), BoardDomainError> {
        let name = normalized_name(name.into())?;
        ensure_range(self.starts_on, ends_on)?;
        self.name = name;
        self.ends_on = ends_on;
        self.refresh_status(today);
        Ok(())
    }

    /// Recomputes the stored status against `today`.
    ///
    /// Returns `true` when the status changed.
    pub fn refresh_status(&mut self, today: NaiveDate) -> bool {
        let resolved = CycleStatus::resolve(self.starts_on, self.ends_on, today);
        let changed = resolved != self.status;
        self.status = resolved;
        changed
    }
}

fn normalized_name(raw: String) -> Result<String, BoardDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyCycleName);
    }
    Ok(trimmed.to_owned())
}

fn ensure_range(starts_on: NaiveDate, ends_on: NaiveDate) -> Result<(), BoardDomainError> {
    if starts_on > ends_on {
        return Err(BoardDomainError::InvalidDateRange { starts_on, ends_on });
    }
    Ok(())
}
