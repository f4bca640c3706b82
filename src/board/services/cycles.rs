//! Cycle provisioning and lifecycle operations.

use super::{
    BoardService, BoardServiceResult, ProvisionCycleRequest, ProvisionedCycle, UpdateCycleRequest,
};
use crate::board::{
    domain::{Column, Cycle, CycleId, CycleStatus, ProjectId},
    ports::BoardRepository,
};
use mockable::Clock;

impl<R, C> BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Creates a cycle together with its three default columns.
    ///
    /// The cycle and its columns become visible together or not at all.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::InvalidState`] for a blank name
    /// or inverted dates, and a retryable error when the write fails.
    #[tracing::instrument(skip(self, request), fields(project_id = %request.project_id))]
    pub async fn provision_cycle(
        &self,
        request: ProvisionCycleRequest,
    ) -> BoardServiceResult<ProvisionedCycle> {
        let cycle = Cycle::new(
            request.project_id,
            request.name,
            request.starts_on,
            request.ends_on,
            self.today(),
        )?;
        let columns = Column::defaults_for(&cycle);
        self.repository
            .insert_cycle_with_columns(&cycle, &columns)
            .await?;
        tracing::info!(
            cycle_id = %cycle.id(),
            status = cycle.status().as_str(),
            "cycle provisioned"
        );
        Ok(ProvisionedCycle { cycle, columns })
    }

    /// Renames a cycle or moves its end date and re-resolves its status.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::NotFound`] for an unknown cycle
    /// and [`super::BoardServiceError::InvalidState`] for invalid values.
    #[tracing::instrument(skip(self, request), fields(cycle_id = %request.cycle_id))]
    pub async fn update_cycle(&self, request: UpdateCycleRequest) -> BoardServiceResult<Cycle> {
        let mut cycle = self.require_cycle(request.cycle_id).await?;
        cycle.reschedule(request.name, request.ends_on, self.today())?;
        self.repository.update_cycle(&cycle).await?;
        tracing::info!(status = cycle.status().as_str(), "cycle updated");
        Ok(cycle)
    }

    /// Re-resolves the stored status of a cycle against today's date.
    ///
    /// Nothing is written when the status is already current.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::NotFound`] for an unknown cycle.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_cycle_status(&self, cycle_id: CycleId) -> BoardServiceResult<Cycle> {
        let mut cycle = self.require_cycle(cycle_id).await?;
        if cycle.refresh_status(self.today()) {
            self.repository.update_cycle(&cycle).await?;
            tracing::info!(status = cycle.status().as_str(), "cycle status refreshed");
        }
        Ok(cycle)
    }

    /// Returns the project's cycle whose stored status is open, if any.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn open_cycle(&self, project_id: ProjectId) -> BoardServiceResult<Option<Cycle>> {
        let cycles = self.repository.cycles_of(project_id).await?;
        Ok(cycles
            .into_iter()
            .find(|cycle| cycle.status() == CycleStatus::Open))
    }
}
