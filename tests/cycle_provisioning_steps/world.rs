//! Shared world state for cycle provisioning BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use mockable::Clock;
use percurso::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::ProjectId,
    services::{BoardService, BoardServiceError, ProvisionCycleRequest, ProvisionedCycle},
};
use rstest::fixture;

/// Clock reading noon UTC on 2026-10-16.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioClock;

impl Clock for ScenarioClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .and_then(|day| day.and_hms_opt(12, 0, 0))
            .map(|noon| noon.and_utc())
            .unwrap_or_default()
    }
}

/// Service type used by the BDD world.
pub type TestBoardService = BoardService<InMemoryBoardRepository, ScenarioClock>;

/// Scenario world for cycle provisioning behaviour tests.
pub struct CycleWorld {
    pub repository: Arc<InMemoryBoardRepository>,
    pub service: TestBoardService,
    pub project_id: ProjectId,
    pub pending_request: Option<ProvisionCycleRequest>,
    pub last_result: Option<Result<ProvisionedCycle, BoardServiceError>>,
}

impl CycleWorld {
    /// Creates a world with an empty board.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryBoardRepository::new());
        let service = BoardService::new(Arc::clone(&repository), Arc::new(ScenarioClock));
        Self {
            repository,
            service,
            project_id: ProjectId::new(),
            pending_request: None,
            last_result: None,
        }
    }

    /// Returns the provisioned cycle, failing the step if there is none.
    pub fn provisioned(&self) -> Result<&ProvisionedCycle, eyre::Report> {
        self.last_result
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing provisioning result in scenario world"))?
            .as_ref()
            .map_err(|err| eyre::eyre!("unexpected provisioning failure: {err}"))
    }
}

impl Default for CycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CycleWorld {
    CycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
