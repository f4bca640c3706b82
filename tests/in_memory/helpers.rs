//! Shared test helpers for in-memory board integration tests.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use mockable::Clock;
use percurso::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{Column, ProjectId, Sequence, Task, TaskDetails, UserId},
    ports::BoardRepository,
    services::{BoardService, CreateTaskRequest, ProvisionCycleRequest, ProvisionedCycle},
};
use rstest::fixture;

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Service type under test.
pub type TestService = BoardService<InMemoryBoardRepository, FixedClock>;

/// A service together with direct access to its repository.
pub struct Board {
    pub repository: Arc<InMemoryBoardRepository>,
    pub service: TestService,
}

/// Builds a calendar date.
///
/// # Panics
///
/// Panics if the date does not exist.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Provides a board service whose clock reads 2026-10-16.
#[fixture]
pub fn board() -> Board {
    let repository = Arc::new(InMemoryBoardRepository::new());
    let noon = date(2026, 10, 16)
        .and_hms_opt(12, 0, 0)
        .expect("noon is a valid time")
        .and_utc();
    let service = BoardService::new(Arc::clone(&repository), Arc::new(FixedClock(noon)));
    Board {
        repository,
        service,
    }
}

/// Provisions a cycle running over the fixture's current date.
pub async fn provision(service: &TestService) -> ProvisionedCycle {
    service
        .provision_cycle(ProvisionCycleRequest::new(
            ProjectId::new(),
            "Sprint",
            date(2026, 10, 12),
            date(2026, 10, 25),
        ))
        .await
        .expect("provisioning should succeed")
}

/// Appends `count` tasks named `{prefix}{n}` to `column`.
pub async fn fill(service: &TestService, column: &Column, prefix: &str, count: usize) -> Vec<Task> {
    let mut created = Vec::with_capacity(count);
    for n in 1..=count {
        let details =
            TaskDetails::new(format!("{prefix}{n}"), UserId::new()).expect("valid task details");
        let task = service
            .create_task(CreateTaskRequest::new(column.cycle_id(), column.id(), details))
            .await
            .expect("task creation should succeed");
        created.push(task);
    }
    created
}

/// Returns the ranks of the tasks in `column`, ascending.
pub async fn ranks(repository: &InMemoryBoardRepository, column: &Column) -> Vec<u32> {
    repository
        .tasks_of(column.id())
        .await
        .expect("listing should succeed")
        .iter()
        .map(|task| task.sequence().value())
        .collect()
}

/// Builds a sequence from a positive integer.
#[must_use]
pub fn seq(value: u32) -> Sequence {
    Sequence::new(value).expect("positive sequence")
}
