//! All-or-nothing behaviour of multi-row board operations.

use super::helpers::{Board, board, date, fill, provision, seq};
use percurso::board::{
    domain::{ColumnPlacement, ProjectId, TaskPlacement, VacatedSlotPolicy},
    ports::BoardRepository,
    services::{BoardServiceError, MoveTaskRequest, ProvisionCycleRequest},
};
use rstest::rstest;

#[rstest]
#[case::cycle_row(0)]
#[case::first_column(1)]
#[case::second_column(2)]
#[case::last_column(3)]
#[tokio::test(flavor = "multi_thread")]
async fn provisioning_is_all_or_nothing(board: Board, #[case] successful_writes: usize) {
    let project_id = ProjectId::new();
    board.repository.fail_after_writes(successful_writes);

    let result = board
        .service
        .provision_cycle(ProvisionCycleRequest::new(
            project_id,
            "Sprint",
            date(2026, 10, 12),
            date(2026, 10, 25),
        ))
        .await;

    assert!(matches!(result, Err(BoardServiceError::TransactionAborted(_))));
    let cycles = board
        .repository
        .cycles_of(project_id)
        .await
        .expect("listing should succeed");
    assert!(cycles.is_empty());
}

#[rstest]
#[case(0)]
#[case(2)]
#[case(5)]
#[tokio::test(flavor = "multi_thread")]
async fn task_reorder_is_all_or_nothing(board: Board, #[case] successful_writes: usize) {
    let provisioned = provision(&board.service).await;
    let [todo, doing, _] = &provisioned.columns;
    let before_todo = fill(&board.service, todo, "t", 4).await;
    let before_doing = fill(&board.service, doing, "d", 2).await;
    let mut placements: Vec<TaskPlacement> = before_todo
        .iter()
        .rev()
        .zip(1..)
        .map(|(task, rank)| TaskPlacement::in_place(task.id(), seq(rank)))
        .collect();
    placements.extend(
        before_doing
            .iter()
            .zip(1..)
            .map(|(task, rank)| TaskPlacement::into_column(task.id(), todo.id(), seq(rank + 4))),
    );
    board.repository.fail_after_writes(successful_writes);

    let result = board.service.reorder_tasks(&placements).await;

    let Err(err) = result else {
        panic!("reorder should abort");
    };
    assert!(err.is_retryable());
    let after_todo = board
        .repository
        .tasks_of(todo.id())
        .await
        .expect("listing should succeed");
    let after_doing = board
        .repository
        .tasks_of(doing.id())
        .await
        .expect("listing should succeed");
    assert_eq!(after_todo, before_todo);
    assert_eq!(after_doing, before_doing);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn aborted_reorder_can_be_replayed(board: Board) {
    let provisioned = provision(&board.service).await;
    let todo = &provisioned.columns[0];
    let tasks = fill(&board.service, todo, "t", 3).await;
    let placements: Vec<TaskPlacement> = tasks
        .iter()
        .rev()
        .zip(1..)
        .map(|(task, rank)| TaskPlacement::in_place(task.id(), seq(rank)))
        .collect();
    board.repository.fail_after_writes(1);
    board
        .service
        .reorder_tasks(&placements)
        .await
        .expect_err("first attempt should abort");

    board
        .service
        .reorder_tasks(&placements)
        .await
        .expect("replay should succeed");

    let stored = board
        .repository
        .tasks_of(todo.id())
        .await
        .expect("listing should succeed");
    let names: Vec<&str> = stored.iter().map(|task| task.details().name()).collect();
    assert_eq!(names, vec!["t3", "t2", "t1"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn column_reorder_is_all_or_nothing(board: Board) {
    let provisioned = provision(&board.service).await;
    let [todo, doing, done] = &provisioned.columns;
    board.repository.fail_after_writes(2);

    let result = board
        .service
        .reorder_columns(
            provisioned.cycle.id(),
            &[
                ColumnPlacement::new(done.id(), seq(1)),
                ColumnPlacement::new(doing.id(), seq(2)),
                ColumnPlacement::new(todo.id(), seq(3)),
            ],
        )
        .await;

    assert!(matches!(result, Err(BoardServiceError::TransactionAborted(_))));
    let columns = board
        .repository
        .columns_of(provisioned.cycle.id())
        .await
        .expect("listing should succeed");
    assert_eq!(columns, provisioned.columns.to_vec());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn leave_gap_move_is_a_single_write(board: Board) {
    let provisioned = provision(&board.service).await;
    let [todo, doing, _] = &provisioned.columns;
    let tasks = fill(&board.service, todo, "t", 3).await;
    let first = tasks.first().expect("first task");
    assert_eq!(board.service.vacated_slot_policy(), VacatedSlotPolicy::LeaveGap);
    // One write is allowed; a compacting move would need three.
    board.repository.fail_after_writes(1);

    board
        .service
        .move_task(MoveTaskRequest::new(
            first.id(),
            doing.id(),
            first.details().clone(),
        ))
        .await
        .expect("move should succeed");

    let moved = board
        .repository
        .find_task(first.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(moved.column_id(), doing.id());
}
