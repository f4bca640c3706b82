//! Single-task moves and atomic bulk reorders against `PostgreSQL`.

use super::helpers::{fill, pg_board, pg_board_with, provision, ranked, seq};
use percurso::board::{
    domain::{
        BoardDomainError, EntityRef, SequenceScope, TaskId, TaskPlacement, UserId,
        VacatedSlotPolicy,
    },
    services::{BoardServiceError, MoveTaskRequest},
};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;

fn named(pairs: &[(&str, u32)]) -> Vec<(String, u32)> {
    pairs
        .iter()
        .map(|(name, rank)| ((*name).to_owned(), *rank))
        .collect()
}

#[rstest]
fn moving_a_task_leaves_a_gap_behind(shared_test_cluster: &'static TestCluster) {
    let board = pg_board(shared_test_cluster, "move_gap");

    board.runtime.block_on(async {
        let provisioned = provision(&board.service).await;
        let [todo, doing, _] = &provisioned.columns;
        let tasks = fill(&board.service, todo, &["a", "b", "c"], UserId::new()).await;
        let b = tasks.get(1).expect("second task");

        let moved = board
            .service
            .move_task(MoveTaskRequest::new(b.id(), doing.id(), b.details().clone()))
            .await
            .expect("move should succeed");

        assert_eq!(moved.column_id(), doing.id());
        assert_eq!(moved.sequence(), seq(1));
        assert_eq!(
            ranked(&board.repository, todo).await,
            named(&[("a", 1), ("c", 3)])
        );
        assert_eq!(ranked(&board.repository, doing).await, named(&[("b", 1)]));
        let next = board
            .service
            .next_sequence(SequenceScope::Column(todo.id()))
            .await
            .expect("allocation should succeed");
        assert_eq!(next, seq(4));
    });
}

#[rstest]
fn compacting_move_closes_the_gap(shared_test_cluster: &'static TestCluster) {
    let board = pg_board_with(shared_test_cluster, "move_compact", VacatedSlotPolicy::Compact);

    board.runtime.block_on(async {
        let provisioned = provision(&board.service).await;
        let [todo, doing, _] = &provisioned.columns;
        let tasks = fill(&board.service, todo, &["a", "b", "c"], UserId::new()).await;
        let a = tasks.first().expect("first task");

        board
            .service
            .move_task(MoveTaskRequest::new(a.id(), doing.id(), a.details().clone()))
            .await
            .expect("move should succeed");

        assert_eq!(
            ranked(&board.repository, todo).await,
            named(&[("b", 1), ("c", 2)])
        );
    });
}

#[rstest]
fn reorder_rewrites_every_rank(shared_test_cluster: &'static TestCluster) {
    let board = pg_board(shared_test_cluster, "reorder");

    board.runtime.block_on(async {
        let provisioned = provision(&board.service).await;
        let [todo, doing, _] = &provisioned.columns;
        let tasks = fill(&board.service, todo, &["a", "b", "c"], UserId::new()).await;
        let [a, b, c] = tasks.as_slice() else {
            panic!("expected three tasks");
        };

        board
            .service
            .reorder_tasks(&[
                TaskPlacement::in_place(c.id(), seq(1)),
                TaskPlacement::in_place(a.id(), seq(2)),
                TaskPlacement::into_column(b.id(), doing.id(), seq(1)),
            ])
            .await
            .expect("reorder should succeed");

        assert_eq!(
            ranked(&board.repository, todo).await,
            named(&[("c", 1), ("a", 2)])
        );
        assert_eq!(ranked(&board.repository, doing).await, named(&[("b", 1)]));
    });
}

#[rstest]
fn reorder_with_an_unknown_task_mid_batch_persists_nothing(
    shared_test_cluster: &'static TestCluster,
) {
    let board = pg_board(shared_test_cluster, "reorder_missing");

    board.runtime.block_on(async {
        let provisioned = provision(&board.service).await;
        let todo = &provisioned.columns[0];
        let tasks = fill(&board.service, todo, &["a", "b", "c"], UserId::new()).await;
        let [a, b, c] = tasks.as_slice() else {
            panic!("expected three tasks");
        };
        let missing = TaskId::new();

        let result = board
            .service
            .reorder_tasks(&[
                TaskPlacement::in_place(c.id(), seq(1)),
                TaskPlacement::in_place(a.id(), seq(2)),
                TaskPlacement::in_place(missing, seq(3)),
                TaskPlacement::in_place(b.id(), seq(4)),
            ])
            .await;

        assert!(matches!(
            result,
            Err(BoardServiceError::NotFound(EntityRef::Task(id))) if id == missing
        ));
        assert_eq!(
            ranked(&board.repository, todo).await,
            named(&[("a", 1), ("b", 2), ("c", 3)])
        );
    });
}

#[rstest]
fn reorder_into_another_cycle_mid_batch_persists_nothing(
    shared_test_cluster: &'static TestCluster,
) {
    let board = pg_board(shared_test_cluster, "reorder_foreign");

    board.runtime.block_on(async {
        let home = provision(&board.service).await;
        let away = provision(&board.service).await;
        let todo = &home.columns[0];
        let tasks = fill(&board.service, todo, &["a", "b"], UserId::new()).await;
        let [a, b] = tasks.as_slice() else {
            panic!("expected two tasks");
        };

        let result = board
            .service
            .reorder_tasks(&[
                TaskPlacement::in_place(b.id(), seq(1)),
                TaskPlacement::into_column(a.id(), away.columns[0].id(), seq(1)),
            ])
            .await;

        assert!(matches!(
            result,
            Err(BoardServiceError::InvalidState(
                BoardDomainError::ForeignParent { .. }
            ))
        ));
        assert_eq!(
            ranked(&board.repository, todo).await,
            named(&[("a", 1), ("b", 2)])
        );
        assert!(ranked(&board.repository, &away.columns[0]).await.is_empty());
    });
}
