//! Cycle provisioning against `PostgreSQL`, including rollback.

use super::helpers::{date, pg_board, provision, seq};
use percurso::board::{
    domain::{Column, Cycle, CycleStatus, DEFAULT_COLUMN_NAMES, PersistedColumnData},
    ports::{BoardRepository, BoardRepositoryError},
};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;

#[rstest]
fn provisioning_stores_the_cycle_and_its_default_columns(
    shared_test_cluster: &'static TestCluster,
) {
    let board = pg_board(shared_test_cluster, "provision");

    board.runtime.block_on(async {
        let provisioned = provision(&board.service).await;

        let stored = board
            .repository
            .find_cycle(provisioned.cycle.id())
            .await
            .expect("lookup should succeed");
        assert_eq!(stored.as_ref(), Some(&provisioned.cycle));
        assert_eq!(provisioned.cycle.status(), CycleStatus::Open);

        let columns = board
            .service
            .columns_of(provisioned.cycle.id())
            .await
            .expect("listing should succeed");
        let names: Vec<&str> = columns.iter().map(Column::name).collect();
        let ranks: Vec<u32> = columns.iter().map(|c| c.sequence().value()).collect();
        assert_eq!(names, DEFAULT_COLUMN_NAMES.to_vec());
        assert_eq!(ranks, vec![1, 2, 3]);
    });
}

#[rstest]
fn failed_column_insert_rolls_back_the_whole_cycle(shared_test_cluster: &'static TestCluster) {
    let board = pg_board(shared_test_cluster, "provision_rollback");

    board.runtime.block_on(async {
        let existing = provision(&board.service).await;
        let next = Cycle::new(
            existing.cycle.project_id(),
            "Next sprint",
            date(2026, 10, 26),
            date(2026, 11, 8),
            date(2026, 10, 16),
        )
        .expect("valid cycle");
        let [todo, doing, _] = Column::defaults_for(&next);
        // Reuses a stored column id, so the third insert violates the key
        // after the cycle and two columns were written.
        let clash = Column::from_persisted(PersistedColumnData {
            id: existing.columns[0].id(),
            cycle_id: next.id(),
            project_id: next.project_id(),
            name: "Done".to_owned(),
            sequence: seq(3),
        });

        let result = board
            .repository
            .insert_cycle_with_columns(&next, &[todo, doing, clash])
            .await;

        assert!(matches!(
            result,
            Err(BoardRepositoryError::TransactionAborted(_))
        ));
        let orphan = board
            .repository
            .find_cycle(next.id())
            .await
            .expect("lookup should succeed");
        assert!(orphan.is_none());
        let orphan_columns = board
            .repository
            .columns_of(next.id())
            .await
            .expect("listing should succeed");
        assert!(orphan_columns.is_empty());
        let kept = board
            .repository
            .columns_of(existing.cycle.id())
            .await
            .expect("listing should succeed");
        assert_eq!(kept, existing.columns.to_vec());
    });
}

#[rstest]
fn open_cycle_is_found_for_the_project(shared_test_cluster: &'static TestCluster) {
    let board = pg_board(shared_test_cluster, "open_cycle");

    board.runtime.block_on(async {
        let provisioned = provision(&board.service).await;

        let open = board
            .service
            .open_cycle(provisioned.cycle.project_id())
            .await
            .expect("lookup should succeed");

        assert_eq!(open, Some(provisioned.cycle));
    });
}
