//! Cascading reassignment against `PostgreSQL`.

use super::helpers::{fill, pg_board, provision};
use percurso::board::{domain::UserId, ports::BoardRepository};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;

#[rstest]
fn reassignment_is_idempotent(shared_test_cluster: &'static TestCluster) {
    let board = pg_board(shared_test_cluster, "reassign");

    board.runtime.block_on(async {
        let provisioned = provision(&board.service).await;
        let [todo, doing, _] = &provisioned.columns;
        let (leaver, heir, bystander) = (UserId::new(), UserId::new(), UserId::new());
        let mut held = fill(&board.service, todo, &["a"], leaver).await;
        held.extend(fill(&board.service, doing, &["b"], leaver).await);
        let others = fill(&board.service, doing, &["c"], bystander).await;

        let first = board
            .service
            .reassign_tasks(leaver, heir)
            .await
            .expect("reassignment should succeed");
        let second = board
            .service
            .reassign_tasks(leaver, heir)
            .await
            .expect("repeat should succeed");

        assert_eq!((first, second), (2, 0));
        for original in &held {
            let stored = board
                .repository
                .find_task(original.id())
                .await
                .expect("lookup should succeed")
                .expect("task should exist");
            assert_eq!(stored.assignee(), heir);
            assert_eq!(stored.column_id(), original.column_id());
            assert_eq!(stored.sequence(), original.sequence());
        }
        for untouched in others {
            let stored = board
                .repository
                .find_task(untouched.id())
                .await
                .expect("lookup should succeed");
            assert_eq!(stored, Some(untouched));
        }
    });
}

#[rstest]
fn remove_member_only_touches_the_given_project(shared_test_cluster: &'static TestCluster) {
    let board = pg_board(shared_test_cluster, "remove_member");

    board.runtime.block_on(async {
        let here = provision(&board.service).await;
        let elsewhere = provision(&board.service).await;
        let (member, fallback) = (UserId::new(), UserId::new());
        let local = fill(&board.service, &here.columns[0], &["local"], member).await;
        let remote = fill(&board.service, &elsewhere.columns[0], &["remote"], member).await;

        let updated = board
            .service
            .remove_member(here.cycle.project_id(), member, fallback)
            .await
            .expect("removal should succeed");

        assert_eq!(updated, 1);
        let local_after = board
            .repository
            .tasks_of(here.columns[0].id())
            .await
            .expect("listing should succeed");
        assert!(local_after.iter().all(|task| task.assignee() == fallback));
        assert_eq!(local_after.len(), local.len());
        let remote_after = board
            .repository
            .tasks_of(elsewhere.columns[0].id())
            .await
            .expect("listing should succeed");
        assert_eq!(remote_after, remote);
    });
}
