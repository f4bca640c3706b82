//! Pool construction, call bounding and Diesel error classification.

use crate::{
    board::ports::{BoardRepositoryError, BoardRepositoryResult},
    config::StoreConfig,
};
use diesel::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// Applies the configured `statement_timeout` to every pooled connection.
#[derive(Debug, Clone, Copy)]
struct StatementTimeout(Duration);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for StatementTimeout {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        diesel::sql_query(format!("SET statement_timeout = {}", self.0.as_millis()))
            .execute(conn)
            .map(drop)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds a connection pool from store configuration.
///
/// # Errors
///
/// Returns [`BoardRepositoryError::Unavailable`] when the pool cannot open
/// its initial connections within the connect timeout.
pub fn build_pool(config: &StoreConfig) -> BoardRepositoryResult<BoardPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url());
    Pool::builder()
        .max_size(config.max_pool_size())
        .connection_timeout(config.connect_timeout())
        .connection_customizer(Box::new(StatementTimeout(config.statement_timeout())))
        .build(manager)
        .map_err(BoardRepositoryError::unavailable)
}

/// What a bounded call does once its limit elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ElapsedPolicy {
    /// Report [`BoardRepositoryError::Unavailable`] and leave the blocking
    /// call to finish on its own. Only safe for reads.
    Detach,
    /// Log the overrun and wait for the blocking call to settle, so a write
    /// that commits is never reported as failed. `statement_timeout` bounds
    /// the wait on the server side.
    AwaitOutcome,
}

/// Runs a blocking Diesel call on the blocking pool, bounded by `limit`.
pub(super) async fn run_bounded<F, T>(
    pool: &BoardPgPool,
    limit: Duration,
    policy: ElapsedPolicy,
    f: F,
) -> BoardRepositoryResult<T>
where
    F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let shared = pool.clone();
    let handle = tokio::task::spawn_blocking(move || {
        let mut connection = shared.get().map_err(BoardRepositoryError::unavailable)?;
        f(&mut connection)
    });
    settle(handle, limit, policy).await
}

async fn settle<T>(
    mut handle: JoinHandle<BoardRepositoryResult<T>>,
    limit: Duration,
    policy: ElapsedPolicy,
) -> BoardRepositoryResult<T> {
    match tokio::time::timeout(limit, &mut handle).await {
        Ok(joined) => joined.map_err(BoardRepositoryError::unavailable)?,
        Err(elapsed) => match policy {
            ElapsedPolicy::Detach => {
                tracing::warn!(limit_ms = limit.as_millis(), "store call timed out");
                Err(BoardRepositoryError::unavailable(elapsed))
            }
            ElapsedPolicy::AwaitOutcome => {
                tracing::warn!(
                    limit_ms = limit.as_millis(),
                    "store write overran its limit, awaiting outcome"
                );
                handle.await.map_err(BoardRepositoryError::unavailable)?
            }
        },
    }
}

impl From<DieselError> for BoardRepositoryError {
    fn from(err: DieselError) -> Self {
        if is_transient(&err) {
            Self::unavailable(err)
        } else {
            Self::rejected(err)
        }
    }
}

fn is_transient(err: &DieselError) -> bool {
    match err {
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection
            | DatabaseErrorKind::UnableToSendCommand
            | DatabaseErrorKind::SerializationFailure,
            _,
        )
        | DieselError::BrokenTransactionManager => true,
        DieselError::DatabaseError(_, info) => {
            let message = info.message();
            message.contains("statement timeout") || message.contains("deadlock detected")
        }
        _ => false,
    }
}
