//! Storage handle construction and schema lifecycle for the `tasks` table.
//!
//! These helpers block on the database and are intended for startup,
//! shutdown and test fixtures. Call them from `spawn_blocking` when running
//! inside an async runtime.

use super::repository::TaskPgPool;
use crate::config::StoreConfig;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// SQL creating the `tasks` table and its ordering index.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../../../migrations/2026-10-16-000000_create_tasks/up.sql");

/// SQL removing the `tasks` table.
pub const DROP_TASKS_SQL: &str =
    include_str!("../../../../migrations/2026-10-16-000000_create_tasks/down.sql");

/// Errors raised while preparing `PostgreSQL` storage.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The connection pool could not be built or a connection checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// A schema statement failed.
    #[error("schema statement failed: {0}")]
    Schema(#[from] diesel::result::Error),
}

/// Builds the connection pool described by `config`.
///
/// # Errors
///
/// Returns [`BootstrapError::Pool`] when the pool cannot establish its
/// initial connections.
pub fn build_pool(config: &StoreConfig) -> Result<TaskPgPool, BootstrapError> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url());
    let pool = Pool::builder()
        .max_size(config.pool_size())
        .build(manager)?;
    Ok(pool)
}

/// Creates the `tasks` table and its index if they do not exist yet.
///
/// # Errors
///
/// Returns [`BootstrapError`] when no connection is available or a statement
/// fails.
pub fn apply_schema(pool: &TaskPgPool) -> Result<(), BootstrapError> {
    let mut connection = pool.get()?;
    connection.batch_execute(CREATE_TASKS_SQL)?;
    tracing::info!("applied tasks schema");
    Ok(())
}

/// Drops the `tasks` table and every row in it.
///
/// # Errors
///
/// Returns [`BootstrapError`] when no connection is available or a statement
/// fails.
pub fn drop_schema(pool: &TaskPgPool) -> Result<(), BootstrapError> {
    let mut connection = pool.get()?;
    connection.batch_execute(DROP_TASKS_SQL)?;
    tracing::info!("dropped tasks schema");
    Ok(())
}
