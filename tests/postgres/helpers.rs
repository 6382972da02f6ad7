//! Shared test helpers for `PostgreSQL` integration tests.

use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use tasklist::config::StoreConfig;
use tasklist::task::{
    adapters::postgres::{CREATE_TASKS_SQL, PostgresTaskRepository, TaskPgPool, build_pool},
    services::TaskStoreService,
};
use tokio::runtime::Runtime;

/// Boxed error type shared by the setup helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service type used by `PostgreSQL` integration tests.
pub type PgService = TaskStoreService<PostgresTaskRepository, DefaultClock>;

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "tasklist_test_template";

/// Creates a tokio runtime for async operations in tests.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the `tasks` schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_TASKS_SQL)
                .map_err(|e| eyre::eyre!("SQL error: {e}"))?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Creates a scratch database from the template and returns a pool for it.
///
/// # Errors
///
/// Returns an error if database creation or pool setup fails.
pub fn setup_pool(cluster: &TestCluster, db_name: &str) -> Result<TaskPgPool, BoxError> {
    cluster
        .create_database_from_template(db_name, TEMPLATE_DB)
        .map_err(|e| Box::new(e) as BoxError)?;
    // A single connection keeps statement ordering deterministic.
    let config = StoreConfig::new(cluster.connection().database_url(db_name)).with_pool_size(1);
    Ok(build_pool(&config)?)
}

/// Creates a scratch database and wraps it in a task store service.
///
/// # Errors
///
/// Returns an error if database creation or pool setup fails.
pub fn setup_service(cluster: &TestCluster, db_name: &str) -> Result<PgService, BoxError> {
    let pool = setup_pool(cluster, db_name)?;
    Ok(TaskStoreService::new(
        Arc::new(PostgresTaskRepository::new(pool)),
        Arc::new(DefaultClock),
    ))
}

/// Returns a unique scratch database name with the given prefix.
pub fn scratch_db_name(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}

/// Cleans up a test database.
fn cleanup_database(cluster: &TestCluster, db_name: &str) {
    if let Err(e) = cluster.drop_database(db_name) {
        eprintln!("Warning: failed to drop test database {db_name}: {e}");
    }
}

/// Guard that ensures test database cleanup runs even if a test panics.
pub struct CleanupGuard<'a> {
    cluster: &'a TestCluster,
    db_name: String,
}

impl<'a> CleanupGuard<'a> {
    /// Registers `db_name` for removal when the guard drops.
    pub const fn new(cluster: &'a TestCluster, db_name: String) -> Self {
        Self { cluster, db_name }
    }
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        cleanup_database(self.cluster, &self.db_name);
    }
}

/// Clock pinned to one instant, for forcing `created_at` ties.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub chrono::DateTime<chrono::Utc>);

impl mockable::Clock for FixedClock {
    fn local(&self) -> chrono::DateTime<chrono::Local> {
        self.0.with_timezone(&chrono::Local)
    }

    fn utc(&self) -> chrono::DateTime<chrono::Utc> {
        self.0
    }
}
