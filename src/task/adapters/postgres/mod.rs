//! `PostgreSQL` adapters for task persistence.

mod bootstrap;
mod models;
mod repository;
mod schema;

pub use bootstrap::{
    BootstrapError, CREATE_TASKS_SQL, DROP_TASKS_SQL, apply_schema, build_pool, drop_schema,
};
pub use repository::{PostgresTaskRepository, TaskPgPool};
