//! Persistence adapters for the task store.
//!
//! - [`memory::InMemoryTaskRepository`]: thread-safe in-memory storage for
//!   tests
//! - [`postgres::PostgresTaskRepository`]: `PostgreSQL` persistence using
//!   Diesel over an r2d2 pool

pub mod memory;
pub mod postgres;
