//! Tasklist: persistence core for a minimal task tracker.
//!
//! A task is a titled item with a completion flag. This crate owns the
//! storage of tasks and exposes six operations over them: create, fetch one,
//! fetch all, update, delete and delete all.
//!
//! # Architecture
//!
//! Tasklist follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`, memory)
//!
//! # Modules
//!
//! - [`config`]: Environment-driven runtime configuration
//! - [`task`]: Task domain, persistence and store services

pub mod config;
pub mod task;
