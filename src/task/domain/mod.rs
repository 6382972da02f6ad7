//! Domain model for the task store.
//!
//! A task is a titled to-do item with a completion flag. Identity and the
//! creation timestamp are fixed when the task is first stored; only the title
//! and completion flag change afterwards. Infrastructure concerns stay outside
//! of this boundary.

mod error;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use ids::{TaskId, TaskTitle};
pub use task::{NewTask, PersistedTaskData, Task, TaskPatch};
