//! Application services for the task store.

mod purge;
mod store;

pub use purge::{InvalidPurgePeriod, PurgeReport, ScheduledPurge};
pub use store::{
    CreateTaskRequest, TaskStoreError, TaskStoreResult, TaskStoreService, UpdateTaskRequest,
};
