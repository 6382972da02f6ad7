//! Service layer implementing the six task store operations.

use crate::task::{
    domain::{NewTask, Task, TaskDomainError, TaskId, TaskPatch, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
}

impl CreateTaskRequest {
    /// Creates a request with the raw, unvalidated title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Request payload for patching an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    id: TaskId,
    title: Option<String>,
    completed: Option<bool>,
}

impl UpdateTaskRequest {
    /// Creates a request targeting `id` that changes nothing yet.
    #[must_use]
    pub const fn new(id: TaskId) -> Self {
        Self {
            id,
            title: None,
            completed: None,
        }
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Returns the targeted task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    fn into_patch(self) -> Result<TaskPatch, TaskDomainError> {
        let mut patch = TaskPatch::new();
        if let Some(title) = self.title {
            patch = patch.with_title(TaskTitle::new(title)?);
        }
        if let Some(completed) = self.completed {
            patch = patch.with_completed(completed);
        }
        Ok(patch)
    }
}

/// Errors surfaced by the task store.
///
/// `Validation` and `NotFound` are recoverable by the caller; `Storage` is
/// not.
#[derive(Debug, Error)]
pub enum TaskStoreError {
    /// Input failed a precondition.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// The targeted task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The backing store failed.
    #[error("storage failure: {0}")]
    Storage(#[source] TaskRepositoryError),
}

impl TaskStoreError {
    /// Returns `true` when the caller can correct the request and retry.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}

impl From<TaskRepositoryError> for TaskStoreError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other @ TaskRepositoryError::Persistence(_) => Self::Storage(other),
        }
    }
}

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task store facade over a [`TaskRepository`].
pub struct TaskStoreService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskStoreService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskStoreService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task store service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a task with `completed = false` stamped at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Validation`] when the title is blank and
    /// [`TaskStoreError::Storage`] when the insert fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskStoreResult<Task> {
        let title = TaskTitle::new(request.title).map_err(log_failure)?;
        let new_task = NewTask::new(title, &*self.clock);
        let task = self.repository.insert(&new_task).await.map_err(log_failure)?;
        tracing::debug!(task_id = %task.id(), "created task");
        Ok(task)
    }

    /// Returns a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when no task has `id`.
    pub async fn get_one(&self, id: TaskId) -> TaskStoreResult<Task> {
        let task = self.repository.find_by_id(id).await.map_err(log_failure)?;
        task.ok_or(TaskStoreError::NotFound(id)).map_err(log_failure)
    }

    /// Returns every task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Storage`] when the query fails.
    pub async fn get_all(&self) -> TaskStoreResult<Vec<Task>> {
        let tasks = self.repository.list().await.map_err(log_failure)?;
        tracing::debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Applies the supplied fields and returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Validation`] when a supplied title is blank
    /// and [`TaskStoreError::NotFound`] when the task does not exist.
    pub async fn update(&self, request: UpdateTaskRequest) -> TaskStoreResult<Task> {
        let id = request.id();
        let patch = request.into_patch().map_err(log_failure)?;
        let task = self.repository.update(id, &patch).await.map_err(log_failure)?;
        tracing::debug!(task_id = %id, "updated task");
        Ok(task)
    }

    /// Removes a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    pub async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        self.repository.delete(id).await.map_err(log_failure)?;
        tracing::debug!(task_id = %id, "deleted task");
        Ok(())
    }

    /// Removes every task and returns how many were deleted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Storage`] when the delete fails. An empty
    /// table is not an error.
    pub async fn delete_all(&self) -> TaskStoreResult<usize> {
        let deleted = self.repository.delete_all().await.map_err(log_failure)?;
        tracing::info!(deleted, "deleted all tasks");
        Ok(deleted)
    }
}

fn log_failure<E>(err: E) -> TaskStoreError
where
    E: Into<TaskStoreError>,
{
    let store_err = err.into();
    if store_err.is_recoverable() {
        tracing::warn!(error = %store_err, "task store request rejected");
    } else {
        tracing::error!(error = %store_err, "task store operation failed");
    }
    store_err
}
