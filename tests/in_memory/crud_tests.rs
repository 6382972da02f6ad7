//! Create, read, update and delete behaviour through the public service API.

use super::helpers::{TestService, create_all, service};
use rstest::rstest;
use tasklist::task::{
    domain::{TaskDomainError, TaskId},
    services::{CreateTaskRequest, TaskStoreError, UpdateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_is_visible_through_every_read_path(
    service: TestService,
) -> eyre::Result<()> {
    let created = service.create(CreateTaskRequest::new("Buy milk")).await?;

    let fetched = service.get_one(created.id()).await?;
    let listed = service.get_all().await?;

    eyre::ensure!(fetched == created, "get_one returned {fetched:?}");
    eyre::ensure!(listed == vec![created], "get_all returned {listed:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_a_task_is_persisted(service: TestService) -> eyre::Result<()> {
    let created = service.create(CreateTaskRequest::new("Pay rent")).await?;

    service
        .update(UpdateTaskRequest::new(created.id()).with_completed(true))
        .await?;
    let reloaded = service.get_one(created.id()).await?;

    eyre::ensure!(reloaded.completed(), "task should be completed");
    eyre::ensure!(
        reloaded.title().as_str() == "Pay rent",
        "title changed to {}",
        reloaded.title()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_task_can_be_reopened(service: TestService) -> eyre::Result<()> {
    let created = service.create(CreateTaskRequest::new("Reopen me")).await?;
    service
        .update(UpdateTaskRequest::new(created.id()).with_completed(true))
        .await?;

    let reopened = service
        .update(UpdateTaskRequest::new(created.id()).with_completed(false))
        .await?;

    eyre::ensure!(!reopened.completed(), "task should be open again");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_rename_keeps_the_stored_title(service: TestService) -> eyre::Result<()> {
    let created = service.create(CreateTaskRequest::new("Keep title")).await?;

    let result = service
        .update(UpdateTaskRequest::new(created.id()).with_title("\t"))
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskStoreError::Validation(TaskDomainError::EmptyTitle))
        ),
        "expected validation error, got {result:?}"
    );
    let reloaded = service.get_one(created.id()).await?;
    eyre::ensure!(reloaded == created, "task changed to {reloaded:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_can_no_longer_be_read(service: TestService) -> eyre::Result<()> {
    let tasks = create_all(&service, &["first", "second"]).await?;
    let [first, second] = tasks.as_slice() else {
        eyre::bail!("expected two tasks, got {}", tasks.len());
    };

    service.delete(first.id()).await?;

    let lookup = service.get_one(first.id()).await;
    eyre::ensure!(
        matches!(lookup, Err(TaskStoreError::NotFound(id)) if id == first.id()),
        "expected NotFound, got {lookup:?}"
    );
    eyre::ensure!(
        service.get_all().await? == vec![second.clone()],
        "only the second task should remain"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_twice_reports_not_found(service: TestService) -> eyre::Result<()> {
    let created = service.create(CreateTaskRequest::new("Once")).await?;
    service.delete(created.id()).await?;

    let second = service.delete(created.id()).await;

    eyre::ensure!(
        matches!(second, Err(TaskStoreError::NotFound(_))),
        "expected NotFound, got {second:?}"
    );
    eyre::ensure!(
        second.is_err_and(|err| err.is_recoverable()),
        "NotFound should be recoverable"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_all_then_create_starts_a_fresh_listing(service: TestService) -> eyre::Result<()> {
    let old = create_all(&service, &["a", "b", "c"]).await?;

    let deleted = service.delete_all().await?;
    let fresh = service.create(CreateTaskRequest::new("after purge")).await?;

    eyre::ensure!(deleted == 3, "expected 3 deletions, got {deleted}");
    eyre::ensure!(
        old.iter().all(|task| task.id() != fresh.id()),
        "identifier {} was reused",
        fresh.id()
    );
    eyre::ensure!(
        service.get_all().await? == vec![fresh],
        "listing should hold only the new task"
    );
    Ok(())
}

#[rstest]
#[case::negative(TaskId::new(-1))]
#[case::zero(TaskId::new(0))]
#[case::large(TaskId::new(i64::MAX))]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_identifiers_are_not_found(
    service: TestService,
    #[case] id: TaskId,
) -> eyre::Result<()> {
    let result = service.get_one(id).await;

    eyre::ensure!(
        matches!(result, Err(TaskStoreError::NotFound(missing)) if missing == id),
        "expected NotFound for {id}, got {result:?}"
    );
    Ok(())
}
