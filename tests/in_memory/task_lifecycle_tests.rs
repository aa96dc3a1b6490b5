//! In-memory integration tests for the task lifecycle.

use std::sync::Arc;

use super::helpers::{app, inbox_id, succeeded};
use crate::test_helpers::TestApplication;
use chrono::TimeDelta;
use mockable::Clock;
use rstest::rstest;
use todo_core::outcome::ErrorCode;
use todo_core::todo::{
    adapters::memory::NotificationEvent,
    domain::{Priority, TaskStatus},
    services::{
        CompleteTaskRequest, CreateProjectRequest, CreateTaskRequest, SetTaskPriorityRequest,
        UpdateTaskRequest,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_moves_from_inbox_creation_to_completion(
    app: TestApplication,
) -> Result<(), eyre::Report> {
    let inbox = inbox_id(&app).await?;

    let created = succeeded(
        app.create_task()
            .execute(CreateTaskRequest::new("Replace smoke alarm", "Hallway"))
            .await?,
    )?;
    eyre::ensure!(created.project_id == inbox, "task should land in the INBOX");

    let started = succeeded(app.start_task().execute(created.id).await?)?;
    eyre::ensure!(started.status == TaskStatus::InProgress, "task should be in progress");

    succeeded(
        app.set_task_priority()
            .execute(SetTaskPriorityRequest::new(created.id, Priority::High))
            .await?,
    )?;

    let completed = succeeded(
        app.complete_task()
            .execute(CompleteTaskRequest::new(created.id).with_notes("battery included"))
            .await?,
    )?;
    eyre::ensure!(completed.status == TaskStatus::Done, "task should be done");

    let fetched = succeeded(app.get_task().execute(created.id).await?)?;
    eyre::ensure!(fetched == completed, "stored task should match the completion response");
    eyre::ensure!(
        app.notifier().events()
            == vec![
                NotificationEvent::TaskHighPriority(created.id),
                NotificationEvent::TaskCompleted(created.id),
            ],
        "unexpected notifications: {:?}",
        app.notifier().events()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_created_in_project_is_listed_with_it(
    app: TestApplication,
) -> Result<(), eyre::Report> {
    let project = succeeded(
        app.create_project()
            .execute(CreateProjectRequest::new("Bathroom", "Renovation"))
            .await?,
    )?;
    let due_at = app.clock().utc() + TimeDelta::days(7);

    let task = succeeded(
        app.create_task()
            .execute(
                CreateTaskRequest::new("Choose tiles", "")
                    .with_project(project.id)
                    .with_due_at(due_at),
            )
            .await?,
    )?;

    eyre::ensure!(task.priority == Priority::Low, "distant deadline should be LOW");
    let listed = succeeded(app.get_project().execute(project.id).await?)?;
    eyre::ensure!(listed.tasks == vec![task], "project should list the new task");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_task_removes_it_from_project(app: TestApplication) -> Result<(), eyre::Report> {
    let inbox = inbox_id(&app).await?;
    let task = succeeded(
        app.create_task()
            .execute(CreateTaskRequest::new("Cancel gym", ""))
            .await?,
    )?;

    succeeded(app.delete_task().execute(task.id).await?)?;

    let inbox_view = succeeded(app.get_project().execute(inbox).await?)?;
    eyre::ensure!(inbox_view.task_count() == 0, "INBOX should be empty again");
    let lookup = app.get_task().execute(task.id).await?;
    eyre::ensure!(
        lookup.error_code() == Some(ErrorCode::NotFound),
        "deleted task should not be found"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_clears_deadline_and_keeps_other_fields(
    app: TestApplication,
) -> Result<(), eyre::Report> {
    let task = succeeded(
        app.create_task()
            .execute(
                CreateTaskRequest::new("Water plants", "Balcony")
                    .with_due_at(app.clock().utc() + TimeDelta::hours(30)),
            )
            .await?,
    )?;

    let updated = succeeded(
        app.update_task()
            .execute(UpdateTaskRequest::new(task.id).clear_deadline())
            .await?,
    )?;

    eyre::ensure!(updated.due_at.is_none(), "deadline should be cleared");
    eyre::ensure!(updated.description == "Balcony", "description should be kept");
    eyre::ensure!(updated.priority == task.priority, "priority should be kept");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_completions_of_one_task_notify_once(
    app: TestApplication,
) -> Result<(), eyre::Report> {
    let task = succeeded(
        app.create_task()
            .execute(CreateTaskRequest::new("Pay rent", ""))
            .await?,
    )?;
    let use_case = Arc::new(app.complete_task());
    let task_id = task.id;

    let handles: Vec<_> = (0..8)
        .map(move |_| {
            let shared = Arc::clone(&use_case);
            tokio::spawn(async move { shared.execute(CompleteTaskRequest::new(task_id)).await })
        })
        .collect();
    let mut successes = 0_usize;
    for handle in handles {
        if handle.await??.is_success() {
            successes += 1;
        }
    }

    eyre::ensure!(successes == 1, "exactly one completion should win, got {successes}");
    eyre::ensure!(
        app.notifier().completed_tasks() == vec![task.id],
        "one completion notification expected"
    );
    Ok(())
}
