//! In-memory integration tests for atomic project completion.

use super::helpers::{app, inbox_id, succeeded};
use crate::test_helpers::TestApplication;
use rstest::rstest;
use todo_core::outcome::ErrorCode;
use todo_core::todo::{
    domain::{ProjectStatus, TaskStatus},
    services::{
        CompleteProjectRequest, CompleteTaskRequest, CreateProjectRequest, CreateTaskRequest,
        ProjectResponse,
    },
};

async fn project_with_tasks(
    app: &TestApplication,
    titles: &[&str],
) -> Result<ProjectResponse, eyre::Report> {
    let project = succeeded(
        app.create_project()
            .execute(CreateProjectRequest::new("Quarterly report", ""))
            .await?,
    )?;
    for title in titles {
        succeeded(
            app.create_task()
                .execute(CreateTaskRequest::new(*title, "").with_project(project.id))
                .await?,
        )?;
    }
    succeeded(app.get_project().execute(project.id).await?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_closes_every_open_task(app: TestApplication) -> Result<(), eyre::Report> {
    let project = project_with_tasks(&app, &["Gather numbers", "Draft", "Review"]).await?;
    let first = project
        .tasks
        .first()
        .ok_or_else(|| eyre::eyre!("project should have tasks"))?;
    succeeded(
        app.complete_task()
            .execute(CompleteTaskRequest::new(first.id))
            .await?,
    )?;

    let summary = succeeded(
        app.complete_project()
            .execute(CompleteProjectRequest::new(project.id).with_notes("filed"))
            .await?,
    )?;

    eyre::ensure!(summary.status == ProjectStatus::Completed, "project should be completed");
    eyre::ensure!(summary.task_count == 3, "project owns three tasks");
    eyre::ensure!(summary.completed_task_ids.len() == 2, "two tasks were still open");
    let view = succeeded(app.get_project().execute(project.id).await?)?;
    eyre::ensure!(view.completed_task_count() == 3, "every task should be done");
    eyre::ensure!(
        app.notifier().completed_tasks().len() == 3,
        "one notification per completed task"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refused_task_leaves_project_untouched(app: TestApplication) -> Result<(), eyre::Report> {
    let project = project_with_tasks(&app, &["Gather numbers", "Draft"]).await?;
    let second = project
        .tasks
        .get(1)
        .ok_or_else(|| eyre::eyre!("project should have two tasks"))?;
    app.tasks().refuse_completion_of(second.id);

    let outcome = app
        .complete_project()
        .execute(CompleteProjectRequest::new(project.id))
        .await?;

    eyre::ensure!(
        outcome.error_code() == Some(ErrorCode::BusinessRuleViolation),
        "completion should be refused"
    );
    let after = succeeded(app.get_project().execute(project.id).await?)?;
    eyre::ensure!(after == project, "project and tasks should be restored: {after:?}");
    eyre::ensure!(
        after.tasks.iter().all(|task| task.status == TaskStatus::Todo),
        "tasks should be back to TODO"
    );
    eyre::ensure!(
        app.notifier().completed_tasks().is_empty(),
        "no completion notification expected"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inbox_completion_is_refused(app: TestApplication) -> Result<(), eyre::Report> {
    let inbox = inbox_id(&app).await?;
    succeeded(
        app.create_task()
            .execute(CreateTaskRequest::new("Unsorted", ""))
            .await?,
    )?;

    let outcome = app
        .complete_project()
        .execute(CompleteProjectRequest::new(inbox))
        .await?;

    eyre::ensure!(
        outcome.error_code() == Some(ErrorCode::BusinessRuleViolation),
        "INBOX completion must fail"
    );
    let view = succeeded(app.get_project().execute(inbox).await?)?;
    eyre::ensure!(view.status == ProjectStatus::Active, "INBOX stays active");
    eyre::ensure!(view.completed_task_count() == 0, "INBOX tasks stay open");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_project_accepts_no_new_tasks(app: TestApplication) -> Result<(), eyre::Report> {
    let project = project_with_tasks(&app, &[]).await?;
    succeeded(
        app.complete_project()
            .execute(CompleteProjectRequest::new(project.id))
            .await?,
    )?;

    let outcome = app
        .create_task()
        .execute(CreateTaskRequest::new("Too late", "").with_project(project.id))
        .await?;

    eyre::ensure!(
        outcome.error_code() == Some(ErrorCode::BusinessRuleViolation),
        "closed project should refuse tasks"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_project_takes_its_tasks(app: TestApplication) -> Result<(), eyre::Report> {
    let project = project_with_tasks(&app, &["Shred drafts"]).await?;

    succeeded(app.delete_project().execute(project.id).await?)?;

    let listed = succeeded(app.list_projects().execute().await?)?;
    eyre::ensure!(listed.len() == 1, "only the INBOX should remain");
    for task in &project.tasks {
        let lookup = app.get_task().execute(task.id).await?;
        eyre::ensure!(
            lookup.error_code() == Some(ErrorCode::NotFound),
            "task {} should be gone",
            task.id
        );
    }
    Ok(())
}
