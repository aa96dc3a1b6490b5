//! In-memory integration tests for deadline warnings.

use super::helpers::succeeded;
use crate::test_helpers::test_application;
use chrono::TimeDelta;
use mockable::Clock;
use rstest::rstest;
use todo_core::config::TodoConfig;
use todo_core::todo::services::{CompleteTaskRequest, CreateTaskRequest};

#[rstest]
#[case(None, 1)]
#[case(Some("72"), 2)]
#[tokio::test(flavor = "multi_thread")]
async fn configured_window_controls_warnings(
    #[case] window_hours: Option<&str>,
    #[case] expected: usize,
) -> Result<(), eyre::Report> {
    let config = TodoConfig::from_lookup(|key| match key {
        "TODO_DEADLINE_WARNING_HOURS" => window_hours.map(str::to_owned),
        _ => None,
    })?;
    let app = test_application(config)?;
    let now = app.clock().utc();
    for (title, due_in) in [
        ("Return library books", TimeDelta::hours(20)),
        ("Renew licence", TimeDelta::hours(60)),
        ("Plan trip", TimeDelta::days(10)),
    ] {
        succeeded(
            app.create_task()
                .execute(CreateTaskRequest::new(title, "").with_due_at(now + due_in))
                .await?,
        )?;
    }

    let report = succeeded(app.check_deadlines().execute().await?)?;

    eyre::ensure!(
        report.notifications_sent == expected,
        "expected {expected} warnings, got {}",
        report.notifications_sent
    );
    eyre::ensure!(
        app.notifier().deadline_warnings().len() == expected,
        "recorded warnings should match the report"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_tasks_are_not_warned_about() -> Result<(), eyre::Report> {
    let app = test_application(TodoConfig::default())?;
    let task = succeeded(
        app.create_task()
            .execute(
                CreateTaskRequest::new("Submit expenses", "")
                    .with_due_at(app.clock().utc() + TimeDelta::hours(3)),
            )
            .await?,
    )?;
    succeeded(
        app.complete_task()
            .execute(CompleteTaskRequest::new(task.id))
            .await?,
    )?;

    let report = succeeded(app.check_deadlines().execute().await?)?;

    eyre::ensure!(report.notifications_sent == 0, "done tasks need no warning");
    Ok(())
}
