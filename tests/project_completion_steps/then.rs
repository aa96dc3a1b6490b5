//! Then steps for project completion BDD scenarios.

use super::world::ProjectCompletionWorld;
use rstest_bdd_macros::then;

#[then(r#"the project status is "{status}""#)]
fn project_status_is(world: &ProjectCompletionWorld, status: String) -> Result<(), eyre::Report> {
    let view = world.project_view()?;
    if view.status.as_str() != status {
        return Err(eyre::eyre!(
            "expected project status {status}, found {}",
            view.status.as_str()
        ));
    }
    Ok(())
}

#[then(r#"every project task is "{status}""#)]
fn every_task_is(world: &ProjectCompletionWorld, status: String) -> Result<(), eyre::Report> {
    let view = world.project_view()?;
    if view.tasks.is_empty() {
        return Err(eyre::eyre!("project has no tasks to check"));
    }
    if let Some(task) = view.tasks.iter().find(|task| task.status.as_str() != status) {
        return Err(eyre::eyre!(
            "task {:?} is {}, expected {status}",
            task.title,
            task.status.as_str()
        ));
    }
    Ok(())
}

#[then(r#"the completion fails with "{code}""#)]
fn completion_fails_with(world: &ProjectCompletionWorld, code: String) -> Result<(), eyre::Report> {
    let outcome = world
        .completion
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing completion outcome"))?;
    match outcome.error_code() {
        Some(found) if found.as_str() == code => Ok(()),
        other => Err(eyre::eyre!("expected {code} failure, got {other:?}")),
    }
}

#[then("{count:usize} task completion notifications are recorded")]
fn completion_notifications(
    world: &ProjectCompletionWorld,
    count: usize,
) -> Result<(), eyre::Report> {
    let recorded = world.app.notifier().completed_tasks().len();
    if recorded != count {
        return Err(eyre::eyre!(
            "expected {count} completion notifications, found {recorded}"
        ));
    }
    Ok(())
}

#[then("the task belongs to the project")]
fn task_belongs_to_project(world: &ProjectCompletionWorld) -> Result<(), eyre::Report> {
    let task = world
        .last_created_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing created task"))?;
    let project_id = world.project_id()?;
    if task.project_id != project_id {
        return Err(eyre::eyre!(
            "task landed in {}, expected {project_id}",
            task.project_id
        ));
    }
    Ok(())
}

#[then("the project owns {count:usize} task")]
fn project_owns_tasks(world: &ProjectCompletionWorld, count: usize) -> Result<(), eyre::Report> {
    let owned = world.project_view()?.task_count();
    if owned != count {
        return Err(eyre::eyre!("expected {count} owned tasks, found {owned}"));
    }
    Ok(())
}
