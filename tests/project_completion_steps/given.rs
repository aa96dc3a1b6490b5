//! Given steps for project completion BDD scenarios.

use super::world::{ProjectCompletionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use todo_core::todo::{
    ports::ProjectRepository,
    services::{CreateProjectRequest, CreateTaskRequest},
};

#[given(r#"a project named "{name}""#)]
fn project_named(world: &mut ProjectCompletionWorld, name: String) -> Result<(), eyre::Report> {
    let created = run_async(
        world
            .app
            .create_project()
            .execute(CreateProjectRequest::new(name, "")),
    )
    .wrap_err("create project for scenario")?
    .into_result()
    .map_err(|err| eyre::eyre!("create project: {}", err.message()))?;
    world.project_id = Some(created.id);
    Ok(())
}

#[given("the INBOX project")]
fn inbox_project(world: &mut ProjectCompletionWorld) -> Result<(), eyre::Report> {
    let inbox = run_async(world.app.projects().get_inbox()).wrap_err("load INBOX")?;
    world.project_id = Some(inbox.id());
    Ok(())
}

#[given(r#"the project has a task titled "{title}""#)]
fn project_has_task(world: &mut ProjectCompletionWorld, title: String) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    let created = run_async(
        world
            .app
            .create_task()
            .execute(CreateTaskRequest::new(title.as_str(), "").with_project(project_id)),
    )
    .wrap_err("create task for scenario")?
    .into_result()
    .map_err(|err| eyre::eyre!("create task: {}", err.message()))?;
    world.task_ids.push((title, created.id));
    Ok(())
}

#[given(r#"the task repository refuses to complete "{title}""#)]
fn repository_refuses(world: &mut ProjectCompletionWorld, title: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    world.app.tasks().refuse_completion_of(task_id);
    Ok(())
}
