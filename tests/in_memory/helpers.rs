//! Fixtures shared by the in-memory integration tests.

use crate::test_helpers::{TestApplication, test_application};
use rstest::fixture;
use todo_core::config::TodoConfig;
use todo_core::outcome::Outcome;
use todo_core::todo::domain::ProjectId;
use todo_core::todo::ports::ProjectRepository;

/// Provides an application with default configuration.
#[fixture]
pub fn app() -> TestApplication {
    test_application(TodoConfig::default()).unwrap_or_else(|err| panic!("seed inbox: {err}"))
}

/// Returns the success value of `outcome` or fails with its error.
///
/// # Errors
///
/// Returns an error describing the failure when `outcome` is not a success.
pub fn succeeded<T>(outcome: Outcome<T>) -> Result<T, eyre::Report> {
    outcome
        .into_result()
        .map_err(|err| eyre::eyre!("use case failed: {} ({})", err.message(), err.code()))
}

/// Looks up the INBOX project id.
///
/// # Errors
///
/// Returns an error if the INBOX cannot be loaded.
pub async fn inbox_id(app: &TestApplication) -> Result<ProjectId, eyre::Report> {
    Ok(app.projects().get_inbox().await?.id())
}
