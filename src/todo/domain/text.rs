//! Validated text scalars for task and project fields.

use super::TodoDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const TASK_TITLE_MAX: usize = 200;
const DESCRIPTION_MAX: usize = 2000;
const PROJECT_NAME_MAX: usize = 100;
const COMPLETION_NOTES_MAX: usize = 1000;

/// Trims `raw` and enforces emptiness and length rules.
fn validated(
    raw: String,
    field: &'static str,
    max: usize,
    required: bool,
) -> Result<String, TodoDomainError> {
    let trimmed = raw.trim();
    if required && trimmed.is_empty() {
        return Err(TodoDomainError::EmptyField { field });
    }
    if trimmed.chars().count() > max {
        return Err(TodoDomainError::FieldTooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

/// Non-empty task title of at most 200 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated, trimmed title.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyField`] for blank input or
    /// [`TodoDomainError::FieldTooLong`] beyond 200 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TodoDomainError> {
        validated(value.into(), "title", TASK_TITLE_MAX, true).map(Self)
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-form description of at most 2000 characters, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Creates a validated, trimmed description.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::FieldTooLong`] beyond 2000 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TodoDomainError> {
        validated(value.into(), "description", DESCRIPTION_MAX, false).map(Self)
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Non-empty project name of at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated, trimmed project name.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyField`] for blank input or
    /// [`TodoDomainError::FieldTooLong`] beyond 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TodoDomainError> {
        validated(value.into(), "project name", PROJECT_NAME_MAX, true).map(Self)
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Notes recorded when a task or project is completed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionNotes(String);

impl CompletionNotes {
    /// Creates validated completion notes.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::FieldTooLong`] beyond 1000 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TodoDomainError> {
        validated(value.into(), "completion notes", COMPLETION_NOTES_MAX, false).map(Self)
    }

    /// Parses optional raw notes, treating `None` as absent.
    ///
    /// # Errors
    ///
    /// Propagates [`CompletionNotes::new`] failures.
    pub fn parse_optional(value: Option<String>) -> Result<Option<Self>, TodoDomainError> {
        value.map(Self::new).transpose()
    }

    /// Returns the notes as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! text_display {
    ($($name:ident),+) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }
        )+
    };
}

text_display!(TaskTitle, Description, ProjectName, CompletionNotes);
