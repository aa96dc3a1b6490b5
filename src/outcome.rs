//! Outcome model returned by every use case.
//!
//! A use case reports recoverable results through [`Outcome`], which holds
//! exactly one of a success value or a typed [`UseCaseError`]. Failures that
//! fall outside the closed [`ErrorCode`] taxonomy are not outcomes at all:
//! they travel through [`UseCaseFault`] and signal an integration defect.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Closed taxonomy of recoverable use-case error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The requested aggregate does not exist.
    NotFound,
    /// Malformed input reached the domain and was rejected.
    ValidationError,
    /// A state change would break a domain invariant.
    BusinessRuleViolation,
}

impl ErrorCode {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BusinessRuleViolation => "BUSINESS_RULE_VIOLATION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed, displayable error carried by a failed [`Outcome`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct UseCaseError {
    code: ErrorCode,
    message: String,
    details: Option<Map<String, Value>>,
}

impl UseCaseError {
    /// Creates an error with the given code and message.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Creates a `NOT_FOUND` error naming the missing entity.
    #[must_use]
    pub fn not_found(entity: &str, entity_id: impl fmt::Display) -> Self {
        let id = entity_id.to_string();
        Self::new(
            ErrorCode::NotFound,
            format!("{entity} with id {id} not found"),
        )
        .with_detail("entity", entity)
        .with_detail("id", id)
    }

    /// Creates a `VALIDATION_ERROR` error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Creates a `BUSINESS_RULE_VIOLATION` error.
    #[must_use]
    pub fn business_rule_violation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BusinessRuleViolation, message)
    }

    /// Attaches a structured detail entry.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the structured details, if any.
    #[must_use]
    pub const fn details(&self) -> Option<&Map<String, Value>> {
        self.details.as_ref()
    }
}

/// Recoverable result of a use-case invocation.
///
/// The two variants are the only constructors, so an outcome can never hold
/// both a value and an error, or neither.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// The operation succeeded.
    Success(T),
    /// The operation was rejected with a typed error.
    Failure(UseCaseError),
}

impl<T> Outcome<T> {
    /// Wraps a success value.
    pub const fn success(value: T) -> Self {
        Self::Success(value)
    }

    /// Wraps a failure.
    pub const fn failure(error: UseCaseError) -> Self {
        Self::Failure(error)
    }

    /// Returns `true` when the outcome holds a value.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` when the outcome holds an error.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Returns the success value.
    ///
    /// # Panics
    ///
    /// Panics when called on a failure. Reading the value of a failed
    /// outcome is a programming error.
    #[must_use]
    #[track_caller]
    pub fn value(&self) -> &T {
        match self {
            Self::Success(value) => value,
            Self::Failure(error) => panic!("cannot access value on failed outcome: {error}"),
        }
    }

    /// Returns the failure.
    ///
    /// # Panics
    ///
    /// Panics when called on a success.
    #[must_use]
    #[track_caller]
    pub fn error(&self) -> &UseCaseError {
        match self {
            Self::Failure(error) => error,
            Self::Success(_) => panic!("cannot access error on successful outcome"),
        }
    }

    /// Returns the error code of a failure, or `None` on success.
    #[must_use]
    pub const fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error.code()),
        }
    }

    /// Maps the success value, leaving failures untouched.
    pub fn map<U>(self, op: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(op(value)),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Converts into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the carried [`UseCaseError`] when the outcome is a failure.
    pub fn into_result(self) -> Result<T, UseCaseError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(error) => Err(error),
        }
    }
}

impl<T> From<Result<T, UseCaseError>> for Outcome<T> {
    fn from(result: Result<T, UseCaseError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error),
        }
    }
}

/// Unmapped failure that escapes a use case.
///
/// Faults are storage or integration defects rather than domain outcomes.
/// Callers are expected to propagate them, not present them.
#[derive(Debug, Clone, Error)]
pub enum UseCaseFault {
    /// A repository failed below the domain taxonomy.
    #[error("repository fault: {0}")]
    Repository(Arc<dyn std::error::Error + Send + Sync>),
    /// A notification port call failed.
    #[error("notification fault: {0}")]
    Notification(Arc<dyn std::error::Error + Send + Sync>),
}

impl UseCaseFault {
    /// Wraps a repository failure.
    pub fn repository(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Repository(Arc::new(err))
    }

    /// Wraps a notification failure.
    pub fn notification(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Notification(Arc::new(err))
    }
}

/// Return type of every use-case `execute` method.
pub type UseCaseResult<T> = Result<Outcome<T>, UseCaseFault>;
