//! Shared error types for the services crate.

use std::fmt;

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use trivia_core::model::{CategoryId, QuestionId, QuestionValidationError};

/// The resource a `ServiceError::NotFound` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Question(QuestionId),
    Category(CategoryId),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Question(id) => write!(f, "question {id}"),
            Missing::Category(id) => write!(f, "category {id}"),
        }
    }
}

/// Coarse classification used by callers that translate errors for clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    StoreUnavailable,
}

/// Errors emitted by `QuestionService` and `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] QuestionValidationError),
    #[error("{0} not found")]
    NotFound(Missing),
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[source] StorageError),
}

impl ServiceError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
        }
    }
}

/// Storage failures on reads are never expected outcomes, so they all mean
/// the store is unavailable. Writes classify `NotFound`/`Conflict` themselves.
impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        tracing::warn!(error = %err, "question bank store unavailable");
        ServiceError::StoreUnavailable(err)
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::model::Field;

    #[test]
    fn each_variant_maps_to_one_kind() {
        let validation = ServiceError::from(QuestionValidationError::MissingField(Field::Answer));
        assert_eq!(validation.kind(), ErrorKind::Validation);

        let missing = ServiceError::NotFound(Missing::Question(QuestionId::new(3)));
        assert_eq!(missing.kind(), ErrorKind::NotFound);
        assert_eq!(missing.to_string(), "question 3 not found");

        let down = ServiceError::from(StorageError::Connection("pool timed out".into()));
        assert_eq!(down.kind(), ErrorKind::StoreUnavailable);
    }
}
