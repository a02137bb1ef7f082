//! Shared error types for the services crate.

use std::fmt;

use thiserror::Error;

use quiz_core::model::{QuestionError, QuestionIndex};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted while loading the question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionLoadError {
    #[error("question source unavailable: {0}")]
    Source(#[from] StorageError),
    #[error("question #{number} is malformed: {source}")]
    Malformed {
        number: usize,
        #[source]
        source: QuestionError,
    },
}

/// Errors emitted when addressing a question outside the bank.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionIndexError {
    #[error("question index {index} is out of range (total questions: {count})")]
    OutOfRange { index: QuestionIndex, count: usize },
}

/// Errors emitted when progress cannot be written.
///
/// Scoring already happened in memory when this surfaces; only durability is at risk.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PersistError {
    #[error("failed to load progress before updating it: {0}")]
    Load(#[source] StorageError),
    #[error("failed to store progress: {0}")]
    Storage(#[from] StorageError),
    #[error("failed to encode progress: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Why a queue came out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyQueueReason {
    /// Errors mode found no question whose latest answer was wrong.
    NoWrongAnswers,
    /// The requested ordering selected no questions at all.
    NoQuestionsRemain,
}

impl fmt::Display for EmptyQueueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyQueueReason::NoWrongAnswers => f.write_str("no wrong answers to review"),
            EmptyQueueReason::NoQuestionsRemain => f.write_str("no questions to show"),
        }
    }
}

/// Errors emitted by session services.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("question #{requested} does not exist (total questions: {total})")]
    InvalidStart { requested: usize, total: usize },
    #[error("{0}")]
    EmptyQueue(EmptyQueueReason),
    #[error("no session in progress")]
    NotInProgress,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Questions(#[from] QuestionLoadError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_start_names_requested_and_total() {
        let err = SessionError::InvalidStart {
            requested: 8,
            total: 5,
        };
        assert_eq!(
            err.to_string(),
            "question #8 does not exist (total questions: 5)"
        );
    }

    #[test]
    fn empty_queue_messages_are_distinct() {
        let no_errors = SessionError::EmptyQueue(EmptyQueueReason::NoWrongAnswers).to_string();
        let no_questions =
            SessionError::EmptyQueue(EmptyQueueReason::NoQuestionsRemain).to_string();
        assert_ne!(no_errors, no_questions);
        assert_eq!(no_errors, "no wrong answers to review");
    }
}
