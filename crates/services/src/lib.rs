#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progress_service;
pub mod question_store;
pub mod sessions;

#[cfg(test)]
mod test_support;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{
    AppServicesError, EmptyQueueReason, PersistError, QuestionIndexError, QuestionLoadError,
    SessionError,
};
pub use progress_service::{PROGRESS_KEY, ProgressOverview, ProgressService};
pub use question_store::QuestionStore;
pub use sessions::{
    AdvanceOutcome, AnswerFeedback, AnswerSubmission, CurrentQuestion, QueueBuilder,
    QuizLoopService, QuizSession, SessionPlan, SessionProgress, SessionState,
};
