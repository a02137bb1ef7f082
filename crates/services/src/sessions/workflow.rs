use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use quiz_core::model::{QuizMode, SessionReport, StartFrom};
use tracing::{info, warn};

use super::plan::QueueBuilder;
use super::service::{AdvanceOutcome, AnswerFeedback, SessionState};
use crate::Clock;
use crate::error::{PersistError, SessionError};
use crate::progress_service::{ProgressOverview, ProgressService};
use crate::question_store::QuestionStore;

/// Result of submitting an answer through the loop service.
#[derive(Debug)]
pub struct AnswerSubmission {
    pub feedback: AnswerFeedback,
    /// Set when the answer was scored but could not be persisted.
    pub persist_warning: Option<PersistError>,
}

/// Orchestrates session start, persisted answering and progress reset.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    questions: Arc<QuestionStore>,
    progress: ProgressService,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, questions: Arc<QuestionStore>, progress: ProgressService) -> Self {
        Self {
            clock,
            questions,
            progress,
        }
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Time since `since` on the service clock, clamped at zero.
    #[must_use]
    pub fn elapsed_since(&self, since: DateTime<Utc>) -> Duration {
        self.clock.elapsed_since(since)
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionStore {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.count()
    }

    /// Build a queue for `mode` and start a fresh session in `state`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidStart` or `SessionError::EmptyQueue` when
    /// the queue cannot be built; `state` is left `NotStarted`.
    pub async fn start_session(
        &self,
        state: &mut SessionState,
        mode: QuizMode,
        start_from: StartFrom,
    ) -> Result<(), SessionError> {
        *state = SessionState::NotStarted;
        let progress = self.progress.read().await;
        let plan = QueueBuilder::new(&self.questions).build(
            mode,
            start_from,
            &progress,
            &mut rand::rng(),
        )?;
        let total = plan.total();
        state.start(plan, self.clock.now())?;
        info!(%mode, total, "quiz session started");
        Ok(())
    }

    /// Score `letter` for the current question and persist the outcome.
    ///
    /// Returns `Ok(None)` when the current question was already answered.
    /// A failed write is reported in `AnswerSubmission::persist_warning`;
    /// the in-memory score stands either way.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInProgress` outside an active session.
    pub async fn submit_answer(
        &self,
        state: &mut SessionState,
        letter: char,
    ) -> Result<Option<AnswerSubmission>, SessionError> {
        let Some(feedback) = self.answer(state, letter)? else {
            return Ok(None);
        };
        let persist_warning = self.persist_answer(&feedback).await;

        Ok(Some(AnswerSubmission {
            feedback,
            persist_warning,
        }))
    }

    /// Score `letter` in memory without touching storage.
    ///
    /// Callers that cannot hold `state` across an await score here first and
    /// hand the feedback to [`QuizLoopService::persist_answer`].
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInProgress` outside an active session.
    pub fn answer(
        &self,
        state: &mut SessionState,
        letter: char,
    ) -> Result<Option<AnswerFeedback>, SessionError> {
        state.submit_answer(letter)
    }

    /// Record a scored answer in persisted progress.
    ///
    /// Returns the failure instead of propagating it; the answer has already
    /// been counted.
    pub async fn persist_answer(&self, feedback: &AnswerFeedback) -> Option<PersistError> {
        match self
            .progress
            .record(feedback.index, feedback.is_correct)
            .await
        {
            Ok(()) => None,
            Err(err) => {
                warn!(error = %err, question = feedback.index.number(), "progress not saved");
                Some(err)
            }
        }
    }

    /// Move to the next question, finishing when the queue is exhausted.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInProgress` outside an active session.
    pub fn advance(&self, state: &mut SessionState) -> Result<AdvanceOutcome, SessionError> {
        let outcome = state.advance(self.clock.now())?;
        if let AdvanceOutcome::Finished(report) = outcome {
            log_report(&report);
        }
        Ok(outcome)
    }

    /// End the session early and compute its report.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInProgress` if no session was started.
    pub fn finish(&self, state: &mut SessionState) -> Result<SessionReport, SessionError> {
        let was_running = state.is_in_progress();
        let report = state.finish(self.clock.now())?;
        if was_running {
            log_report(&report);
        }
        Ok(report)
    }

    /// Erase all persisted progress. Callers confirm with the user first.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the store rejects the delete.
    pub async fn reset_progress(&self) -> Result<(), PersistError> {
        self.progress.clear().await?;
        info!("quiz progress reset");
        Ok(())
    }

    /// Persisted outcomes summarized against the question bank.
    pub async fn progress_overview(&self) -> ProgressOverview {
        self.progress.overview(&self.questions).await
    }
}

fn log_report(report: &SessionReport) {
    info!(
        correct = report.correct,
        incorrect = report.incorrect,
        percent = report.percent,
        elapsed_secs = report.elapsed_secs(),
        "quiz session finished"
    );
}
