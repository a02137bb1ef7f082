use chrono::{DateTime, Duration, Utc};
use std::fmt;

use quiz_core::model::{QueueItem, QuestionIndex, QuizMode, SessionReport, SessionStats};

use super::plan::SessionPlan;
use super::progress::SessionProgress;
use crate::error::{EmptyQueueReason, SessionError};

//
// ─── ANSWER FEEDBACK ───────────────────────────────────────────────────────────
//

/// What the presentation layer needs to reveal an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub index: QuestionIndex,
    pub chosen: char,
    pub correct_letter: char,
    pub is_correct: bool,
}

/// Read-only view of the question at the current queue position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentQuestion<'a> {
    pub item: &'a QueueItem,
    /// 0-based queue position.
    pub position: usize,
    pub total: usize,
    /// Set once the current position has been answered.
    pub answer: Option<&'a AnswerFeedback>,
}

/// Result of moving past the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Next,
    Finished(SessionReport),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// A quiz run in progress: the queue, where we are in it, and the tally.
#[derive(Clone, PartialEq)]
pub struct QuizSession {
    mode: QuizMode,
    queue: Vec<QueueItem>,
    position: usize,
    answer: Option<AnswerFeedback>,
    stats: SessionStats,
}

impl QuizSession {
    fn new(plan: SessionPlan, started_at: DateTime<Utc>) -> Result<Self, SessionError> {
        if plan.is_empty() {
            return Err(SessionError::EmptyQueue(EmptyQueueReason::NoQuestionsRemain));
        }

        Ok(Self {
            mode: plan.mode,
            queue: plan.items,
            position: 0,
            answer: None,
            stats: SessionStats::new(started_at),
        })
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.stats.started_at()
    }

    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        self.stats.elapsed(now)
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }

    #[must_use]
    pub fn current(&self) -> Option<CurrentQuestion<'_>> {
        self.queue.get(self.position).map(|item| CurrentQuestion {
            item,
            position: self.position,
            total: self.queue.len(),
            answer: self.answer.as_ref(),
        })
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            position: self.position,
            total: self.queue.len(),
            answered: self.stats.answered(),
            remaining: self.queue.len().saturating_sub(self.position),
        }
    }

    fn submit(&mut self, letter: char) -> Option<AnswerFeedback> {
        if self.answer.is_some() {
            return None;
        }
        let item = self.queue.get(self.position)?;
        let is_correct = item.question.is_correct(letter);
        let feedback = AnswerFeedback {
            index: item.index,
            chosen: letter,
            correct_letter: item.question.correct_letter(),
            is_correct,
        };
        self.stats.record(is_correct);
        self.answer = Some(feedback);
        Some(feedback)
    }

    /// Move to the next position; returns false when the queue is exhausted.
    fn step(&mut self) -> bool {
        if self.position + 1 < self.queue.len() {
            self.position += 1;
            self.answer = None;
            true
        } else {
            false
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("mode", &self.mode)
            .field("queue_len", &self.queue.len())
            .field("position", &self.position)
            .field("answered", &self.answer.is_some())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

//
// ─── STATE MACHINE ─────────────────────────────────────────────────────────────
//

/// Explicit owned session state.
///
/// `NotStarted → InProgress → Finished`; starting again from any state
/// discards the previous session first.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    NotStarted,
    InProgress(QuizSession),
    Finished(SessionReport),
}

impl SessionState {
    /// Begin a session over `plan`.
    ///
    /// The previous session, if any, is discarded before the plan is checked,
    /// so a rejected start always leaves the state `NotStarted`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyQueue` if the plan selected no questions.
    pub fn start(&mut self, plan: SessionPlan, started_at: DateTime<Utc>) -> Result<(), SessionError> {
        *self = SessionState::NotStarted;
        let session = QuizSession::new(plan, started_at)?;
        *self = SessionState::InProgress(session);
        Ok(())
    }

    /// Score `letter` against the current question.
    ///
    /// Only the first answer at a position counts; later calls return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInProgress` outside an active session.
    pub fn submit_answer(&mut self, letter: char) -> Result<Option<AnswerFeedback>, SessionError> {
        match self {
            SessionState::InProgress(session) => Ok(session.submit(letter)),
            _ => Err(SessionError::NotInProgress),
        }
    }

    /// Move past the current question, finishing when the queue runs out.
    ///
    /// An unanswered position is skipped without scoring.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInProgress` outside an active session.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<AdvanceOutcome, SessionError> {
        let SessionState::InProgress(session) = self else {
            return Err(SessionError::NotInProgress);
        };
        if session.step() {
            return Ok(AdvanceOutcome::Next);
        }
        self.finish(now).map(AdvanceOutcome::Finished)
    }

    /// End the session and compute its report.
    ///
    /// Finishing an already finished session returns the same report.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInProgress` if no session was started.
    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<SessionReport, SessionError> {
        let report = match self {
            SessionState::InProgress(session) => session.stats.report(now),
            SessionState::Finished(report) => return Ok(*report),
            SessionState::NotStarted => return Err(SessionError::NotInProgress),
        };
        *self = SessionState::Finished(report);
        Ok(report)
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        match self {
            SessionState::InProgress(session) => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<CurrentQuestion<'_>> {
        self.session().and_then(QuizSession::current)
    }

    #[must_use]
    pub fn progress(&self) -> Option<SessionProgress> {
        self.session().map(QuizSession::progress)
    }

    #[must_use]
    pub fn report(&self) -> Option<&SessionReport> {
        match self {
            SessionState::Finished(report) => Some(report),
            _ => None,
        }
    }

    /// True while `feedback` is still the revealed answer at the current position.
    #[must_use]
    pub fn shows_answer(&self, feedback: &AnswerFeedback) -> bool {
        self.current().and_then(|current| current.answer) == Some(feedback)
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        matches!(self, SessionState::InProgress(_))
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, SessionState::Finished(_))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::plan::QueueBuilder;
    use crate::test_support::sample_store;
    use quiz_core::model::StartFrom;
    use quiz_core::time::fixed_now;

    fn sequential_plan(count: usize, start: usize) -> SessionPlan {
        let store = sample_store(count);
        SessionPlan {
            mode: QuizMode::Sequential,
            items: QueueBuilder::new(&store)
                .sequential(StartFrom::new(start))
                .unwrap(),
        }
    }

    #[test]
    fn start_enters_first_position() {
        let mut state = SessionState::default();
        state.start(sequential_plan(3, 1), fixed_now()).unwrap();

        let current = state.current().unwrap();
        assert_eq!(current.position, 0);
        assert_eq!(current.total, 3);
        assert_eq!(current.item.index, QuestionIndex::new(0));
        assert!(current.answer.is_none());
    }

    #[test]
    fn empty_plan_is_rejected_and_state_stays_not_started() {
        let mut state = SessionState::default();
        let plan = SessionPlan {
            mode: QuizMode::Errors,
            items: Vec::new(),
        };

        let err = state.start(plan, fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::EmptyQueue(_)));
        assert_eq!(state, SessionState::NotStarted);
    }

    #[test]
    fn submit_reports_correctness_and_correct_letter() {
        let mut state = SessionState::default();
        state.start(sequential_plan(2, 1), fixed_now()).unwrap();

        let feedback = state.submit_answer('B').unwrap().unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(feedback.chosen, 'B');
        assert_eq!(feedback.correct_letter, 'A');
        assert_eq!(feedback.index, QuestionIndex::new(0));
        assert_eq!(state.current().unwrap().answer, Some(&feedback));
    }

    #[test]
    fn second_submit_at_same_position_is_a_no_op() {
        let mut state = SessionState::default();
        state.start(sequential_plan(2, 1), fixed_now()).unwrap();

        assert!(state.submit_answer('A').unwrap().is_some());
        assert!(state.submit_answer('B').unwrap().is_none());
        assert!(state.submit_answer('A').unwrap().is_none());

        let stats = *state.session().unwrap().stats();
        assert_eq!(stats.correct(), 1);
        assert_eq!(stats.incorrect(), 0);
        assert_eq!(stats.answered(), 1);
    }

    #[test]
    fn answered_count_matches_distinct_positions() {
        let mut state = SessionState::default();
        state.start(sequential_plan(4, 1), fixed_now()).unwrap();

        for letter in ['A', 'B', 'A'] {
            state.submit_answer(letter).unwrap();
            state.submit_answer(letter).unwrap();
            assert_eq!(state.advance(fixed_now()).unwrap(), AdvanceOutcome::Next);
        }

        let progress = state.progress().unwrap();
        assert_eq!(progress.answered, 3);
        assert_eq!(progress.position, 3);
        assert_eq!(progress.remaining, 1);
    }

    #[test]
    fn worked_example_sequential_from_three() {
        let start = fixed_now();
        let mut state = SessionState::default();
        state.start(sequential_plan(5, 3), start).unwrap();
        assert_eq!(state.current().unwrap().item.index, QuestionIndex::new(2));

        assert!(state.submit_answer('A').unwrap().unwrap().is_correct);
        assert_eq!(state.advance(start).unwrap(), AdvanceOutcome::Next);
        assert_eq!(state.current().unwrap().item.index, QuestionIndex::new(3));

        assert!(!state.submit_answer('C').unwrap().unwrap().is_correct);
        assert_eq!(state.advance(start).unwrap(), AdvanceOutcome::Next);
        assert_eq!(state.current().unwrap().item.index, QuestionIndex::new(4));

        // last position skipped without answering
        let outcome = state.advance(start + Duration::seconds(30)).unwrap();
        let AdvanceOutcome::Finished(report) = outcome else {
            panic!("expected finished, got {outcome:?}");
        };
        assert_eq!(report.correct, 1);
        assert_eq!(report.incorrect, 1);
        assert_eq!(report.percent, 50);
        assert_eq!(report.elapsed_secs(), 30);
        assert!(state.is_finished());
        assert_eq!(state.report(), Some(&report));
    }

    #[test]
    fn finish_without_answers_yields_zero_percent() {
        let mut state = SessionState::default();
        state.start(sequential_plan(3, 1), fixed_now()).unwrap();

        let report = state.finish(fixed_now()).unwrap();
        assert_eq!(report.percent, 0);
        assert_eq!(report.answered(), 0);
    }

    #[test]
    fn finished_is_terminal() {
        let mut state = SessionState::default();
        state.start(sequential_plan(1, 1), fixed_now()).unwrap();
        state.submit_answer('A').unwrap();
        let outcome = state.advance(fixed_now()).unwrap();
        assert!(matches!(outcome, AdvanceOutcome::Finished(_)));

        assert_eq!(state.submit_answer('A'), Err(SessionError::NotInProgress));
        assert_eq!(state.advance(fixed_now()), Err(SessionError::NotInProgress));
        assert_eq!(state.finish(fixed_now()).unwrap().correct, 1);
    }

    #[test]
    fn operations_before_start_are_rejected() {
        let mut state = SessionState::default();
        assert_eq!(state.submit_answer('A'), Err(SessionError::NotInProgress));
        assert_eq!(state.advance(fixed_now()), Err(SessionError::NotInProgress));
        assert_eq!(state.finish(fixed_now()), Err(SessionError::NotInProgress));
        assert!(state.current().is_none());
    }

    #[test]
    fn restarting_discards_previous_session() {
        let mut state = SessionState::default();
        state.start(sequential_plan(3, 1), fixed_now()).unwrap();
        state.submit_answer('A').unwrap();
        state.finish(fixed_now()).unwrap();

        state.start(sequential_plan(3, 2), fixed_now()).unwrap();
        let session = state.session().unwrap();
        assert_eq!(session.stats().answered(), 0);
        assert_eq!(session.total(), 2);
        assert!(!session.is_answered());
    }

    #[test]
    fn advancing_clears_the_answer() {
        let mut state = SessionState::default();
        state.start(sequential_plan(2, 1), fixed_now()).unwrap();
        state.submit_answer('A').unwrap();
        assert!(state.session().unwrap().is_answered());

        state.advance(fixed_now()).unwrap();
        assert!(!state.session().unwrap().is_answered());
        assert!(state.submit_answer('B').unwrap().is_some());
    }
}
