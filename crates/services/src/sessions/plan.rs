use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{ProgressMap, QueueItem, QuestionIndex, QuizMode, StartFrom};

use crate::error::{EmptyQueueReason, SessionError};
use crate::question_store::QuestionStore;

/// Ordered selection of questions for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub mode: QuizMode,
    pub items: Vec<QueueItem>,
}

impl SessionPlan {
    /// Total number of questions in this plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bank indices in queue order.
    #[must_use]
    pub fn indices(&self) -> Vec<QuestionIndex> {
        self.items.iter().map(|item| item.index).collect()
    }
}

/// Builds session queues from the question bank according to a mode.
pub struct QueueBuilder<'a> {
    questions: &'a QuestionStore,
}

impl<'a> QueueBuilder<'a> {
    #[must_use]
    pub fn new(questions: &'a QuestionStore) -> Self {
        Self { questions }
    }

    /// Build the queue for `mode`.
    ///
    /// `start_from` only affects sequential mode; `progress` only affects
    /// errors mode.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidStart` when a sequential start is past the
    /// end of the bank, and `SessionError::EmptyQueue` when nothing was
    /// selected (with the reason telling errors mode apart from the rest).
    pub fn build<R: Rng + ?Sized>(
        &self,
        mode: QuizMode,
        start_from: StartFrom,
        progress: &ProgressMap,
        rng: &mut R,
    ) -> Result<SessionPlan, SessionError> {
        let items = match mode {
            QuizMode::Sequential => self.sequential(start_from)?,
            QuizMode::Random => self.random(rng)?,
            QuizMode::Errors => self.errors(progress)?,
        };
        Ok(SessionPlan { mode, items })
    }

    /// Questions from `start_from` to the end, in bank order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidStart` if `start_from` exceeds the bank size.
    pub fn sequential(&self, start_from: StartFrom) -> Result<Vec<QueueItem>, SessionError> {
        let total = self.questions.count();
        if start_from.number() > total && total > 0 {
            return Err(SessionError::InvalidStart {
                requested: start_from.number(),
                total,
            });
        }

        let items: Vec<QueueItem> = self
            .questions
            .items()
            .skip(start_from.offset())
            .map(|(index, question)| QueueItem::new(question.clone(), index))
            .collect();
        non_empty(items, EmptyQueueReason::NoQuestionsRemain)
    }

    /// Every question, shuffled with Fisher–Yates.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyQueue` if the bank is empty.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<QueueItem>, SessionError> {
        let mut items: Vec<QueueItem> = self
            .questions
            .items()
            .map(|(index, question)| QueueItem::new(question.clone(), index))
            .collect();
        items.as_mut_slice().shuffle(rng);
        non_empty(items, EmptyQueueReason::NoQuestionsRemain)
    }

    /// Questions whose latest recorded answer was wrong, in bank order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyQueue` with `NoWrongAnswers` when none qualify.
    pub fn errors(&self, progress: &ProgressMap) -> Result<Vec<QueueItem>, SessionError> {
        // Indices outside the bank are stale entries from an older bank.
        let items: Vec<QueueItem> = progress
            .wrong_indices()
            .into_iter()
            .filter_map(|index| {
                let question = self.questions.get(index).ok()?;
                Some(QueueItem::new(question.clone(), index))
            })
            .collect();
        non_empty(items, EmptyQueueReason::NoWrongAnswers)
    }
}

fn non_empty(
    items: Vec<QueueItem>,
    reason: EmptyQueueReason,
) -> Result<Vec<QueueItem>, SessionError> {
    if items.is_empty() {
        return Err(SessionError::EmptyQueue(reason));
    }
    Ok(items)
}
