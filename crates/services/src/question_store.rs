use std::fmt;

use quiz_core::model::{Question, QuestionIndex};
use storage::questions::QuestionSource;
use tracing::info;

use crate::error::{QuestionIndexError, QuestionLoadError};

/// Immutable question bank, loaded once at startup.
///
/// A question's identity is its position here; every queue and every
/// progress entry refers back to these indices.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct QuestionStore {
    questions: Vec<Question>,
}

impl QuestionStore {
    /// Load and validate every question from `source`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionLoadError::Source` if the source is unreachable or
    /// unparsable, and `QuestionLoadError::Malformed` for the first record that
    /// fails validation.
    pub async fn load(source: &dyn QuestionSource) -> Result<Self, QuestionLoadError> {
        let records = source.load_questions().await?;
        let mut questions = Vec::with_capacity(records.len());
        for (position, record) in records.into_iter().enumerate() {
            let question = record
                .into_question()
                .map_err(|source| QuestionLoadError::Malformed {
                    number: position + 1,
                    source,
                })?;
            questions.push(question);
        }

        info!(count = questions.len(), "loaded question bank");
        Ok(Self { questions })
    }

    #[must_use]
    pub fn from_questions(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Fetch a question by its bank index.
    ///
    /// # Errors
    ///
    /// Returns `QuestionIndexError::OutOfRange` if `index` is past the end.
    pub fn get(&self, index: QuestionIndex) -> Result<&Question, QuestionIndexError> {
        self.questions
            .get(index.value())
            .ok_or(QuestionIndexError::OutOfRange {
                index,
                count: self.count(),
            })
    }

    /// Every question paired with its index, in bank order.
    pub fn items(&self) -> impl Iterator<Item = (QuestionIndex, &Question)> + '_ {
        self.questions
            .iter()
            .enumerate()
            .map(|(position, question)| (QuestionIndex::new(position), question))
    }
}

impl fmt::Debug for QuestionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionStore")
            .field("count", &self.questions.len())
            .finish_non_exhaustive()
    }
}
