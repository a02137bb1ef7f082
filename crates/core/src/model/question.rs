use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::QuestionIndex;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Validation failures for a question record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question has no answer options")]
    NoOptions,

    #[error("option letter {0:?} appears more than once")]
    DuplicateLetter(char),

    #[error("correct letter {0:?} does not match any option")]
    UnknownCorrectLetter(char),
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A single labelled answer option, e.g. `B) Paris`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    letter: char,
    text: String,
}

impl AnswerOption {
    #[must_use]
    pub fn new(letter: char, text: impl Into<String>) -> Self {
        Self {
            letter,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn letter(&self) -> char {
        self.letter
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// An immutable multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    options: Vec<AnswerOption>,
    correct: char,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::NoOptions` if `options` is empty,
    /// `QuestionError::DuplicateLetter` if two options share a letter, and
    /// `QuestionError::UnknownCorrectLetter` if `correct` names no option.
    pub fn new(
        text: impl Into<String>,
        options: Vec<AnswerOption>,
        correct: char,
    ) -> Result<Self, QuestionError> {
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }

        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if !seen.insert(option.letter) {
                return Err(QuestionError::DuplicateLetter(option.letter));
            }
        }

        if !seen.contains(&correct) {
            return Err(QuestionError::UnknownCorrectLetter(correct));
        }

        Ok(Self {
            text: text.into(),
            options,
            correct,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn correct_letter(&self) -> char {
        self.correct
    }

    /// Exact letter comparison against the correct option.
    #[must_use]
    pub fn is_correct(&self, letter: char) -> bool {
        letter == self.correct
    }
}

//
// ─── QUEUE ITEM ───────────────────────────────────────────────────────────────
//

/// A question paired with its stable index in the full question bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItem {
    pub question: Question,
    pub index: QuestionIndex,
}

impl QueueItem {
    #[must_use]
    pub fn new(question: Question, index: QuestionIndex) -> Self {
        Self { question, index }
    }
}
