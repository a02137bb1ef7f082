use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quiz_core::model::{AnswerOption, Question, QuestionError};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

/// On-disk shape of one answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOptionRecord {
    pub letter: char,
    pub text: String,
}

/// On-disk shape of a question in the question bank file.
///
/// ```json
/// { "question": "…", "options": [{ "letter": "A", "text": "…" }], "correct": "A" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<AnswerOptionRecord>,
    pub correct: char,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            text: question.text().to_owned(),
            options: question
                .options()
                .iter()
                .map(|option| AnswerOptionRecord {
                    letter: option.letter(),
                    text: option.text().to_owned(),
                })
                .collect(),
            correct: question.correct_letter(),
        }
    }

    /// Convert the record into a validated domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the options or correct letter are inconsistent.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        let options = self
            .options
            .into_iter()
            .map(|option| AnswerOption::new(option.letter, option.text))
            .collect();
        Question::new(self.text, options, self.correct)
    }
}

/// Read-once source of question records.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Load every question record, in bank order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the source is unreachable and
    /// `StorageError::Serialization` if its contents cannot be parsed.
    async fn load_questions(&self) -> Result<Vec<QuestionRecord>, StorageError>;
}

/// Question bank stored as a JSON array on the local filesystem.
#[derive(Debug, Clone)]
pub struct JsonFileQuestionSource {
    path: PathBuf,
}

impl JsonFileQuestionSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionSource for JsonFileQuestionSource {
    async fn load_questions(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            StorageError::Connection(format!("{}: {err}", self.path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|err| {
            StorageError::Serialization(format!("{}: {err}", self.path.display()))
        })
    }
}

/// Fixed in-memory question bank, used by tests and embedded setups.
#[derive(Debug, Clone, Default)]
pub struct StaticQuestionSource {
    records: Vec<QuestionRecord>,
}

impl StaticQuestionSource {
    #[must_use]
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn from_questions(questions: &[Question]) -> Self {
        Self::new(questions.iter().map(QuestionRecord::from_question).collect())
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn load_questions(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        Ok(self.records.clone())
    }
}
