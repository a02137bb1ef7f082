use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use thiserror::Error;

/// How a session queue is built from the question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizMode {
    /// Questions in bank order, starting at a chosen number.
    Sequential,
    /// Every question, reshuffled for each session.
    Random,
    /// Only questions whose latest answer was wrong.
    Errors,
}

impl QuizMode {
    pub const ALL: [QuizMode; 3] = [QuizMode::Sequential, QuizMode::Random, QuizMode::Errors];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizMode::Sequential => "sequential",
            QuizMode::Random => "random",
            QuizMode::Errors => "errors",
        }
    }

    /// Only sequential sessions honour a start number.
    #[must_use]
    pub fn uses_start_from(self) -> bool {
        matches!(self, QuizMode::Sequential)
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown quiz mode: {raw}")]
pub struct ParseModeError {
    raw: String,
}

impl FromStr for QuizMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(QuizMode::Sequential),
            "random" => Ok(QuizMode::Random),
            "errors" => Ok(QuizMode::Errors),
            _ => Err(ParseModeError { raw: s.to_string() }),
        }
    }
}

/// 1-based question number a sequential session starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StartFrom(NonZeroUsize);

impl StartFrom {
    pub const FIRST: StartFrom = StartFrom(NonZeroUsize::MIN);

    /// Build from a 1-based number; zero clamps to the first question.
    #[must_use]
    pub fn new(number: usize) -> Self {
        NonZeroUsize::new(number).map_or(Self::FIRST, Self)
    }

    /// Parse free-form user input.
    ///
    /// Anything that is not a positive integer falls back to the first
    /// question. Numbers past the end of the bank are accepted here and
    /// rejected when the queue is built.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(value) if value >= 1 => usize::try_from(value).map_or(Self::FIRST, Self::new),
            _ => Self::FIRST,
        }
    }

    #[must_use]
    pub fn number(self) -> usize {
        self.0.get()
    }

    /// 0-based position of the first queued question.
    #[must_use]
    pub fn offset(self) -> usize {
        self.0.get() - 1
    }
}

impl Default for StartFrom {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for StartFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StartFrom {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
