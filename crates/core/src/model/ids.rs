use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identity of a question: its 0-based position in the question bank.
///
/// Queues may be filtered, shuffled or sliced, so every queued question carries
/// its `QuestionIndex` to keep progress keyed to the full bank.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionIndex(usize);

impl QuestionIndex {
    /// Creates a new `QuestionIndex` from a 0-based position.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying 0-based position.
    #[must_use]
    pub fn value(&self) -> usize {
        self.0
    }

    /// Returns the 1-based number shown to people ("Question 3").
    #[must_use]
    pub fn number(&self) -> usize {
        self.0.saturating_add(1)
    }
}

impl fmt::Debug for QuestionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionIndex({})", self.0)
    }
}

impl fmt::Display for QuestionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing a `QuestionIndex` from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIndexError {
    raw: String,
}

impl fmt::Display for ParseIndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse QuestionIndex from {:?}", self.raw)
    }
}

impl std::error::Error for ParseIndexError {}

impl FromStr for QuestionIndex {
    type Err = ParseIndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .map(QuestionIndex::new)
            .map_err(|_| ParseIndexError { raw: s.to_string() })
    }
}
