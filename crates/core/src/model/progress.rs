use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionIndex;

/// Last-known correctness per question.
///
/// Only the latest attempt survives: recording an answer for an index that is
/// already present overwrites it. Serializes as a JSON object keyed by the
/// stringified index, e.g. `{"0":true,"3":false}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap {
    entries: BTreeMap<QuestionIndex, bool>,
}

impl ProgressMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of the latest attempt for `index`.
    pub fn record(&mut self, index: QuestionIndex, correct: bool) {
        self.entries.insert(index, correct);
    }

    /// Latest outcome for `index`, or `None` if it was never attempted.
    #[must_use]
    pub fn get(&self, index: QuestionIndex) -> Option<bool> {
        self.entries.get(&index).copied()
    }

    /// True only when `index` is present and was last answered incorrectly.
    #[must_use]
    pub fn is_wrong(&self, index: QuestionIndex) -> bool {
        self.get(index) == Some(false)
    }

    /// Indices last answered incorrectly, in ascending order.
    #[must_use]
    pub fn wrong_indices(&self) -> Vec<QuestionIndex> {
        self.entries
            .iter()
            .filter(|(_, correct)| !**correct)
            .map(|(index, _)| *index)
            .collect()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.entries.values().filter(|correct| **correct).count()
    }

    #[must_use]
    pub fn wrong_count(&self) -> usize {
        self.entries.values().filter(|correct| !**correct).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(QuestionIndex, bool)> for ProgressMap {
    fn from_iter<I: IntoIterator<Item = (QuestionIndex, bool)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (index, correct) in iter {
            map.record(index, correct);
        }
        map
    }
}
