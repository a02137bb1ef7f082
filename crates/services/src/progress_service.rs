use std::sync::Arc;

use quiz_core::model::{ProgressMap, QuestionIndex};
use storage::repository::KeyValueStore;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::PersistError;
use crate::question_store::QuestionStore;

/// Storage key holding the serialized progress map.
pub const PROGRESS_KEY: &str = "quiz_progress";

/// Counts of last-known outcomes across the question bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressOverview {
    pub total: usize,
    pub correct: usize,
    pub wrong: usize,
    pub unattempted: usize,
}

impl ProgressOverview {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.wrong > 0
    }
}

/// Reads and writes the persisted progress map.
///
/// `read` never fails: missing, unreadable or corrupt data all come back as an
/// empty map. `record` is stricter and refuses to write over data it could not
/// load. Writes report storage failures to the caller without retrying.
///
/// Clones share one update lock, so overlapping `record` calls apply in turn.
#[derive(Clone)]
pub struct ProgressService {
    store: Arc<dyn KeyValueStore>,
    update: Arc<Mutex<()>>,
}

impl ProgressService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            update: Arc::new(Mutex::new(())),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(storage::repository::InMemoryRepository::new()))
    }

    /// Load the persisted progress map, treating corruption as absence.
    pub async fn read(&self) -> ProgressMap {
        match self.try_read().await {
            Ok(map) => map,
            Err(err) => {
                warn!(error = %err, "progress unreadable; starting empty");
                ProgressMap::new()
            }
        }
    }

    /// Load the persisted progress map, surfacing storage failures.
    ///
    /// Corrupt JSON still reads as an empty map; only the store itself failing
    /// is an error.
    ///
    /// # Errors
    ///
    /// Returns `PersistError::Load` if the store cannot be read.
    pub async fn try_read(&self) -> Result<ProgressMap, PersistError> {
        let Some(raw) = self
            .store
            .get(PROGRESS_KEY)
            .await
            .map_err(PersistError::Load)?
        else {
            return Ok(ProgressMap::new());
        };

        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(err) => {
                warn!(error = %err, "stored progress is corrupt; ignoring it");
                Ok(ProgressMap::new())
            }
        }
    }

    /// Replace the persisted progress map.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if encoding fails or the store rejects the write.
    pub async fn write(&self, progress: &ProgressMap) -> Result<(), PersistError> {
        let raw = serde_json::to_string(progress)?;
        self.store.set(PROGRESS_KEY, &raw).await?;
        Ok(())
    }

    /// Overwrite the latest outcome for one question (read-modify-write).
    ///
    /// # Errors
    ///
    /// Returns `PersistError::Load` without writing if the current map cannot
    /// be read, and `PersistError::Storage` if the updated map cannot be stored.
    pub async fn record(&self, index: QuestionIndex, correct: bool) -> Result<(), PersistError> {
        let _guard = self.update.lock().await;
        let mut progress = self.try_read().await?;
        progress.record(index, correct);
        self.write(&progress).await?;
        debug!(question = index.number(), correct, "progress recorded");
        Ok(())
    }

    /// Remove all persisted progress.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the store rejects the delete.
    pub async fn clear(&self) -> Result<(), PersistError> {
        let _guard = self.update.lock().await;
        self.store.remove(PROGRESS_KEY).await?;
        Ok(())
    }

    /// Summarize persisted progress against the current question bank.
    ///
    /// Entries for indices outside the bank are ignored.
    pub async fn overview(&self, questions: &QuestionStore) -> ProgressOverview {
        let progress = self.read().await;
        let mut overview = ProgressOverview {
            total: questions.count(),
            ..ProgressOverview::default()
        };
        for (index, _) in questions.items() {
            match progress.get(index) {
                Some(true) => overview.correct += 1,
                Some(false) => overview.wrong += 1,
                None => overview.unattempted += 1,
            }
        }
        overview
    }
}
