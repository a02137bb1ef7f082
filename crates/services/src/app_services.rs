use std::path::Path;
use std::sync::Arc;

use storage::questions::{JsonFileQuestionSource, QuestionSource};
use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::question_store::QuestionStore;
use crate::sessions::QuizLoopService;

/// Assembles app-facing services around one loaded question bank.
#[derive(Clone)]
pub struct AppServices {
    questions: Arc<QuestionStore>,
    progress: ProgressService,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppServices {
    /// Build services backed by `SQLite` progress and a JSON question file.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// question bank cannot be loaded.
    pub async fn new_sqlite(
        db_url: &str,
        questions_path: &Path,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let source = JsonFileQuestionSource::new(questions_path);
        Self::from_parts(storage, &source, clock).await
    }

    /// Build services with in-memory progress, for tests and previews.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the question bank cannot be loaded.
    pub async fn in_memory(
        source: &dyn QuestionSource,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        Self::from_parts(Storage::in_memory(), source, clock).await
    }

    async fn from_parts(
        storage: Storage,
        source: &dyn QuestionSource,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let questions = Arc::new(QuestionStore::load(source).await?);
        let progress = ProgressService::new(Arc::clone(&storage.progress));
        let quiz_loop = Arc::new(QuizLoopService::new(
            clock,
            Arc::clone(&questions),
            progress.clone(),
        ));

        Ok(Self {
            questions,
            progress,
            quiz_loop,
        })
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionStore> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn progress(&self) -> ProgressService {
        self.progress.clone()
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}
