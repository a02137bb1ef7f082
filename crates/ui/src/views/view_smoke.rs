use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{QuestionIndex, QuizMode, StartFrom};
use services::ProgressService;
use storage::repository::{InMemoryRepository, KeyValueStore, StorageError};
use tokio::sync::Semaphore;

use super::home::HomeIntent;
use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_store};
use crate::vm::QuizIntent;

struct ReadOnlyStore;

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("read-only".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("read-only".to_string()))
    }
}

/// Holds every write until the test hands out a permit.
struct GatedStore {
    inner: InMemoryRepository,
    gate: Semaphore,
}

#[async_trait]
impl KeyValueStore for GatedStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_error_count() {
    let mut harness = setup_view_harness(ViewKind::Home, 5).await;
    let progress = ProgressService::new(Arc::clone(&harness.storage.progress));
    progress.record(QuestionIndex::new(0), true).await.unwrap();
    progress.record(QuestionIndex::new(3), false).await.unwrap();

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Review errors (1)"), "missing error count in {html}");
    assert!(
        html.contains("5 questions: 1 correct, 1 wrong, 3 not tried"),
        "missing overview in {html}"
    );
    assert!(html.contains("Sequential"), "missing mode button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_reset_requires_confirmation() {
    let mut harness = setup_view_harness(ViewKind::Home, 3).await;
    let progress = ProgressService::new(Arc::clone(&harness.storage.progress));
    progress.record(QuestionIndex::new(1), false).await.unwrap();

    harness.rebuild();
    harness.settle().await;

    harness.home(HomeIntent::RequestReset).await;
    let html = harness.render();
    assert!(html.contains("Erase all saved progress?"), "missing confirm in {html}");
    assert_eq!(progress.read().await.len(), 1);

    harness.home(HomeIntent::CancelReset).await;
    let html = harness.render();
    assert!(!html.contains("Erase all saved progress?"), "confirm still open in {html}");
    assert_eq!(progress.read().await.len(), 1);

    harness.home(HomeIntent::RequestReset).await;
    harness.home(HomeIntent::ConfirmReset).await;
    let html = harness.render();
    assert!(html.contains("Progress reset."), "missing notice in {html}");
    assert!(html.contains("Review errors (0)"), "count not refreshed in {html}");
    assert!(progress.read().await.is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness =
        setup_view_harness(ViewKind::Quiz(QuizMode::Sequential, StartFrom::new(3)), 5).await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Question 3 (1 / 3)"), "missing heading in {html}");
    assert!(html.contains("Sequential"), "missing mode label in {html}");
    assert!(html.contains("A) right 3"), "missing option in {html}");
    assert!(html.contains("Time: 00:00"), "missing timer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_reports_start_past_end() {
    let mut harness =
        setup_view_harness(ViewKind::Quiz(QuizMode::Sequential, StartFrom::new(8)), 5).await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();

    assert!(
        html.contains("Question #8 does not exist (total questions: 5)."),
        "missing start error in {html}"
    );
    assert!(html.contains("Back to menu"), "missing back link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_errors_mode_without_mistakes() {
    let mut harness =
        setup_view_harness(ViewKind::Quiz(QuizMode::Errors, StartFrom::FIRST), 3).await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();

    assert!(
        html.contains("No wrong answers to review."),
        "missing empty errors message in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_runs_to_results() {
    let mut harness =
        setup_view_harness(ViewKind::Quiz(QuizMode::Sequential, StartFrom::FIRST), 2).await;
    let progress = ProgressService::new(Arc::clone(&harness.storage.progress));

    harness.rebuild();
    harness.settle().await;

    harness.quiz(QuizIntent::Answer('B')).await;
    let html = harness.render();
    assert!(
        html.contains("Wrong. The right answer is A."),
        "missing feedback in {html}"
    );
    assert_eq!(progress.read().await.get(QuestionIndex::new(0)), Some(false));

    harness.quiz(QuizIntent::Next).await;
    let html = harness.render();
    assert!(html.contains("Question 2 (2 / 2)"), "missing second heading in {html}");
    assert!(html.contains("Show results"), "missing results label in {html}");

    harness.quiz(QuizIntent::Answer('A')).await;
    harness.quiz(QuizIntent::Next).await;
    let html = harness.render();
    assert!(html.contains("Correct: 1"), "missing correct count in {html}");
    assert!(html.contains("Incorrect: 1"), "missing incorrect count in {html}");
    assert!(html.contains("Time: 0:00"), "missing elapsed time in {html}");
    assert!(html.contains("Score: 50%"), "missing percent in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_finish_early_with_no_answers() {
    let mut harness =
        setup_view_harness(ViewKind::Quiz(QuizMode::Random, StartFrom::FIRST), 4).await;

    harness.rebuild();
    harness.settle().await;
    harness.quiz(QuizIntent::Finish).await;
    let html = harness.render();

    assert!(html.contains("Score: 0%"), "missing zero percent in {html}");
    assert!(html.contains("Play again"), "missing restart button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_warns_when_progress_not_saved() {
    let mut harness = setup_view_harness_with_store(
        ViewKind::Quiz(QuizMode::Sequential, StartFrom::FIRST),
        2,
        Arc::new(ReadOnlyStore),
    )
    .await;

    harness.rebuild();
    harness.settle().await;
    harness.quiz(QuizIntent::Answer('A')).await;
    let html = harness.render();

    assert!(html.contains("Correct!"), "missing feedback in {html}");
    assert!(
        html.contains("progress could not be saved"),
        "missing persist warning in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_finish_during_slow_save_stays_finished() {
    let store = Arc::new(GatedStore {
        inner: InMemoryRepository::new(),
        gate: Semaphore::new(0),
    });
    let mut harness = setup_view_harness_with_store(
        ViewKind::Quiz(QuizMode::Sequential, StartFrom::FIRST),
        3,
        store.clone(),
    )
    .await;

    harness.rebuild();
    harness.settle().await;

    harness.quiz(QuizIntent::Answer('A')).await;
    let html = harness.render();
    assert!(html.contains("Correct!"), "answer not shown before save in {html}");

    harness.quiz(QuizIntent::Finish).await;
    let html = harness.render();
    assert!(html.contains("Correct: 1"), "missing results in {html}");

    store.gate.add_permits(1);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Score: 100%"), "results replaced after save in {html}");
    assert!(!html.contains("Question 1"), "question panel came back in {html}");
    assert!(!html.contains("progress could not be saved"), "stale warning in {html}");

    let progress = ProgressService::new(store);
    assert_eq!(progress.read().await.get(QuestionIndex::new(0)), Some(true));
}
