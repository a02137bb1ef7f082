use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use quiz_core::model::{AnswerOption, Question};
use storage::repository::{InMemoryRepository, KeyValueStore, StorageError};

use crate::question_store::QuestionStore;

/// Bank of `count` questions; each has options A/B/C and `A` is correct.
pub(crate) fn sample_store(count: usize) -> QuestionStore {
    let questions = (1..=count)
        .map(|n| {
            Question::new(
                format!("Question {n}"),
                vec![
                    AnswerOption::new('A', format!("right {n}")),
                    AnswerOption::new('B', format!("wrong {n}")),
                    AnswerOption::new('C', format!("also wrong {n}")),
                ],
                'A',
            )
            .expect("valid sample question")
        })
        .collect();
    QuestionStore::from_questions(questions)
}

/// Store that rejects every operation.
pub(crate) struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

/// In-memory store that can be told to reject upcoming reads, or all writes.
pub(crate) struct FlakyStore {
    inner: InMemoryRepository,
    failing_reads: AtomicUsize,
    reject_writes: bool,
}

impl FlakyStore {
    pub(crate) fn new() -> Self {
        Self {
            inner: InMemoryRepository::new(),
            failing_reads: AtomicUsize::new(0),
            reject_writes: false,
        }
    }

    pub(crate) fn read_only() -> Self {
        Self {
            reject_writes: true,
            ..Self::new()
        }
    }

    pub(crate) fn fail_next_reads(&self, count: usize) {
        self.failing_reads.store(count, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let fail = self
            .failing_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if fail {
            return Err(StorageError::Connection("database is locked".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.reject_writes {
            return Err(StorageError::Connection("read-only".to_string()));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.reject_writes {
            return Err(StorageError::Connection("read-only".to_string()));
        }
        self.inner.remove(key).await
    }
}
