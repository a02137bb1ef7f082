use chrono::{DateTime, Duration, Utc};

/// Running tally for a single quiz session.
///
/// Created fresh when a session starts and discarded with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    correct: u32,
    incorrect: u32,
    started_at: DateTime<Utc>,
}

impl SessionStats {
    #[must_use]
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            correct: 0,
            incorrect: 0,
            started_at,
        }
    }

    /// Count one scored answer.
    pub fn record(&mut self, correct: bool) {
        if correct {
            self.correct = self.correct.saturating_add(1);
        } else {
            self.incorrect = self.incorrect.saturating_add(1);
        }
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    /// Number of scored answers so far.
    #[must_use]
    pub fn answered(&self) -> u32 {
        self.correct.saturating_add(self.incorrect)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Time since the session started, never negative.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (now - self.started_at).max(Duration::zero())
    }

    /// Close the tally into a final report.
    #[must_use]
    pub fn report(&self, completed_at: DateTime<Utc>) -> SessionReport {
        SessionReport {
            correct: self.correct,
            incorrect: self.incorrect,
            elapsed: self.elapsed(completed_at),
            percent: percent_correct(self.correct, self.answered()),
        }
    }
}

/// Final statistics emitted when a session finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub correct: u32,
    pub incorrect: u32,
    pub elapsed: Duration,
    pub percent: u8,
}

impl SessionReport {
    #[must_use]
    pub fn answered(&self) -> u32 {
        self.correct.saturating_add(self.incorrect)
    }

    /// Whole seconds elapsed, clamped at zero.
    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        u64::try_from(self.elapsed.num_seconds()).unwrap_or(0)
    }
}

/// `round(100 * correct / answered)` with halves rounded up; 0 when nothing was answered.
#[must_use]
pub fn percent_correct(correct: u32, answered: u32) -> u8 {
    if answered == 0 {
        return 0;
    }
    let correct = u64::from(correct.min(answered));
    let answered = u64::from(answered);
    let rounded = (200 * correct + answered) / (2 * answered);
    u8::try_from(rounded).unwrap_or(100)
}
