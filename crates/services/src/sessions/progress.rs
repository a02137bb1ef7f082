/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 0-based queue position of the current question.
    pub position: usize,
    pub total: usize,
    pub answered: u32,
    pub remaining: usize,
}

impl SessionProgress {
    /// Share of the queue already behind the current question, 0..=100.
    #[must_use]
    pub fn percent_through(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let done = self.position.min(self.total) * 100 / self.total;
        u8::try_from(done).unwrap_or(100)
    }
}
