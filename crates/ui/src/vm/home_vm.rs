use services::ProgressOverview;

/// Menu copy derived from persisted progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeVm {
    pub total: usize,
    pub summary: String,
    pub errors_label: String,
    pub has_errors: bool,
}

impl HomeVm {
    #[must_use]
    pub fn from_overview(overview: &ProgressOverview) -> Self {
        Self {
            total: overview.total,
            summary: format!(
                "{} questions: {} correct, {} wrong, {} not tried",
                overview.total, overview.correct, overview.wrong, overview.unattempted
            ),
            errors_label: format!("Review errors ({})", overview.wrong),
            has_errors: overview.has_errors(),
        }
    }
}
