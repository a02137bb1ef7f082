use quiz_core::model::SessionReport;

use super::time_fmt::format_elapsed;

/// Results panel shown once a session finishes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsVm {
    pub correct: u32,
    pub incorrect: u32,
    pub time: String,
    pub percent: String,
}

impl StatsVm {
    #[must_use]
    pub fn from_report(report: &SessionReport) -> Self {
        Self {
            correct: report.correct,
            incorrect: report.incorrect,
            time: format_elapsed(report.elapsed),
            percent: format!("{}%", report.percent),
        }
    }
}
