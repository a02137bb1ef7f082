use chrono::Duration;

/// Ticking timer text, `MM:SS` with both parts zero-padded.
#[must_use]
pub fn format_clock(elapsed: Duration) -> String {
    let (minutes, seconds) = split_minutes(elapsed);
    format!("{minutes:02}:{seconds:02}")
}

/// Elapsed time on the results panel, `M:SS`.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let (minutes, seconds) = split_minutes(elapsed);
    format!("{minutes}:{seconds:02}")
}

fn split_minutes(elapsed: Duration) -> (i64, i64) {
    let total = elapsed.num_seconds().max(0);
    (total / 60, total % 60)
}
