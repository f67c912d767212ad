use std::time::Duration;

use crate::http::RunResult;

const SEPARATOR: &str = "-------------------------------------------------";
const OK_STATUS: u16 = 200;
const HALF_SECOND_NANOS: u32 = 500_000_000;
const SECS_PER_MIN: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;

/// Rounds half-up to whole seconds.
#[must_use]
pub fn round_to_secs(elapsed: Duration) -> u64 {
    let secs = elapsed.as_secs();
    if elapsed.subsec_nanos() >= HALF_SECOND_NANOS {
        secs.saturating_add(1)
    } else {
        secs
    }
}

/// Formats whole seconds as `42s`, `3m5s` or `1h0m12s`.
#[must_use]
pub fn format_elapsed(total_secs: u64) -> String {
    let hours = total_secs / SECS_PER_HOUR;
    let minutes = (total_secs % SECS_PER_HOUR) / SECS_PER_MIN;
    let seconds = total_secs % SECS_PER_MIN;
    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[must_use]
pub fn report_lines(result: &RunResult, elapsed: Duration) -> Vec<String> {
    let mut lines = vec![
        SEPARATOR.to_owned(),
        format!("Total time: {}", format_elapsed(round_to_secs(elapsed))),
        format!("Requests issued: {}", result.requests_issued()),
        format!("Requests failed: {}", result.failed()),
        format!("Peak in flight: {}", result.peak_in_flight()),
        format!("Status {}: {}", OK_STATUS, result.tally().count(OK_STATUS)),
        "Other status codes:".to_owned(),
    ];

    let mut others = result
        .tally()
        .iter()
        .filter(|(status, _)| *status != OK_STATUS)
        .peekable();
    if others.peek().is_none() {
        lines.push("  (none)".to_owned());
    }
    for (status, count) in others {
        lines.push(format!("Status {}: {}", status, count));
    }

    lines.push(SEPARATOR.to_owned());
    lines
}
