//! Human-readable summary of a finished run.
mod lines;

pub use lines::{format_elapsed, report_lines, round_to_secs};

use crate::http::RunResult;

/// Prints the summary block for `result`, measuring elapsed time now.
pub fn print_report(result: &RunResult) {
    for line in report_lines(result, result.elapsed()) {
        println!("{}", line);
    }
}
