//! The dispatch engine: a fixed number of GET requests against one target,
//! at most `concurrency` of them in flight, folded into a status-code tally.
mod client;
mod dispatch;
mod execution;
mod spec;
mod tally;

#[cfg(test)]
mod test_server;

pub use client::{MAX_REDIRECTS, build_client};
pub use dispatch::{RunResult, dispatch, run_load, run_load_blocking};
pub use execution::RequestOutcome;
pub use spec::LoadSpec;
pub use tally::OutcomeTally;
