use clap::Parser;
use std::time::Duration;

use super::parsers::parse_duration_arg;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Bounded-concurrency HTTP load generator - fire a fixed number of GET requests at one URL and report the status-code distribution."
)]
pub struct LoadArgs {
    /// Target URL (absolute http or https URL)
    #[arg(long, short)]
    pub url: Option<String>,

    /// Total number of requests to issue
    #[arg(long, short = 'n', default_value_t = 1, allow_negative_numbers = true)]
    pub requests: i64,

    /// Maximum number of requests in flight at once (values <= 0 run one at a time)
    #[arg(long, short = 'c', default_value_t = 1, allow_negative_numbers = true)]
    pub concurrency: i64,

    /// Per-request timeout (supports ms/s/m/h, e.g. 500ms, 10s)
    #[arg(long = "timeout", value_parser = parse_duration_arg)]
    pub request_timeout: Option<Duration>,

    /// Connect timeout (supports ms/s/m/h)
    #[arg(long = "connect-timeout", value_parser = parse_duration_arg)]
    pub connect_timeout: Option<Duration>,

    /// Path to a TOML or JSON config file (defaults to ./stampede.toml or ./stampede.json)
    #[arg(long)]
    pub config: Option<String>,

    /// Enable debug logging (RUST_LOG, when set, overrides the log filter)
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}
