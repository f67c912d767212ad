use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::LoadArgs;
use crate::error::ConfigError;

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. Flags given on the command
/// line always win.
///
/// # Errors
///
/// Returns an error when a duration in the config is invalid.
pub fn apply_config(
    args: &mut LoadArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> Result<(), ConfigError> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = requests;
    }

    if !is_cli(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = concurrency;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        let timeout = timeout
            .to_duration()
            .map_err(|source| ConfigError::InvalidDuration {
                field: "timeout",
                source,
            })?;
        args.request_timeout = Some(timeout);
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        let timeout = timeout
            .to_duration()
            .map_err(|source| ConfigError::InvalidDuration {
                field: "connect_timeout",
                source,
            })?;
        args.connect_timeout = Some(timeout);
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}
