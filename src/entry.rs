use std::ffi::OsString;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::{LoadArgs, resolve_load_spec};
use crate::config::{apply_config, load_config};
use crate::error::{AppError, AppResult};
use crate::http::{LoadSpec, run_load_blocking};
use crate::report::print_report;

pub(crate) fn run() -> AppResult<()> {
    let (args, matches) = parse_args()?;

    crate::logger::init_logging(args.verbose, args.no_color);

    let spec = build_spec(args, &matches).inspect_err(|err| tracing::error!("{}", err))?;
    execute(&spec)
}

fn parse_args() -> AppResult<(LoadArgs, ArgMatches)> {
    let raw_args: Vec<OsString> = std::env::args_os().collect();
    let matches = LoadArgs::command().get_matches_from(raw_args);
    let args = LoadArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn build_spec(mut args: LoadArgs, matches: &ArgMatches) -> AppResult<LoadSpec> {
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config).map_err(AppError::config)?;
    }
    Ok(resolve_load_spec(&args)?)
}

fn execute(spec: &LoadSpec) -> AppResult<()> {
    tracing::info!(
        "Sending {} GET requests to {} ({} concurrent)",
        spec.total_requests(),
        spec.target(),
        spec.concurrency()
    );
    let result = run_load_blocking(spec)?;
    print_report(&result);
    Ok(())
}
