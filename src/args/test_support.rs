use clap::Parser;

use crate::error::{AppError, AppResult};

use super::LoadArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<LoadArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    LoadArgs::try_parse_from(args).map_err(AppError::from)
}
