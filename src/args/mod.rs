//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;
mod validate;

#[cfg(test)]
mod test_support;

pub use cli::LoadArgs;
pub use types::{PositiveU64, PositiveUsize};
pub use validate::{parse_target_url, resolve_load_spec};
