use reqwest::Url;
use tracing::debug;

use crate::error::ValidationError;
use crate::http::LoadSpec;

use super::{LoadArgs, PositiveU64};

/// Parses the target as an absolute `http`/`https` URL with a host.
///
/// # Errors
///
/// Returns an error when the value is not an absolute URL, uses another
/// scheme, or has no host.
pub fn parse_target_url(value: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(value.trim()).map_err(|err| ValidationError::InvalidUrl {
        url: value.to_owned(),
        source: err,
    })?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::UnsupportedScheme {
                scheme: other.to_owned(),
            });
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::UrlMissingHost);
    }
    Ok(url)
}

/// Turns parsed (and config-merged) arguments into an immutable [`LoadSpec`].
///
/// A non-positive concurrency is coerced to 1; a missing or invalid URL and a
/// non-positive request count are rejected.
///
/// # Errors
///
/// Returns the first validation failure encountered.
pub fn resolve_load_spec(args: &LoadArgs) -> Result<LoadSpec, ValidationError> {
    let Some(raw_url) = args.url.as_deref() else {
        return Err(ValidationError::MissingUrl);
    };
    let target = parse_target_url(raw_url)?;

    let total_requests = u64::try_from(args.requests)
        .ok()
        .and_then(|value| PositiveU64::try_from(value).ok())
        .ok_or(ValidationError::RequestsNotPositive {
            value: args.requests,
        })?;

    if args.concurrency < 1 {
        debug!(
            "Concurrency {} is not positive; running with 1.",
            args.concurrency
        );
    }

    Ok(LoadSpec::new(target, total_requests, args.concurrency)
        .with_request_timeout(args.request_timeout)
        .with_connect_timeout(args.connect_timeout))
}
