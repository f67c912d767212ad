use reqwest::{Client, redirect};

use crate::error::HttpError;

use super::LoadSpec;

/// Redirect hops followed before the last response is handed back as-is.
pub const MAX_REDIRECTS: usize = 10;

const DEFAULT_USER_AGENT: &str = concat!("stampede/", env!("CARGO_PKG_VERSION"));

/// Follows up to [`MAX_REDIRECTS`] hops, then stops and returns the redirect
/// response itself instead of failing the request.
fn redirect_policy() -> redirect::Policy {
    redirect::Policy::custom(|attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.stop()
        } else {
            attempt.follow()
        }
    })
}

/// Builds the client shared by every request of a run.
///
/// # Errors
///
/// Returns an error when the TLS backend or resolver cannot be initialised.
pub fn build_client(spec: &LoadSpec) -> Result<Client, HttpError> {
    let mut client_builder = Client::builder()
        .redirect(redirect_policy())
        .user_agent(DEFAULT_USER_AGENT)
        .pool_max_idle_per_host(spec.concurrency());

    if let Some(timeout) = spec.request_timeout() {
        client_builder = client_builder.timeout(timeout);
    }
    if let Some(timeout) = spec.connect_timeout() {
        client_builder = client_builder.connect_timeout(timeout);
    }

    client_builder
        .build()
        .map_err(|source| HttpError::BuildClientFailed { source })
}
