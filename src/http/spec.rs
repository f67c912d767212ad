use std::time::Duration;

use reqwest::Url;

use crate::args::{PositiveU64, PositiveUsize};

/// Immutable description of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSpec {
    target: Url,
    total_requests: PositiveU64,
    concurrency: PositiveUsize,
    request_timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl LoadSpec {
    /// Builds a spec; a concurrency of zero or below is run as 1.
    #[must_use]
    pub fn new(target: Url, total_requests: PositiveU64, concurrency: i64) -> Self {
        Self {
            target,
            total_requests,
            concurrency: PositiveUsize::at_least_one(concurrency),
            request_timeout: None,
            connect_timeout: None,
        }
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn target(&self) -> &Url {
        &self.target
    }

    #[must_use]
    pub const fn total_requests(&self) -> u64 {
        self.total_requests.get()
    }

    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency.get()
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }
}
