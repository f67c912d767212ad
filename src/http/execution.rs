use futures_util::StreamExt;
use reqwest::{Client, Url};
use tracing::{debug, error, info, warn};

/// Terminal state of a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// An HTTP exchange happened; any status code counts, 4xx/5xx included.
    Completed(u16),
    /// Transport-level failure: nothing is recorded in the tally.
    Failed,
}

pub(super) async fn execute_get(client: &Client, target: &Url) -> RequestOutcome {
    match client.get(target.clone()).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            // The status is already known; a broken body only costs the connection.
            match drain_response_body(response).await {
                Ok(bytes) => debug!("Drained {} body bytes", bytes),
                Err(err) => warn!("Failed to drain response body: {}", err),
            }
            info!("Response status: {}", status);
            RequestOutcome::Completed(status)
        }
        Err(err) => {
            error!("Request failed: {}", err);
            RequestOutcome::Failed
        }
    }
}

/// Reads the body to the end so the connection goes back to the pool.
async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
