//! Shared HTTP plumbing for spiders.
//!
//! Retry policy lives here rather than in the orchestrator because retry
//! semantics are a per-source concern: only rate limiting (HTTP 429) is
//! retried, a small fixed number of times with a fixed delay. Every other
//! non-success status surfaces immediately as a fetch error.

use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::SpiderError;

/// Attempts after the initial request when rate limited.
const RATE_LIMIT_RETRIES: u32 = 2;

/// Fixed delay between rate-limited attempts.
const RATE_LIMIT_DELAY: Duration = Duration::from_secs(2);

/// Per-request timeout applied to the shared client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the HTTP client shared by all spiders in a scan.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("driftscan/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_default()
}

/// Performs a GET, retrying on HTTP 429 and mapping any other non-success
/// status to [`SpiderError::Fetch`].
pub async fn get(client: &reqwest::Client, url: &str) -> Result<reqwest::Response, SpiderError> {
    let mut attempt = 0;
    loop {
        let response = client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS && attempt < RATE_LIMIT_RETRIES {
            attempt += 1;
            warn!(url, attempt, "rate limited, retrying");
            tokio::time::sleep(RATE_LIMIT_DELAY).await;
            continue;
        }

        if !status.is_success() {
            return Err(SpiderError::Fetch(format!(
                "GET {} returned status {}",
                url, status
            )));
        }

        debug!(url, "fetched");
        return Ok(response);
    }
}
