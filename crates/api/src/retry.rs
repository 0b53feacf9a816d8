//! Retry for transport-level failures.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::debug;

/// Fixed wait between attempts.
pub const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Run `make_request` until it succeeds or `max_retries` extra attempts have
/// failed, sleeping `backoff` between attempts. Attempts never overlap.
pub async fn send_with_retry<F, Fut, T, E>(
    max_retries: u32,
    backoff: Duration,
    mut make_request: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 0;

    loop {
        match make_request().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_retries => {
                attempt += 1;
                debug!(
                    attempt,
                    max = max_retries,
                    error = %err,
                    "Retrying request after transport failure"
                );
                tokio::time::sleep(backoff).await;
            }
            Err(err) => return Err(err),
        }
    }
}
