// Request pacing and bounded retry for archive API calls.
//
// The archive asks clients to stay well under a few requests per second, so
// the collector paces page requests with a fixed minimum delay. Failed page
// requests are retried a small bounded number of times with a fixed delay,
// only for transient failures (429, 5xx, network). Anything else, or a page
// that keeps failing, aborts the collection run.
//
// The pacer uses interior mutability (Mutex) so callers only need &self.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::warn;

/// Enforces a minimum delay between consecutive requests.
pub struct Pacer {
    min_delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Pacer {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_request: Mutex::new(None),
        }
    }

    /// Wait until at least `min_delay` has passed since the previous call.
    /// The first call is immediate.
    pub async fn pause(&self) {
        // Compute the wait while holding the lock, then drop it before
        // sleeping (never hold a MutexGuard across an await).
        let wait = {
            let last = self.last_request.lock().unwrap();
            last.and_then(|last_time| {
                let elapsed = last_time.elapsed();
                (elapsed < self.min_delay).then(|| self.min_delay - elapsed)
            })
        };

        if let Some(wait) = wait {
            tokio::time::sleep(wait).await;
        }

        let mut last = self.last_request.lock().unwrap();
        *last = Some(Instant::now());
    }
}

/// Maximum retry attempts for a failing page request.
const MAX_RETRIES: u32 = 3;

/// Fixed delay between retry attempts.
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Check whether an error is worth retrying.
///
/// Transport-level failures (timeout, connect) are retried, as are
/// rate-limit (429) and server-side (5xx) responses. The HTTP status ends
/// up in the error message (see ArchiveClient::get_json), so status checks
/// match on that.
pub fn is_transient_error(err: &anyhow::Error) -> bool {
    if let Some(req_err) = err.downcast_ref::<reqwest::Error>() {
        if req_err.is_timeout() || req_err.is_connect() || req_err.is_request() {
            return true;
        }
    }

    let msg = format!("{err:?}");
    msg.contains("429")
        || msg.contains("returned 500")
        || msg.contains("returned 502")
        || msg.contains("returned 503")
        || msg.contains("returned 504")
}

/// Run an async operation with pacing and bounded fixed-delay retry.
///
/// The pacer's `pause()` is called before each attempt. Transient errors
/// are retried up to `MAX_RETRIES` times; other errors are returned
/// immediately, as is the last error once retries are exhausted.
pub async fn with_retry<F, Fut, T>(pacer: &Pacer, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut attempt = 0u32;

    loop {
        pacer.pause().await;

        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_transient_error(&err) || attempt >= MAX_RETRIES {
                    return Err(err);
                }

                attempt += 1;

                warn!(
                    attempt = attempt,
                    max_retries = MAX_RETRIES,
                    "Archive request failed ({err:#}), retrying in {}s (attempt {}/{})",
                    RETRY_DELAY.as_secs(),
                    attempt,
                    MAX_RETRIES,
                );

                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}
