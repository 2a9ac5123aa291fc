use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BASE_DELAY_MS: u64 = 1_000;
const RATE_LIMIT_MAX_RETRIES: u32 = 5;
const RATE_LIMIT_BASE_DELAY_MS: u64 = 2_000;
const MAX_JITTER_MS: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    /// Cross-origin/connectivity failure, worth retrying on the default budget.
    TransientNetwork,
    /// HTTP 429 from a boundary node, retried on an extended budget.
    RateLimited,
    /// Everything else propagates immediately.
    Fatal,
}

pub fn classify_error(message: &str) -> RetryClass {
    if message.contains("429") {
        RetryClass::RateLimited
    } else if message.contains("CORS") || message.contains("Access-Control-Allow-Origin") {
        RetryClass::TransientNetwork
    } else {
        RetryClass::Fatal
    }
}

/// Runs `operation` with exponential backoff on transient failures, using the
/// default retry budget. Fails with the operation's own error once the budget
/// is exhausted or on the first non-retryable error.
pub async fn with_retry<T, F, Fut>(operation: F) -> Result<T, String>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, String>>,
{
    with_retry_config(operation, DEFAULT_MAX_RETRIES, DEFAULT_BASE_DELAY_MS).await
}

/// Delay after the n-th failure is `base * 2^n + uniform(0..1s)` jitter.
/// Attempts are strictly sequential.
pub async fn with_retry_config<T, F, Fut>(operation: F, max_retries: u32, base_delay_ms: u64) -> Result<T, String>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, String>>,
{
    let mut retries: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                let (retry_ceiling, base) = match classify_error(&error) {
                    RetryClass::Fatal => return Err(error),
                    RetryClass::RateLimited => (RATE_LIMIT_MAX_RETRIES, RATE_LIMIT_BASE_DELAY_MS),
                    RetryClass::TransientNetwork => (max_retries, base_delay_ms),
                };
                if retries >= retry_ceiling {
                    return Err(error);
                }
                let jitter = rand::thread_rng().gen_range(0..MAX_JITTER_MS);
                let delay = base * 2_u64.pow(retries) + jitter;
                warn!("retrying in {}ms: {}", delay, error);
                tokio::time::sleep(Duration::from_millis(delay)).await;
                retries += 1;
            }
        }
    }
}
