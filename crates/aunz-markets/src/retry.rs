//! Retry with exponential back-off and jitter for marketplace HTTP clients.
//!
//! Only transient failures are retried: timeouts and connection failures,
//! HTTP 429 and 5xx.
//! Client errors and undecodable bodies are returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::EbayError;

const MAX_DELAY_MS: u64 = 30_000;

pub(crate) fn is_retriable(err: &EbayError) -> bool {
    match err {
        EbayError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        EbayError::RateLimited { .. } => true,
        EbayError::UnexpectedStatus { status, .. } => *status >= 500,
        EbayError::Deserialize { .. } | EbayError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts.
///
/// The n-th retry waits `backoff_base_ms * 2^(n-1)` milliseconds, capped at
/// 30 s, scaled by a random factor in `[0.75, 1.25)`.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, EbayError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, EbayError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "marketplace request failed, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
