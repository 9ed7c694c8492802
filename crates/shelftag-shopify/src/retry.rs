//! Retry support for transient Admin API failures.
//!
//! Retries use a fixed bound and a fixed delay. Non-retriable errors
//! (not-found, malformed responses, validation errors) are propagated
//! immediately without retrying.

use std::future::Future;
use std::time::Duration;

use crate::error::ShopifyError;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after the fixed delay.
///
/// Retriable errors:
/// - [`ShopifyError::Http`] — network-level failure (connection reset, timeout, etc.).
/// - [`ShopifyError::RateLimited`] — HTTP 429; the server has asked us to back off.
/// - [`ShopifyError::UnexpectedStatus`] with a 5xx status — server-side fault.
///
/// Everything else (404s, parse failures, GraphQL/user errors, pagination
/// guard) is propagated immediately: retrying would return the same result.
pub(crate) fn is_transient(err: &ShopifyError) -> bool {
    match err {
        ShopifyError::Http(_) | ShopifyError::RateLimited { .. } => true,
        ShopifyError::UnexpectedStatus { status } => *status >= 500,
        _ => false,
    }
}

/// Executes `operation` with fixed-delay retries on transient errors.
///
/// On success the result is returned immediately. On a transient error the
/// function sleeps `delay_secs` seconds and tries again, up to `max_retries`
/// additional attempts after the first try; exhaustion returns the last
/// error. With `max_retries = 3` the operation is attempted at most 4 times.
pub(crate) async fn retry_with_delay<T, F, Fut>(
    max_retries: u32,
    delay_secs: u64,
    mut operation: F,
) -> Result<T, ShopifyError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ShopifyError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_transient(&err) || attempt >= max_retries {
                    return Err(err);
                }
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_secs,
                    error = %err,
                    "transient Admin API error — retrying after delay"
                );
            }
        }

        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
