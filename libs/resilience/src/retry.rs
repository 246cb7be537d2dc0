/// Retry policy with pure exponential backoff
use crate::error::RetryError;
use crate::metrics::RetryMetrics;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one (must be >= 1)
    pub max_attempts: u32,
    /// Wait before the second attempt; doubles after every further failure
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryConfig {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Wait applied after a failed `attempt` (1-based): `base_delay * 2^(attempt - 1)`
///
/// No jitter and no upper bound; saturates at `Duration::MAX`.
pub fn backoff_delay(base_delay: Duration, attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1);
    let factor = 2u32.checked_pow(exponent);

    match factor {
        Some(factor) => base_delay.saturating_mul(factor),
        None if base_delay.is_zero() => Duration::ZERO,
        None => Duration::MAX,
    }
}

/// Execute a future with retry logic
///
/// Attempts run strictly one after another. Errors from non-final attempts
/// are logged and dropped; the error from the last attempt is returned in
/// [`RetryError::Exhausted`].
pub async fn with_retry<F, Fut, T, E>(config: RetryConfig, mut f: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    config.validate().map_err(RetryError::InvalidConfig)?;

    let mut attempt = 1;

    loop {
        match f().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!("Operation succeeded on attempt {}/{}", attempt, config.max_attempts);
                }
                RetryMetrics::record_attempts("success", attempt);
                return Ok(result);
            }
            Err(e) => {
                if attempt >= config.max_attempts {
                    warn!(
                        "Max attempts ({}) reached, last error: {}",
                        config.max_attempts, e
                    );
                    RetryMetrics::record_attempts("exhausted", attempt);
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last_error: e,
                    });
                }

                let delay = backoff_delay(config.base_delay, attempt);

                warn!(
                    "Attempt {}/{} failed: {}, retrying in {:?}",
                    attempt, config.max_attempts, e, delay
                );
                RetryMetrics::record_backoff(delay);

                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Retry `operation` up to `max_attempts` times, waiting `base_delay * 2^(k-1)` after failure `k`
pub async fn retry_with_backoff<F, Fut, T, E>(
    operation: F,
    max_attempts: u32,
    base_delay: Duration,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    with_retry(RetryConfig::new(max_attempts, base_delay), operation).await
}
