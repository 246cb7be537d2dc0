/// Prometheus metrics for safe execution and retries
#[cfg(feature = "metrics")]
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter_vec, Histogram, HistogramVec,
    IntCounterVec,
};

#[cfg(feature = "metrics")]
use once_cell::sync::Lazy;

use std::time::Duration;

#[cfg(feature = "metrics")]
static SAFE_RUN_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "resilience_safe_run_total",
        "Total number of safe_run executions",
        &["result"]
    )
    .expect("Failed to register safe_run outcomes metric")
});

#[cfg(feature = "metrics")]
static RETRY_ATTEMPTS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "resilience_retry_attempts",
        "Number of attempts before success or exhaustion",
        &["result"],
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 8.0, 10.0]
    )
    .expect("Failed to register retry attempts metric")
});

#[cfg(feature = "metrics")]
static RETRY_BACKOFF: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "resilience_retry_backoff_seconds",
        "Backoff waited between retry attempts"
    )
    .expect("Failed to register retry backoff metric")
});

/// Metrics collector for `safe_run`
pub struct SafeRunMetrics;

/// Metrics collector for retries
pub struct RetryMetrics;

#[cfg(feature = "metrics")]
impl SafeRunMetrics {
    pub fn record(result: &str) {
        SAFE_RUN_OUTCOMES.with_label_values(&[result]).inc();
    }
}

#[cfg(feature = "metrics")]
impl RetryMetrics {
    pub fn record_attempts(result: &str, attempts: u32) {
        RETRY_ATTEMPTS
            .with_label_values(&[result])
            .observe(attempts as f64);
    }

    pub fn record_backoff(delay: Duration) {
        RETRY_BACKOFF.observe(delay.as_secs_f64());
    }
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
impl SafeRunMetrics {
    pub fn record(_result: &str) {}
}

#[cfg(not(feature = "metrics"))]
impl RetryMetrics {
    pub fn record_attempts(_result: &str, _attempts: u32) {}
    pub fn record_backoff(_delay: Duration) {}
}
