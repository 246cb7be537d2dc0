/// Integration tests for resilience library
use resilience::{
    backoff_delay,
    outcome::{safe_run, Outcome},
    retry::{retry_with_backoff, with_retry, RetryConfig},
    OperationError, RetryError, RetryLayer,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_test::{assert_err, assert_ok};
use tower::{Layer, ServiceExt};

#[derive(Debug)]
struct UpstreamError {
    code: u16,
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "upstream returned {}", self.code)
    }
}

// ==================== Safe Run Tests ====================

#[tokio::test]
async fn test_safe_run_always_succeeds() {
    let outcome = safe_run(|| async { Ok::<_, UpstreamError>("profile") }, None).await;

    assert_eq!(outcome, Outcome::Success("profile"));
    assert_ok!(outcome.into_result());
}

#[tokio::test]
async fn test_safe_run_normalizes_custom_error() {
    let outcome = safe_run(
        || async { Err::<Vec<u8>, _>(UpstreamError { code: 503 }) },
        Some(Vec::new()),
    )
    .await;

    let (data, error) = outcome.into_parts();
    assert_eq!(data, Some(Vec::new()));
    assert_eq!(error, Some(OperationError::new("upstream returned 503")));
}

#[tokio::test]
async fn test_safe_run_never_raises_on_panic() {
    let handle = tokio::spawn(async {
        safe_run(
            || async {
                let values: Vec<i32> = Vec::new();
                Ok::<_, String>(values[3])
            },
            Some(-1),
        )
        .await
    });

    // The task completes normally even though the operation panicked
    let outcome = assert_ok!(handle.await);
    assert!(outcome.is_failure());
    assert_eq!(outcome.data(), Some(&-1));
}

// ==================== Retry Tests ====================

#[tokio::test(start_paused = true)]
async fn test_retry_succeeds_on_kth_attempt_with_k_minus_one_waits() {
    let base = Duration::from_millis(200);
    let attempt_times = Arc::new(Mutex::new(Vec::new()));
    let attempt_times_clone = attempt_times.clone();
    let start = Instant::now();

    let result = retry_with_backoff(
        move || {
            let attempt_times = attempt_times_clone.clone();
            async move {
                let mut times = attempt_times.lock().await;
                times.push(start.elapsed());
                if times.len() < 4 {
                    Err("not yet")
                } else {
                    Ok(times.len())
                }
            }
        },
        5,
        base,
    )
    .await;

    assert_eq!(assert_ok!(result), 4);

    let times = attempt_times.lock().await;
    assert_eq!(times.len(), 4);
    for i in 1..times.len() {
        let wait = times[i] - times[i - 1];
        let expected = backoff_delay(base, i as u32);
        assert!(
            wait >= expected && wait < expected + Duration::from_millis(5),
            "wait {} was {:?}, expected {:?}",
            i,
            wait,
            expected
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_retry_always_failing_performs_max_attempts() {
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let result = with_retry(RetryConfig::new(3, Duration::from_millis(10)), move || {
        let count = counter_clone.fetch_add(1, Ordering::SeqCst) + 1;
        async move { Err::<(), _>(UpstreamError { code: 500 + count as u16 }) }
    })
    .await;

    let err = assert_err!(result);
    assert_eq!(err.attempts(), Some(3));
    assert_eq!(err.into_last_error().map(|e| e.code), Some(503));
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_retry_does_not_block_other_work() {
    let ticks = Arc::new(AtomicU32::new(0));
    let ticks_clone = ticks.clone();

    let ticker = tokio::spawn(async move {
        for _ in 0..10 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            ticks_clone.fetch_add(1, Ordering::SeqCst);
        }
    });

    // 1000ms + 2000ms of backoff
    let result =
        retry_with_backoff(|| async { Err::<(), _>("down") }, 3, Duration::from_millis(1000))
            .await;
    assert!(matches!(result, Err(RetryError::Exhausted { attempts: 3, .. })));

    assert_ok!(ticker.await);
    assert_eq!(ticks.load(Ordering::SeqCst), 10);
}

#[tokio::test]
async fn test_retry_zero_attempts_is_invalid() {
    let result = retry_with_backoff(|| async { Ok::<_, String>(1) }, 0, Duration::ZERO).await;
    assert!(matches!(result, Err(RetryError::InvalidConfig(_))));
}

// ==================== Combined Scenario Tests ====================

#[tokio::test(start_paused = true)]
async fn test_safe_run_wrapping_retry() {
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let outcome = safe_run(
        || {
            retry_with_backoff(
                move || {
                    counter_clone.fetch_add(1, Ordering::SeqCst);
                    async { Err::<u32, _>("flaky dependency") }
                },
                2,
                Duration::from_millis(25),
            )
        },
        Some(0),
    )
    .await;

    assert_eq!(outcome.data(), Some(&0));
    assert_eq!(
        outcome.error().map(|e| e.message()),
        Some("Retry exhausted after 2 attempts: flaky dependency")
    );
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_retry_layer_with_service_fn() {
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let service = tower::service_fn(move |id: u64| {
        let count = counter_clone.fetch_add(1, Ordering::SeqCst);
        async move {
            if count == 0 {
                Err(UpstreamError { code: 502 })
            } else {
                Ok(id * 2)
            }
        }
    });

    let service = RetryLayer::new(RetryConfig::new(3, Duration::from_millis(100))).layer(service);

    assert_eq!(assert_ok!(service.oneshot(21).await), 42);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}
