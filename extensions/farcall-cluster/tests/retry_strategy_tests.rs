use farcall::model::RpcResponse;
use farcall_cluster::CallError;
use farcall_cluster::retry::{
    ExponentialBackoffRetryStrategy, FixedIntervalRetryStrategy, LinearBackoffRetryStrategy,
    NoRetryStrategy, RetryStrategy, retry_strategy_factory,
};
use futures::future::BoxFuture;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Operation that fails `failures` times, then succeeds, recording every
/// attempt. `call_duration` simulates time spent inside each attempt.
struct ScriptedOperation {
    calls: AtomicUsize,
    failures: usize,
    call_duration: Duration,
}

impl ScriptedOperation {
    fn failing_forever() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failures: usize::MAX,
            call_duration: Duration::ZERO,
        }
    }

    fn failing(failures: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failures,
            call_duration: Duration::ZERO,
        }
    }

    fn slow_failing_forever(call_duration: Duration) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failures: usize::MAX,
            call_duration,
        }
    }

    fn run(&self) -> BoxFuture<'_, Result<RpcResponse, CallError>> {
        Box::pin(async move {
            let attempt = self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.call_duration.is_zero() {
                tokio::time::sleep(self.call_duration).await;
            }
            if attempt < self.failures {
                Err(CallError::Timeout)
            } else {
                Ok(RpcResponse::success(json!("pong"), "string"))
            }
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[tokio::test]
async fn no_retry_invokes_exactly_once_and_propagates() {
    let operation = ScriptedOperation::failing_forever();
    let run = || operation.run();

    let error = NoRetryStrategy
        .attempt(&run)
        .await
        .expect_err("operation always fails");

    assert!(matches!(error, CallError::Timeout));
    assert_eq!(operation.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn fixed_interval_makes_three_attempts_with_fixed_waits() {
    let operation = ScriptedOperation::failing_forever();
    let run = || operation.run();

    let started = Instant::now();
    let error = FixedIntervalRetryStrategy
        .attempt(&run)
        .await
        .expect_err("operation always fails");
    let elapsed = started.elapsed();

    assert_eq!(operation.call_count(), 3);
    // Two three-second waits separate the three attempts.
    assert!(elapsed >= Duration::from_secs(6));
    assert!(elapsed < Duration::from_secs(7));
    match error {
        CallError::RetriesExhausted { attempts, last } => {
            assert_eq!(attempts, 3);
            assert!(matches!(*last, CallError::Timeout));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn linear_backoff_waits_grow_by_a_fixed_step() {
    let operation = ScriptedOperation::failing_forever();
    let run = || operation.run();

    let started = Instant::now();
    let error = LinearBackoffRetryStrategy
        .attempt(&run)
        .await
        .expect_err("operation always fails");
    let elapsed = started.elapsed();

    assert_eq!(operation.call_count(), 5);
    // Backoffs of 1, 2, 3, 4, and 5 seconds follow the five failures.
    assert!(elapsed >= Duration::from_secs(15));
    assert!(elapsed < Duration::from_secs(16));
    assert!(matches!(error, CallError::RetriesExhausted { attempts: 5, .. }));
}

#[tokio::test(start_paused = true)]
async fn exponential_backoff_doubles_each_wait() {
    let operation = ScriptedOperation::failing_forever();
    let run = || operation.run();

    let started = Instant::now();
    let error = ExponentialBackoffRetryStrategy
        .attempt(&run)
        .await
        .expect_err("operation always fails");
    let elapsed = started.elapsed();

    assert_eq!(operation.call_count(), 5);
    // Backoffs of 100, 200, 400, 800, and 1600 ms follow the failures.
    assert!(elapsed >= Duration::from_millis(3100));
    assert!(elapsed < Duration::from_millis(3200));
    assert!(matches!(error, CallError::RetriesExhausted { attempts: 5, .. }));
}

#[tokio::test(start_paused = true)]
async fn time_spent_inside_a_failing_call_counts_against_the_backoff() {
    let operation = ScriptedOperation::slow_failing_forever(Duration::from_millis(150));
    let run = || operation.run();

    let started = Instant::now();
    let _ = ExponentialBackoffRetryStrategy.attempt(&run).await;
    let elapsed = started.elapsed();

    // Five 150 ms calls plus waits of max(0, backoff - 150): 0, 50, 250,
    // 650, and 1450 ms.
    let expected = Duration::from_millis(5 * 150 + 50 + 250 + 650 + 1450);
    assert!(elapsed >= expected);
    assert!(elapsed < expected + Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn a_late_success_stops_the_retrying() {
    let operation = ScriptedOperation::failing(2);
    let run = || operation.run();

    let response = ExponentialBackoffRetryStrategy
        .attempt(&run)
        .await
        .expect("third attempt succeeds");

    assert_eq!(response.data, Some(json!("pong")));
    assert_eq!(operation.call_count(), 3);
}

#[tokio::test]
async fn factory_resolves_each_registered_key() {
    for key in ["no", "fixedInterval", "linear", "exponentialBackoff"] {
        assert!(retry_strategy_factory::resolve(key).is_ok(), "key: {key}");
    }
}

#[tokio::test]
async fn factory_rejects_an_unregistered_key() {
    let error = retry_strategy_factory::resolve("bogus").expect_err("unknown key");
    assert!(matches!(error, CallError::UnknownVariant { .. }));
}
