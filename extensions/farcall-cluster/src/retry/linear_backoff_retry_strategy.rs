use crate::error::CallError;
use crate::retry::{RetryOperation, RetryStrategy};
use async_trait::async_trait;
use farcall::model::RpcResponse;
use std::time::Duration;
use tokio::time::{Instant, sleep};

const MAX_ATTEMPTS: usize = 5;
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Backoff grows by a fixed step after each failure.
///
/// The wait subtracts the time already spent inside the failed call, so a
/// slow failure is not double-counted: sleep = max(0, backoff − elapsed),
/// never more than the current backoff.
pub struct LinearBackoffRetryStrategy;

#[async_trait]
impl RetryStrategy for LinearBackoffRetryStrategy {
    async fn attempt(&self, operation: RetryOperation<'_>) -> Result<RpcResponse, CallError> {
        let mut backoff = INITIAL_BACKOFF;
        let mut attempts = 0;
        loop {
            attempts += 1;
            let started = Instant::now();
            match operation().await {
                Ok(response) => return Ok(response),
                Err(error) => {
                    let elapsed = started.elapsed();
                    tracing::warn!(attempt = attempts, %error, "call failed, backing off");
                    let wait = backoff.saturating_sub(elapsed);
                    if !wait.is_zero() {
                        sleep(wait).await;
                    }
                    if attempts >= MAX_ATTEMPTS {
                        return Err(CallError::RetriesExhausted {
                            attempts,
                            last: Box::new(error),
                        });
                    }
                    backoff += INITIAL_BACKOFF;
                }
            }
        }
    }
}
