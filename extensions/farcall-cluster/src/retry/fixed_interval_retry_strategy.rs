use crate::error::CallError;
use crate::retry::{RetryOperation, RetryStrategy};
use async_trait::async_trait;
use farcall::model::RpcResponse;
use std::time::Duration;
use tokio::time::sleep;

const MAX_ATTEMPTS: usize = 3;
const WAIT_INTERVAL: Duration = Duration::from_secs(3);

/// Up to three attempts with a fixed three-second wait between them,
/// regardless of how long each attempt took.
pub struct FixedIntervalRetryStrategy;

#[async_trait]
impl RetryStrategy for FixedIntervalRetryStrategy {
    async fn attempt(&self, operation: RetryOperation<'_>) -> Result<RpcResponse, CallError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match operation().await {
                Ok(response) => return Ok(response),
                Err(error) => {
                    tracing::warn!(attempt = attempts, %error, "call failed");
                    if attempts >= MAX_ATTEMPTS {
                        return Err(CallError::RetriesExhausted {
                            attempts,
                            last: Box::new(error),
                        });
                    }
                    sleep(WAIT_INTERVAL).await;
                }
            }
        }
    }
}
