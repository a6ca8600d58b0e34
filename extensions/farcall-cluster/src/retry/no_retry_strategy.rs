use crate::error::CallError;
use crate::retry::{RetryOperation, RetryStrategy};
use async_trait::async_trait;
use farcall::model::RpcResponse;

/// Invokes the operation once and propagates whatever happens.
pub struct NoRetryStrategy;

#[async_trait]
impl RetryStrategy for NoRetryStrategy {
    async fn attempt(&self, operation: RetryOperation<'_>) -> Result<RpcResponse, CallError> {
        operation().await
    }
}
