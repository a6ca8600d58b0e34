use crate::error::CallError;
use async_trait::async_trait;
use farcall::model::RpcResponse;
use futures::future::BoxFuture;

/// One transport round trip, started anew on each invocation.
pub type RetryOperation<'a> =
    &'a (dyn Fn() -> BoxFuture<'a, Result<RpcResponse, CallError>> + Send + Sync);

/// Decides whether and how a failed transport call is attempted again.
///
/// A strategy owns the whole attempt loop: it runs `operation`, sleeps
/// between failures according to its own schedule, and gives up with
/// [`CallError::RetriesExhausted`] once its budget is spent, preserving
/// the last underlying failure.
#[async_trait]
pub trait RetryStrategy: Send + Sync {
    async fn attempt(&self, operation: RetryOperation<'_>) -> Result<RpcResponse, CallError>;
}
