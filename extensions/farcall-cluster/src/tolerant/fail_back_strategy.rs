use crate::error::CallError;
use crate::tolerant::{FailOverStrategy, ToleranceContext, ToleranceStrategy};
use async_trait::async_trait;
use farcall::model::RpcResponse;

/// Routes the failed call to the remaining candidates, behaving exactly
/// like [`FailOverStrategy`].
///
/// Despite the name, traffic is NOT routed back to the original instance
/// once it recovers; the two strategies are deliberately identical.
pub struct FailBackStrategy;

#[async_trait]
impl ToleranceStrategy for FailBackStrategy {
    async fn recover(
        &self,
        context: ToleranceContext<'_>,
        error: CallError,
    ) -> Result<RpcResponse, CallError> {
        FailOverStrategy.recover(context, error).await
    }
}
