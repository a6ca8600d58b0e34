use crate::error::CallError;
use crate::tolerant::{ToleranceContext, ToleranceStrategy};
use async_trait::async_trait;
use farcall::model::RpcResponse;

/// Logs and re-raises; the caller sees the failure immediately.
pub struct FailFastStrategy;

#[async_trait]
impl ToleranceStrategy for FailFastStrategy {
    async fn recover(
        &self,
        context: ToleranceContext<'_>,
        error: CallError,
    ) -> Result<RpcResponse, CallError> {
        tracing::error!(
            service = %context.request.service_name,
            method = %context.request.method_name,
            %error,
            "call failed"
        );
        Err(error)
    }
}
