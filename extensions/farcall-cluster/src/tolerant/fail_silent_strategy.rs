use crate::error::CallError;
use crate::tolerant::{ToleranceContext, ToleranceStrategy};
use async_trait::async_trait;
use farcall::model::RpcResponse;

/// Swallows the failure and answers with a fixed default response — for
/// call sites where availability matters more than this one result. The
/// error is only logged.
pub struct FailSilentStrategy {
    default_response: RpcResponse,
}

impl FailSilentStrategy {
    pub fn new() -> Self {
        Self {
            default_response: RpcResponse::default(),
        }
    }

    /// Answers with `response` instead of the empty default.
    pub fn with_response(response: RpcResponse) -> Self {
        Self {
            default_response: response,
        }
    }
}

impl Default for FailSilentStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToleranceStrategy for FailSilentStrategy {
    async fn recover(
        &self,
        context: ToleranceContext<'_>,
        error: CallError,
    ) -> Result<RpcResponse, CallError> {
        tracing::info!(
            service = %context.request.service_name,
            method = %context.request.method_name,
            %error,
            "suppressing call failure"
        );
        Ok(self.default_response.clone())
    }
}
