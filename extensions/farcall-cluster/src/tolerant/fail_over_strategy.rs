use crate::error::CallError;
use crate::tolerant::{ToleranceContext, ToleranceStrategy};
use async_trait::async_trait;
use farcall::model::RpcResponse;
use futures::future::BoxFuture;

/// Tries every candidate other than the one that failed, re-running the
/// configured retry strategy against each, and returns the first success.
/// Only when the whole list is spent does the call fail terminally.
pub struct FailOverStrategy;

#[async_trait]
impl ToleranceStrategy for FailOverStrategy {
    async fn recover(
        &self,
        context: ToleranceContext<'_>,
        error: CallError,
    ) -> Result<RpcResponse, CallError> {
        let ToleranceContext {
            candidates,
            failed,
            request,
            transport,
            retry,
        } = context;

        if candidates.is_empty() {
            tracing::error!("no candidates available for fail-over");
            return Err(error);
        }

        for candidate in candidates {
            if candidate == failed {
                continue;
            }
            let operation = move || {
                let future: BoxFuture<'_, Result<RpcResponse, CallError>> =
                    Box::pin(transport.call(request, candidate));
                future
            };
            match retry.attempt(&operation).await {
                Ok(response) => return Ok(response),
                Err(retry_error) => {
                    tracing::warn!(
                        node = %candidate.service_node_identifier(),
                        error = %retry_error,
                        "fail-over candidate failed"
                    );
                }
            }
        }

        Err(CallError::AllCandidatesFailed)
    }
}
