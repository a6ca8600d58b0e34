use crate::error::CallError;
use crate::retry::RetryStrategy;
use crate::transport_interface::CallTransport;
use async_trait::async_trait;
use farcall::model::{RpcRequest, RpcResponse, ServiceMetadata};

/// Everything a recovery decision can draw on: the full candidate list,
/// the instance that just failed, the original request, and the transport
/// and retry collaborators for strategies that try other instances.
pub struct ToleranceContext<'a> {
    pub candidates: &'a [ServiceMetadata],
    pub failed: &'a ServiceMetadata,
    pub request: &'a RpcRequest,
    pub transport: &'a dyn CallTransport,
    pub retry: &'a dyn RetryStrategy,
}

/// Final-failure policy, consulted only once the retry budget is spent.
///
/// This is the single place that decides between failing the caller,
/// substituting a default, and trying elsewhere; every other layer either
/// succeeds, retries, or propagates.
#[async_trait]
pub trait ToleranceStrategy: Send + Sync {
    async fn recover(
        &self,
        context: ToleranceContext<'_>,
        error: CallError,
    ) -> Result<RpcResponse, CallError>;
}
