use crate::error::CallError;
use async_trait::async_trait;
use farcall::model::{RpcRequest, RpcResponse, ServiceMetadata};

/// One transport round trip to a specific provider instance.
///
/// The concrete client lives in a runtime-specific crate; retry and
/// tolerance code (and tests) only need this seam. A returned response may
/// still carry an application failure in its `exception` field — that is
/// not a transport error and is not retried.
#[async_trait]
pub trait CallTransport: Send + Sync {
    async fn call(
        &self,
        request: &RpcRequest,
        node: &ServiceMetadata,
    ) -> Result<RpcResponse, CallError>;
}
