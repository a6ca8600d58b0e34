use farcall::model::{RpcRequest, ServiceMetadata};

/// Narrows a discovered candidate list to the single instance one call
/// should target. Consumer side.
pub trait LoadBalancer: Send + Sync {
    /// Returns `None` when `candidates` is empty. A single candidate is
    /// returned as-is, skipping any selection computation.
    fn select(
        &self,
        request: &RpcRequest,
        candidates: &[ServiceMetadata],
    ) -> Option<ServiceMetadata>;
}
