use crate::error::RegistryError;
use async_trait::async_trait;
use farcall::model::ServiceMetadata;

/// Common contract of every registry variant.
///
/// Initialization is each variant's constructor. Implementations must be
/// shareable across tasks — discovery calls, watch callbacks, and the
/// renewal timer all run concurrently.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Registers one running service instance. Provider side.
    async fn register(&self, metadata: ServiceMetadata) -> Result<(), RegistryError>;

    /// Removes one running service instance. Provider side.
    async fn unregister(&self, metadata: &ServiceMetadata) -> Result<(), RegistryError>;

    /// Returns every known instance of the service named by
    /// `service_identifier`. Consumer side; an empty list is a normal
    /// outcome, not an error.
    async fn discover(
        &self,
        service_identifier: &str,
    ) -> Result<Vec<ServiceMetadata>, RegistryError>;

    /// Installs a cache-invalidation watch on one registry node.
    /// Idempotent: a node already being watched is not watched twice.
    async fn watch(&self, node_identifier: &str) -> Result<(), RegistryError>;

    /// Starts liveness maintenance. Idempotent and safe to call once at
    /// startup; variants whose backend guarantees liveness leave this
    /// inert.
    async fn heartbeat(&self);

    /// Best-effort removal of every locally owned node, then resource
    /// release. Individual failures are logged, not propagated.
    async fn destroy(&self);
}
