use crate::error::RegistryError;
use crate::watch_event::WatchCallback;
use async_trait::async_trait;

/// Narrow client surface of a lease-capable key-value coordination
/// service: TTL leases, prefix queries, and key watches.
///
/// The backend is accessed, never reimplemented — `LeaseRegistry` holds
/// all registration logic and talks to the store only through this seam,
/// which also keeps that logic testable against an in-memory double.
#[async_trait]
pub trait LeaseBackend: Send + Sync {
    /// Grants a fresh lease of `ttl_secs` and writes `key = value` bound to
    /// it. Re-putting an existing key under a new lease is how renewal
    /// works.
    async fn put_with_lease(
        &self,
        key: &str,
        value: &[u8],
        ttl_secs: i64,
    ) -> Result<(), RegistryError>;

    /// Reads one key. `None` means the key is absent (e.g. lease expired).
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, RegistryError>;

    /// Returns every `(key, value)` pair under `prefix`.
    async fn get_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, RegistryError>;

    async fn delete(&self, key: &str) -> Result<(), RegistryError>;

    /// Installs a watch on `key`. Events are pushed into `on_event` from a
    /// backend-driven task for the life of the client.
    async fn watch_key(&self, key: &str, on_event: WatchCallback) -> Result<(), RegistryError>;
}
