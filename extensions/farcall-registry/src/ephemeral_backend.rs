use crate::error::RegistryError;
use crate::watch_event::WatchCallback;
use async_trait::async_trait;

/// Narrow client surface of a hierarchical coordination service with
/// session-scoped ephemeral nodes and change listeners.
///
/// Node lifetime is tied to the client session, so there is no lease to
/// renew; the backend removes a node when the session that created it
/// ends.
#[async_trait]
pub trait EphemeralBackend: Send + Sync {
    /// Creates a session-scoped node at `path` carrying `data`. Missing
    /// parent nodes are created as plain persistent nodes.
    async fn create_ephemeral(&self, path: &str, data: &[u8]) -> Result<(), RegistryError>;

    async fn delete_node(&self, path: &str) -> Result<(), RegistryError>;

    /// Returns the payload of every child node under `path`. A missing
    /// path yields an empty list.
    async fn children_data(&self, path: &str) -> Result<Vec<Vec<u8>>, RegistryError>;

    /// Installs a change listener on `path` and its subtree. Events are
    /// pushed into `on_event` from a backend-driven task.
    async fn watch_path(&self, path: &str, on_event: WatchCallback) -> Result<(), RegistryError>;
}
