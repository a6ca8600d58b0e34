use crate::ephemeral_backend::EphemeralBackend;
use crate::error::RegistryError;
use crate::registry_interface::Registry;
use crate::service_cache::ServiceCache;
use async_trait::async_trait;
use farcall::model::ServiceMetadata;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Root path under which every service node lives.
const REGISTRY_ROOT: &str = "/rpc";

/// Registry variant backed by session-scoped ephemeral nodes.
///
/// Liveness is the backend session itself: a provider that dies loses its
/// session and the backend removes its nodes, so `heartbeat` has nothing
/// to do.
pub struct EphemeralRegistry {
    backend: Arc<dyn EphemeralBackend>,
    cache: Arc<ServiceCache>,
    owned_paths: RwLock<HashSet<String>>,
    /// Paths that already carry a change listener, to keep `watch`
    /// idempotent.
    watched_paths: Mutex<HashSet<String>>,
}

impl EphemeralRegistry {
    pub fn new(backend: Arc<dyn EphemeralBackend>) -> Self {
        Self {
            backend,
            cache: Arc::new(ServiceCache::new()),
            owned_paths: RwLock::new(HashSet::new()),
            watched_paths: Mutex::new(HashSet::new()),
        }
    }

    fn node_path(metadata: &ServiceMetadata) -> String {
        format!("{REGISTRY_ROOT}/{}", metadata.service_node_identifier())
    }
}

#[async_trait]
impl Registry for EphemeralRegistry {
    async fn register(&self, metadata: ServiceMetadata) -> Result<(), RegistryError> {
        let path = Self::node_path(&metadata);
        let value = serde_json::to_vec(&metadata)?;
        self.backend.create_ephemeral(&path, &value).await?;
        self.owned_paths.write().await.insert(path);
        Ok(())
    }

    async fn unregister(&self, metadata: &ServiceMetadata) -> Result<(), RegistryError> {
        let path = Self::node_path(metadata);
        self.backend.delete_node(&path).await?;
        self.owned_paths.write().await.remove(&path);
        Ok(())
    }

    async fn discover(
        &self,
        service_identifier: &str,
    ) -> Result<Vec<ServiceMetadata>, RegistryError> {
        if let Some(cached) = self.cache.read(service_identifier) {
            if !cached.is_empty() {
                return Ok(cached);
            }
        }

        let service_path = format!("{REGISTRY_ROOT}/{service_identifier}");
        let values = self
            .backend
            .children_data(&service_path)
            .await
            .map_err(|error| RegistryError::DiscoveryFailed {
                message: error.to_string(),
            })?;

        let mut instances = Vec::with_capacity(values.len());
        for value in values {
            let metadata: ServiceMetadata = serde_json::from_slice(&value)?;
            instances.push(metadata);
        }

        self.watch(service_identifier).await?;
        self.cache.write(service_identifier, instances.clone());
        Ok(instances)
    }

    async fn watch(&self, node_identifier: &str) -> Result<(), RegistryError> {
        let path = if node_identifier.starts_with(REGISTRY_ROOT) {
            node_identifier.to_string()
        } else {
            format!("{REGISTRY_ROOT}/{node_identifier}")
        };

        {
            let mut watched = self.watched_paths.lock().await;
            if !watched.insert(path.clone()) {
                return Ok(());
            }
        }

        // Both removals and updates empty the whole cache; the next
        // discovery re-reads the backend.
        let cache = Arc::clone(&self.cache);
        self.backend
            .watch_path(&path, Arc::new(move |_event| cache.clear()))
            .await
    }

    /// Session-scoped nodes are removed by the backend when the session
    /// ends; no manual renewal is required.
    async fn heartbeat(&self) {}

    async fn destroy(&self) {
        tracing::info!("registry node going offline");
        let paths: Vec<String> = self.owned_paths.read().await.iter().cloned().collect();
        for path in paths {
            if let Err(error) = self.backend.delete_node(&path).await {
                tracing::error!(%path, %error, "failed to remove node during shutdown");
            }
            self.owned_paths.write().await.remove(&path);
        }
    }
}
