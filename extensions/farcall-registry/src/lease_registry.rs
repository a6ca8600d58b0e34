use crate::error::RegistryError;
use crate::lease_backend::LeaseBackend;
use crate::registry_interface::Registry;
use crate::service_cache::ServiceCache;
use crate::watch_event::WatchEventKind;
use async_trait::async_trait;
use farcall::model::ServiceMetadata;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

/// Root prefix under which every node key lives.
const REGISTRY_ROOT: &str = "/rpc/";

/// Registration lease length.
const LEASE_TTL_SECS: i64 = 30;

/// How often owned keys are re-registered. Must be comfortably shorter
/// than the lease TTL.
const RENEWAL_INTERVAL: Duration = Duration::from_secs(10);

/// Registry variant backed by a lease-capable key-value store.
///
/// A registration is a key bound to a TTL lease; it survives only while
/// the renewal timer keeps re-acquiring leases for it. If this process
/// loses its local state (crash-restart), the stale keys simply expire and
/// the provider must register again.
pub struct LeaseRegistry {
    backend: Arc<dyn LeaseBackend>,
    cache: Arc<ServiceCache>,
    /// Keys this process registered; read by the renewal timer, written by
    /// register/unregister on the call path.
    owned_keys: Arc<RwLock<HashSet<String>>>,
    /// Keys that already carry a watch, to keep `watch` idempotent.
    watched_keys: Mutex<HashSet<String>>,
    heartbeat_started: AtomicBool,
    heartbeat_task: Mutex<Option<JoinHandle<()>>>,
}

impl LeaseRegistry {
    pub fn new(backend: Arc<dyn LeaseBackend>) -> Self {
        Self {
            backend,
            cache: Arc::new(ServiceCache::new()),
            owned_keys: Arc::new(RwLock::new(HashSet::new())),
            watched_keys: Mutex::new(HashSet::new()),
            heartbeat_started: AtomicBool::new(false),
            heartbeat_task: Mutex::new(None),
        }
    }

    fn node_key(metadata: &ServiceMetadata) -> String {
        format!("{REGISTRY_ROOT}{}", metadata.service_node_identifier())
    }
}

#[async_trait]
impl Registry for LeaseRegistry {
    async fn register(&self, metadata: ServiceMetadata) -> Result<(), RegistryError> {
        let key = Self::node_key(&metadata);
        let value = serde_json::to_vec(&metadata)?;
        self.backend
            .put_with_lease(&key, &value, LEASE_TTL_SECS)
            .await?;
        self.owned_keys.write().await.insert(key);
        Ok(())
    }

    async fn unregister(&self, metadata: &ServiceMetadata) -> Result<(), RegistryError> {
        let key = Self::node_key(metadata);
        self.backend.delete(&key).await?;
        self.owned_keys.write().await.remove(&key);
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

        let prefix = format!("{REGISTRY_ROOT}{service_identifier}/");
        let entries =
            self.backend
                .get_prefix(&prefix)
                .await
                .map_err(|error| RegistryError::DiscoveryFailed {
                    message: error.to_string(),
                })?;

        let mut instances = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let metadata: ServiceMetadata = serde_json::from_slice(&value)?;
            self.watch(&key).await?;
            instances.push(metadata);
        }

        self.cache.write(service_identifier, instances.clone());
        Ok(instances)
    }

    async fn watch(&self, node_identifier: &str) -> Result<(), RegistryError> {
        let key = if node_identifier.starts_with(REGISTRY_ROOT) {
            node_identifier.to_string()
        } else {
            format!("{REGISTRY_ROOT}{node_identifier}")
        };

        {
            let mut watched = self.watched_keys.lock().await;
            if !watched.insert(key.clone()) {
                return Ok(());
            }
        }

        // Any node deletion empties the whole cache rather than pruning one
        // entry; the next discovery for every service re-reads the backend.
        let cache = Arc::clone(&self.cache);
        self.backend
            .watch_key(
                &key,
                Arc::new(move |event| {
                    if event == WatchEventKind::Deleted {
                        cache.clear();
                    }
                }),
            )
            .await
    }

    async fn heartbeat(&self) {
        if self.heartbeat_started.swap(true, Ordering::SeqCst) {
            return;
        }

        let backend = Arc::clone(&self.backend);
        let owned_keys = Arc::clone(&self.owned_keys);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(RENEWAL_INTERVAL);
            // The first tick completes immediately; skip it so renewals
            // start one full interval after registration.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let keys: Vec<String> = owned_keys.read().await.iter().cloned().collect();
                for key in keys {
                    match backend.get(&key).await {
                        // Lease already expired; only a restart re-registers
                        // this node.
                        Ok(None) => {
                            tracing::warn!(%key, "registration lease expired");
                        }
                        Ok(Some(value)) => match serde_json::from_slice::<ServiceMetadata>(&value)
                        {
                            Ok(metadata) => {
                                tracing::debug!(
                                    node = %metadata.service_node_identifier(),
                                    "renewing lease"
                                );
                                if let Err(error) =
                                    backend.put_with_lease(&key, &value, LEASE_TTL_SECS).await
                                {
                                    tracing::error!(%key, %error, "lease renewal failed");
                                }
                            }
                            Err(error) => {
                                tracing::error!(%key, %error, "owned key holds invalid metadata");
                            }
                        },
                        Err(error) => {
                            tracing::error!(%key, %error, "lease renewal read failed");
                        }
                    }
                }
            }
        });
        *self.heartbeat_task.lock().await = Some(handle);
    }

    async fn destroy(&self) {
        tracing::info!("registry node going offline");
        if let Some(handle) = self.heartbeat_task.lock().await.take() {
            handle.abort();
        }
        let keys: Vec<String> = self.owned_keys.read().await.iter().cloned().collect();
        for key in keys {
            if let Err(error) = self.backend.delete(&key).await {
                tracing::error!(%key, %error, "failed to remove node during shutdown");
            }
            self.owned_keys.write().await.remove(&key);
        }
    }
}
