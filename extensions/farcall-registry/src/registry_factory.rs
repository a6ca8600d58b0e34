//! String-keyed construction of registry variants.
//!
//! Variants register an async constructor under a key; configuration names
//! the key. Third-party variants join the table through [`register_ctor`]
//! instead of any classpath-style scanning.

use crate::ephemeral_registry::EphemeralRegistry;
use crate::error::RegistryError;
use crate::etcd_backend::EtcdLeaseBackend;
use crate::lease_registry::LeaseRegistry;
use crate::local_registry::LocalRegistry;
use crate::registry_interface::Registry;
use crate::zookeeper_backend::ZooKeeperBackend;
use farcall::config::RegistryConfig;
use futures::future::BoxFuture;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Constructor registered for one registry key.
pub type RegistryCtor =
    fn(RegistryConfig) -> BoxFuture<'static, Result<Arc<dyn Registry>, RegistryError>>;

pub const ETCD: &str = "etcd";
pub const ZOOKEEPER: &str = "zookeeper";
pub const LOCAL: &str = "local";

fn etcd_ctor(
    config: RegistryConfig,
) -> BoxFuture<'static, Result<Arc<dyn Registry>, RegistryError>> {
    Box::pin(async move {
        let backend = EtcdLeaseBackend::connect(&config).await?;
        let registry: Arc<dyn Registry> = Arc::new(LeaseRegistry::new(Arc::new(backend)));
        registry.heartbeat().await;
        Ok(registry)
    })
}

fn zookeeper_ctor(
    config: RegistryConfig,
) -> BoxFuture<'static, Result<Arc<dyn Registry>, RegistryError>> {
    Box::pin(async move {
        let backend = ZooKeeperBackend::connect(&config).await?;
        let registry: Arc<dyn Registry> = Arc::new(EphemeralRegistry::new(Arc::new(backend)));
        registry.heartbeat().await;
        Ok(registry)
    })
}

fn local_ctor(
    _config: RegistryConfig,
) -> BoxFuture<'static, Result<Arc<dyn Registry>, RegistryError>> {
    Box::pin(async move { Ok(Arc::new(LocalRegistry::new()) as Arc<dyn Registry>) })
}

static CONSTRUCTORS: Lazy<RwLock<HashMap<&'static str, RegistryCtor>>> = Lazy::new(|| {
    let mut table: HashMap<&'static str, RegistryCtor> = HashMap::new();
    table.insert(ETCD, etcd_ctor);
    table.insert(ZOOKEEPER, zookeeper_ctor);
    table.insert(LOCAL, local_ctor);
    RwLock::new(table)
});

/// Registers a constructor under `key`, replacing any existing entry.
pub fn register_ctor(key: &'static str, ctor: RegistryCtor) {
    CONSTRUCTORS
        .write()
        .expect("registry ctor table lock poisoned")
        .insert(key, ctor);
}

/// Builds the registry variant named by `config.registry`.
pub async fn resolve(config: &RegistryConfig) -> Result<Arc<dyn Registry>, RegistryError> {
    let ctor = CONSTRUCTORS
        .read()
        .expect("registry ctor table lock poisoned")
        .get(config.registry.as_str())
        .copied()
        .ok_or_else(|| RegistryError::UnknownVariant(config.registry.clone()))?;
    ctor(config.clone()).await
}
