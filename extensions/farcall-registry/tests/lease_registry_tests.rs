use async_trait::async_trait;
use farcall::model::ServiceMetadata;
use farcall_registry::{
    LeaseBackend, LeaseRegistry, Registry, RegistryError, WatchCallback, WatchEventKind,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory stand-in for a lease-capable key-value store, instrumented
/// with call counters so cache behavior is observable.
#[derive(Default)]
struct StubLeaseBackend {
    store: Mutex<HashMap<String, Vec<u8>>>,
    puts: AtomicUsize,
    prefix_queries: AtomicUsize,
    watch_installs: AtomicUsize,
    fail_prefix_queries: AtomicBool,
    watch_callbacks: Mutex<Vec<(String, WatchCallback)>>,
}

impl StubLeaseBackend {
    fn fire_delete(&self, key: &str) {
        let callbacks = self.watch_callbacks.lock().expect("lock poisoned");
        for (watched_key, callback) in callbacks.iter() {
            if watched_key == key {
                callback(WatchEventKind::Deleted);
            }
        }
    }

    fn remove_silently(&self, key: &str) {
        self.store.lock().expect("lock poisoned").remove(key);
    }
}

#[async_trait]
impl LeaseBackend for StubLeaseBackend {
    async fn put_with_lease(
        &self,
        key: &str,
        value: &[u8],
        _ttl_secs: i64,
    ) -> Result<(), RegistryError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.store
            .lock()
            .expect("lock poisoned")
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, RegistryError> {
        Ok(self.store.lock().expect("lock poisoned").get(key).cloned())
    }

    async fn get_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, RegistryError> {
        if self.fail_prefix_queries.load(Ordering::SeqCst) {
            return Err(RegistryError::Backend {
                message: "backend unreachable".to_string(),
            });
        }
        self.prefix_queries.fetch_add(1, Ordering::SeqCst);
        let mut entries: Vec<(String, Vec<u8>)> = self
            .store
            .lock()
            .expect("lock poisoned")
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        entries.sort();
        Ok(entries)
    }

    async fn delete(&self, key: &str) -> Result<(), RegistryError> {
        self.store.lock().expect("lock poisoned").remove(key);
        Ok(())
    }

    async fn watch_key(&self, key: &str, on_event: WatchCallback) -> Result<(), RegistryError> {
        self.watch_installs.fetch_add(1, Ordering::SeqCst);
        self.watch_callbacks
            .lock()
            .expect("lock poisoned")
            .push((key.to_string(), on_event));
        Ok(())
    }
}

fn instance(port: u16) -> ServiceMetadata {
    ServiceMetadata::new("Echo", "127.0.0.1", port)
}

#[tokio::test]
async fn register_writes_a_lease_bound_key() {
    let backend = Arc::new(StubLeaseBackend::default());
    let registry = LeaseRegistry::new(backend.clone());

    registry.register(instance(8080)).await.expect("register");

    assert_eq!(backend.puts.load(Ordering::SeqCst), 1);
    let stored = backend
        .get("/rpc/Echo:1.0/127.0.0.1:8080")
        .await
        .expect("get")
        .expect("key should exist");
    let metadata: ServiceMetadata = serde_json::from_slice(&stored).expect("valid metadata");
    assert_eq!(metadata, instance(8080));
}

#[tokio::test]
async fn unregister_removes_the_key() {
    let backend = Arc::new(StubLeaseBackend::default());
    let registry = LeaseRegistry::new(backend.clone());

    registry.register(instance(8080)).await.expect("register");
    registry
        .unregister(&instance(8080))
        .await
        .expect("unregister");

    assert!(
        backend
            .get("/rpc/Echo:1.0/127.0.0.1:8080")
            .await
            .expect("get")
            .is_none()
    );
}

#[tokio::test]
async fn discovery_is_served_from_cache_after_the_first_query() {
    let backend = Arc::new(StubLeaseBackend::default());
    let registry = LeaseRegistry::new(backend.clone());
    registry.register(instance(8080)).await.expect("register");
    registry.register(instance(8081)).await.expect("register");

    let first = registry.discover("Echo:1.0").await.expect("discover");
    assert_eq!(first.len(), 2);
    assert_eq!(backend.prefix_queries.load(Ordering::SeqCst), 1);

    let second = registry.discover("Echo:1.0").await.expect("discover");
    assert_eq!(second, first);
    // Cache hit: the backend was not queried again.
    assert_eq!(backend.prefix_queries.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn a_delete_watch_event_forces_the_next_discovery_back_to_the_backend() {
    let backend = Arc::new(StubLeaseBackend::default());
    let registry = LeaseRegistry::new(backend.clone());
    registry.register(instance(8080)).await.expect("register");

    registry.discover("Echo:1.0").await.expect("discover");
    assert_eq!(backend.prefix_queries.load(Ordering::SeqCst), 1);

    backend.fire_delete("/rpc/Echo:1.0/127.0.0.1:8080");

    registry.discover("Echo:1.0").await.expect("discover");
    assert_eq!(backend.prefix_queries.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn discovered_keys_are_watched_only_once() {
    let backend = Arc::new(StubLeaseBackend::default());
    let registry = LeaseRegistry::new(backend.clone());
    registry.register(instance(8080)).await.expect("register");

    registry.discover("Echo:1.0").await.expect("discover");
    // Invalidate so the second discovery reaches the backend again.
    backend.fire_delete("/rpc/Echo:1.0/127.0.0.1:8080");
    registry.discover("Echo:1.0").await.expect("discover");

    assert_eq!(backend.watch_installs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_discovery_is_a_normal_outcome() {
    let backend = Arc::new(StubLeaseBackend::default());
    let registry = LeaseRegistry::new(backend);

    let instances = registry.discover("Nothing:1.0").await.expect("discover");
    assert!(instances.is_empty());
}

#[tokio::test]
async fn backend_failures_surface_as_discovery_errors() {
    let backend = Arc::new(StubLeaseBackend::default());
    backend.fail_prefix_queries.store(true, Ordering::SeqCst);
    let registry = LeaseRegistry::new(backend);

    let error = registry
        .discover("Echo:1.0")
        .await
        .expect_err("discovery should fail");
    assert!(matches!(error, RegistryError::DiscoveryFailed { .. }));
}

#[tokio::test(start_paused = true)]
async fn heartbeat_renews_live_keys_on_the_renewal_interval() {
    let backend = Arc::new(StubLeaseBackend::default());
    let registry = LeaseRegistry::new(backend.clone());
    registry.register(instance(8080)).await.expect("register");
    registry.heartbeat().await;

    assert_eq!(backend.puts.load(Ordering::SeqCst), 1);

    // Two renewal intervals pass; each re-registers the owned key.
    tokio::time::sleep(Duration::from_secs(21)).await;

    assert_eq!(backend.puts.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn heartbeat_skips_keys_whose_lease_already_expired() {
    let backend = Arc::new(StubLeaseBackend::default());
    let registry = LeaseRegistry::new(backend.clone());
    registry.register(instance(8080)).await.expect("register");
    registry.heartbeat().await;

    // Simulate lease expiry behind the registry's back.
    backend.remove_silently("/rpc/Echo:1.0/127.0.0.1:8080");

    tokio::time::sleep(Duration::from_secs(21)).await;

    // No renewal happened; only the original registration put remains.
    assert_eq!(backend.puts.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn heartbeat_is_idempotent() {
    let backend = Arc::new(StubLeaseBackend::default());
    let registry = LeaseRegistry::new(backend.clone());
    registry.register(instance(8080)).await.expect("register");
    registry.heartbeat().await;
    registry.heartbeat().await;

    tokio::time::sleep(Duration::from_secs(11)).await;

    // A doubled timer would have renewed twice per interval.
    assert_eq!(backend.puts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn destroy_removes_every_owned_key() {
    let backend = Arc::new(StubLeaseBackend::default());
    let registry = LeaseRegistry::new(backend.clone());
    registry.register(instance(8080)).await.expect("register");
    registry.register(instance(8081)).await.expect("register");

    registry.destroy().await;

    assert!(backend.store.lock().expect("lock poisoned").is_empty());
}
