use crate::error::RegistryError;
use crate::lease_backend::LeaseBackend;
use crate::watch_event::{WatchCallback, WatchEventKind};
use async_trait::async_trait;
use etcd_client::{Client, ConnectOptions, EventType, GetOptions, PutOptions};
use farcall::config::RegistryConfig;
use std::time::Duration;

/// `LeaseBackend` over an etcd cluster.
///
/// The client is cheaply cloneable; each operation clones it because the
/// underlying API wants exclusive access per call.
pub struct EtcdLeaseBackend {
    client: Client,
}

impl EtcdLeaseBackend {
    /// Connects to the etcd endpoint named by `config.address`.
    pub async fn connect(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let options =
            ConnectOptions::new().with_connect_timeout(Duration::from_millis(config.timeout_ms));
        let client = Client::connect([config.address.as_str()], Some(options)).await?;
        Ok(Self { client })
    }
}

#[async_trait]
impl LeaseBackend for EtcdLeaseBackend {
    async fn put_with_lease(
        &self,
        key: &str,
        value: &[u8],
        ttl_secs: i64,
    ) -> Result<(), RegistryError> {
        let mut client = self.client.clone();
        let lease = client.lease_grant(ttl_secs, None).await?;
        client
            .put(key, value, Some(PutOptions::new().with_lease(lease.id())))
            .await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, RegistryError> {
        let mut client = self.client.clone();
        let response = client.get(key, None).await?;
        Ok(response.kvs().first().map(|kv| kv.value().to_vec()))
    }

    async fn get_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, RegistryError> {
        let mut client = self.client.clone();
        let response = client
            .get(prefix, Some(GetOptions::new().with_prefix()))
            .await?;
        let mut entries = Vec::with_capacity(response.kvs().len());
        for kv in response.kvs() {
            entries.push((kv.key_str()?.to_string(), kv.value().to_vec()));
        }
        Ok(entries)
    }

    async fn delete(&self, key: &str) -> Result<(), RegistryError> {
        let mut client = self.client.clone();
        client.delete(key, None).await?;
        Ok(())
    }

    async fn watch_key(&self, key: &str, on_event: WatchCallback) -> Result<(), RegistryError> {
        let mut client = self.client.clone();
        let (watcher, mut stream) = client.watch(key, None).await?;
        tokio::spawn(async move {
            // The watcher handle must stay alive for the stream to keep
            // delivering events.
            let _watcher = watcher;
            while let Ok(Some(response)) = stream.message().await {
                for event in response.events() {
                    match event.event_type() {
                        EventType::Delete => on_event(WatchEventKind::Deleted),
                        EventType::Put => on_event(WatchEventKind::Updated),
                    }
                }
            }
        });
        Ok(())
    }
}
