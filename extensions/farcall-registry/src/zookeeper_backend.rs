use crate::ephemeral_backend::EphemeralBackend;
use crate::error::RegistryError;
use crate::watch_event::{WatchCallback, WatchEventKind};
use async_trait::async_trait;
use farcall::config::RegistryConfig;
use zookeeper_client as zk;

/// `EphemeralBackend` over a ZooKeeper ensemble.
pub struct ZooKeeperBackend {
    client: zk::Client,
}

impl ZooKeeperBackend {
    /// Connects to the ensemble named by `config.address`.
    pub async fn connect(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let client = zk::Client::connect(&config.address).await?;
        Ok(Self { client })
    }

    /// Creates every missing ancestor of `path` as a plain persistent node.
    async fn ensure_parents(&self, path: &str) -> Result<(), RegistryError> {
        let parent = match path.rfind('/') {
            Some(0) | None => return Ok(()),
            Some(index) => &path[..index],
        };
        let options = zk::CreateMode::Persistent.with_acls(zk::Acls::anyone_all());
        let mut prefix = String::new();
        for segment in parent.split('/').skip(1) {
            prefix.push('/');
            prefix.push_str(segment);
            match self.client.create(&prefix, &[], &options).await {
                Ok(_) => {}
                Err(zk::Error::NodeExists) => {}
                Err(error) => return Err(error.into()),
            }
        }
        Ok(())
    }
}

#[async_trait]
impl EphemeralBackend for ZooKeeperBackend {
    async fn create_ephemeral(&self, path: &str, data: &[u8]) -> Result<(), RegistryError> {
        self.ensure_parents(path).await?;
        let options = zk::CreateMode::Ephemeral.with_acls(zk::Acls::anyone_all());
        match self.client.create(path, data, &options).await {
            Ok(_) => Ok(()),
            // The node already belongs to this session; registration is
            // effectively a renewal.
            Err(zk::Error::NodeExists) => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    async fn delete_node(&self, path: &str) -> Result<(), RegistryError> {
        match self.client.delete(path, None).await {
            Ok(()) | Err(zk::Error::NoNode) => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    async fn children_data(&self, path: &str) -> Result<Vec<Vec<u8>>, RegistryError> {
        let children = match self.client.list_children(path).await {
            Ok(children) => children,
            Err(zk::Error::NoNode) => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };
        let mut values = Vec::with_capacity(children.len());
        for child in children {
            let child_path = format!("{path}/{child}");
            let (data, _stat) = self.client.get_data(&child_path).await?;
            values.push(data);
        }
        Ok(values)
    }

    async fn watch_path(&self, path: &str, on_event: WatchCallback) -> Result<(), RegistryError> {
        let mut watcher = self
            .client
            .watch(path, zk::AddWatchMode::PersistentRecursive)
            .await?;
        tokio::spawn(async move {
            loop {
                let event = watcher.changed().await;
                match event.event_type {
                    zk::EventType::NodeDeleted => on_event(WatchEventKind::Deleted),
                    zk::EventType::NodeDataChanged | zk::EventType::NodeChildrenChanged => {
                        on_event(WatchEventKind::Updated)
                    }
                    _ => {}
                }
            }
        });
        Ok(())
    }
}
