mod ephemeral_backend;
mod ephemeral_registry;
mod error;
mod etcd_backend;
mod lease_backend;
mod lease_registry;
mod local_registry;
pub mod registry_factory;
mod registry_interface;
mod service_cache;
mod watch_event;
mod zookeeper_backend;

pub use ephemeral_backend::EphemeralBackend;
pub use ephemeral_registry::EphemeralRegistry;
pub use error::RegistryError;
pub use etcd_backend::EtcdLeaseBackend;
pub use lease_backend::LeaseBackend;
pub use lease_registry::LeaseRegistry;
pub use local_registry::{InvokeError, LocalRegistry, MethodReply};
pub use registry_interface::Registry;
pub use service_cache::ServiceCache;
pub use watch_event::{WatchCallback, WatchEventKind};
pub use zookeeper_backend::ZooKeeperBackend;
