use farcall::model::ServiceMetadata;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory map from service identifier to the last discovered instance
/// list, held to avoid a registry round-trip on every call.
///
/// Entries are replaced wholesale by discovery and cleared wholesale by
/// watch events — once a watch reports a deletion anywhere, no stale hit
/// may be served for any service. Reads from discovery and clears from
/// watch callbacks run concurrently.
#[derive(Default)]
pub struct ServiceCache {
    entries: RwLock<HashMap<String, Vec<ServiceMetadata>>>,
}

impl ServiceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached instance list for one service, if any.
    pub fn read(&self, service_identifier: &str) -> Option<Vec<ServiceMetadata>> {
        self.entries
            .read()
            .expect("service cache lock poisoned")
            .get(service_identifier)
            .cloned()
    }

    /// Replaces the cached instance list for one service.
    pub fn write(&self, service_identifier: &str, instances: Vec<ServiceMetadata>) {
        self.entries
            .write()
            .expect("service cache lock poisoned")
            .insert(service_identifier.to_string(), instances);
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .expect("service cache lock poisoned")
            .clear();
    }
}
