use crate::constants::{DEFAULT_SERVICE_GROUP, DEFAULT_SERVICE_VERSION};
use serde::{Deserialize, Serialize};

/// Everything a registry stores about one running service instance.
///
/// Created by a provider at startup, registered into the backend, kept
/// alive by lease renewal or by the backing session, and removed on
/// graceful shutdown or backend-detected liveness failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceMetadata {
    pub service_name: String,

    #[serde(default = "default_version")]
    pub service_version: String,

    pub service_host: String,

    pub service_port: u16,

    /// Reserved for future instance partitioning.
    #[serde(default = "default_group")]
    pub service_group: String,

    /// Reserved for weighted selection.
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_version() -> String {
    DEFAULT_SERVICE_VERSION.to_string()
}

fn default_group() -> String {
    DEFAULT_SERVICE_GROUP.to_string()
}

fn default_weight() -> u32 {
    1
}

impl ServiceMetadata {
    pub fn new(
        service_name: impl Into<String>,
        service_host: impl Into<String>,
        service_port: u16,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: default_version(),
            service_host: service_host.into(),
            service_port,
            service_group: default_group(),
            weight: default_weight(),
        }
    }

    /// Identifies the logical service regardless of instance,
    /// e.g. `Echo:1.0`.
    pub fn service_identifier(&self) -> String {
        format!("{}:{}", self.service_name, self.service_version)
    }

    /// Identifies this one running instance; the unique registry key,
    /// e.g. `Echo:1.0/127.0.0.1:8080`.
    pub fn service_node_identifier(&self) -> String {
        format!("{}/{}", self.service_identifier(), self.service_address())
    }

    /// The instance's dialable address, e.g. `127.0.0.1:8080`.
    pub fn service_address(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }
}
