use serde::{Deserialize, Serialize};
use std::path::Path;

/// Process-wide framework configuration.
///
/// Every strategy field is a string key resolved through the matching
/// registration-map factory, so deployments can swap implementations
/// without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    pub name: String,
    pub version: String,
    pub server_host: String,
    pub server_port: u16,
    /// Payload serializer name, e.g. `json`.
    pub serializer: String,
    /// Load balancer key, e.g. `roundRobin`.
    pub load_balancer: String,
    /// Retry strategy key, e.g. `no`.
    pub retry_strategy: String,
    /// Tolerance strategy key, e.g. `failFast`.
    pub tolerance_strategy: String,
    pub registry: RegistryConfig,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            name: "rpc".to_string(),
            version: "1.0".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            serializer: "json".to_string(),
            load_balancer: "roundRobin".to_string(),
            retry_strategy: "no".to_string(),
            tolerance_strategy: "failFast".to_string(),
            registry: RegistryConfig::default(),
        }
    }
}

impl RpcConfig {
    /// Loads configuration from a JSON file, falling back to the defaults
    /// when the file is missing or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = std::fs::read(path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| serde_json::from_slice(&bytes).map_err(|e| e.to_string()));
        match loaded {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "failed to load config, using defaults");
                RpcConfig::default()
            }
        }
    }
}

/// Selection and connection settings for the distributed registry backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry variant key: `etcd`, `zookeeper`, or `local`.
    pub registry: String,
    pub address: String,
    pub timeout_ms: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            registry: "etcd".to_string(),
            address: "http://127.0.0.1:2379".to_string(),
            timeout_ms: 10_000,
        }
    }
}
