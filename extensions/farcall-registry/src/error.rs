use std::fmt;

/// Errors surfaced by registry variants.
///
/// Backend failures are always surfaced to the caller, never silently
/// swallowed; an *empty* discovery result is not an error and is returned
/// as an empty list instead.
#[derive(Debug)]
pub enum RegistryError {
    /// The coordination backend reported a connection or protocol failure.
    Backend { message: String },

    /// A discovery query could not be completed.
    DiscoveryFailed { message: String },

    /// A registry value could not be decoded as service metadata.
    InvalidMetadata { message: String },

    /// No registry variant is registered under the requested key.
    UnknownVariant(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Backend { message } => {
                write!(f, "registry backend error: {}", message)
            }
            RegistryError::DiscoveryFailed { message } => {
                write!(f, "service discovery failed: {}", message)
            }
            RegistryError::InvalidMetadata { message } => {
                write!(f, "invalid service metadata: {}", message)
            }
            RegistryError::UnknownVariant(key) => {
                write!(f, "no registry variant registered under key: {}", key)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<etcd_client::Error> for RegistryError {
    fn from(error: etcd_client::Error) -> Self {
        RegistryError::Backend {
            message: error.to_string(),
        }
    }
}

impl From<zookeeper_client::Error> for RegistryError {
    fn from(error: zookeeper_client::Error) -> Self {
        RegistryError::Backend {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(error: serde_json::Error) -> Self {
        RegistryError::InvalidMetadata {
            message: error.to_string(),
        }
    }
}
