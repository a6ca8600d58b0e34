use crate::error::RegistryError;
use crate::registry_interface::Registry;
use async_trait::async_trait;
use farcall::model::ServiceMetadata;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

/// Return value of a successfully invoked service method.
pub struct MethodReply {
    pub data: Value,
    /// Declared concrete shape of `data`, copied into the response so the
    /// peer can decode it.
    pub data_type: String,
}

/// Why an inbound invocation could not produce data.
#[derive(Debug)]
pub enum InvokeError {
    ServiceNotFound(String),
    MethodNotFound { service: String, method: String },
    /// The handler itself failed; the message is its error.
    Handler(String),
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvokeError::ServiceNotFound(service) => {
                write!(f, "service not found: {}", service)
            }
            InvokeError::MethodNotFound { service, method } => {
                write!(f, "method not found: {}.{}", service, method)
            }
            InvokeError::Handler(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for InvokeError {}

type MethodFn = Box<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>;

struct MethodBinding {
    returns: String,
    invoke: MethodFn,
}

/// Provider-side dispatch table mapping service and method names to local
/// handlers.
///
/// This is the in-process registry variant the server handler resolves
/// against; it never talks to a distributed backend, so the `Registry`
/// operations are intentionally inert. Handlers receive the request's raw
/// argument values and coerce them to their own parameter types.
#[derive(Default)]
pub struct LocalRegistry {
    bindings: RwLock<HashMap<String, HashMap<String, MethodBinding>>>,
}

impl LocalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds one method handler under `service` / `method`. `returns`
    /// names the concrete shape of the reply value for the peer's decoder.
    pub fn bind<F>(&self, service: &str, method: &str, returns: &str, handler: F)
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.bindings
            .write()
            .expect("dispatch table lock poisoned")
            .entry(service.to_string())
            .or_default()
            .insert(
                method.to_string(),
                MethodBinding {
                    returns: returns.to_string(),
                    invoke: Box::new(handler),
                },
            );
    }

    /// Looks up `service` / `method` and invokes the bound handler.
    pub fn invoke(
        &self,
        service: &str,
        method: &str,
        args: &[Value],
    ) -> Result<MethodReply, InvokeError> {
        let bindings = self.bindings.read().expect("dispatch table lock poisoned");
        let methods = bindings
            .get(service)
            .ok_or_else(|| InvokeError::ServiceNotFound(service.to_string()))?;
        let binding = methods
            .get(method)
            .ok_or_else(|| InvokeError::MethodNotFound {
                service: service.to_string(),
                method: method.to_string(),
            })?;
        match (binding.invoke)(args) {
            Ok(data) => Ok(MethodReply {
                data,
                data_type: binding.returns.clone(),
            }),
            Err(message) => Err(InvokeError::Handler(message)),
        }
    }
}

#[async_trait]
impl Registry for LocalRegistry {
    async fn register(&self, _metadata: ServiceMetadata) -> Result<(), RegistryError> {
        Ok(())
    }

    async fn unregister(&self, _metadata: &ServiceMetadata) -> Result<(), RegistryError> {
        Ok(())
    }

    async fn discover(
        &self,
        _service_identifier: &str,
    ) -> Result<Vec<ServiceMetadata>, RegistryError> {
        Ok(Vec::new())
    }

    async fn watch(&self, _node_identifier: &str) -> Result<(), RegistryError> {
        Ok(())
    }

    async fn heartbeat(&self) {}

    async fn destroy(&self) {}
}
