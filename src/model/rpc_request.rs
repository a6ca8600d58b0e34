use crate::constants::DEFAULT_SERVICE_VERSION;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One outbound method invocation, immutable once built.
///
/// `service_name` identifies the target capability, not a single
/// implementation; `parameter_types` carries the declared concrete shape of
/// each argument so the receiving side can coerce the self-describing
/// `args` values back into the handler's expected types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub service_name: String,

    pub method_name: String,

    /// Type descriptors for `args`, in call order.
    #[serde(default)]
    pub parameter_types: Vec<String>,

    /// Argument values, in call order.
    #[serde(default)]
    pub args: Vec<Value>,

    pub service_version: String,
}

impl RpcRequest {
    /// Builds a request against the default service version.
    pub fn new(
        service_name: impl Into<String>,
        method_name: impl Into<String>,
        parameter_types: Vec<String>,
        args: Vec<Value>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            method_name: method_name.into(),
            parameter_types,
            args,
            service_version: DEFAULT_SERVICE_VERSION.to_string(),
        }
    }

    /// The registry lookup key for this request's target service,
    /// e.g. `Echo:1.0`.
    pub fn service_identifier(&self) -> String {
        format!("{}:{}", self.service_name, self.service_version)
    }
}
