use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of one invocation, produced on the provider and decoded on the
/// caller.
///
/// `data_type` names the concrete shape of `data`; a generic value decoded
/// from the wire cannot be interpreted without it. `exception` is set only
/// when the invoked method itself failed — transport-level failures never
/// reach this struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub data: Option<Value>,

    pub data_type: Option<String>,

    /// Human-readable outcome, `"ok"` on success.
    #[serde(default)]
    pub message: String,

    /// The carried application error, present only on failure.
    pub exception: Option<String>,
}

impl RpcResponse {
    pub fn success(data: Value, data_type: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            data_type: Some(data_type.into()),
            message: "ok".to_string(),
            exception: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            data: None,
            data_type: None,
            message: message.clone(),
            exception: Some(message),
        }
    }
}
