use crate::model::{RpcRequest, RpcResponse};
use crate::serializer::{PayloadSerializer, SerializeError, SerializerKind};

/// JSON payload serializer; the default wire encoding.
pub struct JsonSerializer;

impl PayloadSerializer for JsonSerializer {
    fn kind(&self) -> SerializerKind {
        SerializerKind::JSON
    }

    fn serialize_request(&self, request: &RpcRequest) -> Result<Vec<u8>, SerializeError> {
        serde_json::to_vec(request).map_err(|e| SerializeError::Encode(e.to_string()))
    }

    fn deserialize_request(&self, bytes: &[u8]) -> Result<RpcRequest, SerializeError> {
        serde_json::from_slice(bytes).map_err(|e| SerializeError::Decode(e.to_string()))
    }

    fn serialize_response(&self, response: &RpcResponse) -> Result<Vec<u8>, SerializeError> {
        serde_json::to_vec(response).map_err(|e| SerializeError::Encode(e.to_string()))
    }

    fn deserialize_response(&self, bytes: &[u8]) -> Result<RpcResponse, SerializeError> {
        serde_json::from_slice(bytes).map_err(|e| SerializeError::Decode(e.to_string()))
    }
}
