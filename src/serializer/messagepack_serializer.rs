use crate::model::{RpcRequest, RpcResponse};
use crate::serializer::{PayloadSerializer, SerializeError, SerializerKind};

/// Binary payload serializer over MessagePack.
///
/// The encoding must stay self-describing: argument values are generic and
/// the decoder has to reconstruct them without a schema.
pub struct MessagePackSerializer;

impl PayloadSerializer for MessagePackSerializer {
    fn kind(&self) -> SerializerKind {
        SerializerKind::MESSAGE_PACK
    }

    fn serialize_request(&self, request: &RpcRequest) -> Result<Vec<u8>, SerializeError> {
        rmp_serde::to_vec_named(request).map_err(|e| SerializeError::Encode(e.to_string()))
    }

    fn deserialize_request(&self, bytes: &[u8]) -> Result<RpcRequest, SerializeError> {
        rmp_serde::from_slice(bytes).map_err(|e| SerializeError::Decode(e.to_string()))
    }

    fn serialize_response(&self, response: &RpcResponse) -> Result<Vec<u8>, SerializeError> {
        rmp_serde::to_vec_named(response).map_err(|e| SerializeError::Encode(e.to_string()))
    }

    fn deserialize_response(&self, bytes: &[u8]) -> Result<RpcResponse, SerializeError> {
        rmp_serde::from_slice(bytes).map_err(|e| SerializeError::Decode(e.to_string()))
    }
}
