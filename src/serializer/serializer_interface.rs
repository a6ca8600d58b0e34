use crate::model::{RpcRequest, RpcResponse};
use std::fmt;

/// Identifies a payload serializer on the wire (header byte 2) and in
/// configuration (by name).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SerializerKind {
    pub id: u8,
    pub name: &'static str,
}

impl SerializerKind {
    pub const JSON: SerializerKind = SerializerKind { id: 0, name: "json" };
    pub const MESSAGE_PACK: SerializerKind = SerializerKind {
        id: 1,
        name: "messagepack",
    };
}

#[derive(Debug, PartialEq)]
pub enum SerializeError {
    /// A payload could not be turned into bytes.
    Encode(String),
    /// Bytes could not be turned back into a payload.
    Decode(String),
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializeError::Encode(message) => write!(f, "serialize failed: {}", message),
            SerializeError::Decode(message) => write!(f, "deserialize failed: {}", message),
        }
    }
}

impl std::error::Error for SerializeError {}

/// Turns request and response payloads to and from bytes.
///
/// Implementations must be symmetric: a serialized value deserializes back
/// to equal application state. The concrete encoding is selected
/// per-message by the numeric id carried in the frame header.
pub trait PayloadSerializer: Send + Sync {
    fn kind(&self) -> SerializerKind;

    fn serialize_request(&self, request: &RpcRequest) -> Result<Vec<u8>, SerializeError>;

    fn deserialize_request(&self, bytes: &[u8]) -> Result<RpcRequest, SerializeError>;

    fn serialize_response(&self, response: &RpcResponse) -> Result<Vec<u8>, SerializeError>;

    fn deserialize_response(&self, bytes: &[u8]) -> Result<RpcResponse, SerializeError>;
}
