use crate::constants::{PROTOCOL_MAGIC, PROTOCOL_VERSION};
use crate::protocol::{MessageStatus, MessageType};

/// The fixed 17-byte header preceding every message body.
///
/// `request_id` correlates a response with its request and must be unique
/// per outstanding call on a connection. `body_length` is authoritative:
/// the stream framer and the codec read exactly that many body bytes,
/// never more.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageHeader {
    pub magic: u8,
    pub version: u8,
    pub serializer_id: u8,
    pub message_type: MessageType,
    pub status: MessageStatus,
    pub request_id: u64,
    pub body_length: u32,
}

impl MessageHeader {
    /// Header for a fresh outbound request. The body length is filled in by
    /// the codec at encode time.
    pub fn request(serializer_id: u8, request_id: u64) -> Self {
        Self {
            magic: PROTOCOL_MAGIC,
            version: PROTOCOL_VERSION,
            serializer_id,
            message_type: MessageType::Request,
            status: MessageStatus::Ok,
            request_id,
            body_length: 0,
        }
    }

    /// Header for the response to this request: same correlation id and
    /// serializer, type flipped to `Response`, status `Ok`.
    pub fn response_to(&self) -> Self {
        Self {
            magic: self.magic,
            version: self.version,
            serializer_id: self.serializer_id,
            message_type: MessageType::Response,
            status: MessageStatus::Ok,
            request_id: self.request_id,
            body_length: 0,
        }
    }
}
