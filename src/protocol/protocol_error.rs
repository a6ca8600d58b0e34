use crate::protocol::MessageType;
use crate::serializer::SerializeError;
use std::fmt;

/// Errors raised while encoding or decoding a single frame. All of these
/// are fatal to the frame in question; the connection that delivered it may
/// continue.
#[derive(Debug, PartialEq)]
pub enum ProtocolError {
    /// Byte 0 did not match the protocol magic number.
    InvalidMagic(u8),

    /// No payload serializer is registered under the header's id.
    UnknownSerializer(u8),

    /// The message-type byte names no known variant.
    UnknownMessageType(u8),

    /// The status byte names no known variant.
    UnknownStatus(u8),

    /// A valid header value that is not a decodable body (heartbeat/other),
    /// or a body that arrived where the other kind was required.
    UnsupportedMessageType(MessageType),

    /// Fewer bytes were available than the header promised.
    IncompleteMessage { expected: usize, actual: usize },

    /// The payload serializer rejected the body.
    Serialize(SerializeError),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::InvalidMagic(byte) => {
                write!(f, "invalid magic byte: {:#04x}", byte)
            }
            ProtocolError::UnknownSerializer(id) => {
                write!(f, "no serializer registered for id {}", id)
            }
            ProtocolError::UnknownMessageType(byte) => {
                write!(f, "unknown message type byte: {}", byte)
            }
            ProtocolError::UnknownStatus(byte) => {
                write!(f, "unknown status byte: {}", byte)
            }
            ProtocolError::UnsupportedMessageType(message_type) => {
                write!(f, "unsupported message type: {:?}", message_type)
            }
            ProtocolError::IncompleteMessage { expected, actual } => {
                write!(
                    f,
                    "incomplete message: expected {} bytes, got {}",
                    expected, actual
                )
            }
            ProtocolError::Serialize(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::Serialize(error) => Some(error),
            _ => None,
        }
    }
}

impl From<SerializeError> for ProtocolError {
    fn from(error: SerializeError) -> Self {
        ProtocolError::Serialize(error)
    }
}
