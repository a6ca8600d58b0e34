mod message_codec;
mod message_header;
mod message_status;
mod message_type;
mod protocol_error;
mod protocol_framer;
mod protocol_message;

pub use message_codec::MessageCodec;
pub use message_header::MessageHeader;
pub use message_status::MessageStatus;
pub use message_type::MessageType;
pub use protocol_error::ProtocolError;
pub use protocol_framer::{FramedMessageIterator, ProtocolFramer};
pub use protocol_message::{MessageBody, ProtocolMessage};
