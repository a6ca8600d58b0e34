use crate::constants::{
    MESSAGE_BODY_LENGTH_OFFSET, MESSAGE_HEADER_SIZE, MESSAGE_MAGIC_OFFSET,
    MESSAGE_REQUEST_ID_OFFSET, MESSAGE_SERIALIZER_OFFSET, MESSAGE_STATUS_OFFSET,
    MESSAGE_TYPE_OFFSET, MESSAGE_VERSION_OFFSET, PROTOCOL_MAGIC,
};
use crate::protocol::{
    MessageBody, MessageHeader, MessageStatus, MessageType, ProtocolError, ProtocolMessage,
};
use crate::serializer;

/// Provides encoding and decoding functionality for protocol messages.
///
/// `MessageCodec` writes the fixed header field-by-field in wire order,
/// followed by the body bytes produced by the serializer the header names.
/// Decoding walks the same offsets back, validating the magic byte first so
/// non-protocol traffic is rejected before anything else is interpreted.
pub struct MessageCodec;

impl MessageCodec {
    /// Encodes a message into a complete wire frame.
    ///
    /// The header's `body_length` field is ignored on input; the actual
    /// serialized body length is written in its place. Fails if no
    /// serializer is registered under the header's serializer id.
    pub fn encode(message: &ProtocolMessage) -> Result<Vec<u8>, ProtocolError> {
        let header = &message.header;
        let payload_serializer = serializer::by_id(header.serializer_id)
            .ok_or(ProtocolError::UnknownSerializer(header.serializer_id))?;

        let body_bytes = match &message.body {
            MessageBody::Request(request) => payload_serializer.serialize_request(request)?,
            MessageBody::Response(response) => payload_serializer.serialize_response(response)?,
        };

        let mut buf = Vec::with_capacity(MESSAGE_HEADER_SIZE + body_bytes.len());
        buf.push(header.magic);
        buf.push(header.version);
        buf.push(header.serializer_id);
        buf.push(header.message_type.into());
        buf.push(header.status.into());
        buf.extend(&header.request_id.to_be_bytes());
        buf.extend(&(body_bytes.len() as u32).to_be_bytes());
        buf.extend(&body_bytes);

        Ok(buf)
    }

    /// Decodes one complete wire frame back into a typed message.
    ///
    /// Exactly `body_length` bytes after the header are interpreted; bytes
    /// beyond that are never trusted. Heartbeat and other frame kinds are
    /// accepted header values but not valid decode targets.
    pub fn decode(buf: &[u8]) -> Result<ProtocolMessage, ProtocolError> {
        if buf.len() < MESSAGE_HEADER_SIZE {
            return Err(ProtocolError::IncompleteMessage {
                expected: MESSAGE_HEADER_SIZE,
                actual: buf.len(),
            });
        }

        let magic = buf[MESSAGE_MAGIC_OFFSET];
        if magic != PROTOCOL_MAGIC {
            return Err(ProtocolError::InvalidMagic(magic));
        }

        let version = buf[MESSAGE_VERSION_OFFSET];
        let serializer_id = buf[MESSAGE_SERIALIZER_OFFSET];
        let message_type = MessageType::try_from(buf[MESSAGE_TYPE_OFFSET])
            .map_err(|_| ProtocolError::UnknownMessageType(buf[MESSAGE_TYPE_OFFSET]))?;
        let status = MessageStatus::try_from(buf[MESSAGE_STATUS_OFFSET])
            .map_err(|_| ProtocolError::UnknownStatus(buf[MESSAGE_STATUS_OFFSET]))?;

        let mut request_id_bytes = [0u8; 8];
        request_id_bytes
            .copy_from_slice(&buf[MESSAGE_REQUEST_ID_OFFSET..MESSAGE_BODY_LENGTH_OFFSET]);
        let request_id = u64::from_be_bytes(request_id_bytes);

        let mut body_length_bytes = [0u8; 4];
        body_length_bytes.copy_from_slice(&buf[MESSAGE_BODY_LENGTH_OFFSET..MESSAGE_HEADER_SIZE]);
        let body_length = u32::from_be_bytes(body_length_bytes) as usize;

        let body_end = MESSAGE_HEADER_SIZE + body_length;
        if buf.len() < body_end {
            return Err(ProtocolError::IncompleteMessage {
                expected: body_end,
                actual: buf.len(),
            });
        }
        let body_bytes = &buf[MESSAGE_HEADER_SIZE..body_end];

        let payload_serializer = serializer::by_id(serializer_id)
            .ok_or(ProtocolError::UnknownSerializer(serializer_id))?;
        let body = match message_type {
            MessageType::Request => {
                MessageBody::Request(payload_serializer.deserialize_request(body_bytes)?)
            }
            MessageType::Response => {
                MessageBody::Response(payload_serializer.deserialize_response(body_bytes)?)
            }
            other => return Err(ProtocolError::UnsupportedMessageType(other)),
        };

        let header = MessageHeader {
            magic,
            version,
            serializer_id,
            message_type,
            status,
            request_id,
            body_length: body_length as u32,
        };

        Ok(ProtocolMessage { header, body })
    }
}
