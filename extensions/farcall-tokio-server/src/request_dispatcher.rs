use farcall::model::RpcResponse;
use farcall::protocol::{MessageBody, MessageCodec, ProtocolError, ProtocolMessage};
use farcall_registry::LocalRegistry;

/// Decodes one inbound frame, invokes the bound handler, and encodes the
/// response frame.
///
/// Handler failures — service or method not found, or the handler itself
/// erroring — are folded into the response body as a carried exception
/// rather than crossing the wire as anything other than a normal response.
/// Only an undecodable or unencodable frame surfaces as an error, and that
/// is fatal to the frame alone.
pub fn dispatch_frame(registry: &LocalRegistry, frame: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    let message = MessageCodec::decode(frame)?;
    let request = match message.body {
        MessageBody::Request(request) => request,
        MessageBody::Response(_) => {
            return Err(ProtocolError::UnsupportedMessageType(
                message.header.message_type,
            ));
        }
    };

    let response = match registry.invoke(&request.service_name, &request.method_name, &request.args)
    {
        Ok(reply) => RpcResponse::success(reply.data, reply.data_type),
        Err(error) => {
            tracing::error!(
                service = %request.service_name,
                method = %request.method_name,
                %error,
                "invocation failed"
            );
            RpcResponse::failure(error.to_string())
        }
    };

    let reply_message = ProtocolMessage {
        header: message.header.response_to(),
        body: MessageBody::Response(response),
    };
    MessageCodec::encode(&reply_message)
}
