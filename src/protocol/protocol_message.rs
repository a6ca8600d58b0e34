use crate::model::{RpcRequest, RpcResponse};
use crate::protocol::MessageHeader;

/// A typed envelope around one request or response payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolMessage {
    pub header: MessageHeader,
    pub body: MessageBody,
}

/// The decodable message bodies. Heartbeat and other frame kinds carry no
/// body representation here.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    Request(RpcRequest),
    Response(RpcResponse),
}
