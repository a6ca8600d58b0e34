use async_trait::async_trait;
use farcall::model::{RpcRequest, RpcResponse, ServiceMetadata};
use farcall::protocol::{MessageBody, MessageCodec, MessageHeader, ProtocolFramer, ProtocolMessage};
use farcall::utils::increment_u64_id;
use farcall_cluster::{CallError, CallTransport};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::time::timeout;

/// How long a call waits for its response frame before the connection is
/// torn down.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

/// TCP transport that opens a fresh connection per call. Nothing is pooled
/// or multiplexed: one connection, one request frame, one response frame.
///
/// The asynchronous read path is bridged to the call contract through a
/// single-completion channel: a spawned reader drives the framer and
/// completes the channel with the first decoded message, while the caller
/// awaits it under a timeout. A timeout aborts the reader, which closes
/// the connection and leaves no orphaned waiter behind.
pub struct TcpCallTransport {
    serializer_id: u8,
    response_timeout: Duration,
}

impl TcpCallTransport {
    pub fn new(serializer_id: u8) -> Self {
        Self {
            serializer_id,
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
        }
    }

    pub fn with_timeout(serializer_id: u8, response_timeout: Duration) -> Self {
        Self {
            serializer_id,
            response_timeout,
        }
    }
}

#[async_trait]
impl CallTransport for TcpCallTransport {
    async fn call(
        &self,
        request: &RpcRequest,
        node: &ServiceMetadata,
    ) -> Result<RpcResponse, CallError> {
        let address = node.service_address();
        let stream = TcpStream::connect(&address).await?;
        let (mut read_half, mut write_half) = stream.into_split();

        let request_id = increment_u64_id();
        let message = ProtocolMessage {
            header: MessageHeader::request(self.serializer_id, request_id),
            body: MessageBody::Request(request.clone()),
        };
        let frame = MessageCodec::encode(&message)?;
        write_half.write_all(&frame).await?;
        tracing::debug!(request_id, node = %node.service_node_identifier(), "request sent");

        let (done_tx, done_rx) = oneshot::channel();
        let reader = tokio::spawn(async move {
            let mut framer = ProtocolFramer::new();
            let mut buf = [0u8; 4096];
            loop {
                match read_half.read(&mut buf).await {
                    Ok(0) => {
                        let _ = done_tx.send(Err(CallError::ConnectionClosed));
                        break;
                    }
                    Ok(read_length) => {
                        if let Some(frame) = framer.read_bytes(&buf[..read_length]).next() {
                            let result = MessageCodec::decode(&frame).map_err(CallError::from);
                            let _ = done_tx.send(result);
                            break;
                        }
                    }
                    Err(error) => {
                        let _ = done_tx.send(Err(CallError::Io(error)));
                        break;
                    }
                }
            }
        });

        let message = match timeout(self.response_timeout, done_rx).await {
            // Timed out: kill the reader so the socket closes and no
            // waiter is leaked.
            Err(_) => {
                reader.abort();
                return Err(CallError::Timeout);
            }
            Ok(Err(_sender_dropped)) => return Err(CallError::ConnectionClosed),
            Ok(Ok(result)) => result?,
        };

        tracing::debug!(request_id = message.header.request_id, "response received");
        match message.body {
            MessageBody::Response(response) => Ok(response),
            MessageBody::Request(_) => Err(CallError::UnexpectedMessage),
        }
    }
}
