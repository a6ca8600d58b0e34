//! Note: This `RpcServer` carries no authentication or authorization
//! mechanisms and is best suited for trusted, internal network
//! communication. Any task that owns a `LocalRegistry` and a socket can
//! answer request frames; this implementation demonstrates one way to do
//! so over plain TCP.

use crate::request_dispatcher::dispatch_frame;
use farcall::protocol::ProtocolFramer;
use farcall_registry::LocalRegistry;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};

/// TCP RPC server answering request frames with the handlers bound in its
/// `LocalRegistry`.
pub struct RpcServer {
    registry: Arc<LocalRegistry>,
}

impl Default for RpcServer {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcServer {
    pub fn new() -> Self {
        RpcServer {
            registry: Arc::new(LocalRegistry::new()),
        }
    }

    /// Returns the dispatch table so handlers can be bound without tying
    /// the registration logic to the server itself.
    pub fn registry(&self) -> Arc<LocalRegistry> {
        Arc::clone(&self.registry)
    }

    /// Binds to `addr` and serves until the process exits.
    ///
    /// The address can be any type that implements `ToSocketAddrs`, such
    /// as a string "127.0.0.1:8080" or a `SocketAddr`.
    pub async fn serve<A: ToSocketAddrs>(self, addr: A) -> std::io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve_with_listener(listener).await
    }

    /// Starts the server with a pre-bound `TcpListener`.
    ///
    /// This is useful for cases like binding to an ephemeral port (port 0)
    /// and then retrieving the actual address.
    pub async fn serve_with_listener(self, listener: TcpListener) -> std::io::Result<()> {
        let address = listener.local_addr()?;
        tracing::info!(%address, "server running");
        loop {
            let (stream, peer) = listener.accept().await?;
            tracing::info!(%peer, "client connected");
            let registry = Arc::clone(&self.registry);
            tokio::spawn(async move {
                handle_connection(stream, peer, registry).await;
            });
        }
    }
}

/// Drives one connection until the peer hangs up.
///
/// Each connection owns its own framer state, isolated from every other
/// connection. A frame that fails to decode is logged and dropped; the
/// connection keeps serving subsequent frames.
async fn handle_connection(mut stream: TcpStream, peer: SocketAddr, registry: Arc<LocalRegistry>) {
    let mut framer = ProtocolFramer::new();
    let mut buf = [0u8; 4096];
    loop {
        match stream.read(&mut buf).await {
            Ok(0) => {
                tracing::info!(%peer, "client disconnected");
                break;
            }
            Ok(read_length) => {
                for frame in framer.read_bytes(&buf[..read_length]) {
                    match dispatch_frame(&registry, &frame) {
                        Ok(reply) => {
                            if let Err(error) = stream.write_all(&reply).await {
                                tracing::error!(%peer, %error, "failed to write response");
                                return;
                            }
                        }
                        Err(error) => {
                            tracing::error!(%peer, %error, "dropping undecodable frame");
                        }
                    }
                }
            }
            Err(error) => {
                tracing::error!(%peer, %error, "read failed");
                break;
            }
        }
    }
}
