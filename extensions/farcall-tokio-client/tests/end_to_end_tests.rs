use async_trait::async_trait;
use farcall::model::{RpcRequest, ServiceMetadata};
use farcall::protocol::{
    MessageBody, MessageCodec, MessageHeader, MessageType, ProtocolFramer, ProtocolMessage,
};
use farcall_cluster::balancer::{LoadBalancer, RoundRobinLoadBalancer};
use farcall_cluster::retry::NoRetryStrategy;
use farcall_cluster::tolerant::{FailFastStrategy, FailOverStrategy};
use farcall_cluster::CallError;
use farcall_registry::{Registry, RegistryError};
use farcall_tokio_client::{ServiceCaller, TcpCallTransport};
use farcall_tokio_server::RpcServer;
use farcall_tokio_server::utils::bind_tcp_listener_on_random_port;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Registry with a fixed instance list, standing in for a coordination
/// backend.
struct FixedRegistry {
    instances: Vec<ServiceMetadata>,
}

#[async_trait]
impl Registry for FixedRegistry {
    async fn register(&self, _metadata: ServiceMetadata) -> Result<(), RegistryError> {
        Ok(())
    }

    async fn unregister(&self, _metadata: &ServiceMetadata) -> Result<(), RegistryError> {
        Ok(())
    }

    async fn discover(
        &self,
        service_identifier: &str,
    ) -> Result<Vec<ServiceMetadata>, RegistryError> {
        Ok(self
            .instances
            .iter()
            .filter(|instance| instance.service_identifier() == service_identifier)
            .cloned()
            .collect())
    }

    async fn watch(&self, _node_identifier: &str) -> Result<(), RegistryError> {
        Ok(())
    }

    async fn heartbeat(&self) {}

    async fn destroy(&self) {}
}

/// Always selects the first candidate, making fail-over scenarios
/// deterministic.
struct FirstLoadBalancer;

impl LoadBalancer for FirstLoadBalancer {
    fn select(
        &self,
        _request: &RpcRequest,
        candidates: &[ServiceMetadata],
    ) -> Option<ServiceMetadata> {
        candidates.first().cloned()
    }
}

async fn start_echo_server() -> u16 {
    let (listener, port) = bind_tcp_listener_on_random_port()
        .await
        .expect("failed to bind listener");
    let server = RpcServer::new();
    let registry = server.registry();
    registry.bind("Echo", "identity", "string", |args| {
        args.first()
            .cloned()
            .ok_or_else(|| "missing argument".to_string())
    });
    registry.bind("Echo", "explode", "string", |_args| {
        Err("deliberate failure".to_string())
    });
    tokio::spawn(async move {
        let _ = server.serve_with_listener(listener).await;
    });
    port
}

fn caller_for(port: u16, service_name: &str) -> ServiceCaller {
    let registry = Arc::new(FixedRegistry {
        instances: vec![ServiceMetadata::new(service_name, "127.0.0.1", port)],
    });
    ServiceCaller::new(
        registry,
        Arc::new(RoundRobinLoadBalancer::new()),
        Arc::new(NoRetryStrategy),
        Arc::new(FailFastStrategy),
        Arc::new(TcpCallTransport::new(0)),
    )
}

fn identity_request() -> RpcRequest {
    RpcRequest::new(
        "Echo",
        "identity",
        vec!["string".to_string()],
        vec![json!("hi")],
    )
}

#[tokio::test]
async fn calls_a_remote_method_end_to_end() {
    let port = start_echo_server().await;
    let caller = caller_for(port, "Echo");

    let result = caller.call(identity_request()).await.expect("call failed");

    assert_eq!(result, json!("hi"));
}

#[tokio::test]
async fn the_response_echoes_the_request_correlation_id() {
    let port = start_echo_server().await;

    let message = ProtocolMessage {
        header: MessageHeader::request(0, 4242),
        body: MessageBody::Request(identity_request()),
    };
    let frame = MessageCodec::encode(&message).expect("encode failed");

    let mut stream = TcpStream::connect(("127.0.0.1", port))
        .await
        .expect("connect failed");
    stream.write_all(&frame).await.expect("write failed");

    let mut framer = ProtocolFramer::new();
    let mut buf = [0u8; 4096];
    let reply_frame = loop {
        let read_length = stream.read(&mut buf).await.expect("read failed");
        assert_ne!(read_length, 0, "server hung up early");
        if let Some(reply) = framer.read_bytes(&buf[..read_length]).next() {
            break reply;
        }
    };

    let reply = MessageCodec::decode(&reply_frame).expect("decode failed");
    assert_eq!(reply.header.request_id, 4242);
    assert_eq!(reply.header.message_type, MessageType::Response);
    match reply.body {
        MessageBody::Response(response) => assert_eq!(response.data, Some(json!("hi"))),
        other => panic!("unexpected body: {other:?}"),
    }
}

#[tokio::test]
async fn an_application_error_surfaces_as_a_call_failure() {
    let port = start_echo_server().await;
    let caller = caller_for(port, "Echo");

    let error = caller
        .call(RpcRequest::new(
            "Echo",
            "explode",
            vec!["string".to_string()],
            vec![],
        ))
        .await
        .expect_err("handler always fails");

    match error {
        CallError::Application { message } => assert!(message.contains("deliberate failure")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn an_unknown_service_is_reported_in_band() {
    let port = start_echo_server().await;
    let caller = caller_for(port, "Missing");

    let error = caller
        .call(RpcRequest::new(
            "Missing",
            "identity",
            vec!["string".to_string()],
            vec![json!("hi")],
        ))
        .await
        .expect_err("service is not bound on the provider");

    match error {
        CallError::Application { message } => assert!(message.contains("service not found")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn an_empty_discovery_short_circuits_with_no_provider() {
    let caller = ServiceCaller::new(
        Arc::new(FixedRegistry { instances: vec![] }),
        Arc::new(RoundRobinLoadBalancer::new()),
        Arc::new(NoRetryStrategy),
        Arc::new(FailFastStrategy),
        Arc::new(TcpCallTransport::new(0)),
    );

    let error = caller
        .call(identity_request())
        .await
        .expect_err("nothing is registered");

    assert!(matches!(error, CallError::NoProvider));
}

#[tokio::test]
async fn a_silent_server_times_the_call_out() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind listener");
    let port = listener.local_addr().expect("local addr").port();

    // Accept connections and hold them open without ever answering.
    tokio::spawn(async move {
        let mut parked = Vec::new();
        loop {
            if let Ok((stream, _)) = listener.accept().await {
                parked.push(stream);
            }
        }
    });

    let transport = TcpCallTransport::with_timeout(0, Duration::from_millis(200));
    let registry = Arc::new(FixedRegistry {
        instances: vec![ServiceMetadata::new("Echo", "127.0.0.1", port)],
    });
    let caller = ServiceCaller::new(
        registry,
        Arc::new(RoundRobinLoadBalancer::new()),
        Arc::new(NoRetryStrategy),
        Arc::new(FailFastStrategy),
        Arc::new(transport),
    );

    let error = caller
        .call(identity_request())
        .await
        .expect_err("the server never answers");

    assert!(matches!(error, CallError::Timeout));
}

#[tokio::test]
async fn a_corrupt_frame_does_not_kill_the_connection() {
    let port = start_echo_server().await;

    let mut stream = TcpStream::connect(("127.0.0.1", port))
        .await
        .expect("connect failed");

    // A correctly framed but non-protocol message: wrong magic, zero-length
    // body. The server must drop it and keep serving the connection.
    let mut garbage = vec![0u8; 17];
    garbage[0] = 0x7f;
    stream.write_all(&garbage).await.expect("write failed");

    let message = ProtocolMessage {
        header: MessageHeader::request(0, 7),
        body: MessageBody::Request(identity_request()),
    };
    let frame = MessageCodec::encode(&message).expect("encode failed");
    stream.write_all(&frame).await.expect("write failed");

    let mut framer = ProtocolFramer::new();
    let mut buf = [0u8; 4096];
    let reply_frame = loop {
        let read_length = stream.read(&mut buf).await.expect("read failed");
        assert_ne!(read_length, 0, "server hung up after the corrupt frame");
        if let Some(reply) = framer.read_bytes(&buf[..read_length]).next() {
            break reply;
        }
    };

    let reply = MessageCodec::decode(&reply_frame).expect("decode failed");
    assert_eq!(reply.header.request_id, 7);
}

#[tokio::test]
async fn fail_over_recovers_when_the_selected_instance_is_down() {
    let live_port = start_echo_server().await;

    // The first candidate points at a closed port; fail-over must land on
    // the healthy second instance.
    let dead = ServiceMetadata::new("Echo", "127.0.0.1", 1);
    let live = ServiceMetadata::new("Echo", "127.0.0.1", live_port);
    let caller = ServiceCaller::new(
        Arc::new(FixedRegistry {
            instances: vec![dead, live],
        }),
        Arc::new(FirstLoadBalancer),
        Arc::new(NoRetryStrategy),
        Arc::new(FailOverStrategy),
        Arc::new(TcpCallTransport::new(0)),
    );

    let result = caller.call(identity_request()).await.expect("call failed");

    assert_eq!(result, json!("hi"));
}
