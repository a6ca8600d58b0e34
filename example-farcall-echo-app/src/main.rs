use async_trait::async_trait;
use farcall::model::{RpcRequest, ServiceMetadata};
use farcall_cluster::balancer::load_balancer_factory;
use farcall_cluster::retry::retry_strategy_factory;
use farcall_cluster::tolerant::tolerance_strategy_factory;
use farcall_registry::{Registry, RegistryError};
use farcall_tokio_client::{ServiceCaller, TcpCallTransport};
use farcall_tokio_server::RpcServer;
use farcall_tokio_server::utils::bind_tcp_listener_on_random_port;
use serde_json::json;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Registry with a fixed instance list, standing in for a coordination
/// backend so the demo runs entirely in one process.
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

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Bind to a random available port
    let (listener, port) = bind_tcp_listener_on_random_port()
        .await
        .expect("failed to bind listener");

    {
        let server = RpcServer::new();
        let registry = server.registry();

        // Bind server methods
        registry.bind("Echo", "identity", "string", |args| {
            args.first().cloned().ok_or_else(|| "missing argument".to_string())
        });
        registry.bind("Echo", "shout", "string", |args| {
            let text: String = args
                .first()
                .and_then(|value| value.as_str().map(str::to_string))
                .ok_or_else(|| "missing argument".to_string())?;
            Ok(json!(text.to_uppercase()))
        });

        // Spawn the server using the pre-bound listener
        let _server_task = tokio::spawn(async move {
            let _ = server.serve_with_listener(listener).await;
        });
    }

    {
        let provider = ServiceMetadata::new("Echo", "127.0.0.1", port);
        let registry = Arc::new(FixedRegistry {
            instances: vec![provider],
        });

        let caller = ServiceCaller::new(
            registry,
            load_balancer_factory::resolve("roundRobin").expect("load balancer"),
            retry_strategy_factory::resolve("no").expect("retry strategy"),
            tolerance_strategy_factory::resolve("failFast").expect("tolerance strategy"),
            Arc::new(TcpCallTransport::new(0)),
        );

        let res1 = caller
            .call(RpcRequest::new(
                "Echo",
                "identity",
                vec!["string".to_string()],
                vec![json!("hi")],
            ))
            .await;
        let res2 = caller
            .call(RpcRequest::new(
                "Echo",
                "shout",
                vec!["string".to_string()],
                vec![json!("quiet words")],
            ))
            .await;

        println!("Result from identity(): {:?}", res1);
        println!("Result from shout(): {:?}", res2);
    }
}
