use crate::tcp_call_transport::TcpCallTransport;
use farcall::config::RpcConfig;
use farcall::model::{RpcRequest, RpcResponse};
use farcall::serializer;
use farcall_cluster::balancer::{LoadBalancer, load_balancer_factory};
use farcall_cluster::retry::{RetryStrategy, retry_strategy_factory};
use farcall_cluster::tolerant::{ToleranceContext, ToleranceStrategy, tolerance_strategy_factory};
use farcall_cluster::{CallError, CallTransport};
use farcall_registry::{Registry, registry_factory};
use futures::future::BoxFuture;
use serde_json::Value;
use std::sync::Arc;

/// Client-side call orchestrator.
///
/// One `call` runs the whole outbound pipeline: discover candidate
/// instances (service cache first), narrow to one through the load
/// balancer, execute the transport round trip under the retry strategy,
/// and — only once retries are exhausted — hand the failure to the
/// tolerance strategy for the final decision.
pub struct ServiceCaller {
    registry: Arc<dyn Registry>,
    load_balancer: Arc<dyn LoadBalancer>,
    retry: Arc<dyn RetryStrategy>,
    tolerance: Arc<dyn ToleranceStrategy>,
    transport: Arc<dyn CallTransport>,
}

impl ServiceCaller {
    pub fn new(
        registry: Arc<dyn Registry>,
        load_balancer: Arc<dyn LoadBalancer>,
        retry: Arc<dyn RetryStrategy>,
        tolerance: Arc<dyn ToleranceStrategy>,
        transport: Arc<dyn CallTransport>,
    ) -> Self {
        Self {
            registry,
            load_balancer,
            retry,
            tolerance,
            transport,
        }
    }

    /// Builds a caller whose collaborators are resolved from `config`
    /// through the string-keyed factories.
    pub async fn from_config(config: &RpcConfig) -> Result<Self, CallError> {
        let registry = registry_factory::resolve(&config.registry).await?;
        let payload_serializer =
            serializer::by_name(&config.serializer).ok_or_else(|| CallError::UnknownVariant {
                kind: "serializer",
                key: config.serializer.clone(),
            })?;
        let load_balancer = load_balancer_factory::resolve(&config.load_balancer)?;
        let retry = retry_strategy_factory::resolve(&config.retry_strategy)?;
        let tolerance = tolerance_strategy_factory::resolve(&config.tolerance_strategy)?;
        let transport = Arc::new(TcpCallTransport::new(payload_serializer.kind().id));
        Ok(Self::new(
            registry,
            load_balancer,
            retry,
            tolerance,
            transport,
        ))
    }

    /// Invokes `request` against one discovered provider and returns the
    /// response data. A response carrying an exception surfaces as
    /// [`CallError::Application`].
    pub async fn call(&self, request: RpcRequest) -> Result<Value, CallError> {
        let service_identifier = request.service_identifier();
        let candidates = self.registry.discover(&service_identifier).await?;
        if candidates.is_empty() {
            return Err(CallError::NoProvider);
        }

        let selected = self
            .load_balancer
            .select(&request, &candidates)
            .ok_or(CallError::NoProvider)?;
        tracing::debug!(
            service = %service_identifier,
            node = %selected.service_node_identifier(),
            "provider selected"
        );

        let transport = &*self.transport;
        let request_ref = &request;
        let selected_ref = &selected;
        let operation = move || {
            let future: BoxFuture<'_, Result<RpcResponse, CallError>> =
                Box::pin(transport.call(request_ref, selected_ref));
            future
        };

        let response = match self.retry.attempt(&operation).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(
                    service = %service_identifier,
                    %error,
                    "call failed after retries, consulting tolerance strategy"
                );
                let context = ToleranceContext {
                    candidates: &candidates,
                    failed: &selected,
                    request: &request,
                    transport: &*self.transport,
                    retry: &*self.retry,
                };
                self.tolerance.recover(context, error).await?
            }
        };

        if let Some(exception) = response.exception {
            return Err(CallError::Application { message: exception });
        }
        Ok(response.data.unwrap_or(Value::Null))
    }
}
