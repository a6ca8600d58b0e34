use crate::balancer::LoadBalancer;
use farcall::model::{RpcRequest, ServiceMetadata};
use rand::Rng;

/// Uniform random selection.
pub struct RandomLoadBalancer;

impl LoadBalancer for RandomLoadBalancer {
    fn select(
        &self,
        _request: &RpcRequest,
        candidates: &[ServiceMetadata],
    ) -> Option<ServiceMetadata> {
        match candidates {
            [] => None,
            [only] => Some(only.clone()),
            _ => {
                let index = rand::rng().random_range(0..candidates.len());
                Some(candidates[index].clone())
            }
        }
    }
}
