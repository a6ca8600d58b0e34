use crate::balancer::LoadBalancer;
use farcall::model::{RpcRequest, ServiceMetadata};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Rotates through candidates with a counter shared across calls.
///
/// The counter only ever increases; the index is its value modulo the
/// candidate count, so concurrent callers each take a distinct slot.
pub struct RoundRobinLoadBalancer {
    current_index: AtomicUsize,
}

impl RoundRobinLoadBalancer {
    pub fn new() -> Self {
        Self {
            current_index: AtomicUsize::new(0),
        }
    }
}

impl Default for RoundRobinLoadBalancer {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadBalancer for RoundRobinLoadBalancer {
    fn select(
        &self,
        _request: &RpcRequest,
        candidates: &[ServiceMetadata],
    ) -> Option<ServiceMetadata> {
        match candidates {
            [] => None,
            // A single candidate needs no rotation.
            [only] => Some(only.clone()),
            _ => {
                let increment = self.current_index.fetch_add(1, Ordering::Relaxed);
                Some(candidates[increment % candidates.len()].clone())
            }
        }
    }
}
