//! String-keyed construction of load balancers.
//!
//! Resolved instances are cached as singletons, so state like the
//! round-robin counter is shared by every caller that resolves the same
//! key.

use crate::balancer::{
    ConsistentHashLoadBalancer, LoadBalancer, RandomLoadBalancer, RoundRobinLoadBalancer,
};
use crate::error::CallError;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Constructor registered for one load balancer key.
pub type LoadBalancerCtor = fn() -> Arc<dyn LoadBalancer>;

pub const RANDOM: &str = "random";
pub const ROUND_ROBIN: &str = "roundRobin";
pub const CONSISTENT_HASH: &str = "consistentHash";
/// Reserved; no implementation is registered under this key yet.
pub const WEIGHTED_ROUND_ROBIN: &str = "weightedRoundRobin";

static CONSTRUCTORS: Lazy<RwLock<HashMap<&'static str, LoadBalancerCtor>>> = Lazy::new(|| {
    let mut table: HashMap<&'static str, LoadBalancerCtor> = HashMap::new();
    table.insert(RANDOM, || Arc::new(RandomLoadBalancer));
    table.insert(ROUND_ROBIN, || Arc::new(RoundRobinLoadBalancer::new()));
    table.insert(CONSISTENT_HASH, || Arc::new(ConsistentHashLoadBalancer));
    RwLock::new(table)
});

static INSTANCES: Lazy<RwLock<HashMap<String, Arc<dyn LoadBalancer>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers a constructor under `key`, replacing any existing entry.
pub fn register_ctor(key: &'static str, ctor: LoadBalancerCtor) {
    CONSTRUCTORS
        .write()
        .expect("load balancer table lock poisoned")
        .insert(key, ctor);
}

/// Returns the singleton instance registered under `key`.
pub fn resolve(key: &str) -> Result<Arc<dyn LoadBalancer>, CallError> {
    if let Some(instance) = INSTANCES
        .read()
        .expect("load balancer table lock poisoned")
        .get(key)
    {
        return Ok(Arc::clone(instance));
    }
    let ctor = CONSTRUCTORS
        .read()
        .expect("load balancer table lock poisoned")
        .get(key)
        .copied()
        .ok_or_else(|| CallError::UnknownVariant {
            kind: "load balancer",
            key: key.to_string(),
        })?;
    let instance = ctor();
    INSTANCES
        .write()
        .expect("load balancer table lock poisoned")
        .insert(key.to_string(), Arc::clone(&instance));
    Ok(instance)
}
