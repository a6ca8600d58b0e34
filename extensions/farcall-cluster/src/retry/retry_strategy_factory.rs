//! String-keyed construction of retry strategies. Resolved instances are
//! cached as singletons.

use crate::error::CallError;
use crate::retry::{
    ExponentialBackoffRetryStrategy, FixedIntervalRetryStrategy, LinearBackoffRetryStrategy,
    NoRetryStrategy, RetryStrategy,
};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Constructor registered for one retry strategy key.
pub type RetryStrategyCtor = fn() -> Arc<dyn RetryStrategy>;

pub const NO: &str = "no";
pub const FIXED_INTERVAL: &str = "fixedInterval";
pub const LINEAR: &str = "linear";
pub const EXPONENTIAL_BACKOFF: &str = "exponentialBackoff";

static CONSTRUCTORS: Lazy<RwLock<HashMap<&'static str, RetryStrategyCtor>>> = Lazy::new(|| {
    let mut table: HashMap<&'static str, RetryStrategyCtor> = HashMap::new();
    table.insert(NO, || Arc::new(NoRetryStrategy));
    table.insert(FIXED_INTERVAL, || Arc::new(FixedIntervalRetryStrategy));
    table.insert(LINEAR, || Arc::new(LinearBackoffRetryStrategy));
    table.insert(EXPONENTIAL_BACKOFF, || {
        Arc::new(ExponentialBackoffRetryStrategy)
    });
    RwLock::new(table)
});

static INSTANCES: Lazy<RwLock<HashMap<String, Arc<dyn RetryStrategy>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers a constructor under `key`, replacing any existing entry.
pub fn register_ctor(key: &'static str, ctor: RetryStrategyCtor) {
    CONSTRUCTORS
        .write()
        .expect("retry strategy table lock poisoned")
        .insert(key, ctor);
}

/// Returns the singleton instance registered under `key`.
pub fn resolve(key: &str) -> Result<Arc<dyn RetryStrategy>, CallError> {
    if let Some(instance) = INSTANCES
        .read()
        .expect("retry strategy table lock poisoned")
        .get(key)
    {
        return Ok(Arc::clone(instance));
    }
    let ctor = CONSTRUCTORS
        .read()
        .expect("retry strategy table lock poisoned")
        .get(key)
        .copied()
        .ok_or_else(|| CallError::UnknownVariant {
            kind: "retry strategy",
            key: key.to_string(),
        })?;
    let instance = ctor();
    INSTANCES
        .write()
        .expect("retry strategy table lock poisoned")
        .insert(key.to_string(), Arc::clone(&instance));
    Ok(instance)
}
