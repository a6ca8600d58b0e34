//! String-keyed construction of tolerance strategies. Resolved instances
//! are cached as singletons.

use crate::error::CallError;
use crate::tolerant::{
    FailBackStrategy, FailFastStrategy, FailOverStrategy, FailSilentStrategy, ToleranceStrategy,
};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Constructor registered for one tolerance strategy key.
pub type ToleranceStrategyCtor = fn() -> Arc<dyn ToleranceStrategy>;

pub const FAIL_FAST: &str = "failFast";
pub const FAIL_SAFE: &str = "failSafe";
pub const FAIL_OVER: &str = "failOver";
pub const FAIL_BACK: &str = "failBack";

static CONSTRUCTORS: Lazy<RwLock<HashMap<&'static str, ToleranceStrategyCtor>>> =
    Lazy::new(|| {
        let mut table: HashMap<&'static str, ToleranceStrategyCtor> = HashMap::new();
        table.insert(FAIL_FAST, || Arc::new(FailFastStrategy));
        table.insert(FAIL_SAFE, || Arc::new(FailSilentStrategy::new()));
        table.insert(FAIL_OVER, || Arc::new(FailOverStrategy));
        table.insert(FAIL_BACK, || Arc::new(FailBackStrategy));
        RwLock::new(table)
    });

static INSTANCES: Lazy<RwLock<HashMap<String, Arc<dyn ToleranceStrategy>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers a constructor under `key`, replacing any existing entry.
pub fn register_ctor(key: &'static str, ctor: ToleranceStrategyCtor) {
    CONSTRUCTORS
        .write()
        .expect("tolerance strategy table lock poisoned")
        .insert(key, ctor);
}

/// Returns the singleton instance registered under `key`.
pub fn resolve(key: &str) -> Result<Arc<dyn ToleranceStrategy>, CallError> {
    if let Some(instance) = INSTANCES
        .read()
        .expect("tolerance strategy table lock poisoned")
        .get(key)
    {
        return Ok(Arc::clone(instance));
    }
    let ctor = CONSTRUCTORS
        .read()
        .expect("tolerance strategy table lock poisoned")
        .get(key)
        .copied()
        .ok_or_else(|| CallError::UnknownVariant {
            kind: "tolerance strategy",
            key: key.to_string(),
        })?;
    let instance = ctor();
    INSTANCES
        .write()
        .expect("tolerance strategy table lock poisoned")
        .insert(key.to_string(), Arc::clone(&instance));
    Ok(instance)
}
