use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};

/// A simple counter which is initialized at 1.
static GLOBAL_REQUEST_ID_COUNTER: Lazy<AtomicU64> = Lazy::new(|| AtomicU64::new(1));

/// Returns the next process-wide request correlation id.
///
/// Uniqueness only has to hold per outstanding call on a connection, so a
/// plain atomic counter is sufficient.
#[inline]
pub fn increment_u64_id() -> u64 {
    GLOBAL_REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}
