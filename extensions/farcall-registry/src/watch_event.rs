use std::sync::Arc;

/// Change notification delivered by a backend watch.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WatchEventKind {
    Deleted,
    Updated,
}

/// Invoked from backend-driven tasks as events arrive; implementations
/// must be safe to call from any thread.
pub type WatchCallback = Arc<dyn Fn(WatchEventKind) + Send + Sync>;
