use crate::serializer::{JsonSerializer, MessagePackSerializer, PayloadSerializer};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Process-wide serializer table keyed by wire id. The built-in encodings
/// are installed up front; extensions may add their own via [`register`].
static SERIALIZERS: Lazy<RwLock<HashMap<u8, Arc<dyn PayloadSerializer>>>> = Lazy::new(|| {
    let mut table: HashMap<u8, Arc<dyn PayloadSerializer>> = HashMap::new();
    let builtins: [Arc<dyn PayloadSerializer>; 2] =
        [Arc::new(JsonSerializer), Arc::new(MessagePackSerializer)];
    for serializer in builtins {
        table.insert(serializer.kind().id, serializer);
    }
    RwLock::new(table)
});

/// Registers a serializer under its own id, replacing any existing entry
/// with the same id.
pub fn register(serializer: Arc<dyn PayloadSerializer>) {
    SERIALIZERS
        .write()
        .expect("serializer table lock poisoned")
        .insert(serializer.kind().id, serializer);
}

/// Looks a serializer up by the id carried in a frame header.
pub fn by_id(id: u8) -> Option<Arc<dyn PayloadSerializer>> {
    SERIALIZERS
        .read()
        .expect("serializer table lock poisoned")
        .get(&id)
        .cloned()
}

/// Looks a serializer up by its configured name, e.g. `json`.
pub fn by_name(name: &str) -> Option<Arc<dyn PayloadSerializer>> {
    SERIALIZERS
        .read()
        .expect("serializer table lock poisoned")
        .values()
        .find(|serializer| serializer.kind().name == name)
        .cloned()
}
