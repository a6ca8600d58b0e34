mod json_serializer;
mod messagepack_serializer;
mod serializer_interface;
mod serializer_registry;

pub use json_serializer::JsonSerializer;
pub use messagepack_serializer::MessagePackSerializer;
pub use serializer_interface::{PayloadSerializer, SerializeError, SerializerKind};
pub use serializer_registry::{by_id, by_name, register};
