/// First byte of every frame. Anything else is not protocol traffic.
pub const PROTOCOL_MAGIC: u8 = 0x01;

/// Current protocol revision, carried in byte 1 of the header.
pub const PROTOCOL_VERSION: u8 = 0x01;

/// Version string a service advertises when none is configured.
pub const DEFAULT_SERVICE_VERSION: &str = "1.0";

/// Group string reserved for future partitioning of service instances.
pub const DEFAULT_SERVICE_GROUP: &str = "default";

// Header byte offsets. The header is fixed-length and big-endian; the body
// length field is what the stream framer keys on.
pub const MESSAGE_MAGIC_OFFSET: usize = 0;
pub const MESSAGE_VERSION_OFFSET: usize = 1;
pub const MESSAGE_SERIALIZER_OFFSET: usize = 2;
pub const MESSAGE_TYPE_OFFSET: usize = 3;
pub const MESSAGE_STATUS_OFFSET: usize = 4;

/// Byte offset where the 8-byte request id (u64) begins.
/// This is the unique request/response correlation id.
pub const MESSAGE_REQUEST_ID_OFFSET: usize = 5;

/// Byte offset where the 4-byte body length field (u32) begins.
/// This field indicates the length in bytes of the serialized body that
/// immediately follows the header.
pub const MESSAGE_BODY_LENGTH_OFFSET: usize = 13;

/// Total size of the fixed-length header.
/// Computed as: offset of the body length field + its size.
pub const MESSAGE_HEADER_SIZE: usize = MESSAGE_BODY_LENGTH_OFFSET + 4; // 13 + 4 = 17
