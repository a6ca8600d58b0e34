use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Message discriminator carried in byte 3 of the header.
///
/// `Heartbeat` and `Other` are valid header values but carry no decodable
/// body in the current protocol revision.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, TryFromPrimitive, IntoPrimitive)]
pub enum MessageType {
    Request = 0,
    Response = 1,
    Heartbeat = 2,
    Other = 3,
}
