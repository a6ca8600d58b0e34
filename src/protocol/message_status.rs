use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Outcome code carried in byte 4 of the header.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, TryFromPrimitive, IntoPrimitive)]
pub enum MessageStatus {
    Ok = 0,
    BadRequest = 40,
    BadResponse = 50,
}
