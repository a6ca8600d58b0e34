use crate::constants::{MESSAGE_BODY_LENGTH_OFFSET, MESSAGE_HEADER_SIZE};
use std::collections::VecDeque;

/// Reassembles complete protocol messages from an arbitrarily chunked byte
/// stream.
///
/// A TCP read may deliver less than one message (half-packet) or more than
/// one (sticky packet). `ProtocolFramer` absorbs both with a two-state
/// machine:
///
/// - **awaiting-header**: accumulate until the fixed 17-byte header is
///   present, then take the body length from it.
/// - **awaiting-body**: accumulate until header + body are present, hand
///   the complete buffer out, reset.
///
/// Each connection owns one framer; its state is never shared. For any
/// segmentation of the input — including one byte at a time — the sequence
/// of delivered messages is identical to the unsegmented sequence, and no
/// message is ever delivered partially.
pub struct ProtocolFramer {
    buffer: Vec<u8>,
    state: FramerState,
}

#[derive(Copy, Clone)]
enum FramerState {
    /// Waiting for the fixed-length header.
    AwaitingHeader,
    /// Header complete; waiting until `total_length` bytes are buffered.
    AwaitingBody { total_length: usize },
}

/// Iterator over the messages completed by one `read_bytes` call.
pub struct FramedMessageIterator {
    queue: VecDeque<Vec<u8>>,
}

impl Iterator for FramedMessageIterator {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front()
    }
}

impl Default for ProtocolFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolFramer {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            state: FramerState::AwaitingHeader,
        }
    }

    /// Feeds newly received bytes and returns every message they complete.
    ///
    /// The caller must drive this for each read; a single call drains as
    /// many whole messages as the accumulated bytes contain.
    pub fn read_bytes(&mut self, data: &[u8]) -> FramedMessageIterator {
        self.buffer.extend_from_slice(data);
        let mut queue = VecDeque::new();

        loop {
            match self.state {
                FramerState::AwaitingHeader => {
                    if self.buffer.len() < MESSAGE_HEADER_SIZE {
                        break;
                    }
                    let mut length_bytes = [0u8; 4];
                    length_bytes.copy_from_slice(
                        &self.buffer[MESSAGE_BODY_LENGTH_OFFSET..MESSAGE_HEADER_SIZE],
                    );
                    let body_length = u32::from_be_bytes(length_bytes) as usize;
                    self.state = FramerState::AwaitingBody {
                        total_length: MESSAGE_HEADER_SIZE + body_length,
                    };
                }
                FramerState::AwaitingBody { total_length } => {
                    if self.buffer.len() < total_length {
                        break;
                    }
                    let message: Vec<u8> = self.buffer.drain(..total_length).collect();
                    queue.push_back(message);
                    self.state = FramerState::AwaitingHeader;
                }
            }
        }

        FramedMessageIterator { queue }
    }
}
