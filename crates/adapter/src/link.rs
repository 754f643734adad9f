//! Byte link between the two paired badges.
//!
//! A [`Link`] moves opaque frames addressed to a logical endpoint ([`RecvId`]).
//! Outbound frames are queued and trickle out when the owner flushes; inbound
//! frames are polled from the single scheduler thread.

use arrayvec::ArrayVec;

use crate::types::RecvId;

/// Largest payload a single frame may carry.
pub const MAX_FRAME_PAYLOAD: usize = 32;

/// Frame header: destination id and payload length.
pub const FRAME_HEADER_LEN: usize = 2;

/// Frame delivered to a logical endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundPacket {
    pub dest: RecvId,
    pub data: ArrayVec<u8, MAX_FRAME_PAYLOAD>,
}

impl InboundPacket {
    /// Build a packet, truncating payloads that exceed [`MAX_FRAME_PAYLOAD`].
    pub fn new(dest: RecvId, data: &[u8]) -> Self {
        let len = data.len().min(MAX_FRAME_PAYLOAD);
        let mut buf = ArrayVec::new();
        // Fits: len is clamped to capacity.
        let _ = buf.try_extend_from_slice(&data[..len]);
        Self { dest, data: buf }
    }
}

pub trait Link {
    /// Queue a frame for the peer. Never blocks; no delivery confirmation.
    fn send(&mut self, dest: RecvId, data: &[u8]);

    /// Push up to `budget` queued bytes onto the wire right now.
    fn flush(&mut self, budget: usize);

    /// Next frame received from the peer, if any.
    fn poll(&mut self) -> Option<InboundPacket>;
}

/// No link attached: frames are dropped and nothing ever arrives.
impl<L: Link> Link for Option<L> {
    fn send(&mut self, dest: RecvId, data: &[u8]) {
        if let Some(link) = self {
            link.send(dest, data);
        }
    }

    fn flush(&mut self, budget: usize) {
        if let Some(link) = self {
            link.flush(budget);
        }
    }

    fn poll(&mut self) -> Option<InboundPacket> {
        self.as_mut().and_then(|link| link.poll())
    }
}

/// Append one frame (`[dest, len, payload..]`) to `out`.
///
/// Payloads longer than [`MAX_FRAME_PAYLOAD`] are truncated.
pub fn encode_frame(dest: RecvId, data: &[u8], out: &mut Vec<u8>) {
    let len = data.len().min(MAX_FRAME_PAYLOAD);
    out.push(dest.0);
    out.push(len as u8);
    out.extend_from_slice(&data[..len]);
}

/// Reassembles frames from a byte stream that may split them arbitrarily.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Next complete frame. Frames claiming an oversized payload are skipped.
    pub fn next_frame(&mut self) -> Option<InboundPacket> {
        loop {
            if self.buf.len() < FRAME_HEADER_LEN {
                return None;
            }
            let dest = RecvId(self.buf[0]);
            let len = self.buf[1] as usize;
            let total = FRAME_HEADER_LEN + len;
            if self.buf.len() < total {
                return None;
            }
            if len > MAX_FRAME_PAYLOAD {
                tracing::warn!(len, "dropping oversized frame");
                self.buf.drain(..total);
                continue;
            }
            let packet = InboundPacket::new(dest, &self.buf[FRAME_HEADER_LEN..total]);
            self.buf.drain(..total);
            return Some(packet);
        }
    }
}
