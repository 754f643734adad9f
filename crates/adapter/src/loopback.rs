//! In-process link joining two emulated badges.
//!
//! Both ends live on the same thread, so the shared wire is an
//! `Rc<RefCell<..>>`. Sent frames wait in the sender's outbox until flushed,
//! which mirrors how the real transport batches outbound data.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::link::{InboundPacket, Link, FRAME_HEADER_LEN};
use crate::types::RecvId;

#[derive(Debug, Default)]
struct Wire {
    /// Indexed by side: frames waiting to be received by that side.
    inbox: [VecDeque<InboundPacket>; 2],
}

#[derive(Debug)]
pub struct LoopbackLink {
    side: usize,
    wire: Rc<RefCell<Wire>>,
    outbox: VecDeque<InboundPacket>,
    lossy: bool,
    sent_bytes: usize,
}

impl LoopbackLink {
    /// Two connected ends.
    pub fn pair() -> (Self, Self) {
        let wire = Rc::new(RefCell::new(Wire::default()));
        let end = |side| Self {
            side,
            wire: Rc::clone(&wire),
            outbox: VecDeque::new(),
            lossy: false,
            sent_bytes: 0,
        };
        (end(0), end(1))
    }

    /// Drop every frame this end sends from now on.
    pub fn set_lossy(&mut self, lossy: bool) {
        self.lossy = lossy;
    }

    /// Frames queued but not yet flushed.
    pub fn queued(&self) -> usize {
        self.outbox.len()
    }

    /// Bytes (including frame headers) that have left this end.
    pub fn sent_bytes(&self) -> usize {
        self.sent_bytes
    }
}

impl Link for LoopbackLink {
    fn send(&mut self, dest: RecvId, data: &[u8]) {
        if self.lossy {
            tracing::debug!(dest = dest.0, len = data.len(), "loopback dropped frame");
            return;
        }
        self.outbox.push_back(InboundPacket::new(dest, data));
    }

    /// Whole frames only: a frame that does not fit the remaining budget waits.
    fn flush(&mut self, budget: usize) {
        let mut remaining = budget;
        let peer = 1 - self.side;
        let mut wire = self.wire.borrow_mut();
        while let Some(front) = self.outbox.front() {
            let cost = FRAME_HEADER_LEN + front.data.len();
            if cost > remaining {
                break;
            }
            remaining -= cost;
            self.sent_bytes += cost;
            if let Some(frame) = self.outbox.pop_front() {
                wire.inbox[peer].push_back(frame);
            }
        }
    }

    fn poll(&mut self) -> Option<InboundPacket> {
        self.wire.borrow_mut().inbox[self.side].pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_cross_only_after_flush() {
        let (mut a, mut b) = LoopbackLink::pair();
        a.send(RecvId(3), &[0x01]);
        assert_eq!(b.poll(), None);

        a.flush(usize::MAX);
        let got = b.poll().unwrap();
        assert_eq!(got.dest, RecvId(3));
        assert_eq!(got.data.as_slice(), &[0x01]);
        assert_eq!(a.poll(), None);
    }

    #[test]
    fn test_flush_respects_budget() {
        let (mut a, mut b) = LoopbackLink::pair();
        a.send(RecvId(3), &[0x02, 1]);
        a.send(RecvId(3), &[0x03]);

        a.flush(4);
        assert_eq!(a.queued(), 1);
        assert_eq!(a.sent_bytes(), 4);
        assert!(b.poll().is_some());
        assert_eq!(b.poll(), None);

        a.flush(4);
        assert_eq!(b.poll().unwrap().data.as_slice(), &[0x03]);
    }

    #[test]
    fn test_lossy_end_never_delivers() {
        let (mut a, mut b) = LoopbackLink::pair();
        a.set_lossy(true);
        a.send(RecvId(3), &[0x01]);
        a.flush(usize::MAX);
        assert_eq!(b.poll(), None);
        assert_eq!(a.queued(), 0);
    }
}
