//! Packet plumbing between the controller and the transport.

use crate::adapter::Packet;
use crate::platform::Transport;
use crate::types::TETRIS_RECV_ID;

/// Encode `packet` and queue it for the peer's Tetris endpoint.
pub fn send_packet<T: Transport + ?Sized>(transport: &mut T, packet: Packet) {
    let bytes = packet.encode();
    tracing::debug!(?packet, "packet queued");
    transport.queue_data_for_tx(&bytes, TETRIS_RECV_ID);
}

/// Decode an inbound payload. Malformed packets are logged and dropped.
pub fn decode_packet(data: &[u8]) -> Option<Packet> {
    match Packet::decode(data) {
        Ok(packet) => Some(packet),
        Err(e) => {
            tracing::debug!(error = %e, len = data.len(), "packet dropped");
            None
        }
    }
}
