//! Adapter module - the peer link and its packet protocol
//!
//! Two badges pair over a minimal transport that carries opaque frames to a
//! logical endpoint on the other side. This crate holds the Tetris attack
//! protocol spoken over that transport and the host-side links used to carry
//! it.
//!
//! # Protocol Overview
//!
//! Packets are one opcode byte plus an optional payload byte:
//!
//! | Opcode | Byte | Payload |
//! |---|---|---|
//! | GAME_START | `0x01` | none |
//! | ATTACK | `0x02` | garbage row count |
//! | GAME_OVER | `0x03` | none |
//! | ABORT_GAME | `0x04` | none |
//!
//! There is no acknowledgement, retry, or sequence number. A lost packet is
//! simply lost.
//!
//! # Links
//!
//! - [`LoopbackLink`]: two ends in one process, for tests and demos
//! - [`TcpLink`]: one end per emulator process, over TCP
//!
//! Frames on a byte stream are `[dest, len, payload..]`.
//!
//! # Environment Variables
//!
//! - `TETRIS_LINK_ADDR`: peer address; unset means no link
//! - `TETRIS_LINK_ROLE`: `listen` (default) or `connect`

pub mod link;
pub mod loopback;
pub mod protocol;
pub mod tcp;

pub use badge_tetris_types as types;

pub use link::{InboundPacket, Link, MAX_FRAME_PAYLOAD};
pub use loopback::LoopbackLink;
pub use protocol::{Opcode, Packet, PacketBytes, PacketError};
pub use tcp::{LinkConfig, LinkError, LinkRole, TcpLink};
