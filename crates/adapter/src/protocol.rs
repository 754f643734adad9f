//! Protocol module - the peer-to-peer attack protocol
//!
//! Every packet is one opcode byte, optionally followed by a single payload
//! byte. Sending is fire-and-forget: there are no acknowledgements, sequence
//! numbers, or retries.

use arrayvec::ArrayVec;
use thiserror::Error;

/// Longest packet the protocol ever produces.
pub const MAX_PACKET_LEN: usize = 2;

/// Encoded packet, stored inline.
pub type PacketBytes = ArrayVec<u8, MAX_PACKET_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// Peer is starting its game.
    GameStart = 0x01,
    /// Peer cleared lines; payload is the garbage row count.
    Attack = 0x02,
    /// Peer's game ended.
    GameOver = 0x03,
    /// Peer quit to its menu.
    AbortGame = 0x04,
}

impl Opcode {
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Opcode::GameStart),
            0x02 => Some(Opcode::Attack),
            0x03 => Some(Opcode::GameOver),
            0x04 => Some(Opcode::AbortGame),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Packet {
    GameStart,
    Attack { lines: u8 },
    GameOver,
    AbortGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PacketError {
    #[error("empty packet")]
    Empty,
    #[error("unknown opcode {0:#04x}")]
    UnknownOpcode(u8),
    #[error("{opcode:?} packet must be {expected} bytes, got {actual}")]
    BadLength {
        opcode: Opcode,
        expected: usize,
        actual: usize,
    },
}

impl Packet {
    pub fn opcode(&self) -> Opcode {
        match self {
            Packet::GameStart => Opcode::GameStart,
            Packet::Attack { .. } => Opcode::Attack,
            Packet::GameOver => Opcode::GameOver,
            Packet::AbortGame => Opcode::AbortGame,
        }
    }

    pub fn encode(&self) -> PacketBytes {
        let mut out = PacketBytes::new();
        out.push(self.opcode().as_u8());
        if let Packet::Attack { lines } = self {
            out.push(*lines);
        }
        out
    }

    /// Decode one packet.
    ///
    /// ATTACK must be exactly two bytes. The payload-less opcodes only look at
    /// the first byte and ignore anything after it.
    pub fn decode(data: &[u8]) -> Result<Self, PacketError> {
        let (&first, _) = data.split_first().ok_or(PacketError::Empty)?;
        let opcode = Opcode::from_u8(first).ok_or(PacketError::UnknownOpcode(first))?;

        match opcode {
            Opcode::GameStart => Ok(Packet::GameStart),
            Opcode::GameOver => Ok(Packet::GameOver),
            Opcode::AbortGame => Ok(Packet::AbortGame),
            Opcode::Attack => match data {
                [_, lines] => Ok(Packet::Attack { lines: *lines }),
                _ => Err(PacketError::BadLength {
                    opcode,
                    expected: 2,
                    actual: data.len(),
                }),
            },
        }
    }
}
