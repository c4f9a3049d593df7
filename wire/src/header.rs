//! Packet header types and constants.

use std::fmt;

use crate::error::{LengthReason, PacketError, PacketResult};

/// Header size in bytes: packet id then packet size.
pub const HEADER_SIZE: usize = 2;

/// Largest size a one-byte `packet_size` can declare.
pub const MAX_PACKET_SIZE: usize = u8::MAX as usize;

/// Byte swap magic number carried by CIGI 3 IG Control and Start Of Frame.
///
/// A receiver reading `0x0080` instead is talking to a sender using the
/// opposite byte order.
pub const BYTE_SWAP_MAGIC: u16 = 0x8000;

/// The two bytes that open every CIGI packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PacketHeader {
    /// Packet id, resolved per version through the catalog.
    pub packet_id: u8,
    /// Size of the whole packet in bytes, header included.
    pub packet_size: u8,
}

impl PacketHeader {
    /// Reads the header at the start of `buf` without validating it.
    pub fn peek(buf: &[u8]) -> PacketResult<Self> {
        match buf {
            [packet_id, packet_size, ..] => Ok(Self {
                packet_id: *packet_id,
                packet_size: *packet_size,
            }),
            _ => Err(PacketError::BufferTooSmall {
                needed: HEADER_SIZE,
                available: buf.len(),
            }),
        }
    }

    /// Declared packet size as a byte count.
    #[must_use]
    pub const fn declared_len(self) -> usize {
        self.packet_size as usize
    }
}

/// Size rule of one packet layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketSize {
    /// Exactly this many bytes.
    Fixed(u8),
    /// Anywhere in `min..=max`; the layout derives its element count or
    /// text length from the declared size.
    Variable { min: u8, max: u8 },
}

impl PacketSize {
    #[must_use]
    pub const fn min(self) -> usize {
        match self {
            Self::Fixed(size) | Self::Variable { min: size, .. } => size as usize,
        }
    }

    #[must_use]
    pub const fn max(self) -> usize {
        match self {
            Self::Fixed(size) | Self::Variable { max: size, .. } => size as usize,
        }
    }

    #[must_use]
    pub const fn is_variable(self) -> bool {
        matches!(self, Self::Variable { .. })
    }

    /// Validates a declared or computed packet size against this rule.
    ///
    /// Sizes below the minimum (or different from a fixed size) are
    /// [`PacketError::SizeMismatch`]; a variable size above the maximum is
    /// [`PacketError::MalformedVariableLength`].
    pub fn check(self, packet_id: u8, declared: usize) -> PacketResult<()> {
        match self {
            Self::Fixed(size) if declared != size as usize => Err(PacketError::SizeMismatch {
                packet_id,
                declared,
                expected: size as usize,
            }),
            Self::Variable { min, .. } if declared < min as usize => {
                Err(PacketError::SizeMismatch {
                    packet_id,
                    declared,
                    expected: min as usize,
                })
            }
            Self::Variable { max, .. } if declared > max as usize => {
                Err(PacketError::MalformedVariableLength {
                    packet_id,
                    declared,
                    reason: LengthReason::ExceedsMaximum { max: max as usize },
                })
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for PacketSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(size) => write!(f, "{size}"),
            Self::Variable { min, max } => write!(f, "{min}..={max}"),
        }
    }
}
