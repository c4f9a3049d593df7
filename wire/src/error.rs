//! Error types for packet encoding, decoding and conversion.

use std::fmt;

use bytecodec::ByteError;

use crate::packet::PacketKind;
use crate::version::CigiVersion;

/// Result type for packet operations.
pub type PacketResult<T> = Result<T, PacketError>;

/// Everything that can go wrong while encoding, decoding, scanning or
/// converting CIGI packets.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PacketError {
    /// The packet id is not part of the catalog for `version`.
    UnknownPacketId { id: u8, version: CigiVersion },

    /// Fewer bytes remain than a header, field or declared packet needs.
    BufferTooSmall { needed: usize, available: usize },

    /// The declared packet size disagrees with the layout, or the decoder
    /// consumed a different number of bytes than declared.
    SizeMismatch {
        packet_id: u8,
        declared: usize,
        expected: usize,
    },

    /// A packet, field or enumerator has no counterpart in `target`.
    NoConversionAvailable {
        subject: ConversionSubject,
        target: CigiVersion,
    },

    /// The declared size of a variable-length packet does not describe a
    /// whole number of elements.
    MalformedVariableLength {
        packet_id: u8,
        declared: usize,
        reason: LengthReason,
    },

    /// A decoder was handed a packet with a different id.
    UnexpectedPacketId { expected: u8, found: u8 },

    /// A field holds a value its layout does not define.
    InvalidField {
        packet_id: u8,
        field: &'static str,
        value: u64,
    },

    /// A value does not fit the bit width of its field.
    FieldOutOfRange { value: u64, bits: u8 },

    /// The byte swap magic number is not the big-endian value.
    ByteOrderMismatch { found: u16 },

    /// The packet's layout is not the one `version` uses.
    WrongVersion {
        kind: PacketKind,
        version: CigiVersion,
    },

    /// Configured scan limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// What a failed conversion was converting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionSubject {
    /// An enumerator looked up in a conversion table.
    Enum { table: ConversionTable, value: u8 },
    /// A field value the target layout cannot represent.
    Field {
        kind: PacketKind,
        field: &'static str,
    },
    /// A whole packet family absent from the target version.
    Packet { kind: PacketKind },
}

/// The enumerations that change meaning between CIGI versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionTable {
    ComponentClass,
    IgMode,
    AnimationState,
    SensorStatus,
    TrackMode,
    WeatherLayer,
    TerrainQuery,
}

/// Why a variable-length packet size was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthReason {
    /// Bytes after the fixed part do not form whole elements.
    PartialElement { element_size: usize },
    /// The size exceeds the largest the layout allows.
    ExceedsMaximum { max: usize },
    /// The size is not a multiple of the required alignment.
    Unaligned { alignment: usize },
    /// Text payload without a NUL terminator.
    MissingTerminator,
}

/// Specific scan limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    DatagramBytes,
    PacketCount,
}

impl From<ByteError> for PacketError {
    fn from(err: ByteError) -> Self {
        match err {
            ByteError::BufferTooSmall { len, .. } => Self::BufferTooSmall {
                needed: err.needed(),
                available: len,
            },
            ByteError::ValueOutOfRange { value, bits } => Self::FieldOutOfRange { value, bits },
        }
    }
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPacketId { id, version } => {
                write!(f, "unknown packet id {id} for {version}")
            }
            Self::BufferTooSmall { needed, available } => {
                write!(f, "buffer too small: need {needed} bytes, have {available}")
            }
            Self::SizeMismatch {
                packet_id,
                declared,
                expected,
            } => {
                write!(f, "packet {packet_id} declares {declared} bytes, layout has {expected}")
            }
            Self::NoConversionAvailable { subject, target } => {
                write!(f, "no conversion to {target} for {subject}")
            }
            Self::MalformedVariableLength {
                packet_id,
                declared,
                reason,
            } => {
                write!(
                    f,
                    "packet {packet_id} has malformed variable length {declared}: {reason}"
                )
            }
            Self::UnexpectedPacketId { expected, found } => {
                write!(f, "expected packet id {expected}, found {found}")
            }
            Self::InvalidField {
                packet_id,
                field,
                value,
            } => {
                write!(f, "packet {packet_id} field {field} has invalid value {value}")
            }
            Self::FieldOutOfRange { value, bits } => {
                write!(f, "value {value} does not fit in {bits} bits")
            }
            Self::ByteOrderMismatch { found } => {
                write!(f, "byte swap magic 0x{found:04X} is not big-endian")
            }
            Self::WrongVersion { kind, version } => {
                write!(f, "{kind} packet does not use the {version} layout")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for ConversionSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enum { table, value } => write!(f, "{table} value {value}"),
            Self::Field { kind, field } => write!(f, "{kind} field {field}"),
            Self::Packet { kind } => write!(f, "{kind} packet"),
        }
    }
}

impl fmt::Display for ConversionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ComponentClass => "component class",
            Self::IgMode => "IG mode",
            Self::AnimationState => "animation state",
            Self::SensorStatus => "sensor status",
            Self::TrackMode => "track mode",
            Self::WeatherLayer => "weather layer",
            Self::TerrainQuery => "terrain query",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for LengthReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PartialElement { element_size } => {
                write!(f, "trailing bytes do not form whole {element_size}-byte elements")
            }
            Self::ExceedsMaximum { max } => write!(f, "exceeds maximum of {max} bytes"),
            Self::Unaligned { alignment } => write!(f, "not a multiple of {alignment} bytes"),
            Self::MissingTerminator => write!(f, "text is not NUL terminated"),
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DatagramBytes => "datagram bytes",
            Self::PacketCount => "packet count",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for PacketError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_packet_id() {
        let err = PacketError::UnknownPacketId {
            id: 250,
            version: CigiVersion::V3_2,
        };
        let msg = err.to_string();
        assert!(msg.contains("250"));
        assert!(msg.contains("3.2"));
    }

    #[test]
    fn display_no_conversion() {
        let err = PacketError::NoConversionAvailable {
            subject: ConversionSubject::Enum {
                table: ConversionTable::ComponentClass,
                value: 4,
            },
            target: CigiVersion::V1,
        };
        let msg = err.to_string();
        assert!(msg.contains("component class value 4"));
        assert!(msg.contains("CIGI 1.0"));
    }

    #[test]
    fn display_limits_exceeded() {
        let err = PacketError::LimitsExceeded {
            kind: LimitKind::PacketCount,
            limit: 4,
            actual: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("packet count"));
        assert!(msg.contains("5 > 4"));
    }

    #[test]
    fn display_byte_order() {
        let err = PacketError::ByteOrderMismatch { found: 0x0080 };
        assert!(err.to_string().contains("0x0080"));
    }

    #[test]
    fn display_malformed_length() {
        let err = PacketError::MalformedVariableLength {
            packet_id: 31,
            declared: 30,
            reason: LengthReason::PartialElement { element_size: 24 },
        };
        let msg = err.to_string();
        assert!(msg.contains("31"));
        assert!(msg.contains("24-byte"));
    }

    #[test]
    fn from_byte_error() {
        let err: PacketError = ByteError::BufferTooSmall {
            offset: 12,
            width: 4,
            len: 14,
        }
        .into();
        assert_eq!(
            err,
            PacketError::BufferTooSmall {
                needed: 16,
                available: 14
            }
        );

        let err: PacketError = ByteError::ValueOutOfRange { value: 9, bits: 3 }.into();
        assert_eq!(err, PacketError::FieldOutOfRange { value: 9, bits: 3 });
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + std::error::Error>() {}
        assert_send_sync::<PacketError>();
    }
}
