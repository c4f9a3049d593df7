//! Error types for byte-level operations.

use std::fmt;

/// Result type for byte-level operations.
pub type ByteResult<T> = Result<T, ByteError>;

/// Errors that can occur while reading or writing scalar fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteError {
    /// The field does not fit inside the buffer at the requested offset.
    BufferTooSmall {
        /// Offset of the first byte of the field.
        offset: usize,
        /// Width of the field in bytes.
        width: usize,
        /// Length of the buffer.
        len: usize,
    },

    /// Value exceeds the range representable by a bit field.
    ValueOutOfRange {
        /// The value that was out of range.
        value: u64,
        /// Width of the bit field.
        bits: u8,
    },
}

impl ByteError {
    /// Number of bytes the failed access needed in total.
    #[must_use]
    pub const fn needed(&self) -> usize {
        match self {
            Self::BufferTooSmall { offset, width, .. } => offset.saturating_add(*width),
            Self::ValueOutOfRange { .. } => 0,
        }
    }
}

impl fmt::Display for ByteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall { offset, width, len } => {
                write!(
                    f,
                    "{width}-byte field at offset {offset} does not fit in {len}-byte buffer"
                )
            }
            Self::ValueOutOfRange { value, bits } => {
                write!(f, "value {value} cannot be represented in {bits} bits")
            }
        }
    }
}

impl std::error::Error for ByteError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_buffer_too_small() {
        let err = ByteError::BufferTooSmall {
            offset: 6,
            width: 4,
            len: 8,
        };
        let msg = err.to_string();
        assert!(msg.contains("4-byte"), "should mention width");
        assert!(msg.contains("offset 6"), "should mention offset");
        assert!(msg.contains("8-byte buffer"), "should mention length");
    }

    #[test]
    fn error_display_value_out_of_range() {
        let err = ByteError::ValueOutOfRange { value: 9, bits: 3 };
        let msg = err.to_string();
        assert!(msg.contains('9'));
        assert!(msg.contains("3 bits"));
    }

    #[test]
    fn needed_saturates() {
        let err = ByteError::BufferTooSmall {
            offset: usize::MAX,
            width: 8,
            len: 0,
        };
        assert_eq!(err.needed(), usize::MAX);
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<ByteError>();
    }
}
