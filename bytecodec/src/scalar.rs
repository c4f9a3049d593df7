//! Offset-addressed scalar reads and writes in wire byte order.

use crate::error::{ByteError, ByteResult};

/// Byte order of multi-byte scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Most significant byte first.
    BigEndian,
    /// Least significant byte first.
    LittleEndian,
}

/// Byte order every scalar function in this crate encodes with.
///
/// CIGI defines big-endian as the canonical wire order. Receivers detect a
/// sender using the opposite order through the byte swap magic number carried
/// by the synchronization packets, which is handled above this crate.
pub const WIRE_ORDER: ByteOrder = ByteOrder::BigEndian;

fn check(buf_len: usize, offset: usize, width: usize) -> ByteResult<()> {
    match offset.checked_add(width) {
        Some(end) if end <= buf_len => Ok(()),
        _ => Err(ByteError::BufferTooSmall {
            offset,
            width,
            len: buf_len,
        }),
    }
}

fn read_array<const N: usize>(buf: &[u8], offset: usize) -> ByteResult<[u8; N]> {
    check(buf.len(), offset, N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(&buf[offset..offset + N]);
    Ok(out)
}

fn write_array<const N: usize>(buf: &mut [u8], offset: usize, bytes: [u8; N]) -> ByteResult<()> {
    check(buf.len(), offset, N)?;
    buf[offset..offset + N].copy_from_slice(&bytes);
    Ok(())
}

macro_rules! scalar_codec {
    ($($ty:ty => $read:ident, $write:ident;)+) => {
        $(
            #[doc = concat!("Reads a `", stringify!($ty), "` at `offset` in wire byte order.")]
            pub fn $read(buf: &[u8], offset: usize) -> ByteResult<$ty> {
                let bytes = read_array(buf, offset)?;
                Ok(match WIRE_ORDER {
                    ByteOrder::BigEndian => <$ty>::from_be_bytes(bytes),
                    ByteOrder::LittleEndian => <$ty>::from_le_bytes(bytes),
                })
            }

            #[doc = concat!("Writes a `", stringify!($ty), "` at `offset` in wire byte order.")]
            ///
            /// The buffer is left untouched when the field does not fit.
            pub fn $write(buf: &mut [u8], offset: usize, value: $ty) -> ByteResult<()> {
                let bytes = match WIRE_ORDER {
                    ByteOrder::BigEndian => value.to_be_bytes(),
                    ByteOrder::LittleEndian => value.to_le_bytes(),
                };
                write_array(buf, offset, bytes)
            }
        )+
    };
}

scalar_codec! {
    u8 => read_u8, write_u8;
    i8 => read_i8, write_i8;
    u16 => read_u16, write_u16;
    i16 => read_i16, write_i16;
    u32 => read_u32, write_u32;
    i32 => read_i32, write_i32;
    u64 => read_u64, write_u64;
    i64 => read_i64, write_i64;
    f32 => read_f32, write_f32;
    f64 => read_f64, write_f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_order_is_big_endian() {
        assert_eq!(WIRE_ORDER, ByteOrder::BigEndian);
    }

    #[test]
    fn write_u16_layout() {
        let mut buf = [0u8; 4];
        write_u16(&mut buf, 1, 0x8000).unwrap();
        assert_eq!(buf, [0x00, 0x80, 0x00, 0x00]);
    }

    #[test]
    fn write_u32_layout() {
        let mut buf = [0u8; 4];
        write_u32(&mut buf, 0, 0x1234_5678).unwrap();
        assert_eq!(buf, [0x12, 0x34, 0x56, 0x78]);
        assert_eq!(read_u32(&buf, 0).unwrap(), 0x1234_5678);
    }

    #[test]
    fn write_f32_uses_ieee_bits() {
        let mut buf = [0u8; 4];
        write_f32(&mut buf, 0, 1.0).unwrap();
        assert_eq!(buf, [0x3F, 0x80, 0x00, 0x00]);
    }

    #[test]
    fn write_f64_uses_ieee_bits() {
        let mut buf = [0u8; 8];
        write_f64(&mut buf, 0, -2.0).unwrap();
        assert_eq!(buf, [0xC0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(read_f64(&buf, 0).unwrap(), -2.0);
    }

    #[test]
    fn signed_roundtrip() {
        let mut buf = [0u8; 8];
        write_i8(&mut buf, 0, -5).unwrap();
        write_i16(&mut buf, 1, -300).unwrap();
        write_i32(&mut buf, 3, -70_000).unwrap();
        assert_eq!(read_i8(&buf, 0).unwrap(), -5);
        assert_eq!(read_i16(&buf, 1).unwrap(), -300);
        assert_eq!(read_i32(&buf, 3).unwrap(), -70_000);
    }

    #[test]
    fn failed_write_leaves_buffer_untouched() {
        let mut buf = [0xAAu8; 6];
        let err = write_u64(&mut buf, 0, u64::MAX).unwrap_err();
        assert_eq!(
            err,
            ByteError::BufferTooSmall {
                offset: 0,
                width: 8,
                len: 6
            }
        );
        assert_eq!(buf, [0xAA; 6]);
    }

    #[test]
    fn read_past_end_fails() {
        let buf = [0u8; 3];
        assert!(matches!(
            read_u32(&buf, 0),
            Err(ByteError::BufferTooSmall { width: 4, .. })
        ));
        assert!(matches!(
            read_u8(&buf, 3),
            Err(ByteError::BufferTooSmall { offset: 3, .. })
        ));
    }

    #[test]
    fn offset_overflow_is_reported() {
        let buf = [0u8; 3];
        assert!(matches!(
            read_u16(&buf, usize::MAX),
            Err(ByteError::BufferTooSmall { .. })
        ));
    }
}
