//! Cursor-based reader over a byte slice.

use crate::error::{ByteError, ByteResult};
use crate::scalar;

/// A forward-only reader for decoding wire-order scalars.
///
/// All read operations are bounds-checked and return errors on failure.
/// A failed read does not advance the cursor.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

macro_rules! reader_scalars {
    ($($ty:ty => $name:ident, $width:expr;)+) => {
        $(
            #[doc = concat!("Reads a `", stringify!($ty), "` and advances the cursor.")]
            pub fn $name(&mut self) -> ByteResult<$ty> {
                let value = scalar::$name(self.data, self.pos)?;
                self.pos += $width;
                Ok(value)
            }
        )+
    };
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` positioned at the start of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a reader positioned at `pos`.
    ///
    /// A position past the end is clamped to the end of the slice.
    #[must_use]
    pub fn at(data: &'a [u8], pos: usize) -> Self {
        Self {
            data,
            pos: pos.min(data.len()),
        }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the full underlying slice.
    #[must_use]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    reader_scalars! {
        u8 => read_u8, 1;
        i8 => read_i8, 1;
        u16 => read_u16, 2;
        i16 => read_i16, 2;
        u32 => read_u32, 4;
        i32 => read_i32, 4;
        u64 => read_u64, 8;
        i64 => read_i64, 8;
        f32 => read_f32, 4;
        f64 => read_f64, 8;
    }

    /// Reads `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> ByteResult<&'a [u8]> {
        self.ensure(len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Skips `len` bytes (reserved fields).
    pub fn skip(&mut self, len: usize) -> ByteResult<()> {
        self.ensure(len)?;
        self.pos += len;
        Ok(())
    }

    fn ensure(&self, len: usize) -> ByteResult<()> {
        if len > self.remaining() {
            return Err(ByteError::BufferTooSmall {
                offset: self.pos,
                width: len,
                len: self.data.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reader() {
        let reader = ByteReader::new(&[]);
        assert!(reader.is_empty());
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn read_from_empty_fails() {
        let mut reader = ByteReader::new(&[]);
        let result = reader.read_u8();
        assert!(matches!(result, Err(ByteError::BufferTooSmall { .. })));
    }

    #[test]
    fn read_sequence_advances() {
        let mut reader = ByteReader::new(&[0x01, 0x12, 0x34, 0x00, 0x00, 0x00, 0x2A]);
        assert_eq!(reader.read_u8().unwrap(), 1);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_u32().unwrap(), 42);
        assert!(reader.is_empty());
    }

    #[test]
    fn failed_read_does_not_advance() {
        let mut reader = ByteReader::new(&[0x00, 0x01, 0x02]);
        reader.read_u8().unwrap();
        assert!(reader.read_u32().is_err());
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read_u16().unwrap(), 0x0102);
    }

    #[test]
    fn skip_and_bytes() {
        let mut reader = ByteReader::new(b"abcdef");
        reader.skip(2).unwrap();
        assert_eq!(reader.read_bytes(3).unwrap(), b"cde");
        assert!(reader.skip(2).is_err());
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn at_clamps_position() {
        let reader = ByteReader::at(&[1, 2, 3], 10);
        assert_eq!(reader.position(), 3);
        assert!(reader.is_empty());
    }
}
