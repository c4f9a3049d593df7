//! Bounded cursor-based writer over a mutable byte slice.

use crate::error::{ByteError, ByteResult};
use crate::scalar;

/// A forward-only writer that encodes wire-order scalars into a caller
/// provided buffer.
///
/// The writer never grows the buffer. A write that does not fit fails
/// without touching the buffer or advancing the cursor.
#[derive(Debug)]
pub struct ByteWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

macro_rules! writer_scalars {
    ($($ty:ty => $name:ident, $width:expr;)+) => {
        $(
            #[doc = concat!("Writes a `", stringify!($ty), "` and advances the cursor.")]
            pub fn $name(&mut self, value: $ty) -> ByteResult<()> {
                scalar::$name(self.buf, self.pos, value)?;
                self.pos += $width;
                Ok(())
            }
        )+
    };
}

impl<'a> ByteWriter<'a> {
    /// Creates a new `ByteWriter` positioned at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the capacity of the underlying buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the number of bytes that can still be written.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    writer_scalars! {
        u8 => write_u8, 1;
        i8 => write_i8, 1;
        u16 => write_u16, 2;
        i16 => write_i16, 2;
        u32 => write_u32, 4;
        i32 => write_i32, 4;
        u64 => write_u64, 8;
        i64 => write_i64, 8;
        f32 => write_f32, 4;
        f64 => write_f64, 8;
    }

    /// Writes raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> ByteResult<()> {
        self.ensure(bytes.len())?;
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    /// Writes `len` zero bytes (reserved fields and padding).
    pub fn zero_fill(&mut self, len: usize) -> ByteResult<()> {
        self.ensure(len)?;
        self.buf[self.pos..self.pos + len].fill(0);
        self.pos += len;
        Ok(())
    }

    /// Finishes writing and returns the number of bytes written.
    #[must_use]
    pub const fn finish(self) -> usize {
        self.pos
    }

    fn ensure(&self, len: usize) -> ByteResult<()> {
        if len > self.remaining() {
            return Err(ByteError::BufferTooSmall {
                offset: self.pos,
                width: len,
                len: self.buf.len(),
            });
        }
        Ok(())
    }
}
