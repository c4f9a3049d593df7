//! Byte-level encoding primitives for the CIGI codec.
//!
//! This crate reads and writes fixed-width scalars at byte offsets in the CIGI
//! wire byte order, plus the single-byte bit fields CIGI packs its flags into.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - Every access is bounds-checked before a byte is touched.
//! - **One byte order** - [`WIRE_ORDER`] is fixed at compile time; callers never pass it.
//! - **No domain knowledge** - This crate knows nothing about packets or versions.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bytecodec::{ByteReader, ByteWriter, BitField, Flags8};
//!
//! const MODE: BitField = BitField::new(0, 2);
//!
//! let mut buf = [0u8; 7];
//! let mut writer = ByteWriter::new(&mut buf);
//! writer.write_u16(0x8000).unwrap();
//! writer.write_u8(Flags8::new().with(MODE, 1).unwrap().raw()).unwrap();
//! writer.write_f32(1.5).unwrap();
//! assert_eq!(writer.finish(), 7);
//!
//! let mut reader = ByteReader::new(&buf);
//! assert_eq!(reader.read_u16().unwrap(), 0x8000);
//! assert_eq!(Flags8::from_raw(reader.read_u8().unwrap()).get(MODE), 1);
//! assert_eq!(reader.read_f32().unwrap(), 1.5);
//! ```

mod bits;
mod error;
mod reader;
mod scalar;
mod writer;

pub use bits::{BitField, Flags8};
pub use error::{ByteError, ByteResult};
pub use reader::ByteReader;
pub use scalar::{
    read_f32, read_f64, read_i16, read_i32, read_i64, read_i8, read_u16, read_u32, read_u64,
    read_u8, write_f32, write_f64, write_i16, write_i32, write_i64, write_i8, write_u16,
    write_u32, write_u64, write_u8, ByteOrder, WIRE_ORDER,
};
pub use writer::ByteWriter;
