//! Packet body codec: header framing around one packet's fields.

use bytecodec::{BitField, ByteReader, ByteWriter, Flags8};

use crate::enums::WireEnum;
use crate::error::{LengthReason, PacketError, PacketResult};
use crate::header::{PacketHeader, PacketSize, HEADER_SIZE, MAX_PACKET_SIZE};
use crate::version::CigiVersion;

/// One packet layout: the fields after the two header bytes.
///
/// Implementations read and write fields in wire order. Framing, size
/// validation and the exact-consumption check live in [`encode_body`] and
/// [`decode_body`].
pub trait PacketBody: Sized {
    /// Size rule of the layout.
    const SIZE: PacketSize;

    /// Encoded size of this value in bytes, header included.
    fn encoded_len(&self) -> usize {
        Self::SIZE.min()
    }

    /// Field holding a value only a later minor version defines.
    ///
    /// Layouts whose enumerations grew after the layout was introduced
    /// override this; the default reports none.
    fn newer_field(&self) -> Option<NewerField> {
        None
    }

    /// Earliest version able to carry this value, given the version that
    /// introduced the layout.
    fn content_version(&self, layout: CigiVersion) -> CigiVersion {
        self.newer_field().map_or(layout, |newer| layout.max(newer.since))
    }

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()>;

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self>;
}

/// A field value that needs a newer version than its layout's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewerField {
    /// First version defining the value.
    pub since: CigiVersion,
    pub field: &'static str,
    pub value: u64,
}

/// Encodes `body` with the given packet id into `out`.
///
/// Returns the number of bytes written, which equals the declared
/// `packet_size`. Nothing is written to `out` when an error is returned.
pub fn encode_body<B: PacketBody>(packet_id: u8, body: &B, out: &mut [u8]) -> PacketResult<usize> {
    let len = body.encoded_len();
    B::SIZE.check(packet_id, len)?;
    let packet_size = u8::try_from(len).map_err(|_| PacketError::FieldOutOfRange {
        value: len as u64,
        bits: 8,
    })?;
    if out.len() < len {
        return Err(PacketError::BufferTooSmall {
            needed: len,
            available: out.len(),
        });
    }

    let mut scratch = [0u8; MAX_PACKET_SIZE];
    let mut writer = PacketWriter::new(packet_id, &mut scratch[..len]);
    writer.u8(packet_id)?;
    writer.u8(packet_size)?;
    body.write_body(&mut writer)?;
    let written = writer.position();
    if written != len {
        return Err(PacketError::SizeMismatch {
            packet_id,
            declared: len,
            expected: written,
        });
    }

    out[..len].copy_from_slice(&scratch[..len]);
    Ok(len)
}

/// Decodes one packet with the given id from the start of `buf`.
///
/// Returns the decoded body and the number of bytes consumed, which always
/// equals the declared `packet_size`.
pub fn decode_body<B: PacketBody>(packet_id: u8, buf: &[u8]) -> PacketResult<(B, usize)> {
    let header = PacketHeader::peek(buf)?;
    if header.packet_id != packet_id {
        return Err(PacketError::UnexpectedPacketId {
            expected: packet_id,
            found: header.packet_id,
        });
    }
    let declared = header.declared_len();
    if buf.len() < declared {
        return Err(PacketError::BufferTooSmall {
            needed: declared,
            available: buf.len(),
        });
    }
    B::SIZE.check(packet_id, declared)?;

    let mut reader = PacketReader::new(packet_id, &buf[..declared]);
    let body = B::read_body(&mut reader)?;
    if reader.position() != declared {
        return Err(PacketError::SizeMismatch {
            packet_id,
            declared,
            expected: reader.position(),
        });
    }
    Ok((body, declared))
}

/// Decodes like [`decode_body`], then refuses a value `version` does not
/// define with [`PacketError::InvalidField`].
pub fn decode_body_for<B: PacketBody>(
    packet_id: u8,
    buf: &[u8],
    version: CigiVersion,
) -> PacketResult<(B, usize)> {
    let (body, used) = decode_body::<B>(packet_id, buf)?;
    match body.newer_field() {
        Some(newer) if newer.since > version => Err(PacketError::InvalidField {
            packet_id,
            field: newer.field,
            value: newer.value,
        }),
        _ => Ok((body, used)),
    }
}

/// Field reader over exactly one packet.
///
/// The underlying slice ends at the declared packet size, so reading past
/// it is a [`PacketError::SizeMismatch`] rather than a buffer overrun.
#[derive(Debug)]
pub struct PacketReader<'a> {
    packet_id: u8,
    inner: ByteReader<'a>,
}

macro_rules! reader_fields {
    ($($ty:ty => $name:ident, $read:ident;)+) => {
        $(
            pub fn $name(&mut self) -> PacketResult<$ty> {
                let result = self.inner.$read();
                result.map_err(|err| self.overrun(err.needed()))
            }
        )+
    };
}

impl<'a> PacketReader<'a> {
    fn new(packet_id: u8, packet: &'a [u8]) -> Self {
        Self {
            packet_id,
            inner: ByteReader::at(packet, HEADER_SIZE),
        }
    }

    #[must_use]
    pub const fn packet_id(&self) -> u8 {
        self.packet_id
    }

    /// Declared size of the packet being read.
    #[must_use]
    pub const fn declared(&self) -> usize {
        self.inner.data().len()
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.inner.position()
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.inner.remaining()
    }

    reader_fields! {
        u8 => u8, read_u8;
        i8 => i8, read_i8;
        u16 => u16, read_u16;
        i16 => i16, read_i16;
        u32 => u32, read_u32;
        i32 => i32, read_i32;
        f32 => f32, read_f32;
        f64 => f64, read_f64;
    }

    pub fn flags(&mut self) -> PacketResult<Flags8> {
        self.u8().map(Flags8::from_raw)
    }

    pub fn bytes(&mut self, len: usize) -> PacketResult<&'a [u8]> {
        let result = self.inner.read_bytes(len);
        result.map_err(|err| self.overrun(err.needed()))
    }

    /// Skips reserved bytes.
    pub fn skip(&mut self, len: usize) -> PacketResult<()> {
        let result = self.inner.skip(len);
        result.map_err(|err| self.overrun(err.needed()))
    }

    /// Reads `N` consecutive `u32` words.
    pub fn words<const N: usize>(&mut self) -> PacketResult<[u32; N]> {
        let mut out = [0u32; N];
        for word in &mut out {
            *word = self.u32()?;
        }
        Ok(out)
    }

    /// Reads a whole byte as an enumerator.
    pub fn enum_u8<E: WireEnum>(&mut self, field: &'static str) -> PacketResult<E> {
        let raw = self.u8()?;
        self.enumerator(field, raw)
    }

    /// Extracts an enumerator from a bit field of a flag byte.
    pub fn enum_bits<E: WireEnum>(
        &self,
        flags: Flags8,
        bits: BitField,
        field: &'static str,
    ) -> PacketResult<E> {
        self.enumerator(field, flags.get(bits))
    }

    /// Parses a raw value, reporting [`PacketError::InvalidField`] when the
    /// enumeration does not define it.
    pub fn enumerator<E: WireEnum>(&self, field: &'static str, raw: u8) -> PacketResult<E> {
        E::from_raw(raw).ok_or(PacketError::InvalidField {
            packet_id: self.packet_id,
            field,
            value: u64::from(raw),
        })
    }

    /// Number of `element_size`-byte elements following a `fixed`-byte part.
    ///
    /// The count is derived from the declared packet size, which must leave a
    /// whole number of elements and at most `max_count` of them.
    pub fn element_count(
        &self,
        fixed: usize,
        element_size: usize,
        max_count: usize,
    ) -> PacketResult<usize> {
        let declared = self.declared();
        let trailing = declared.saturating_sub(fixed);
        if trailing % element_size != 0 {
            return Err(self.malformed(LengthReason::PartialElement { element_size }));
        }
        let count = trailing / element_size;
        if count > max_count {
            return Err(self.malformed(LengthReason::ExceedsMaximum {
                max: fixed + element_size * max_count,
            }));
        }
        Ok(count)
    }

    /// Reads NUL-terminated text filling the rest of the packet.
    ///
    /// The packet size must be a multiple of 8; bytes after the terminator
    /// are padding. Text that is not UTF-8 is [`PacketError::InvalidField`],
    /// reporting the first offending byte.
    pub fn padded_text(&mut self) -> PacketResult<String> {
        if self.declared() % TEXT_ALIGNMENT != 0 {
            return Err(self.malformed(LengthReason::Unaligned {
                alignment: TEXT_ALIGNMENT,
            }));
        }
        let area = self.bytes(self.remaining())?;
        let end = area
            .iter()
            .position(|b| *b == 0)
            .ok_or_else(|| self.malformed(LengthReason::MissingTerminator))?;
        let text = &area[..end];
        match std::str::from_utf8(text) {
            Ok(text) => Ok(text.to_owned()),
            Err(err) => Err(PacketError::InvalidField {
                packet_id: self.packet_id,
                field: "text",
                value: u64::from(text[err.valid_up_to()]),
            }),
        }
    }

    fn malformed(&self, reason: LengthReason) -> PacketError {
        PacketError::MalformedVariableLength {
            packet_id: self.packet_id,
            declared: self.declared(),
            reason,
        }
    }

    fn overrun(&self, needed: usize) -> PacketError {
        PacketError::SizeMismatch {
            packet_id: self.packet_id,
            declared: self.declared(),
            expected: needed,
        }
    }
}

/// Alignment of packets carrying text.
pub const TEXT_ALIGNMENT: usize = 8;

/// Encoded size of a packet with `fixed` bytes before NUL-terminated,
/// 8-byte-aligned text.
#[must_use]
pub const fn padded_text_len(fixed: usize, text: &str) -> usize {
    let unpadded = fixed + text.len() + 1;
    unpadded.div_ceil(TEXT_ALIGNMENT) * TEXT_ALIGNMENT
}

/// Field writer over exactly one packet.
#[derive(Debug)]
pub struct PacketWriter<'a> {
    packet_id: u8,
    inner: ByteWriter<'a>,
}

macro_rules! writer_fields {
    ($($ty:ty => $name:ident, $write:ident;)+) => {
        $(
            pub fn $name(&mut self, value: $ty) -> PacketResult<()> {
                self.inner.$write(value)?;
                Ok(())
            }
        )+
    };
}

impl<'a> PacketWriter<'a> {
    fn new(packet_id: u8, packet: &'a mut [u8]) -> Self {
        Self {
            packet_id,
            inner: ByteWriter::new(packet),
        }
    }

    #[must_use]
    pub const fn packet_id(&self) -> u8 {
        self.packet_id
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.inner.position()
    }

    writer_fields! {
        u8 => u8, write_u8;
        i8 => i8, write_i8;
        u16 => u16, write_u16;
        i16 => i16, write_i16;
        u32 => u32, write_u32;
        i32 => i32, write_i32;
        f32 => f32, write_f32;
        f64 => f64, write_f64;
    }

    pub fn flags(&mut self, flags: Flags8) -> PacketResult<()> {
        self.u8(flags.raw())
    }

    pub fn bytes(&mut self, bytes: &[u8]) -> PacketResult<()> {
        self.inner.write_bytes(bytes)?;
        Ok(())
    }

    /// Writes zeroed reserved bytes.
    pub fn reserved(&mut self, len: usize) -> PacketResult<()> {
        self.inner.zero_fill(len)?;
        Ok(())
    }

    pub fn words(&mut self, words: &[u32]) -> PacketResult<()> {
        for word in words {
            self.u32(*word)?;
        }
        Ok(())
    }

    pub fn enum_u8<E: WireEnum>(&mut self, value: E) -> PacketResult<()> {
        self.u8(value.raw())
    }

    /// Writes NUL-terminated text zero padded to the end of the packet.
    ///
    /// Text containing a NUL byte cannot be terminated unambiguously and is
    /// rejected.
    pub fn padded_text(&mut self, field: &'static str, text: &str) -> PacketResult<()> {
        if let Some(index) = text.bytes().position(|b| b == 0) {
            return Err(PacketError::InvalidField {
                packet_id: self.packet_id,
                field,
                value: index as u64,
            });
        }
        self.bytes(text.as_bytes())?;
        let padding = self.inner.remaining();
        self.reserved(padding)
    }
}
