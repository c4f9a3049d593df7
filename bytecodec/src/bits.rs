//! Bit fields packed into single flag bytes.

use crate::error::{ByteError, ByteResult};

/// A contiguous run of bits inside one byte.
///
/// `shift` is the position of the least significant bit of the field, with
/// bit 0 being the least significant bit of the byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitField {
    shift: u8,
    width: u8,
}

impl BitField {
    /// Creates a field of `width` bits starting at bit `shift`.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a const) if the field does not
    /// fit in a byte.
    #[must_use]
    pub const fn new(shift: u8, width: u8) -> Self {
        assert!(width >= 1 && shift + width <= 8, "bit field exceeds byte");
        Self { shift, width }
    }

    /// A single-bit flag at bit `shift`.
    #[must_use]
    pub const fn flag(shift: u8) -> Self {
        Self::new(shift, 1)
    }

    #[must_use]
    pub const fn shift(self) -> u8 {
        self.shift
    }

    #[must_use]
    pub const fn width(self) -> u8 {
        self.width
    }

    /// Largest value the field can hold.
    #[must_use]
    pub const fn max_value(self) -> u8 {
        ((1u16 << self.width) - 1) as u8
    }

    const fn mask(self) -> u8 {
        self.max_value() << self.shift
    }

    /// Extracts the field from `byte`.
    #[must_use]
    pub const fn extract(self, byte: u8) -> u8 {
        (byte & self.mask()) >> self.shift
    }

    /// Returns `byte` with the field replaced by `value`.
    pub const fn insert(self, byte: u8, value: u8) -> ByteResult<u8> {
        if value > self.max_value() {
            return Err(ByteError::ValueOutOfRange {
                value: value as u64,
                bits: self.width,
            });
        }
        Ok((byte & !self.mask()) | (value << self.shift))
    }
}

/// A flag byte assembled from, or decomposed into, [`BitField`]s.
///
/// Bits no field claims stay zero when building from [`Flags8::new`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags8(u8);

impl Flags8 {
    /// An all-zero flag byte.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Wraps a raw byte read from the wire.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn get(self, field: BitField) -> u8 {
        field.extract(self.0)
    }

    #[must_use]
    pub const fn get_bool(self, field: BitField) -> bool {
        field.extract(self.0) != 0
    }

    /// Stores `value` in `field`.
    ///
    /// Fails with [`ByteError::ValueOutOfRange`] when `value` does not fit,
    /// leaving the byte unchanged.
    pub fn set(&mut self, field: BitField, value: u8) -> ByteResult<()> {
        self.0 = field.insert(self.0, value)?;
        Ok(())
    }

    /// Stores a boolean in `field` (1 for `true`).
    pub fn set_bool(&mut self, field: BitField, value: bool) {
        let mask = field.max_value() << field.shift();
        self.0 &= !mask;
        if value {
            self.0 |= 1 << field.shift();
        }
    }

    /// Builder-style variant of [`Flags8::set`].
    pub fn with(mut self, field: BitField, value: u8) -> ByteResult<Self> {
        self.set(field, value)?;
        Ok(self)
    }

    /// Builder-style variant of [`Flags8::set_bool`].
    #[must_use]
    pub fn with_bool(mut self, field: BitField, value: bool) -> Self {
        self.set_bool(field, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODE: BitField = BitField::new(0, 2);
    const FLAG: BitField = BitField::flag(2);
    const HIGH: BitField = BitField::new(4, 4);

    #[test]
    fn max_values() {
        assert_eq!(MODE.max_value(), 3);
        assert_eq!(FLAG.max_value(), 1);
        assert_eq!(HIGH.max_value(), 15);
        assert_eq!(BitField::new(0, 8).max_value(), 255);
    }

    #[test]
    fn set_and_get() {
        let flags = Flags8::new()
            .with(MODE, 2)
            .unwrap()
            .with_bool(FLAG, true)
            .with(HIGH, 0xA)
            .unwrap();
        assert_eq!(flags.raw(), 0b1010_0110);
        assert_eq!(flags.get(MODE), 2);
        assert!(flags.get_bool(FLAG));
        assert_eq!(flags.get(HIGH), 0xA);
    }

    #[test]
    fn out_of_range_leaves_byte() {
        let mut flags = Flags8::from_raw(0b0000_0001);
        let err = flags.set(MODE, 4).unwrap_err();
        assert_eq!(err, ByteError::ValueOutOfRange { value: 4, bits: 2 });
        assert_eq!(flags.raw(), 0b0000_0001);
    }

    #[test]
    fn set_bool_clears() {
        let mut flags = Flags8::from_raw(0xFF);
        flags.set_bool(FLAG, false);
        assert_eq!(flags.raw(), 0xFB);
    }

    #[test]
    fn extract_ignores_other_bits() {
        assert_eq!(HIGH.extract(0x3F), 0x3);
        assert_eq!(MODE.extract(0xFC), 0);
    }

    #[test]
    #[should_panic(expected = "bit field exceeds byte")]
    fn oversized_field_panics() {
        let _ = BitField::new(6, 3);
    }
}
