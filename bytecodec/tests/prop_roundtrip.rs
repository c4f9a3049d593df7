use bytecodec::{BitField, ByteReader, ByteWriter, Flags8};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    F32(u32),
    F64(u64),
    Zero(u8),
}

impl Op {
    const fn width(&self) -> usize {
        match self {
            Self::U8(_) | Self::I8(_) => 1,
            Self::U16(_) | Self::I16(_) => 2,
            Self::U32(_) | Self::I32(_) | Self::F32(_) => 4,
            Self::U64(_) | Self::F64(_) => 8,
            Self::Zero(n) => *n as usize,
        }
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::U8),
        any::<i8>().prop_map(Op::I8),
        any::<u16>().prop_map(Op::U16),
        any::<i16>().prop_map(Op::I16),
        any::<u32>().prop_map(Op::U32),
        any::<i32>().prop_map(Op::I32),
        any::<u64>().prop_map(Op::U64),
        any::<u32>().prop_map(Op::F32),
        any::<u64>().prop_map(Op::F64),
        (0u8..8).prop_map(Op::Zero),
    ]
}

proptest! {
    #[test]
    fn prop_roundtrip_ops(ops in prop::collection::vec(op_strategy(), 1..64)) {
        let total: usize = ops.iter().map(Op::width).sum();
        let mut buf = vec![0xA5u8; total];
        let mut writer = ByteWriter::new(&mut buf);

        for op in &ops {
            match op {
                Op::U8(v) => writer.write_u8(*v).unwrap(),
                Op::I8(v) => writer.write_i8(*v).unwrap(),
                Op::U16(v) => writer.write_u16(*v).unwrap(),
                Op::I16(v) => writer.write_i16(*v).unwrap(),
                Op::U32(v) => writer.write_u32(*v).unwrap(),
                Op::I32(v) => writer.write_i32(*v).unwrap(),
                Op::U64(v) => writer.write_u64(*v).unwrap(),
                Op::F32(bits) => writer.write_f32(f32::from_bits(*bits)).unwrap(),
                Op::F64(bits) => writer.write_f64(f64::from_bits(*bits)).unwrap(),
                Op::Zero(n) => writer.zero_fill(*n as usize).unwrap(),
            }
        }
        prop_assert_eq!(writer.finish(), total);

        let mut reader = ByteReader::new(&buf);
        for op in &ops {
            match op {
                Op::U8(v) => prop_assert_eq!(reader.read_u8().unwrap(), *v),
                Op::I8(v) => prop_assert_eq!(reader.read_i8().unwrap(), *v),
                Op::U16(v) => prop_assert_eq!(reader.read_u16().unwrap(), *v),
                Op::I16(v) => prop_assert_eq!(reader.read_i16().unwrap(), *v),
                Op::U32(v) => prop_assert_eq!(reader.read_u32().unwrap(), *v),
                Op::I32(v) => prop_assert_eq!(reader.read_i32().unwrap(), *v),
                Op::U64(v) => prop_assert_eq!(reader.read_u64().unwrap(), *v),
                // Compare bit patterns so NaN payloads survive the check.
                Op::F32(bits) => prop_assert_eq!(reader.read_f32().unwrap().to_bits(), *bits),
                Op::F64(bits) => prop_assert_eq!(reader.read_f64().unwrap().to_bits(), *bits),
                Op::Zero(n) => {
                    let bytes = reader.read_bytes(*n as usize).unwrap();
                    prop_assert!(bytes.iter().all(|b| *b == 0));
                }
            }
        }
        prop_assert!(reader.is_empty());
    }

    #[test]
    fn prop_truncated_writer_never_panics(
        ops in prop::collection::vec(op_strategy(), 1..32),
        cap in 0usize..64,
    ) {
        let mut buf = vec![0u8; cap];
        let mut writer = ByteWriter::new(&mut buf);
        for op in &ops {
            let before = writer.position();
            let result = match op {
                Op::U8(v) => writer.write_u8(*v),
                Op::I8(v) => writer.write_i8(*v),
                Op::U16(v) => writer.write_u16(*v),
                Op::I16(v) => writer.write_i16(*v),
                Op::U32(v) => writer.write_u32(*v),
                Op::I32(v) => writer.write_i32(*v),
                Op::U64(v) => writer.write_u64(*v),
                Op::F32(bits) => writer.write_f32(f32::from_bits(*bits)),
                Op::F64(bits) => writer.write_f64(f64::from_bits(*bits)),
                Op::Zero(n) => writer.zero_fill(*n as usize),
            };
            if result.is_err() {
                prop_assert_eq!(writer.position(), before);
                prop_assert!(before + op.width() > cap);
            }
        }
        prop_assert!(writer.position() <= cap);
    }

    #[test]
    fn prop_bit_fields_roundtrip(shift in 0u8..8, width in 1u8..=8, value: u8, base: u8) {
        prop_assume!(shift + width <= 8);
        let field = BitField::new(shift, width);
        let mut flags = Flags8::from_raw(base);
        let fits = value <= field.max_value();
        prop_assert_eq!(flags.set(field, value).is_ok(), fits);
        if fits {
            prop_assert_eq!(flags.get(field), value);
            let others = !(field.max_value() << shift);
            prop_assert_eq!(flags.raw() & others, base & others);
        } else {
            prop_assert_eq!(flags.raw(), base);
        }
    }
}
