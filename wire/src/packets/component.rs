//! Component Control packets: generic state and data words addressed by
//! component class.

use bytecodec::{BitField, Flags8};

use crate::body::{NewerField, PacketBody, PacketReader, PacketWriter};
use crate::enums::{ComponentClassV1, ComponentClassV2, ComponentClassV3, WireEnum};
use crate::error::PacketResult;
use crate::header::PacketSize;
use crate::ids::{v1, v2, v3};
use crate::version::CigiVersion;

/// Component Control of CIGI 1 and 2, generic over the class enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyComponentControl<C> {
    pub instance_id: u16,
    pub component_class: C,
    pub component_state: u8,
    pub component_id: u16,
    pub data: [u32; 3],
}

pub type ComponentControlV1 = LegacyComponentControl<ComponentClassV1>;
pub type ComponentControlV2 = LegacyComponentControl<ComponentClassV2>;

const LEGACY_CLASS: BitField = BitField::new(0, 4);
const CLASS: BitField = BitField::new(0, 6);

impl<C: WireEnum> PacketBody for LegacyComponentControl<C> {
    const SIZE: PacketSize = PacketSize::Fixed(20);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.instance_id)?;
        writer.flags(Flags8::new().with(LEGACY_CLASS, self.component_class.raw())?)?;
        writer.u8(self.component_state)?;
        writer.u16(self.component_id)?;
        writer.words(&self.data)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let instance_id = reader.u16()?;
        let flags = reader.flags()?;
        Ok(Self {
            instance_id,
            component_class: reader.enum_bits(flags, LEGACY_CLASS, "component_class")?,
            component_state: reader.u8()?,
            component_id: reader.u16()?,
            data: reader.words()?,
        })
    }
}

fn symbol_class(class: ComponentClassV3) -> Option<NewerField> {
    class.is_symbol_class().then(|| NewerField {
        since: CigiVersion::V3_3,
        field: "component_class",
        value: u64::from(class.raw()),
    })
}

/// Component Control of CIGI 3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentControlV3 {
    pub component_id: u16,
    pub instance_id: u16,
    pub component_class: ComponentClassV3,
    pub component_state: u8,
    pub data: [u32; 6],
}

impl PacketBody for ComponentControlV3 {
    const SIZE: PacketSize = PacketSize::Fixed(32);

    fn newer_field(&self) -> Option<NewerField> {
        symbol_class(self.component_class)
    }

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.component_id)?;
        writer.u16(self.instance_id)?;
        writer.flags(Flags8::new().with(CLASS, self.component_class.raw())?)?;
        writer.u8(self.component_state)?;
        writer.words(&self.data)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let component_id = reader.u16()?;
        let instance_id = reader.u16()?;
        let flags = reader.flags()?;
        Ok(Self {
            component_id,
            instance_id,
            component_class: reader.enum_bits(flags, CLASS, "component_class")?,
            component_state: reader.u8()?,
            data: reader.words()?,
        })
    }
}

packet_family! {
    /// Component Control: sets the state and data words of one component.
    ComponentControl {
        V1(ComponentControlV1) => v1::COMPONENT_CONTROL, V1;
        V2(ComponentControlV2) => v2::COMPONENT_CONTROL, V2;
        V3(ComponentControlV3) => v3::COMPONENT_CONTROL, V3;
    }
}

/// Short Component Control (CIGI 3): Component Control with two data words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShortComponentControl {
    pub component_id: u16,
    pub instance_id: u16,
    pub component_class: ComponentClassV3,
    pub component_state: u8,
    pub data: [u32; 2],
}

impl PacketBody for ShortComponentControl {
    const SIZE: PacketSize = PacketSize::Fixed(16);

    fn newer_field(&self) -> Option<NewerField> {
        symbol_class(self.component_class)
    }

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.component_id)?;
        writer.u16(self.instance_id)?;
        writer.flags(Flags8::new().with(CLASS, self.component_class.raw())?)?;
        writer.u8(self.component_state)?;
        writer.words(&self.data)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let component_id = reader.u16()?;
        let instance_id = reader.u16()?;
        let flags = reader.flags()?;
        Ok(Self {
            component_id,
            instance_id,
            component_class: reader.enum_bits(flags, CLASS, "component_class")?,
            component_state: reader.u8()?,
            data: reader.words()?,
        })
    }
}

single_packet!(ShortComponentControl => v3::SHORT_COMPONENT_CONTROL, V3);
