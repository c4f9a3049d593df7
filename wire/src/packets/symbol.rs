//! CIGI 3.3 symbology: drawing surfaces, symbol definitions and symbol
//! control.
//!
//! Text, circle and line definitions are variable length. Their element
//! count is never carried explicitly; it follows from `packet_size`.

use bytecodec::{BitField, Flags8};

use super::Rgba;
use crate::body::{padded_text_len, PacketBody, PacketReader, PacketWriter};
use crate::enums::{
    FlashControl, SymbolAttachType, SymbolAttribute, SymbolCloneSource, SymbolDrawingStyle,
    SymbolPrimitive, SymbolState, SymbolSurfaceState, SymbolTextAlignment, SymbolTextOrientation,
    WireEnum,
};
use crate::error::PacketResult;
use crate::header::PacketSize;
use crate::ids::v3;

/// Symbol Surface Definition: a drawing surface attached to an entity or a
/// view.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolSurfaceDefinition {
    pub surface_id: u16,
    pub surface_state: SymbolSurfaceState,
    pub attach_type: SymbolAttachType,
    pub billboard: bool,
    pub perspective_growth: bool,
    /// Entity or view the surface is attached to.
    pub attach_id: u16,
    /// x/y/z/yaw/pitch/roll for entity surfaces; left/right/top/bottom for
    /// view surfaces (the last two unused).
    pub placement: [f32; 6],
    pub width: f32,
    pub height: f32,
    pub min_u: f32,
    pub max_u: f32,
    pub min_v: f32,
    pub max_v: f32,
}

impl SymbolSurfaceDefinition {
    const STATE: BitField = BitField::flag(0);
    const ATTACH_TYPE: BitField = BitField::flag(1);
    const BILLBOARD: BitField = BitField::flag(2);
    const PERSPECTIVE_GROWTH: BitField = BitField::flag(3);
}

impl PacketBody for SymbolSurfaceDefinition {
    const SIZE: PacketSize = PacketSize::Fixed(56);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.surface_id)?;
        let flags = Flags8::new()
            .with(Self::STATE, self.surface_state.raw())?
            .with(Self::ATTACH_TYPE, self.attach_type.raw())?
            .with_bool(Self::BILLBOARD, self.billboard)
            .with_bool(Self::PERSPECTIVE_GROWTH, self.perspective_growth);
        writer.flags(flags)?;
        writer.reserved(1)?;
        writer.u16(self.attach_id)?;
        for value in self.placement {
            writer.f32(value)?;
        }
        for value in [
            self.width,
            self.height,
            self.min_u,
            self.max_u,
            self.min_v,
            self.max_v,
        ] {
            writer.f32(value)?;
        }
        Ok(())
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let surface_id = reader.u16()?;
        let flags = reader.flags()?;
        reader.skip(1)?;
        let attach_id = reader.u16()?;
        let mut placement = [0.0; 6];
        for value in &mut placement {
            *value = reader.f32()?;
        }
        Ok(Self {
            surface_id,
            surface_state: reader.enum_bits(flags, Self::STATE, "surface_state")?,
            attach_type: reader.enum_bits(flags, Self::ATTACH_TYPE, "attach_type")?,
            billboard: flags.get_bool(Self::BILLBOARD),
            perspective_growth: flags.get_bool(Self::PERSPECTIVE_GROWTH),
            attach_id,
            placement,
            width: reader.f32()?,
            height: reader.f32()?,
            min_u: reader.f32()?,
            max_u: reader.f32()?,
            min_v: reader.f32()?,
            max_v: reader.f32()?,
        })
    }
}

single_packet!(SymbolSurfaceDefinition => v3::SYMBOL_SURFACE_DEFINITION, V3_3);

/// Bytes before the text of a Symbol Text Definition.
const TEXT_FIXED: usize = 12;

/// Symbol Text Definition: a text symbol. Variable length, 16 to 248 bytes.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolTextDefinition {
    pub symbol_id: u16,
    pub alignment: SymbolTextAlignment,
    pub orientation: SymbolTextOrientation,
    pub font_id: u8,
    pub font_size: f32,
    /// Text without its terminator; must not contain NUL.
    pub text: String,
}

impl SymbolTextDefinition {
    const ALIGNMENT: BitField = BitField::new(0, 4);
    const ORIENTATION: BitField = BitField::new(4, 2);
}

impl PacketBody for SymbolTextDefinition {
    const SIZE: PacketSize = PacketSize::Variable { min: 16, max: 248 };

    fn encoded_len(&self) -> usize {
        padded_text_len(TEXT_FIXED, &self.text)
    }

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.symbol_id)?;
        let flags = Flags8::new()
            .with(Self::ALIGNMENT, self.alignment.raw())?
            .with(Self::ORIENTATION, self.orientation.raw())?;
        writer.flags(flags)?;
        writer.u8(self.font_id)?;
        writer.reserved(2)?;
        writer.f32(self.font_size)?;
        writer.padded_text("text", &self.text)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let symbol_id = reader.u16()?;
        let flags = reader.flags()?;
        let font_id = reader.u8()?;
        reader.skip(2)?;
        Ok(Self {
            symbol_id,
            alignment: reader.enum_bits(flags, Self::ALIGNMENT, "alignment")?,
            orientation: reader.enum_bits(flags, Self::ORIENTATION, "orientation")?,
            font_id,
            font_size: reader.f32()?,
            text: reader.padded_text()?,
        })
    }
}

single_packet!(SymbolTextDefinition => v3::SYMBOL_TEXT_DEFINITION, V3_3);

/// Line style shared by circle and line symbols.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineStyle {
    pub stipple_pattern: u16,
    pub line_width: f32,
    pub stipple_length: f32,
}

/// Bytes before the first element of circle and line definitions.
const SHAPE_FIXED: usize = 16;

pub const CIRCLE_SIZE: usize = 24;
pub const MAX_CIRCLES: usize = 9;

/// One circle or arc of a [`SymbolCircleDefinition`], in symbol units and
/// degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    pub center_u: f32,
    pub center_v: f32,
    pub radius: f32,
    /// Only meaningful for filled circles.
    pub inner_radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
}

/// Symbol Circle Definition: up to nine circles or arcs.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolCircleDefinition {
    pub symbol_id: u16,
    pub drawing_style: SymbolDrawingStyle,
    pub style: LineStyle,
    pub circles: Vec<Circle>,
}

const DRAWING_STYLE: BitField = BitField::flag(0);

impl PacketBody for SymbolCircleDefinition {
    const SIZE: PacketSize = PacketSize::Variable {
        min: SHAPE_FIXED as u8,
        max: (SHAPE_FIXED + CIRCLE_SIZE * MAX_CIRCLES) as u8,
    };

    fn encoded_len(&self) -> usize {
        SHAPE_FIXED + CIRCLE_SIZE * self.circles.len()
    }

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.symbol_id)?;
        writer.flags(Flags8::new().with(DRAWING_STYLE, self.drawing_style.raw())?)?;
        writer.reserved(1)?;
        writer.u16(self.style.stipple_pattern)?;
        writer.f32(self.style.line_width)?;
        writer.f32(self.style.stipple_length)?;
        for circle in &self.circles {
            for value in [
                circle.center_u,
                circle.center_v,
                circle.radius,
                circle.inner_radius,
                circle.start_angle,
                circle.end_angle,
            ] {
                writer.f32(value)?;
            }
        }
        Ok(())
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let count = reader.element_count(SHAPE_FIXED, CIRCLE_SIZE, MAX_CIRCLES)?;
        let symbol_id = reader.u16()?;
        let flags = reader.flags()?;
        reader.skip(1)?;
        let style = LineStyle {
            stipple_pattern: reader.u16()?,
            line_width: reader.f32()?,
            stipple_length: reader.f32()?,
        };
        let mut circles = Vec::with_capacity(count);
        for _ in 0..count {
            circles.push(Circle {
                center_u: reader.f32()?,
                center_v: reader.f32()?,
                radius: reader.f32()?,
                inner_radius: reader.f32()?,
                start_angle: reader.f32()?,
                end_angle: reader.f32()?,
            });
        }
        Ok(Self {
            symbol_id,
            drawing_style: reader.enum_bits(flags, DRAWING_STYLE, "drawing_style")?,
            style,
            circles,
        })
    }
}

single_packet!(SymbolCircleDefinition => v3::SYMBOL_CIRCLE_DEFINITION, V3_3);

pub const VERTEX_SIZE: usize = 8;
pub const MAX_VERTICES: usize = 29;

/// A vertex of a [`SymbolLineDefinition`] in symbol units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub u: f32,
    pub v: f32,
}

/// Symbol Line Definition: up to 29 vertices drawn as one primitive.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolLineDefinition {
    pub symbol_id: u16,
    pub primitive: SymbolPrimitive,
    pub style: LineStyle,
    pub vertices: Vec<Vertex>,
}

impl SymbolLineDefinition {
    const PRIMITIVE: BitField = BitField::new(0, 4);
}

impl PacketBody for SymbolLineDefinition {
    const SIZE: PacketSize = PacketSize::Variable {
        min: SHAPE_FIXED as u8,
        max: (SHAPE_FIXED + VERTEX_SIZE * MAX_VERTICES) as u8,
    };

    fn encoded_len(&self) -> usize {
        SHAPE_FIXED + VERTEX_SIZE * self.vertices.len()
    }

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.symbol_id)?;
        writer.flags(Flags8::new().with(Self::PRIMITIVE, self.primitive.raw())?)?;
        writer.reserved(1)?;
        writer.u16(self.style.stipple_pattern)?;
        writer.f32(self.style.line_width)?;
        writer.f32(self.style.stipple_length)?;
        for vertex in &self.vertices {
            writer.f32(vertex.u)?;
            writer.f32(vertex.v)?;
        }
        Ok(())
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let count = reader.element_count(SHAPE_FIXED, VERTEX_SIZE, MAX_VERTICES)?;
        let symbol_id = reader.u16()?;
        let flags = reader.flags()?;
        reader.skip(1)?;
        let style = LineStyle {
            stipple_pattern: reader.u16()?,
            line_width: reader.f32()?,
            stipple_length: reader.f32()?,
        };
        let mut vertices = Vec::with_capacity(count);
        for _ in 0..count {
            vertices.push(Vertex {
                u: reader.f32()?,
                v: reader.f32()?,
            });
        }
        Ok(Self {
            symbol_id,
            primitive: reader.enum_bits(flags, Self::PRIMITIVE, "primitive")?,
            style,
            vertices,
        })
    }
}

single_packet!(SymbolLineDefinition => v3::SYMBOL_LINE_DEFINITION, V3_3);

/// Symbol Clone: copies an existing symbol or instantiates a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolClone {
    pub symbol_id: u16,
    pub source_type: SymbolCloneSource,
    pub source_id: u16,
}

impl PacketBody for SymbolClone {
    const SIZE: PacketSize = PacketSize::Fixed(8);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.symbol_id)?;
        writer.flags(Flags8::new().with(BitField::flag(0), self.source_type.raw())?)?;
        writer.reserved(1)?;
        writer.u16(self.source_id)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let symbol_id = reader.u16()?;
        let flags = reader.flags()?;
        reader.skip(1)?;
        Ok(Self {
            symbol_id,
            source_type: reader.enum_bits(flags, BitField::flag(0), "source_type")?,
            source_id: reader.u16()?,
        })
    }
}

single_packet!(SymbolClone => v3::SYMBOL_CLONE, V3_3);

/// Symbol state bits shared by Symbol Control and Short Symbol Control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolFlags {
    pub state: SymbolState,
    pub attached: bool,
    pub flash_control: FlashControl,
    pub inherit_color: bool,
}

impl SymbolFlags {
    const STATE: BitField = BitField::new(0, 2);
    const ATTACHED: BitField = BitField::flag(2);
    const FLASH_CONTROL: BitField = BitField::flag(3);
    const INHERIT_COLOR: BitField = BitField::flag(4);

    fn write(self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        let flags = Flags8::new()
            .with(Self::STATE, self.state.raw())?
            .with_bool(Self::ATTACHED, self.attached)
            .with(Self::FLASH_CONTROL, self.flash_control.raw())?
            .with_bool(Self::INHERIT_COLOR, self.inherit_color);
        writer.flags(flags)
    }

    fn read(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let flags = reader.flags()?;
        Ok(Self {
            state: reader.enum_bits(flags, Self::STATE, "symbol_state")?,
            attached: flags.get_bool(Self::ATTACHED),
            flash_control: reader.enum_bits(flags, Self::FLASH_CONTROL, "flash_control")?,
            inherit_color: flags.get_bool(Self::INHERIT_COLOR),
        })
    }
}

/// Symbol Control: full per-frame state of one symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolControl {
    pub symbol_id: u16,
    pub flags: SymbolFlags,
    pub parent_symbol_id: u16,
    pub surface_id: u16,
    pub layer: u8,
    /// Percent of the flash period the symbol is visible.
    pub flash_duty_cycle: u8,
    pub flash_period: f32,
    pub position_u: f32,
    pub position_v: f32,
    pub rotation: f32,
    pub color: Rgba,
    pub scale_u: f32,
    pub scale_v: f32,
}

impl PacketBody for SymbolControl {
    const SIZE: PacketSize = PacketSize::Fixed(40);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.symbol_id)?;
        self.flags.write(writer)?;
        writer.reserved(1)?;
        writer.u16(self.parent_symbol_id)?;
        writer.u16(self.surface_id)?;
        writer.u8(self.layer)?;
        writer.u8(self.flash_duty_cycle)?;
        for value in [self.flash_period, self.position_u, self.position_v, self.rotation] {
            writer.f32(value)?;
        }
        self.color.write(writer)?;
        writer.f32(self.scale_u)?;
        writer.f32(self.scale_v)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let symbol_id = reader.u16()?;
        let flags = SymbolFlags::read(reader)?;
        reader.skip(1)?;
        Ok(Self {
            symbol_id,
            flags,
            parent_symbol_id: reader.u16()?,
            surface_id: reader.u16()?,
            layer: reader.u8()?,
            flash_duty_cycle: reader.u8()?,
            flash_period: reader.f32()?,
            position_u: reader.f32()?,
            position_v: reader.f32()?,
            rotation: reader.f32()?,
            color: Rgba::read(reader)?,
            scale_u: reader.f32()?,
            scale_v: reader.f32()?,
        })
    }
}

single_packet!(SymbolControl => v3::SYMBOL_CONTROL, V3_3);

/// Short Symbol Control: state bits plus up to two attribute updates.
///
/// Each value is the raw 32-bit word of the selected attribute: an integer
/// for ids, layer and duty cycle, IEEE bits for the float attributes, and
/// RGBA bytes for the color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShortSymbolControl {
    pub symbol_id: u16,
    pub flags: SymbolFlags,
    pub attributes: [SymbolAttribute; 2],
    pub values: [u32; 2],
}

impl PacketBody for ShortSymbolControl {
    const SIZE: PacketSize = PacketSize::Fixed(16);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.symbol_id)?;
        self.flags.write(writer)?;
        writer.reserved(1)?;
        for attribute in self.attributes {
            writer.enum_u8(attribute)?;
        }
        writer.words(&self.values)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let symbol_id = reader.u16()?;
        let flags = SymbolFlags::read(reader)?;
        reader.skip(1)?;
        Ok(Self {
            symbol_id,
            flags,
            attributes: [
                reader.enum_u8("attribute_select_1")?,
                reader.enum_u8("attribute_select_2")?,
            ],
            values: reader.words()?,
        })
    }
}

single_packet!(ShortSymbolControl => v3::SHORT_SYMBOL_CONTROL, V3_3);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::decode_body;
    use crate::error::{LengthReason, PacketError};
    use crate::packet::CigiMessage;
    use crate::version::CigiVersion;

    fn line(vertices: usize) -> SymbolLineDefinition {
        SymbolLineDefinition {
            symbol_id: 4,
            primitive: SymbolPrimitive::LineStrip,
            style: LineStyle {
                stipple_pattern: 0xFFFF,
                line_width: 1.0,
                stipple_length: 0.0,
            },
            vertices: (0..vertices)
                .map(|i| Vertex {
                    u: i as f32,
                    v: -(i as f32),
                })
                .collect(),
        }
    }

    #[test]
    fn line_size_follows_vertex_count() {
        let packet = line(3);
        let bytes = packet.to_bytes().unwrap();
        assert_eq!(bytes.len(), 40);
        assert_eq!(&bytes[..6], &[32, 40, 0, 4, 2, 0]);
        let (decoded, used) = decode_body::<SymbolLineDefinition>(32, &bytes).unwrap();
        assert_eq!(decoded, packet);
        assert_eq!(used, 40);
        assert_eq!(packet.version(), CigiVersion::V3_3);
    }

    #[test]
    fn line_without_vertices_is_minimum_size() {
        let bytes = line(0).to_bytes().unwrap();
        assert_eq!(bytes.len(), 16);
        let (decoded, _) = decode_body::<SymbolLineDefinition>(32, &bytes).unwrap();
        assert!(decoded.vertices.is_empty());
    }

    #[test]
    fn line_partial_vertex_rejected() {
        let mut bytes = line(2).to_bytes().unwrap();
        bytes[1] = 28;
        assert_eq!(
            decode_body::<SymbolLineDefinition>(32, &bytes[..28]),
            Err(PacketError::MalformedVariableLength {
                packet_id: 32,
                declared: 28,
                reason: LengthReason::PartialElement { element_size: 8 },
            })
        );
    }

    #[test]
    fn too_many_vertices_rejected_on_encode() {
        let packet = line(MAX_VERTICES + 1);
        assert!(matches!(
            packet.to_bytes(),
            Err(PacketError::MalformedVariableLength {
                reason: LengthReason::ExceedsMaximum { max: 248 },
                ..
            })
        ));
        assert_eq!(line(MAX_VERTICES).to_bytes().unwrap().len(), 248);
    }

    #[test]
    fn circle_roundtrip() {
        let packet = SymbolCircleDefinition {
            symbol_id: 9,
            drawing_style: SymbolDrawingStyle::Fill,
            style: LineStyle::default(),
            circles: vec![
                Circle {
                    radius: 2.0,
                    end_angle: 360.0,
                    ..Circle::default()
                };
                2
            ],
        };
        let bytes = packet.to_bytes().unwrap();
        assert_eq!(bytes.len(), 64);
        assert_eq!(bytes[4], 1);
        let (decoded, _) = decode_body::<SymbolCircleDefinition>(31, &bytes).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn text_definition_padding() {
        let packet = SymbolTextDefinition {
            symbol_id: 1,
            alignment: SymbolTextAlignment::Center,
            orientation: SymbolTextOrientation::TopToBottom,
            font_id: 3,
            font_size: 12.0,
            text: "ALT".to_owned(),
        };
        let bytes = packet.to_bytes().unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(bytes[4], 0b1_0100);
        assert_eq!(&bytes[12..], b"ALT\0");
        let (decoded, _) = decode_body::<SymbolTextDefinition>(30, &bytes).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn short_symbol_control_attributes() {
        let packet = ShortSymbolControl {
            symbol_id: 2,
            flags: SymbolFlags {
                state: SymbolState::Visible,
                attached: true,
                ..SymbolFlags::default()
            },
            attributes: [SymbolAttribute::Rotation, SymbolAttribute::Layer],
            values: [45.0f32.to_bits(), 3],
        };
        let bytes = packet.to_bytes().unwrap();
        assert_eq!(&bytes[..8], &[35, 16, 0, 2, 0b101, 0, 8, 3]);
        let (decoded, _) = decode_body::<ShortSymbolControl>(35, &bytes).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn symbol_control_color_offset() {
        let packet = SymbolControl {
            color: Rgba {
                red: 1,
                green: 2,
                blue: 3,
                alpha: 4,
            },
            scale_u: 1.0,
            scale_v: 1.0,
            ..SymbolControl::default()
        };
        let bytes = packet.to_bytes().unwrap();
        assert_eq!(&bytes[28..32], &[1, 2, 3, 4]);
        assert_eq!(bytes.len(), 40);
    }
}
