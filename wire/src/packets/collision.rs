//! Collision detection segments and volumes, and the IG's contact reports.

use bytecodec::{BitField, Flags8};

use crate::body::{PacketBody, PacketReader, PacketWriter};
use crate::enums::{CollisionType, VolumeType, WireEnum};
use crate::error::PacketResult;
use crate::header::PacketSize;
use crate::ids::{v1, v2, v3};

const ENABLED: BitField = BitField::flag(0);
const COLLISION_TYPE: BitField = BitField::flag(0);

/// Collision segment attached to an entity. Identical in every version.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionSegment {
    pub entity_id: u16,
    pub segment_id: u8,
    pub enabled: bool,
    /// Segment endpoints in entity body coordinates, meters.
    pub start: [f32; 3],
    pub end: [f32; 3],
    pub material_mask: u32,
}

impl PacketBody for CollisionSegment {
    const SIZE: PacketSize = PacketSize::Fixed(40);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.entity_id)?;
        writer.u8(self.segment_id)?;
        writer.flags(Flags8::new().with_bool(ENABLED, self.enabled))?;
        writer.reserved(2)?;
        for value in self.start.iter().chain(self.end.iter()) {
            writer.f32(*value)?;
        }
        writer.u32(self.material_mask)?;
        writer.reserved(4)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let entity_id = reader.u16()?;
        let segment_id = reader.u8()?;
        let flags = reader.flags()?;
        reader.skip(2)?;
        let start = [reader.f32()?, reader.f32()?, reader.f32()?];
        let end = [reader.f32()?, reader.f32()?, reader.f32()?];
        let material_mask = reader.u32()?;
        reader.skip(4)?;
        Ok(Self {
            entity_id,
            segment_id,
            enabled: flags.get_bool(ENABLED),
            start,
            end,
            material_mask,
        })
    }
}

packet_family! {
    CollisionSegmentDefinition {
        V1(CollisionSegment) => v1::COLLISION_SEGMENT_DEFINITION, V1;
        V2(CollisionSegment) => v2::COLLISION_SEGMENT_DEFINITION, V2;
        V3(CollisionSegment) => v3::COLLISION_SEGMENT_DEFINITION, V3;
    }
}

/// Collision Volume Definition of CIGI 2: an axis-aligned box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionVolumeV2 {
    pub entity_id: u16,
    pub volume_id: u8,
    pub enabled: bool,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub height: f32,
    pub width: f32,
    pub depth: f32,
}

impl PacketBody for CollisionVolumeV2 {
    const SIZE: PacketSize = PacketSize::Fixed(32);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.entity_id)?;
        writer.u8(self.volume_id)?;
        writer.flags(Flags8::new().with_bool(ENABLED, self.enabled))?;
        writer.reserved(2)?;
        for value in [self.x, self.y, self.z, self.height, self.width, self.depth] {
            writer.f32(value)?;
        }
        Ok(())
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let entity_id = reader.u16()?;
        let volume_id = reader.u8()?;
        let flags = reader.flags()?;
        reader.skip(2)?;
        Ok(Self {
            entity_id,
            volume_id,
            enabled: flags.get_bool(ENABLED),
            x: reader.f32()?,
            y: reader.f32()?,
            z: reader.f32()?,
            height: reader.f32()?,
            width: reader.f32()?,
            depth: reader.f32()?,
        })
    }
}

/// Collision Volume Definition of CIGI 3: an oriented cuboid or a sphere.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionVolumeV3 {
    pub entity_id: u16,
    pub volume_id: u8,
    pub enabled: bool,
    pub volume_type: VolumeType,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Sphere radius, or cuboid height.
    pub radius_height: f32,
    pub width: f32,
    pub depth: f32,
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl CollisionVolumeV3 {
    const VOLUME_TYPE: BitField = BitField::flag(1);
}

impl PacketBody for CollisionVolumeV3 {
    const SIZE: PacketSize = PacketSize::Fixed(48);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.entity_id)?;
        writer.u8(self.volume_id)?;
        let flags = Flags8::new()
            .with_bool(ENABLED, self.enabled)
            .with(Self::VOLUME_TYPE, self.volume_type.raw())?;
        writer.flags(flags)?;
        writer.reserved(2)?;
        for value in [
            self.x,
            self.y,
            self.z,
            self.radius_height,
            self.width,
            self.depth,
            self.roll,
            self.pitch,
            self.yaw,
        ] {
            writer.f32(value)?;
        }
        writer.reserved(4)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let entity_id = reader.u16()?;
        let volume_id = reader.u8()?;
        let flags = reader.flags()?;
        reader.skip(2)?;
        let packet = Self {
            entity_id,
            volume_id,
            enabled: flags.get_bool(ENABLED),
            volume_type: reader.enum_bits(flags, Self::VOLUME_TYPE, "volume_type")?,
            x: reader.f32()?,
            y: reader.f32()?,
            z: reader.f32()?,
            radius_height: reader.f32()?,
            width: reader.f32()?,
            depth: reader.f32()?,
            roll: reader.f32()?,
            pitch: reader.f32()?,
            yaw: reader.f32()?,
        };
        reader.skip(4)?;
        Ok(packet)
    }
}

packet_family! {
    CollisionVolumeDefinition {
        V2(CollisionVolumeV2) => v2::COLLISION_VOLUME_DEFINITION, V2;
        V3(CollisionVolumeV3) => v3::COLLISION_VOLUME_DEFINITION, V3;
    }
}

/// Collision Segment Response of CIGI 1 and 2: reports the contact point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyCollisionSegmentResponse {
    pub entity_id: u16,
    pub segment_id: u8,
    pub collision_type: CollisionType,
    pub contacted_entity_id: u16,
    pub material_code: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl PacketBody for LegacyCollisionSegmentResponse {
    const SIZE: PacketSize = PacketSize::Fixed(32);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.entity_id)?;
        writer.u8(self.segment_id)?;
        writer.flags(Flags8::new().with(COLLISION_TYPE, self.collision_type.raw())?)?;
        writer.u16(self.contacted_entity_id)?;
        writer.u32(self.material_code)?;
        writer.f32(self.x)?;
        writer.f32(self.y)?;
        writer.f32(self.z)?;
        writer.reserved(8)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let entity_id = reader.u16()?;
        let segment_id = reader.u8()?;
        let flags = reader.flags()?;
        let packet = Self {
            entity_id,
            segment_id,
            collision_type: reader.enum_bits(flags, COLLISION_TYPE, "collision_type")?,
            contacted_entity_id: reader.u16()?,
            material_code: reader.u32()?,
            x: reader.f32()?,
            y: reader.f32()?,
            z: reader.f32()?,
        };
        reader.skip(8)?;
        Ok(packet)
    }
}

/// Collision Segment Notification of CIGI 3: reports the distance along the
/// segment instead of a point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionSegmentNotificationV3 {
    pub entity_id: u16,
    pub segment_id: u8,
    pub collision_type: CollisionType,
    pub contacted_entity_id: u16,
    pub material_code: u32,
    pub intersection_distance: f32,
}

impl PacketBody for CollisionSegmentNotificationV3 {
    const SIZE: PacketSize = PacketSize::Fixed(16);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.entity_id)?;
        writer.u8(self.segment_id)?;
        writer.flags(Flags8::new().with(COLLISION_TYPE, self.collision_type.raw())?)?;
        writer.u16(self.contacted_entity_id)?;
        writer.u32(self.material_code)?;
        writer.f32(self.intersection_distance)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let entity_id = reader.u16()?;
        let segment_id = reader.u8()?;
        let flags = reader.flags()?;
        Ok(Self {
            entity_id,
            segment_id,
            collision_type: reader.enum_bits(flags, COLLISION_TYPE, "collision_type")?,
            contacted_entity_id: reader.u16()?,
            material_code: reader.u32()?,
            intersection_distance: reader.f32()?,
        })
    }
}

packet_family! {
    /// Collision Segment Notification (Collision Segment Response before
    /// CIGI 3).
    CollisionSegmentNotification {
        V1(LegacyCollisionSegmentResponse) => v1::COLLISION_SEGMENT_RESPONSE, V1;
        V2(LegacyCollisionSegmentResponse) => v2::COLLISION_SEGMENT_RESPONSE, V2;
        V3(CollisionSegmentNotificationV3) => v3::COLLISION_SEGMENT_NOTIFICATION, V3;
    }
}

/// Volume contact report, laid out identically in CIGI 2 and 3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionVolumeContact {
    pub entity_id: u16,
    pub volume_id: u8,
    pub collision_type: CollisionType,
    pub contacted_entity_id: u16,
    pub contacted_volume_id: u8,
}

impl PacketBody for CollisionVolumeContact {
    const SIZE: PacketSize = PacketSize::Fixed(16);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.entity_id)?;
        writer.u8(self.volume_id)?;
        writer.flags(Flags8::new().with(COLLISION_TYPE, self.collision_type.raw())?)?;
        writer.u16(self.contacted_entity_id)?;
        writer.u8(self.contacted_volume_id)?;
        writer.reserved(7)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let entity_id = reader.u16()?;
        let volume_id = reader.u8()?;
        let flags = reader.flags()?;
        let packet = Self {
            entity_id,
            volume_id,
            collision_type: reader.enum_bits(flags, COLLISION_TYPE, "collision_type")?,
            contacted_entity_id: reader.u16()?,
            contacted_volume_id: reader.u8()?,
        };
        reader.skip(7)?;
        Ok(packet)
    }
}

packet_family! {
    /// Collision Volume Notification (Collision Volume Response in CIGI 2).
    CollisionVolumeNotification {
        V2(CollisionVolumeContact) => v2::COLLISION_VOLUME_RESPONSE, V2;
        V3(CollisionVolumeContact) => v3::COLLISION_VOLUME_NOTIFICATION, V3;
    }
}
