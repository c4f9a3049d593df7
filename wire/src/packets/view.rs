//! View, sensor and motion tracker packets.

use bytecodec::{BitField, Flags8};

use super::{
    Dof6Enables, FrustumEnables, GeodeticPoint, Offset6, SensorGate, SensorSettings, ViewFrustum,
};
use crate::body::{PacketBody, PacketReader, PacketWriter};
use crate::enums::{
    MirrorMode, PixelReplication, ProjectionType, ReorderMode, SensorResponseType, SensorStatus,
    SensorStatusV1, TrackMode, TrackModeLegacy, WireEnum,
};
use crate::error::PacketResult;
use crate::header::PacketSize;
use crate::ids::{v1, v2, v3};

/// View Control of CIGI 1 and 2: positions a view relative to an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyViewControl {
    pub entity_id: u16,
    pub view_id: u8,
    pub group_id: u8,
    pub enables: Dof6Enables,
    pub offset: Offset6,
}

impl PacketBody for LegacyViewControl {
    const SIZE: PacketSize = PacketSize::Fixed(32);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.entity_id)?;
        writer.u8(self.view_id)?;
        writer.u8(self.group_id)?;
        writer.flags(self.enables.pack(Flags8::new(), 0))?;
        writer.reserved(1)?;
        self.offset.write(writer)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let entity_id = reader.u16()?;
        let view_id = reader.u8()?;
        let group_id = reader.u8()?;
        let flags = reader.flags()?;
        reader.skip(1)?;
        Ok(Self {
            entity_id,
            view_id,
            group_id,
            enables: Dof6Enables::unpack(flags, 0),
            offset: Offset6::read(reader)?,
        })
    }
}

/// View Control of CIGI 3.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewControlV3 {
    pub view_id: u16,
    pub group_id: u8,
    pub enables: Dof6Enables,
    pub entity_id: u16,
    pub offset: Offset6,
}

impl PacketBody for ViewControlV3 {
    const SIZE: PacketSize = PacketSize::Fixed(32);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.view_id)?;
        writer.u8(self.group_id)?;
        writer.flags(self.enables.pack(Flags8::new(), 0))?;
        writer.u16(self.entity_id)?;
        self.offset.write(writer)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let view_id = reader.u16()?;
        let group_id = reader.u8()?;
        let flags = reader.flags()?;
        Ok(Self {
            view_id,
            group_id,
            enables: Dof6Enables::unpack(flags, 0),
            entity_id: reader.u16()?,
            offset: Offset6::read(reader)?,
        })
    }
}

packet_family! {
    ViewControl {
        V1(LegacyViewControl) => v1::VIEW_CONTROL, V1;
        V2(LegacyViewControl) => v2::VIEW_CONTROL, V2;
        V3(ViewControlV3) => v3::VIEW_CONTROL, V3;
    }
}

const SENSOR_ON: BitField = BitField::flag(0);
const BLACK_HOT: BitField = BitField::flag(1);
const LINE_DROPOUT: BitField = BitField::flag(2);

/// Sensor Control of CIGI 1 and 2.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacySensorControl {
    pub view_id: u8,
    pub sensor_id: u8,
    pub sensor_on: bool,
    pub black_hot: bool,
    pub line_dropout: bool,
    pub track_mode: TrackModeLegacy,
    pub track_black: bool,
    pub auto_gain: bool,
    pub settings: SensorSettings,
}

impl LegacySensorControl {
    const TRACK_MODE: BitField = BitField::new(3, 3);
    const TRACK_BLACK: BitField = BitField::flag(6);
    const AUTO_GAIN: BitField = BitField::flag(7);
}

impl PacketBody for LegacySensorControl {
    const SIZE: PacketSize = PacketSize::Fixed(24);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u8(self.view_id)?;
        writer.u8(self.sensor_id)?;
        let flags = Flags8::new()
            .with_bool(SENSOR_ON, self.sensor_on)
            .with_bool(BLACK_HOT, self.black_hot)
            .with_bool(LINE_DROPOUT, self.line_dropout)
            .with(Self::TRACK_MODE, self.track_mode.raw())?
            .with_bool(Self::TRACK_BLACK, self.track_black)
            .with_bool(Self::AUTO_GAIN, self.auto_gain);
        writer.flags(flags)?;
        writer.reserved(3)?;
        self.settings.write(writer)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let view_id = reader.u8()?;
        let sensor_id = reader.u8()?;
        let flags = reader.flags()?;
        reader.skip(3)?;
        Ok(Self {
            view_id,
            sensor_id,
            sensor_on: flags.get_bool(SENSOR_ON),
            black_hot: flags.get_bool(BLACK_HOT),
            line_dropout: flags.get_bool(LINE_DROPOUT),
            track_mode: reader.enum_bits(flags, Self::TRACK_MODE, "track_mode")?,
            track_black: flags.get_bool(Self::TRACK_BLACK),
            auto_gain: flags.get_bool(Self::AUTO_GAIN),
            settings: SensorSettings::read(reader)?,
        })
    }
}

/// Sensor Control of CIGI 3.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorControlV3 {
    pub view_id: u16,
    pub sensor_id: u8,
    pub sensor_on: bool,
    pub black_hot: bool,
    pub line_dropout: bool,
    pub auto_gain: bool,
    pub track_black: bool,
    pub track_mode: TrackMode,
    pub response_type: SensorResponseType,
    pub settings: SensorSettings,
}

impl SensorControlV3 {
    const AUTO_GAIN: BitField = BitField::flag(3);
    const TRACK_BLACK: BitField = BitField::flag(4);
    const TRACK_MODE: BitField = BitField::new(5, 3);
    const RESPONSE_TYPE: BitField = BitField::flag(0);
}

impl PacketBody for SensorControlV3 {
    const SIZE: PacketSize = PacketSize::Fixed(24);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.view_id)?;
        writer.u8(self.sensor_id)?;
        let flags = Flags8::new()
            .with_bool(SENSOR_ON, self.sensor_on)
            .with_bool(BLACK_HOT, self.black_hot)
            .with_bool(LINE_DROPOUT, self.line_dropout)
            .with_bool(Self::AUTO_GAIN, self.auto_gain)
            .with_bool(Self::TRACK_BLACK, self.track_black)
            .with(Self::TRACK_MODE, self.track_mode.raw())?;
        writer.flags(flags)?;
        writer.flags(Flags8::new().with(Self::RESPONSE_TYPE, self.response_type.raw())?)?;
        writer.reserved(1)?;
        self.settings.write(writer)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let view_id = reader.u16()?;
        let sensor_id = reader.u8()?;
        let flags = reader.flags()?;
        let response = reader.flags()?;
        reader.skip(1)?;
        Ok(Self {
            view_id,
            sensor_id,
            sensor_on: flags.get_bool(SENSOR_ON),
            black_hot: flags.get_bool(BLACK_HOT),
            line_dropout: flags.get_bool(LINE_DROPOUT),
            auto_gain: flags.get_bool(Self::AUTO_GAIN),
            track_black: flags.get_bool(Self::TRACK_BLACK),
            track_mode: reader.enum_bits(flags, Self::TRACK_MODE, "track_mode")?,
            response_type: reader.enum_bits(response, Self::RESPONSE_TYPE, "response_type")?,
            settings: SensorSettings::read(reader)?,
        })
    }
}

packet_family! {
    SensorControl {
        V1(LegacySensorControl) => v1::SENSOR_CONTROL, V1;
        V2(LegacySensorControl) => v2::SENSOR_CONTROL, V2;
        V3(SensorControlV3) => v3::SENSOR_CONTROL, V3;
    }
}

/// Motion Tracker Control (CIGI 3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionTrackerControl {
    /// View or view group, see `applies_to_group`.
    pub view_id: u16,
    pub tracker_id: u8,
    pub tracker_enabled: bool,
    pub boresight_enabled: bool,
    pub enables: Dof6Enables,
    pub applies_to_group: bool,
}

impl MotionTrackerControl {
    const TRACKER_ENABLED: BitField = BitField::flag(0);
    const BORESIGHT: BitField = BitField::flag(1);
    const GROUP_SELECT: BitField = BitField::flag(0);
}

impl PacketBody for MotionTrackerControl {
    const SIZE: PacketSize = PacketSize::Fixed(8);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.view_id)?;
        writer.u8(self.tracker_id)?;
        let flags = Flags8::new()
            .with_bool(Self::TRACKER_ENABLED, self.tracker_enabled)
            .with_bool(Self::BORESIGHT, self.boresight_enabled);
        writer.flags(self.enables.pack(flags, 2))?;
        writer.flags(Flags8::new().with_bool(Self::GROUP_SELECT, self.applies_to_group))?;
        writer.reserved(1)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let view_id = reader.u16()?;
        let tracker_id = reader.u8()?;
        let flags = reader.flags()?;
        let select = reader.flags()?;
        reader.skip(1)?;
        Ok(Self {
            view_id,
            tracker_id,
            tracker_enabled: flags.get_bool(Self::TRACKER_ENABLED),
            boresight_enabled: flags.get_bool(Self::BORESIGHT),
            enables: Dof6Enables::unpack(flags, 2),
            applies_to_group: select.get_bool(Self::GROUP_SELECT),
        })
    }
}

single_packet!(MotionTrackerControl => v3::MOTION_TRACKER_CONTROL, V3);

const MIRROR_MODE: BitField = BitField::new(6, 2);
const PIXEL_REPLICATION: BitField = BitField::new(0, 3);

/// View Definition of CIGI 1 and 2.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyViewDefinition {
    pub view_id: u8,
    pub group_id: u8,
    pub enables: FrustumEnables,
    pub mirror_mode: MirrorMode,
    pub pixel_replication: PixelReplication,
    /// IG-defined view type, 0 to 7.
    pub view_type: u8,
    pub tracker_assigned: bool,
    pub frustum: ViewFrustum,
}

impl LegacyViewDefinition {
    const VIEW_TYPE: BitField = BitField::new(3, 3);
    const TRACKER_ASSIGNED: BitField = BitField::flag(6);
}

impl PacketBody for LegacyViewDefinition {
    const SIZE: PacketSize = PacketSize::Fixed(32);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u8(self.view_id)?;
        writer.u8(self.group_id)?;
        let planes = self
            .enables
            .pack(Flags8::new(), 0)
            .with(MIRROR_MODE, self.mirror_mode.raw())?;
        let image = Flags8::new()
            .with(PIXEL_REPLICATION, self.pixel_replication.raw())?
            .with(Self::VIEW_TYPE, self.view_type)?
            .with_bool(Self::TRACKER_ASSIGNED, self.tracker_assigned);
        writer.flags(planes)?;
        writer.flags(image)?;
        writer.reserved(2)?;
        self.frustum.write(writer)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let view_id = reader.u8()?;
        let group_id = reader.u8()?;
        let planes = reader.flags()?;
        let image = reader.flags()?;
        reader.skip(2)?;
        Ok(Self {
            view_id,
            group_id,
            enables: FrustumEnables::unpack(planes, 0),
            mirror_mode: reader.enum_bits(planes, MIRROR_MODE, "mirror_mode")?,
            pixel_replication: reader.enum_bits(image, PIXEL_REPLICATION, "pixel_replication")?,
            view_type: image.get(Self::VIEW_TYPE),
            tracker_assigned: image.get_bool(Self::TRACKER_ASSIGNED),
            frustum: ViewFrustum::read(reader)?,
        })
    }
}

/// View Definition of CIGI 3.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewDefinitionV3 {
    pub view_id: u16,
    pub group_id: u8,
    pub enables: FrustumEnables,
    pub mirror_mode: MirrorMode,
    pub pixel_replication: PixelReplication,
    pub projection_type: ProjectionType,
    pub reorder: ReorderMode,
    pub view_type: u8,
    pub frustum: ViewFrustum,
}

impl ViewDefinitionV3 {
    const PROJECTION: BitField = BitField::flag(3);
    const REORDER: BitField = BitField::flag(4);
    const VIEW_TYPE: BitField = BitField::new(5, 3);
}

impl PacketBody for ViewDefinitionV3 {
    const SIZE: PacketSize = PacketSize::Fixed(32);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.view_id)?;
        writer.u8(self.group_id)?;
        let planes = self
            .enables
            .pack(Flags8::new(), 0)
            .with(MIRROR_MODE, self.mirror_mode.raw())?;
        let image = Flags8::new()
            .with(PIXEL_REPLICATION, self.pixel_replication.raw())?
            .with(Self::PROJECTION, self.projection_type.raw())?
            .with(Self::REORDER, self.reorder.raw())?
            .with(Self::VIEW_TYPE, self.view_type)?;
        writer.flags(planes)?;
        writer.flags(image)?;
        writer.reserved(1)?;
        self.frustum.write(writer)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let view_id = reader.u16()?;
        let group_id = reader.u8()?;
        let planes = reader.flags()?;
        let image = reader.flags()?;
        reader.skip(1)?;
        Ok(Self {
            view_id,
            group_id,
            enables: FrustumEnables::unpack(planes, 0),
            mirror_mode: reader.enum_bits(planes, MIRROR_MODE, "mirror_mode")?,
            pixel_replication: reader.enum_bits(image, PIXEL_REPLICATION, "pixel_replication")?,
            projection_type: reader.enum_bits(image, Self::PROJECTION, "projection_type")?,
            reorder: reader.enum_bits(image, Self::REORDER, "reorder")?,
            view_type: image.get(Self::VIEW_TYPE),
            frustum: ViewFrustum::read(reader)?,
        })
    }
}

packet_family! {
    /// View Definition: frustum and image properties of a view.
    ViewDefinition {
        V1(LegacyViewDefinition) => v1::VIEW_DEFINITION, V1;
        V2(LegacyViewDefinition) => v2::VIEW_DEFINITION, V2;
        V3(ViewDefinitionV3) => v3::VIEW_DEFINITION, V3;
    }
}

const SENSOR_STATUS: BitField = BitField::new(0, 2);

/// Sensor Response of CIGI 1 and 2, generic over the status enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacySensorResponse<S> {
    pub view_id: u8,
    pub sensor_id: u8,
    pub status: S,
    pub gate: SensorGate,
    pub frame_counter: u32,
}

pub type SensorResponseV1 = LegacySensorResponse<SensorStatusV1>;
pub type SensorResponseV2 = LegacySensorResponse<SensorStatus>;

impl<S: WireEnum> PacketBody for LegacySensorResponse<S> {
    const SIZE: PacketSize = PacketSize::Fixed(24);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u8(self.view_id)?;
        writer.u8(self.sensor_id)?;
        writer.flags(Flags8::new().with(SENSOR_STATUS, self.status.raw())?)?;
        writer.reserved(1)?;
        writer.u16(self.gate.x_size)?;
        writer.u16(self.gate.y_size)?;
        writer.reserved(2)?;
        writer.f32(self.gate.x_position)?;
        writer.f32(self.gate.y_position)?;
        writer.u32(self.frame_counter)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let view_id = reader.u8()?;
        let sensor_id = reader.u8()?;
        let flags = reader.flags()?;
        reader.skip(1)?;
        let status = reader.enum_bits(flags, SENSOR_STATUS, "status")?;
        let x_size = reader.u16()?;
        let y_size = reader.u16()?;
        reader.skip(2)?;
        Ok(Self {
            view_id,
            sensor_id,
            status,
            gate: SensorGate {
                x_size,
                y_size,
                x_position: reader.f32()?,
                y_position: reader.f32()?,
            },
            frame_counter: reader.u32()?,
        })
    }
}

/// Sensor Response of CIGI 3.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorResponseV3 {
    pub view_id: u16,
    pub sensor_id: u8,
    pub status: SensorStatus,
    pub gate: SensorGate,
    pub host_frame_number: u32,
}

impl PacketBody for SensorResponseV3 {
    const SIZE: PacketSize = PacketSize::Fixed(24);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.view_id)?;
        writer.u8(self.sensor_id)?;
        writer.flags(Flags8::new().with(SENSOR_STATUS, self.status.raw())?)?;
        writer.reserved(2)?;
        writer.u16(self.gate.x_size)?;
        writer.u16(self.gate.y_size)?;
        writer.f32(self.gate.x_position)?;
        writer.f32(self.gate.y_position)?;
        writer.u32(self.host_frame_number)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let view_id = reader.u16()?;
        let sensor_id = reader.u8()?;
        let flags = reader.flags()?;
        reader.skip(2)?;
        Ok(Self {
            view_id,
            sensor_id,
            status: reader.enum_bits(flags, SENSOR_STATUS, "status")?,
            gate: SensorGate {
                x_size: reader.u16()?,
                y_size: reader.u16()?,
                x_position: reader.f32()?,
                y_position: reader.f32()?,
            },
            host_frame_number: reader.u32()?,
        })
    }
}

packet_family! {
    /// Sensor Response: gate or target position reported by a sensor.
    SensorResponse {
        V1(SensorResponseV1) => v1::SENSOR_RESPONSE, V1;
        V2(SensorResponseV2) => v2::SENSOR_RESPONSE, V2;
        V3(SensorResponseV3) => v3::SENSOR_RESPONSE, V3;
    }
}

/// Sensor Extended Response (CIGI 3): Sensor Response plus the geodetic
/// position of the tracked point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorExtendedResponse {
    pub view_id: u16,
    pub sensor_id: u8,
    pub status: SensorStatus,
    pub entity_id_valid: bool,
    pub entity_id: u16,
    pub gate: SensorGate,
    pub host_frame_number: u32,
    pub track_point: GeodeticPoint,
}

impl SensorExtendedResponse {
    const ENTITY_VALID: BitField = BitField::flag(2);
}

impl PacketBody for SensorExtendedResponse {
    const SIZE: PacketSize = PacketSize::Fixed(48);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.view_id)?;
        writer.u8(self.sensor_id)?;
        let flags = Flags8::new()
            .with(SENSOR_STATUS, self.status.raw())?
            .with_bool(Self::ENTITY_VALID, self.entity_id_valid);
        writer.flags(flags)?;
        writer.u16(self.entity_id)?;
        writer.u16(self.gate.x_size)?;
        writer.u16(self.gate.y_size)?;
        writer.f32(self.gate.x_position)?;
        writer.f32(self.gate.y_position)?;
        writer.u32(self.host_frame_number)?;
        self.track_point.write(writer)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let view_id = reader.u16()?;
        let sensor_id = reader.u8()?;
        let flags = reader.flags()?;
        Ok(Self {
            view_id,
            sensor_id,
            status: reader.enum_bits(flags, SENSOR_STATUS, "status")?,
            entity_id_valid: flags.get_bool(Self::ENTITY_VALID),
            entity_id: reader.u16()?,
            gate: SensorGate {
                x_size: reader.u16()?,
                y_size: reader.u16()?,
                x_position: reader.f32()?,
                y_position: reader.f32()?,
            },
            host_frame_number: reader.u32()?,
            track_point: GeodeticPoint::read(reader)?,
        })
    }
}

single_packet!(SensorExtendedResponse => v3::SENSOR_EXTENDED_RESPONSE, V3);
