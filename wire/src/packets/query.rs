//! Terrain height, line-of-sight and position queries with their responses.

use bytecodec::{BitField, Flags8};

use super::{GeodeticPoint, Rgba};
use crate::body::{PacketBody, PacketReader, PacketWriter};
use crate::enums::{
    HatHotRequestType, HatHotResponseType, LosRequestType, ObjectClass, PositionCoordinates,
    PositionUpdateMode, QueryCoordinates, WireEnum,
};
use crate::error::PacketResult;
use crate::header::PacketSize;
use crate::ids::{v1, v2, v3};

const VALID: BitField = BitField::flag(0);

/// HAT Request of CIGI 1 and 2.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HatRequest {
    pub request_id: u16,
    pub position: GeodeticPoint,
}

impl PacketBody for HatRequest {
    const SIZE: PacketSize = PacketSize::Fixed(32);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.request_id)?;
        writer.reserved(4)?;
        self.position.write(writer)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let request_id = reader.u16()?;
        reader.skip(4)?;
        Ok(Self {
            request_id,
            position: GeodeticPoint::read(reader)?,
        })
    }
}

/// HOT Request of CIGI 2: a horizontal position only.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HotRequest {
    pub request_id: u16,
    pub latitude: f64,
    pub longitude: f64,
}

impl PacketBody for HotRequest {
    const SIZE: PacketSize = PacketSize::Fixed(24);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.request_id)?;
        writer.reserved(4)?;
        writer.f64(self.latitude)?;
        writer.f64(self.longitude)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let request_id = reader.u16()?;
        reader.skip(4)?;
        Ok(Self {
            request_id,
            latitude: reader.f64()?,
            longitude: reader.f64()?,
        })
    }
}

/// HAT/HOT Request of CIGI 3.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HatHotRequestV3 {
    pub request_id: u16,
    pub request_type: HatHotRequestType,
    pub coordinates: QueryCoordinates,
    /// Reference entity when `coordinates` is [`QueryCoordinates::Entity`].
    pub entity_id: u16,
    /// Latitude/longitude/altitude, or x/y/z relative to the entity.
    pub position: GeodeticPoint,
}

impl HatHotRequestV3 {
    const REQUEST_TYPE: BitField = BitField::new(0, 2);
    const COORDINATES: BitField = BitField::flag(2);
}

impl PacketBody for HatHotRequestV3 {
    const SIZE: PacketSize = PacketSize::Fixed(32);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.request_id)?;
        let flags = Flags8::new()
            .with(Self::REQUEST_TYPE, self.request_type.raw())?
            .with(Self::COORDINATES, self.coordinates.raw())?;
        writer.flags(flags)?;
        writer.reserved(1)?;
        writer.u16(self.entity_id)?;
        self.position.write(writer)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let request_id = reader.u16()?;
        let flags = reader.flags()?;
        reader.skip(1)?;
        Ok(Self {
            request_id,
            request_type: reader.enum_bits(flags, Self::REQUEST_TYPE, "request_type")?,
            coordinates: reader.enum_bits(flags, Self::COORDINATES, "coordinates")?,
            entity_id: reader.u16()?,
            position: GeodeticPoint::read(reader)?,
        })
    }
}

packet_family! {
    /// Terrain height query. CIGI 2 splits it into separate HAT and HOT
    /// packets; CIGI 3 merges them again.
    HatHotRequest {
        V1(HatRequest) => v1::HAT_REQUEST, V1;
        V2Hat(HatRequest) => v2::HAT_REQUEST, V2;
        V2Hot(HotRequest) => v2::HOT_REQUEST, V2;
        V3(HatHotRequestV3) => v3::HAT_HOT_REQUEST, V3;
    }
}

/// HAT or HOT Response of CIGI 1 and 2.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeightResponse {
    pub request_id: u16,
    pub valid: bool,
    /// Meters.
    pub height: f64,
    pub material_code: u32,
}

impl PacketBody for HeightResponse {
    const SIZE: PacketSize = PacketSize::Fixed(24);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.request_id)?;
        writer.flags(Flags8::new().with_bool(VALID, self.valid))?;
        writer.reserved(3)?;
        writer.f64(self.height)?;
        writer.u32(self.material_code)?;
        writer.reserved(4)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let request_id = reader.u16()?;
        let flags = reader.flags()?;
        reader.skip(3)?;
        let packet = Self {
            request_id,
            valid: flags.get_bool(VALID),
            height: reader.f64()?,
            material_code: reader.u32()?,
        };
        reader.skip(4)?;
        Ok(packet)
    }
}

/// HAT/HOT Response of CIGI 3.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HatHotResponseV3 {
    pub request_id: u16,
    pub valid: bool,
    pub response_type: HatHotResponseType,
    pub height: f64,
}

impl HatHotResponseV3 {
    const RESPONSE_TYPE: BitField = BitField::flag(1);
}

impl PacketBody for HatHotResponseV3 {
    const SIZE: PacketSize = PacketSize::Fixed(16);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.request_id)?;
        let flags = Flags8::new()
            .with_bool(VALID, self.valid)
            .with(Self::RESPONSE_TYPE, self.response_type.raw())?;
        writer.flags(flags)?;
        writer.reserved(3)?;
        writer.f64(self.height)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let request_id = reader.u16()?;
        let flags = reader.flags()?;
        reader.skip(3)?;
        Ok(Self {
            request_id,
            valid: flags.get_bool(VALID),
            response_type: reader.enum_bits(flags, Self::RESPONSE_TYPE, "response_type")?,
            height: reader.f64()?,
        })
    }
}

packet_family! {
    HatHotResponse {
        V1(HeightResponse) => v1::HAT_RESPONSE, V1;
        V2Hat(HeightResponse) => v2::HAT_RESPONSE, V2;
        V2Hot(HeightResponse) => v2::HOT_RESPONSE, V2;
        V3(HatHotResponseV3) => v3::HAT_HOT_RESPONSE, V3;
    }
}

/// HAT/HOT Extended Response (CIGI 3): both heights plus surface data.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HatHotExtendedResponse {
    pub request_id: u16,
    pub valid: bool,
    pub height_above_terrain: f64,
    pub height_of_terrain: f64,
    pub material_code: u32,
    pub normal_azimuth: f32,
    pub normal_elevation: f32,
}

impl PacketBody for HatHotExtendedResponse {
    const SIZE: PacketSize = PacketSize::Fixed(40);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.request_id)?;
        writer.flags(Flags8::new().with_bool(VALID, self.valid))?;
        writer.reserved(3)?;
        writer.f64(self.height_above_terrain)?;
        writer.f64(self.height_of_terrain)?;
        writer.u32(self.material_code)?;
        writer.f32(self.normal_azimuth)?;
        writer.f32(self.normal_elevation)?;
        writer.reserved(4)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let request_id = reader.u16()?;
        let flags = reader.flags()?;
        reader.skip(3)?;
        let packet = Self {
            request_id,
            valid: flags.get_bool(VALID),
            height_above_terrain: reader.f64()?,
            height_of_terrain: reader.f64()?,
            material_code: reader.u32()?,
            normal_azimuth: reader.f32()?,
            normal_elevation: reader.f32()?,
        };
        reader.skip(4)?;
        Ok(packet)
    }
}

single_packet!(HatHotExtendedResponse => v3::HAT_HOT_EXTENDED_RESPONSE, V3);

/// LOS Occult Request of CIGI 1 and 2: a segment between two geodetic
/// points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LosOccultRequest {
    pub request_id: u16,
    pub source: GeodeticPoint,
    pub destination: GeodeticPoint,
}

impl PacketBody for LosOccultRequest {
    const SIZE: PacketSize = PacketSize::Fixed(56);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.request_id)?;
        writer.reserved(4)?;
        self.source.write(writer)?;
        self.destination.write(writer)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let request_id = reader.u16()?;
        reader.skip(4)?;
        Ok(Self {
            request_id,
            source: GeodeticPoint::read(reader)?,
            destination: GeodeticPoint::read(reader)?,
        })
    }
}

const LOS_REQUEST_TYPE: BitField = BitField::flag(0);
const SOURCE_COORDINATES: BitField = BitField::flag(1);

/// LOS Segment Request of CIGI 3.0 and 3.1.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LosSegmentRequestV3 {
    pub request_id: u16,
    pub request_type: LosRequestType,
    pub source_coordinates: QueryCoordinates,
    pub destination_coordinates: QueryCoordinates,
    pub response_coordinates: QueryCoordinates,
    pub alpha_threshold: u8,
    pub entity_id: u16,
    pub source: GeodeticPoint,
    pub destination: GeodeticPoint,
}

impl LosSegmentRequestV3 {
    const DESTINATION_COORDINATES: BitField = BitField::flag(2);
    const RESPONSE_COORDINATES: BitField = BitField::flag(3);

    fn flags(&self) -> PacketResult<Flags8> {
        Ok(Flags8::new()
            .with(LOS_REQUEST_TYPE, self.request_type.raw())?
            .with(SOURCE_COORDINATES, self.source_coordinates.raw())?
            .with(Self::DESTINATION_COORDINATES, self.destination_coordinates.raw())?
            .with(Self::RESPONSE_COORDINATES, self.response_coordinates.raw())?)
    }

    fn write_segment(&self, writer: &mut PacketWriter<'_>, flags: Flags8) -> PacketResult<()> {
        writer.u16(self.request_id)?;
        writer.flags(flags)?;
        writer.u8(self.alpha_threshold)?;
        writer.u16(self.entity_id)?;
        self.source.write(writer)?;
        self.destination.write(writer)
    }

    fn read_segment(reader: &mut PacketReader<'_>) -> PacketResult<(Self, Flags8)> {
        let request_id = reader.u16()?;
        let flags = reader.flags()?;
        let segment = Self {
            request_id,
            request_type: reader.enum_bits(flags, LOS_REQUEST_TYPE, "request_type")?,
            source_coordinates: reader.enum_bits(flags, SOURCE_COORDINATES, "source_coordinates")?,
            destination_coordinates: reader.enum_bits(
                flags,
                Self::DESTINATION_COORDINATES,
                "destination_coordinates",
            )?,
            response_coordinates: reader.enum_bits(
                flags,
                Self::RESPONSE_COORDINATES,
                "response_coordinates",
            )?,
            alpha_threshold: reader.u8()?,
            entity_id: reader.u16()?,
            source: GeodeticPoint::read(reader)?,
            destination: GeodeticPoint::read(reader)?,
        };
        Ok((segment, flags))
    }
}

impl PacketBody for LosSegmentRequestV3 {
    const SIZE: PacketSize = PacketSize::Fixed(56);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        let flags = self.flags()?;
        self.write_segment(writer, flags)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        Self::read_segment(reader).map(|(segment, _)| segment)
    }
}

/// LOS Segment Request of CIGI 3.2 and later: adds a destination entity,
/// a material mask and an update period.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LosSegmentRequestV3_2 {
    pub segment: LosSegmentRequestV3,
    pub destination_entity_valid: bool,
    pub material_mask: u32,
    /// Frames between responses; 0 requests a single response.
    pub update_period: u8,
    pub destination_entity_id: u16,
}

impl LosSegmentRequestV3_2 {
    const DESTINATION_ENTITY_VALID: BitField = BitField::flag(4);
}

impl PacketBody for LosSegmentRequestV3_2 {
    const SIZE: PacketSize = PacketSize::Fixed(64);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        let flags = self
            .segment
            .flags()?
            .with_bool(Self::DESTINATION_ENTITY_VALID, self.destination_entity_valid);
        self.segment.write_segment(writer, flags)?;
        writer.u32(self.material_mask)?;
        writer.u8(self.update_period)?;
        writer.reserved(1)?;
        writer.u16(self.destination_entity_id)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let (segment, flags) = LosSegmentRequestV3::read_segment(reader)?;
        let material_mask = reader.u32()?;
        let update_period = reader.u8()?;
        reader.skip(1)?;
        Ok(Self {
            segment,
            destination_entity_valid: flags.get_bool(Self::DESTINATION_ENTITY_VALID),
            material_mask,
            update_period,
            destination_entity_id: reader.u16()?,
        })
    }
}

packet_family! {
    /// Line-of-sight test along a segment (LOS Occult Request before CIGI 3).
    LosSegmentRequest {
        V1(LosOccultRequest) => v1::LOS_OCCULT_REQUEST, V1;
        V2(LosOccultRequest) => v2::LOS_OCCULT_REQUEST, V2;
        V3(LosSegmentRequestV3) => v3::LOS_SEGMENT_REQUEST, V3;
        V3_2(LosSegmentRequestV3_2) => v3::LOS_SEGMENT_REQUEST, V3_2;
    }
}

/// LOS Range Request of CIGI 1 and 2: a vector from a geodetic source.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LosRangeRequest {
    pub request_id: u16,
    pub azimuth: f32,
    pub elevation: f32,
    pub min_range: f32,
    pub max_range: f32,
    pub source: GeodeticPoint,
}

impl PacketBody for LosRangeRequest {
    const SIZE: PacketSize = PacketSize::Fixed(48);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.request_id)?;
        writer.f32(self.azimuth)?;
        writer.f32(self.elevation)?;
        writer.f32(self.min_range)?;
        writer.f32(self.max_range)?;
        writer.reserved(4)?;
        self.source.write(writer)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let request_id = reader.u16()?;
        let azimuth = reader.f32()?;
        let elevation = reader.f32()?;
        let min_range = reader.f32()?;
        let max_range = reader.f32()?;
        reader.skip(4)?;
        Ok(Self {
            request_id,
            azimuth,
            elevation,
            min_range,
            max_range,
            source: GeodeticPoint::read(reader)?,
        })
    }
}

/// LOS Vector Request of CIGI 3.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LosVectorRequestV3 {
    pub request_id: u16,
    pub request_type: LosRequestType,
    pub source_coordinates: QueryCoordinates,
    pub response_coordinates: QueryCoordinates,
    pub alpha_threshold: u8,
    pub entity_id: u16,
    pub azimuth: f32,
    pub elevation: f32,
    pub min_range: f32,
    pub max_range: f32,
    pub source: GeodeticPoint,
    pub material_mask: u32,
}

impl LosVectorRequestV3 {
    const RESPONSE_COORDINATES: BitField = BitField::flag(2);
}

impl PacketBody for LosVectorRequestV3 {
    const SIZE: PacketSize = PacketSize::Fixed(56);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.request_id)?;
        let flags = Flags8::new()
            .with(LOS_REQUEST_TYPE, self.request_type.raw())?
            .with(SOURCE_COORDINATES, self.source_coordinates.raw())?
            .with(Self::RESPONSE_COORDINATES, self.response_coordinates.raw())?;
        writer.flags(flags)?;
        writer.u8(self.alpha_threshold)?;
        writer.u16(self.entity_id)?;
        for value in [self.azimuth, self.elevation, self.min_range, self.max_range] {
            writer.f32(value)?;
        }
        self.source.write(writer)?;
        writer.u32(self.material_mask)?;
        writer.reserved(4)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let request_id = reader.u16()?;
        let flags = reader.flags()?;
        let packet = Self {
            request_id,
            request_type: reader.enum_bits(flags, LOS_REQUEST_TYPE, "request_type")?,
            source_coordinates: reader.enum_bits(flags, SOURCE_COORDINATES, "source_coordinates")?,
            response_coordinates: reader.enum_bits(
                flags,
                Self::RESPONSE_COORDINATES,
                "response_coordinates",
            )?,
            alpha_threshold: reader.u8()?,
            entity_id: reader.u16()?,
            azimuth: reader.f32()?,
            elevation: reader.f32()?,
            min_range: reader.f32()?,
            max_range: reader.f32()?,
            source: GeodeticPoint::read(reader)?,
            material_mask: reader.u32()?,
        };
        reader.skip(4)?;
        Ok(packet)
    }
}

packet_family! {
    /// Line-of-sight test along a vector (LOS Range Request before CIGI 3).
    LosVectorRequest {
        V1(LosRangeRequest) => v1::LOS_RANGE_REQUEST, V1;
        V2(LosRangeRequest) => v2::LOS_RANGE_REQUEST, V2;
        V3(LosVectorRequestV3) => v3::LOS_VECTOR_REQUEST, V3;
    }
}

/// LOS Response of CIGI 1 and 2.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyLosResponse {
    pub request_id: u16,
    pub valid: bool,
    pub entity_id: u16,
    pub range: f64,
    pub intersection: GeodeticPoint,
}

impl PacketBody for LegacyLosResponse {
    const SIZE: PacketSize = PacketSize::Fixed(40);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.request_id)?;
        writer.flags(Flags8::new().with_bool(VALID, self.valid))?;
        writer.reserved(1)?;
        writer.u16(self.entity_id)?;
        writer.f64(self.range)?;
        self.intersection.write(writer)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let request_id = reader.u16()?;
        let flags = reader.flags()?;
        reader.skip(1)?;
        Ok(Self {
            request_id,
            valid: flags.get_bool(VALID),
            entity_id: reader.u16()?,
            range: reader.f64()?,
            intersection: GeodeticPoint::read(reader)?,
        })
    }
}

const ENTITY_ID_VALID: BitField = BitField::flag(1);

/// LOS Response of CIGI 3.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LosResponseV3 {
    pub request_id: u16,
    pub valid: bool,
    pub entity_id_valid: bool,
    pub visible: bool,
    /// Number of responses the IG sends for this request.
    pub response_count: u8,
    pub entity_id: u16,
    pub range: f64,
}

impl LosResponseV3 {
    const VISIBLE: BitField = BitField::flag(2);
}

impl PacketBody for LosResponseV3 {
    const SIZE: PacketSize = PacketSize::Fixed(16);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.request_id)?;
        let flags = Flags8::new()
            .with_bool(VALID, self.valid)
            .with_bool(ENTITY_ID_VALID, self.entity_id_valid)
            .with_bool(Self::VISIBLE, self.visible);
        writer.flags(flags)?;
        writer.u8(self.response_count)?;
        writer.u16(self.entity_id)?;
        writer.f64(self.range)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let request_id = reader.u16()?;
        let flags = reader.flags()?;
        Ok(Self {
            request_id,
            valid: flags.get_bool(VALID),
            entity_id_valid: flags.get_bool(ENTITY_ID_VALID),
            visible: flags.get_bool(Self::VISIBLE),
            response_count: reader.u8()?,
            entity_id: reader.u16()?,
            range: reader.f64()?,
        })
    }
}

packet_family! {
    LosResponse {
        V1(LegacyLosResponse) => v1::LOS_RESPONSE, V1;
        V2(LegacyLosResponse) => v2::LOS_RESPONSE, V2;
        V3(LosResponseV3) => v3::LOS_RESPONSE, V3;
    }
}

/// LOS Extended Response (CIGI 3).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LosExtendedResponse {
    pub request_id: u16,
    pub valid: bool,
    pub entity_id_valid: bool,
    pub range_valid: bool,
    pub visible: bool,
    pub intersection_coordinates: QueryCoordinates,
    pub response_count: u8,
    pub entity_id: u16,
    pub range: f64,
    pub intersection: GeodeticPoint,
    pub color: Rgba,
    pub material_code: u32,
    pub normal_azimuth: f32,
    pub normal_elevation: f32,
}

impl LosExtendedResponse {
    const RANGE_VALID: BitField = BitField::flag(2);
    const VISIBLE: BitField = BitField::flag(3);
    const COORDINATES: BitField = BitField::flag(4);
}

impl PacketBody for LosExtendedResponse {
    const SIZE: PacketSize = PacketSize::Fixed(56);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.request_id)?;
        let flags = Flags8::new()
            .with_bool(VALID, self.valid)
            .with_bool(ENTITY_ID_VALID, self.entity_id_valid)
            .with_bool(Self::RANGE_VALID, self.range_valid)
            .with_bool(Self::VISIBLE, self.visible)
            .with(Self::COORDINATES, self.intersection_coordinates.raw())?;
        writer.flags(flags)?;
        writer.u8(self.response_count)?;
        writer.u16(self.entity_id)?;
        writer.f64(self.range)?;
        self.intersection.write(writer)?;
        self.color.write(writer)?;
        writer.u32(self.material_code)?;
        writer.f32(self.normal_azimuth)?;
        writer.f32(self.normal_elevation)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let request_id = reader.u16()?;
        let flags = reader.flags()?;
        Ok(Self {
            request_id,
            valid: flags.get_bool(VALID),
            entity_id_valid: flags.get_bool(ENTITY_ID_VALID),
            range_valid: flags.get_bool(Self::RANGE_VALID),
            visible: flags.get_bool(Self::VISIBLE),
            intersection_coordinates: reader.enum_bits(
                flags,
                Self::COORDINATES,
                "intersection_coordinates",
            )?,
            response_count: reader.u8()?,
            entity_id: reader.u16()?,
            range: reader.f64()?,
            intersection: GeodeticPoint::read(reader)?,
            color: Rgba::read(reader)?,
            material_code: reader.u32()?,
            normal_azimuth: reader.f32()?,
            normal_elevation: reader.f32()?,
        })
    }
}

single_packet!(LosExtendedResponse => v3::LOS_EXTENDED_RESPONSE, V3);

/// Position Request (CIGI 3): asks the IG where an object currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionRequest {
    pub object_id: u16,
    pub part_id: u8,
    pub update_mode: PositionUpdateMode,
    pub object_class: ObjectClass,
    pub coordinates: PositionCoordinates,
}

impl PositionRequest {
    const UPDATE_MODE: BitField = BitField::flag(0);
    const OBJECT_CLASS: BitField = BitField::new(1, 3);
    const COORDINATES: BitField = BitField::new(4, 2);
}

impl PacketBody for PositionRequest {
    const SIZE: PacketSize = PacketSize::Fixed(8);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.object_id)?;
        writer.u8(self.part_id)?;
        let flags = Flags8::new()
            .with(Self::UPDATE_MODE, self.update_mode.raw())?
            .with(Self::OBJECT_CLASS, self.object_class.raw())?
            .with(Self::COORDINATES, self.coordinates.raw())?;
        writer.flags(flags)?;
        writer.reserved(2)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let object_id = reader.u16()?;
        let part_id = reader.u8()?;
        let flags = reader.flags()?;
        reader.skip(2)?;
        Ok(Self {
            object_id,
            part_id,
            update_mode: reader.enum_bits(flags, Self::UPDATE_MODE, "update_mode")?,
            object_class: reader.enum_bits(flags, Self::OBJECT_CLASS, "object_class")?,
            coordinates: reader.enum_bits(flags, Self::COORDINATES, "coordinates")?,
        })
    }
}

single_packet!(PositionRequest => v3::POSITION_REQUEST, V3);

/// Position Response (CIGI 3).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionResponse {
    pub object_id: u16,
    pub part_id: u8,
    pub object_class: ObjectClass,
    pub coordinates: PositionCoordinates,
    /// Latitude/longitude/altitude, or x/y/z in the requested frame.
    pub position: GeodeticPoint,
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl PositionResponse {
    const OBJECT_CLASS: BitField = BitField::new(0, 3);
    const COORDINATES: BitField = BitField::new(3, 2);
}

impl PacketBody for PositionResponse {
    const SIZE: PacketSize = PacketSize::Fixed(48);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.object_id)?;
        writer.u8(self.part_id)?;
        let flags = Flags8::new()
            .with(Self::OBJECT_CLASS, self.object_class.raw())?
            .with(Self::COORDINATES, self.coordinates.raw())?;
        writer.flags(flags)?;
        writer.reserved(2)?;
        self.position.write(writer)?;
        writer.f32(self.roll)?;
        writer.f32(self.pitch)?;
        writer.f32(self.yaw)?;
        writer.reserved(4)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let object_id = reader.u16()?;
        let part_id = reader.u8()?;
        let flags = reader.flags()?;
        reader.skip(2)?;
        let packet = Self {
            object_id,
            part_id,
            object_class: reader.enum_bits(flags, Self::OBJECT_CLASS, "object_class")?,
            coordinates: reader.enum_bits(flags, Self::COORDINATES, "coordinates")?,
            position: GeodeticPoint::read(reader)?,
            roll: reader.f32()?,
            pitch: reader.f32()?,
            yaw: reader.f32()?,
        };
        reader.skip(4)?;
        Ok(packet)
    }
}

single_packet!(PositionResponse => v3::POSITION_RESPONSE, V3);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::decode_body;
    use crate::error::PacketError;
    use crate::packet::CigiMessage;
    use crate::version::CigiVersion;

    #[test]
    fn hat_and_hot_share_one_family() {
        let hat = HatHotRequest::V2Hat(HatRequest::default());
        let hot = HatHotRequest::V2Hot(HotRequest::default());
        assert_eq!(hat.packet_id(), 15);
        assert_eq!(hot.packet_id(), 18);
        assert_eq!(hat.version(), CigiVersion::V2);
        assert_eq!(hat.encoded_len(), 32);
        assert_eq!(hot.encoded_len(), 24);
    }

    #[test]
    fn hat_hot_request_v3_flags() {
        let packet = HatHotRequestV3 {
            request_id: 9,
            request_type: HatHotRequestType::Extended,
            coordinates: QueryCoordinates::Entity,
            entity_id: 4,
            position: GeodeticPoint {
                latitude: 1.0,
                longitude: 2.0,
                altitude: 3.0,
            },
        };
        let bytes = HatHotRequest::V3(packet).to_bytes().unwrap();
        assert_eq!(&bytes[..8], &[24, 32, 0, 9, 0b110, 0, 0, 4]);
        let (decoded, _) = decode_body::<HatHotRequestV3>(24, &bytes).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn hat_hot_request_type_three_is_invalid() {
        let mut bytes = HatHotRequest::V3(HatHotRequestV3::default())
            .to_bytes()
            .unwrap();
        bytes[4] = 0b11;
        assert!(matches!(
            decode_body::<HatHotRequestV3>(24, &bytes),
            Err(PacketError::InvalidField {
                packet_id: 24,
                field: "request_type",
                value: 3,
            })
        ));
    }

    #[test]
    fn los_segment_3_2_extends_3_0() {
        let segment = LosSegmentRequestV3 {
            request_id: 3,
            request_type: LosRequestType::Extended,
            alpha_threshold: 128,
            entity_id: 12,
            ..LosSegmentRequestV3::default()
        };
        let packet = LosSegmentRequestV3_2 {
            segment,
            destination_entity_valid: true,
            material_mask: 0xDEAD_BEEF,
            update_period: 5,
            destination_entity_id: 77,
        };
        let short = LosSegmentRequest::V3(segment).to_bytes().unwrap();
        let long = LosSegmentRequest::V3_2(packet).to_bytes().unwrap();
        assert_eq!(short.len(), 56);
        assert_eq!(long.len(), 64);
        assert_eq!(long[4], 0b1_0001);
        assert_eq!(&long[5..56], &short[5..56]);
        assert_eq!(&long[56..], &[0xDE, 0xAD, 0xBE, 0xEF, 5, 0, 0, 77]);
        let (decoded, used) = decode_body::<LosSegmentRequestV3_2>(25, &long).unwrap();
        assert_eq!(decoded, packet);
        assert_eq!(used, 64);
        assert_eq!(LosSegmentRequest::V3_2(packet).version(), CigiVersion::V3_2);
    }

    #[test]
    fn los_3_0_decoder_rejects_3_2_packet() {
        let long = LosSegmentRequest::V3_2(LosSegmentRequestV3_2::default())
            .to_bytes()
            .unwrap();
        assert_eq!(
            decode_body::<LosSegmentRequestV3>(25, &long),
            Err(PacketError::SizeMismatch {
                packet_id: 25,
                declared: 64,
                expected: 56,
            })
        );
    }

    #[test]
    fn range_request_source_after_padding() {
        let packet = LosRangeRequest {
            request_id: 1,
            azimuth: 45.0,
            max_range: 1000.0,
            source: GeodeticPoint {
                latitude: 10.0,
                ..GeodeticPoint::default()
            },
            ..LosRangeRequest::default()
        };
        let bytes = LosVectorRequest::V1(packet).to_bytes().unwrap();
        assert_eq!(&bytes[24..32], &10.0f64.to_be_bytes());
        let (decoded, _) = decode_body::<LosRangeRequest>(17, &bytes).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn los_extended_response_roundtrip() {
        let packet = LosExtendedResponse {
            request_id: 2,
            valid: true,
            visible: true,
            intersection_coordinates: QueryCoordinates::Entity,
            response_count: 1,
            range: 250.5,
            color: Rgba {
                red: 10,
                green: 20,
                blue: 30,
                alpha: 255,
            },
            material_code: 42,
            ..LosExtendedResponse::default()
        };
        let bytes = packet.to_bytes().unwrap();
        assert_eq!(bytes[4], 0b1_1001);
        assert_eq!(&bytes[40..44], &[10, 20, 30, 255]);
        let (decoded, _) = decode_body::<LosExtendedResponse>(105, &bytes).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn position_request_flags() {
        let packet = PositionRequest {
            object_id: 6,
            part_id: 1,
            update_mode: PositionUpdateMode::Continuous,
            object_class: ObjectClass::MotionTracker,
            coordinates: PositionCoordinates::Submodel,
        };
        let bytes = packet.to_bytes().unwrap();
        assert_eq!(bytes, vec![27, 8, 0, 6, 1, 0b10_1001, 0, 0]);
        let (decoded, _) = decode_body::<PositionRequest>(27, &bytes).unwrap();
        assert_eq!(decoded, packet);
    }
}
