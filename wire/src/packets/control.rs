//! Frame synchronization packets: IG Control (host to IG) and Start Of
//! Frame (IG to host).

use bytecodec::{BitField, Flags8};

use crate::body::{NewerField, PacketBody, PacketReader, PacketWriter};
use crate::enums::{EarthReferenceModel, IgMode, IgModeLegacy, WireEnum};
use crate::error::{PacketError, PacketResult};
use crate::header::{PacketSize, BYTE_SWAP_MAGIC};
use crate::ids::{v1, v2, v3};
use crate::version::CigiVersion;

const IG_MODE: BitField = BitField::new(0, 2);
const TIMESTAMP_VALID: BitField = BitField::flag(2);
const MINOR_VERSION: BitField = BitField::new(4, 4);

fn read_magic(reader: &mut PacketReader<'_>) -> PacketResult<()> {
    let found = reader.u16()?;
    if found != BYTE_SWAP_MAGIC {
        return Err(PacketError::ByteOrderMismatch { found });
    }
    Ok(())
}

fn read_major(reader: &mut PacketReader<'_>, expected: u8) -> PacketResult<()> {
    let major = reader.u8()?;
    if major != expected {
        return Err(PacketError::InvalidField {
            packet_id: reader.packet_id(),
            field: "major_version",
            value: u64::from(major),
        });
    }
    Ok(())
}

/// 3.2 layouts only carry minor versions 2 and up.
fn check_minor(packet_id: u8, minor: u8) -> PacketResult<u8> {
    if minor < 2 {
        return Err(PacketError::InvalidField {
            packet_id,
            field: "minor_version",
            value: u64::from(minor),
        });
    }
    Ok(minor)
}

fn read_minor(reader: &PacketReader<'_>, flags: Flags8) -> PacketResult<u8> {
    check_minor(reader.packet_id(), flags.get(MINOR_VERSION))
}

fn minor_3_3(minor: u8) -> Option<NewerField> {
    (minor >= 3).then(|| NewerField {
        since: CigiVersion::V3_3,
        field: "minor_version",
        value: u64::from(minor),
    })
}

/// IG Control of CIGI 1 and 2, which differ only in the major version byte.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyIgControl<const MAJOR: u8> {
    pub database_number: i8,
    pub ig_mode: IgModeLegacy,
    pub tracking_enabled: bool,
    pub boresight: bool,
    pub frame_counter: u32,
    /// Seconds since the previous frame.
    pub timing_value: f32,
}

pub type IgControlV1 = LegacyIgControl<1>;
pub type IgControlV2 = LegacyIgControl<2>;

impl<const MAJOR: u8> LegacyIgControl<MAJOR> {
    const TRACKING: BitField = BitField::flag(2);
    const BORESIGHT: BitField = BitField::flag(3);
}

impl<const MAJOR: u8> PacketBody for LegacyIgControl<MAJOR> {
    const SIZE: PacketSize = PacketSize::Fixed(16);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u8(MAJOR)?;
        writer.i8(self.database_number)?;
        let flags = Flags8::new()
            .with(IG_MODE, self.ig_mode.raw())?
            .with_bool(Self::TRACKING, self.tracking_enabled)
            .with_bool(Self::BORESIGHT, self.boresight);
        writer.flags(flags)?;
        writer.reserved(3)?;
        writer.u32(self.frame_counter)?;
        writer.f32(self.timing_value)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        read_major(reader, MAJOR)?;
        let database_number = reader.i8()?;
        let flags = reader.flags()?;
        reader.skip(3)?;
        Ok(Self {
            database_number,
            ig_mode: reader.enum_bits(flags, IG_MODE, "ig_mode")?,
            tracking_enabled: flags.get_bool(Self::TRACKING),
            boresight: flags.get_bool(Self::BORESIGHT),
            frame_counter: reader.u32()?,
            timing_value: reader.f32()?,
        })
    }
}

/// IG Control of CIGI 3.0 and 3.1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IgControlV3 {
    pub database_number: i8,
    pub ig_mode: IgMode,
    pub timestamp_valid: bool,
    pub frame_counter: u32,
    /// Host timestamp in 10 microsecond ticks.
    pub timestamp: u32,
}

impl PacketBody for IgControlV3 {
    const SIZE: PacketSize = PacketSize::Fixed(16);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u8(3)?;
        writer.i8(self.database_number)?;
        let flags = Flags8::new()
            .with(IG_MODE, self.ig_mode.raw())?
            .with_bool(TIMESTAMP_VALID, self.timestamp_valid);
        writer.flags(flags)?;
        writer.reserved(1)?;
        writer.u16(BYTE_SWAP_MAGIC)?;
        writer.u32(self.frame_counter)?;
        writer.u32(self.timestamp)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        read_major(reader, 3)?;
        let database_number = reader.i8()?;
        let flags = reader.flags()?;
        reader.skip(1)?;
        read_magic(reader)?;
        Ok(Self {
            database_number,
            ig_mode: reader.enum_bits(flags, IG_MODE, "ig_mode")?,
            timestamp_valid: flags.get_bool(TIMESTAMP_VALID),
            frame_counter: reader.u32()?,
            timestamp: reader.u32()?,
        })
    }
}

/// IG Control of CIGI 3.2 and 3.3.
///
/// `minor_version` is 2 for CIGI 3.2 and 3 for CIGI 3.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IgControlV3_2 {
    pub minor_version: u8,
    pub database_number: i8,
    pub ig_mode: IgMode,
    pub timestamp_valid: bool,
    pub smoothing_enabled: bool,
    pub host_frame_number: u32,
    pub timestamp: u32,
    pub last_ig_frame_number: u32,
}

impl Default for IgControlV3_2 {
    fn default() -> Self {
        Self {
            minor_version: 2,
            database_number: 0,
            ig_mode: IgMode::Reset,
            timestamp_valid: false,
            smoothing_enabled: false,
            host_frame_number: 0,
            timestamp: 0,
            last_ig_frame_number: 0,
        }
    }
}

impl IgControlV3_2 {
    const SMOOTHING: BitField = BitField::flag(3);
}

impl PacketBody for IgControlV3_2 {
    const SIZE: PacketSize = PacketSize::Fixed(24);

    fn newer_field(&self) -> Option<NewerField> {
        minor_3_3(self.minor_version)
    }

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u8(3)?;
        writer.i8(self.database_number)?;
        let flags = Flags8::new()
            .with(IG_MODE, self.ig_mode.raw())?
            .with_bool(TIMESTAMP_VALID, self.timestamp_valid)
            .with_bool(Self::SMOOTHING, self.smoothing_enabled)
            .with(MINOR_VERSION, check_minor(writer.packet_id(), self.minor_version)?)?;
        writer.flags(flags)?;
        writer.reserved(1)?;
        writer.u16(BYTE_SWAP_MAGIC)?;
        writer.u32(self.host_frame_number)?;
        writer.u32(self.timestamp)?;
        writer.u32(self.last_ig_frame_number)?;
        writer.reserved(4)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        read_major(reader, 3)?;
        let database_number = reader.i8()?;
        let flags = reader.flags()?;
        let minor_version = read_minor(reader, flags)?;
        reader.skip(1)?;
        read_magic(reader)?;
        let packet = Self {
            minor_version,
            database_number,
            ig_mode: reader.enum_bits(flags, IG_MODE, "ig_mode")?,
            timestamp_valid: flags.get_bool(TIMESTAMP_VALID),
            smoothing_enabled: flags.get_bool(Self::SMOOTHING),
            host_frame_number: reader.u32()?,
            timestamp: reader.u32()?,
            last_ig_frame_number: reader.u32()?,
        };
        reader.skip(4)?;
        Ok(packet)
    }
}

packet_family! {
    /// IG Control: opens every host-to-IG datagram.
    IgControl {
        V1(IgControlV1) => v1::IG_CONTROL, V1;
        V2(IgControlV2) => v2::IG_CONTROL, V2;
        V3(IgControlV3) => v3::IG_CONTROL, V3;
        V3_2(IgControlV3_2) => v3::IG_CONTROL, V3_2;
    }
}

/// Start Of Frame of CIGI 1 and 2.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyStartOfFrame {
    pub database_number: i8,
    pub ig_status: u8,
    pub ig_mode: IgModeLegacy,
    pub frame_counter: u32,
    pub timing_value: f32,
}

impl PacketBody for LegacyStartOfFrame {
    const SIZE: PacketSize = PacketSize::Fixed(16);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.i8(self.database_number)?;
        writer.u8(self.ig_status)?;
        writer.flags(Flags8::new().with(IG_MODE, self.ig_mode.raw())?)?;
        writer.reserved(3)?;
        writer.u32(self.frame_counter)?;
        writer.f32(self.timing_value)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let database_number = reader.i8()?;
        let ig_status = reader.u8()?;
        let flags = reader.flags()?;
        reader.skip(3)?;
        Ok(Self {
            database_number,
            ig_status,
            ig_mode: reader.enum_bits(flags, IG_MODE, "ig_mode")?,
            frame_counter: reader.u32()?,
            timing_value: reader.f32()?,
        })
    }
}

/// Start Of Frame of CIGI 3.0 and 3.1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartOfFrameV3 {
    pub database_number: i8,
    pub ig_status: u8,
    pub ig_mode: IgMode,
    pub timestamp_valid: bool,
    pub earth_reference_model: EarthReferenceModel,
    pub frame_counter: u32,
    pub timestamp: u32,
}

const EARTH_MODEL: BitField = BitField::flag(3);

impl PacketBody for StartOfFrameV3 {
    const SIZE: PacketSize = PacketSize::Fixed(16);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.i8(self.database_number)?;
        writer.u8(self.ig_status)?;
        let flags = Flags8::new()
            .with(IG_MODE, self.ig_mode.raw())?
            .with_bool(TIMESTAMP_VALID, self.timestamp_valid)
            .with(EARTH_MODEL, self.earth_reference_model.raw())?;
        writer.flags(flags)?;
        writer.reserved(1)?;
        writer.u16(BYTE_SWAP_MAGIC)?;
        writer.u32(self.frame_counter)?;
        writer.u32(self.timestamp)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let database_number = reader.i8()?;
        let ig_status = reader.u8()?;
        let flags = reader.flags()?;
        reader.skip(1)?;
        read_magic(reader)?;
        Ok(Self {
            database_number,
            ig_status,
            ig_mode: reader.enum_bits(flags, IG_MODE, "ig_mode")?,
            timestamp_valid: flags.get_bool(TIMESTAMP_VALID),
            earth_reference_model: reader.enum_bits(flags, EARTH_MODEL, "earth_reference_model")?,
            frame_counter: reader.u32()?,
            timestamp: reader.u32()?,
        })
    }
}

/// Start Of Frame of CIGI 3.2 and 3.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartOfFrameV3_2 {
    pub minor_version: u8,
    pub database_number: i8,
    pub ig_status: u8,
    pub ig_mode: IgMode,
    pub timestamp_valid: bool,
    pub earth_reference_model: EarthReferenceModel,
    pub ig_frame_number: u32,
    pub timestamp: u32,
    pub last_host_frame_number: u32,
}

impl Default for StartOfFrameV3_2 {
    fn default() -> Self {
        Self {
            minor_version: 2,
            database_number: 0,
            ig_status: 0,
            ig_mode: IgMode::Reset,
            timestamp_valid: false,
            earth_reference_model: EarthReferenceModel::Wgs84,
            ig_frame_number: 0,
            timestamp: 0,
            last_host_frame_number: 0,
        }
    }
}

impl PacketBody for StartOfFrameV3_2 {
    const SIZE: PacketSize = PacketSize::Fixed(24);

    fn newer_field(&self) -> Option<NewerField> {
        minor_3_3(self.minor_version)
    }

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.i8(self.database_number)?;
        writer.u8(self.ig_status)?;
        let flags = Flags8::new()
            .with(IG_MODE, self.ig_mode.raw())?
            .with_bool(TIMESTAMP_VALID, self.timestamp_valid)
            .with(EARTH_MODEL, self.earth_reference_model.raw())?
            .with(MINOR_VERSION, check_minor(writer.packet_id(), self.minor_version)?)?;
        writer.flags(flags)?;
        writer.reserved(1)?;
        writer.u16(BYTE_SWAP_MAGIC)?;
        writer.u32(self.ig_frame_number)?;
        writer.u32(self.timestamp)?;
        writer.u32(self.last_host_frame_number)?;
        writer.reserved(4)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let database_number = reader.i8()?;
        let ig_status = reader.u8()?;
        let flags = reader.flags()?;
        let minor_version = read_minor(reader, flags)?;
        reader.skip(1)?;
        read_magic(reader)?;
        let packet = Self {
            minor_version,
            database_number,
            ig_status,
            ig_mode: reader.enum_bits(flags, IG_MODE, "ig_mode")?,
            timestamp_valid: flags.get_bool(TIMESTAMP_VALID),
            earth_reference_model: reader.enum_bits(flags, EARTH_MODEL, "earth_reference_model")?,
            ig_frame_number: reader.u32()?,
            timestamp: reader.u32()?,
            last_host_frame_number: reader.u32()?,
        };
        reader.skip(4)?;
        Ok(packet)
    }
}

packet_family! {
    /// Start Of Frame: opens every IG-to-host datagram.
    StartOfFrame {
        V1(LegacyStartOfFrame) => v1::START_OF_FRAME, V1;
        V2(LegacyStartOfFrame) => v2::START_OF_FRAME, V2;
        V3(StartOfFrameV3) => v3::START_OF_FRAME, V3;
        V3_2(StartOfFrameV3_2) => v3::START_OF_FRAME, V3_2;
    }
}
