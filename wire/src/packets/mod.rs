//! Packet layouts for every supported CIGI version.
//!
//! A message family that changed layout between versions is an enum with one
//! variant per (version, layout) pair; a message that exists in one layout
//! only is a plain struct. Fields shared across layouts live in small value
//! types defined here and embedded by value.

use bytecodec::Flags8;

use crate::body::{PacketReader, PacketWriter};
use crate::error::PacketResult;

/// Declares a multi-layout packet family and implements
/// [`CigiMessage`](crate::CigiMessage) for it.
macro_rules! packet_family {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident($body:ty) => $id:expr, $version:ident; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $( $(#[$vmeta])* $variant($body), )+
        }

        impl $crate::packet::CigiMessage for $name {
            fn kind(&self) -> $crate::packet::PacketKind {
                $crate::packet::PacketKind::$name
            }

            fn packet_id(&self) -> u8 {
                match self {
                    $( Self::$variant(_) => $id, )+
                }
            }

            fn version(&self) -> $crate::version::CigiVersion {
                match self {
                    $(
                        Self::$variant(body) => $crate::body::PacketBody::content_version(
                            body,
                            $crate::version::CigiVersion::$version,
                        ),
                    )+
                }
            }

            fn encoded_len(&self) -> usize {
                match self {
                    $( Self::$variant(body) => $crate::body::PacketBody::encoded_len(body), )+
                }
            }

            fn encode(&self, out: &mut [u8]) -> $crate::error::PacketResult<usize> {
                match self {
                    $( Self::$variant(body) => $crate::body::encode_body($id, body, out), )+
                }
            }
        }
    };
}

/// Implements [`CigiMessage`](crate::CigiMessage) for a single-layout packet.
macro_rules! single_packet {
    ($name:ident => $id:expr, $version:ident) => {
        impl $crate::packet::CigiMessage for $name {
            fn kind(&self) -> $crate::packet::PacketKind {
                $crate::packet::PacketKind::$name
            }

            fn packet_id(&self) -> u8 {
                $id
            }

            fn version(&self) -> $crate::version::CigiVersion {
                $crate::body::PacketBody::content_version(
                    self,
                    $crate::version::CigiVersion::$version,
                )
            }

            fn encoded_len(&self) -> usize {
                $crate::body::PacketBody::encoded_len(self)
            }

            fn encode(&self, out: &mut [u8]) -> $crate::error::PacketResult<usize> {
                $crate::body::encode_body($id, self, out)
            }
        }
    };
}

mod collision;
mod component;
mod control;
mod entity;
mod environment;
mod notification;
mod query;
mod symbol;
mod view;

pub use collision::*;
pub use component::*;
pub use control::*;
pub use entity::*;
pub use environment::*;
pub use notification::*;
pub use query::*;
pub use symbol::*;
pub use view::*;

/// Geodetic position: latitude and longitude in degrees, altitude in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeodeticPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GeodeticPoint {
    pub(crate) fn write(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.f64(self.latitude)?;
        writer.f64(self.longitude)?;
        writer.f64(self.altitude)
    }

    pub(crate) fn read(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        Ok(Self {
            latitude: reader.f64()?,
            longitude: reader.f64()?,
            altitude: reader.f64()?,
        })
    }
}

/// Orientation (degrees) followed by geodetic position, as carried by every
/// Entity Control layout.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityPose {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub position: GeodeticPoint,
}

impl EntityPose {
    pub(crate) fn write(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.f32(self.roll)?;
        writer.f32(self.pitch)?;
        writer.f32(self.yaw)?;
        self.position.write(writer)
    }

    pub(crate) fn read(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        Ok(Self {
            roll: reader.f32()?,
            pitch: reader.f32()?,
            yaw: reader.f32()?,
            position: GeodeticPoint::read(reader)?,
        })
    }
}

/// Six-degree-of-freedom offset: x/y/z in meters, then roll/pitch/yaw in
/// degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset6 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl Offset6 {
    pub(crate) fn write(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        for value in [self.x, self.y, self.z, self.roll, self.pitch, self.yaw] {
            writer.f32(value)?;
        }
        Ok(())
    }

    pub(crate) fn read(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        Ok(Self {
            x: reader.f32()?,
            y: reader.f32()?,
            z: reader.f32()?,
            roll: reader.f32()?,
            pitch: reader.f32()?,
            yaw: reader.f32()?,
        })
    }
}

/// Which of the six [`Offset6`] components are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dof6Enables {
    pub x: bool,
    pub y: bool,
    pub z: bool,
    pub roll: bool,
    pub pitch: bool,
    pub yaw: bool,
}

impl Dof6Enables {
    /// Sets six consecutive flag bits starting at bit `first`.
    pub(crate) fn pack(self, flags: Flags8, first: u8) -> Flags8 {
        pack_six(
            flags,
            first,
            [self.x, self.y, self.z, self.roll, self.pitch, self.yaw],
        )
    }

    pub(crate) fn unpack(flags: Flags8, first: u8) -> Self {
        let [x, y, z, roll, pitch, yaw] = unpack_six(flags, first);
        Self {
            x,
            y,
            z,
            roll,
            pitch,
            yaw,
        }
    }
}

/// View frustum planes: near and far distances in meters, side angles in
/// degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewFrustum {
    pub near: f32,
    pub far: f32,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl ViewFrustum {
    pub(crate) fn write(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        for value in [
            self.near,
            self.far,
            self.left,
            self.right,
            self.top,
            self.bottom,
        ] {
            writer.f32(value)?;
        }
        Ok(())
    }

    pub(crate) fn read(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        Ok(Self {
            near: reader.f32()?,
            far: reader.f32()?,
            left: reader.f32()?,
            right: reader.f32()?,
            top: reader.f32()?,
            bottom: reader.f32()?,
        })
    }
}

/// Which [`ViewFrustum`] planes are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrustumEnables {
    pub near: bool,
    pub far: bool,
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl FrustumEnables {
    pub(crate) fn pack(self, flags: Flags8, first: u8) -> Flags8 {
        pack_six(
            flags,
            first,
            [
                self.near,
                self.far,
                self.left,
                self.right,
                self.top,
                self.bottom,
            ],
        )
    }

    pub(crate) fn unpack(flags: Flags8, first: u8) -> Self {
        let [near, far, left, right, top, bottom] = unpack_six(flags, first);
        Self {
            near,
            far,
            left,
            right,
            top,
            bottom,
        }
    }
}

/// Sensor image controls shared by every Sensor Control layout.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorSettings {
    pub gain: f32,
    pub level: f32,
    pub ac_coupling: f32,
    pub noise: f32,
}

impl SensorSettings {
    pub(crate) fn write(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.f32(self.gain)?;
        writer.f32(self.level)?;
        writer.f32(self.ac_coupling)?;
        writer.f32(self.noise)
    }

    pub(crate) fn read(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        Ok(Self {
            gain: reader.f32()?,
            level: reader.f32()?,
            ac_coupling: reader.f32()?,
            noise: reader.f32()?,
        })
    }
}

/// Sensor gate size (pixels) and position (degrees).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorGate {
    pub x_size: u16,
    pub y_size: u16,
    pub x_position: f32,
    pub y_position: f32,
}

/// Red, green, blue and alpha intensities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    pub(crate) fn write(self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.bytes(&[self.red, self.green, self.blue, self.alpha])
    }

    pub(crate) fn read(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        Ok(Self {
            red: reader.u8()?,
            green: reader.u8()?,
            blue: reader.u8()?,
            alpha: reader.u8()?,
        })
    }
}

fn pack_six(mut flags: Flags8, first: u8, bits: [bool; 6]) -> Flags8 {
    for (offset, value) in (0u8..).zip(bits) {
        flags.set_bool(bytecodec::BitField::flag(first + offset), value);
    }
    flags
}

fn unpack_six(flags: Flags8, first: u8) -> [bool; 6] {
    let mut out = [false; 6];
    for (offset, value) in (0u8..).zip(out.iter_mut()) {
        *value = flags.get_bool(bytecodec::BitField::flag(first + offset));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_flags_pack_at_offset() {
        let enables = Dof6Enables {
            x: true,
            yaw: true,
            ..Dof6Enables::default()
        };
        let flags = enables.pack(Flags8::from_raw(0b0000_0001), 1);
        assert_eq!(flags.raw(), 0b0100_0011);
        assert_eq!(Dof6Enables::unpack(flags, 1), enables);
    }

    #[test]
    fn frustum_flags_roundtrip() {
        let enables = FrustumEnables {
            near: true,
            bottom: true,
            ..FrustumEnables::default()
        };
        let flags = enables.pack(Flags8::new(), 0);
        assert_eq!(flags.raw(), 0b0010_0001);
        assert_eq!(FrustumEnables::unpack(flags, 0), enables);
    }
}
