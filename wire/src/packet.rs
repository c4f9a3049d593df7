//! The packet sum type and the message trait shared by every packet.

use std::fmt;

use crate::error::PacketResult;
use crate::packets::*;
use crate::version::CigiVersion;

/// Behaviour shared by every packet type.
///
/// Implemented by the single-layout packet structs, by the per-message
/// family enums and by [`Packet`].
pub trait CigiMessage {
    /// Which message this is, independent of version.
    fn kind(&self) -> PacketKind;

    /// Wire id of the layout this value is in.
    fn packet_id(&self) -> u8;

    /// Earliest version that can carry this value unchanged.
    ///
    /// Usually the version the layout was introduced in; later when a field
    /// holds a value only a later minor version defines.
    fn version(&self) -> CigiVersion;

    /// Encoded size in bytes, header included.
    fn encoded_len(&self) -> usize;

    /// Encodes into the start of `out`, returning the bytes written.
    ///
    /// Nothing is written when an error is returned.
    fn encode(&self, out: &mut [u8]) -> PacketResult<usize>;

    /// Encodes into a freshly allocated buffer.
    fn to_bytes(&self) -> PacketResult<Vec<u8>> {
        let mut out = vec![0u8; self.encoded_len()];
        let len = self.encode(&mut out)?;
        out.truncate(len);
        Ok(out)
    }
}

macro_rules! packet_kinds {
    ($($kind:ident,)+) => {
        /// Every message kind, across all versions.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum PacketKind {
            $($kind,)+
        }

        impl PacketKind {
            /// All kinds in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$kind),+];

            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$kind => stringify!($kind),)+
                }
            }
        }

        /// Any decoded packet.
        ///
        /// Each variant wraps the type of the same name: a family enum for
        /// messages whose layout changed between versions, or a plain struct.
        #[derive(Debug, Clone, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Packet {
            $($kind($kind),)+
        }

        $(
            impl From<$kind> for Packet {
                fn from(packet: $kind) -> Self {
                    Self::$kind(packet)
                }
            }
        )+

        impl Packet {
            /// The wrapped packet as a trait object.
            #[must_use]
            pub fn as_message(&self) -> &dyn CigiMessage {
                match self {
                    $(Self::$kind(packet) => packet as &dyn CigiMessage,)+
                }
            }
        }
    };
}

packet_kinds! {
    IgControl,
    EntityControl,
    ConformalClampedEntityControl,
    ComponentControl,
    ShortComponentControl,
    ArticulatedPartControl,
    ShortArticulatedPartControl,
    RateControl,
    CelestialSphereControl,
    AtmosphereControl,
    EnvironmentControl,
    EnvironmentalRegionControl,
    WeatherControl,
    MaritimeSurfaceConditionsControl,
    WaveControl,
    TerrestrialSurfaceConditionsControl,
    ViewControl,
    SensorControl,
    MotionTrackerControl,
    EarthReferenceModelDefinition,
    TrajectoryDefinition,
    SpecialEffectDefinition,
    ViewDefinition,
    CollisionSegmentDefinition,
    CollisionVolumeDefinition,
    HatHotRequest,
    LosSegmentRequest,
    LosVectorRequest,
    PositionRequest,
    EnvironmentalConditionsRequest,
    SymbolSurfaceDefinition,
    SymbolTextDefinition,
    SymbolCircleDefinition,
    SymbolLineDefinition,
    SymbolClone,
    SymbolControl,
    ShortSymbolControl,
    StartOfFrame,
    HatHotResponse,
    HatHotExtendedResponse,
    LosResponse,
    LosExtendedResponse,
    SensorResponse,
    SensorExtendedResponse,
    PositionResponse,
    WeatherConditionsResponse,
    AerosolConcentrationResponse,
    MaritimeSurfaceConditionsResponse,
    TerrestrialSurfaceConditionsResponse,
    CollisionSegmentNotification,
    CollisionVolumeNotification,
    AnimationStopNotification,
    EventNotification,
    IgMessage,
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl CigiMessage for Packet {
    fn kind(&self) -> PacketKind {
        self.as_message().kind()
    }

    fn packet_id(&self) -> u8 {
        self.as_message().packet_id()
    }

    fn version(&self) -> CigiVersion {
        self.as_message().version()
    }

    fn encoded_len(&self) -> usize {
        self.as_message().encoded_len()
    }

    fn encode(&self, out: &mut [u8]) -> PacketResult<usize> {
        self.as_message().encode(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ComponentClassV3;
    use crate::error::PacketError;

    #[test]
    fn kind_names_match_variants() {
        assert_eq!(PacketKind::ALL.len(), 54);
        assert_eq!(PacketKind::IgControl.name(), "IgControl");
        assert_eq!(PacketKind::ShortSymbolControl.to_string(), "ShortSymbolControl");
        let mut sorted = PacketKind::ALL.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), PacketKind::ALL.len());
    }

    #[test]
    fn packet_dispatches_to_wrapped_message() {
        let packet = Packet::from(ShortComponentControl {
            component_class: ComponentClassV3::SymbolSurface,
            ..ShortComponentControl::default()
        });
        assert_eq!(packet.kind(), PacketKind::ShortComponentControl);
        assert_eq!(packet.packet_id(), 5);
        assert_eq!(packet.version(), CigiVersion::V3_3);
        assert_eq!(packet.encoded_len(), 16);
        assert_eq!(packet.to_bytes().unwrap().len(), 16);
    }

    #[test]
    fn family_variant_selects_id_and_version() {
        let packet = Packet::from(IgMessage::V2(IgMessageText::new(1, "ok")));
        assert_eq!(packet.packet_id(), 108);
        assert_eq!(packet.version(), CigiVersion::V2);
        let packet = Packet::from(IgMessage::V3(IgMessageText::new(1, "ok")));
        assert_eq!(packet.packet_id(), 117);
        assert_eq!(packet.version(), CigiVersion::V3);
    }

    #[test]
    fn encode_into_short_buffer() {
        let packet = Packet::from(AnimationStopNotification { entity_id: 1 });
        let mut out = [0xEEu8; 4];
        assert_eq!(
            packet.encode(&mut out),
            Err(PacketError::BufferTooSmall {
                needed: 8,
                available: 4,
            })
        );
        assert_eq!(out, [0xEE; 4]);
    }
}
