//! Per-version packet catalogs.
//!
//! A catalog maps the packet ids of one CIGI version to the layout that
//! version uses for them. Catalogs are static tables assembled from shared
//! segments: every 3.x catalog starts with the packets common to all of
//! 3.x, then adds the segment for its minor version.

use crate::body::{decode_body_for, encode_body, PacketBody};
use crate::error::{PacketError, PacketResult};
use crate::header::{PacketHeader, PacketSize};
use crate::ids::{v1, v2, v3};
use crate::packet::{CigiMessage, Packet, PacketKind};
use crate::packets::*;
use crate::version::CigiVersion;

type DecodeFn = fn(&[u8], CigiVersion) -> PacketResult<(Packet, usize)>;
type EncodeFn = fn(&Packet, &mut [u8]) -> Option<PacketResult<usize>>;
type TemplateFn = fn() -> Packet;

/// One catalog entry: a packet id bound to a layout.
#[derive(Clone, Copy)]
pub struct PacketSpec {
    id: u8,
    kind: PacketKind,
    layout: CigiVersion,
    size: PacketSize,
    decode: DecodeFn,
    encode: EncodeFn,
    template: TemplateFn,
}

impl PacketSpec {
    #[must_use]
    pub const fn id(&self) -> u8 {
        self.id
    }

    #[must_use]
    pub const fn kind(&self) -> PacketKind {
        self.kind
    }

    /// Version that introduced this layout.
    #[must_use]
    pub const fn layout(&self) -> CigiVersion {
        self.layout
    }

    #[must_use]
    pub const fn size(&self) -> PacketSize {
        self.size
    }

    /// Decodes one packet of this layout from the start of `buf`, as sent
    /// by a `version` sender.
    ///
    /// A field value `version` does not define is
    /// [`PacketError::InvalidField`].
    pub fn decode(&self, buf: &[u8], version: CigiVersion) -> PacketResult<(Packet, usize)> {
        (self.decode)(buf, version)
    }

    /// Default-valued packet of this layout.
    #[must_use]
    pub fn template(&self) -> Packet {
        (self.template)()
    }

    /// Encodes `packet` if it is in this entry's layout; `None` otherwise.
    pub fn try_encode(&self, packet: &Packet, out: &mut [u8]) -> Option<PacketResult<usize>> {
        (self.encode)(packet, out)
    }
}

impl std::fmt::Debug for PacketSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PacketSpec")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("layout", &self.layout)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

macro_rules! spec {
    (@build $id:expr, $kind:ident, $body:ty, $layout:ident) => {
        PacketSpec {
            id: $id,
            kind: PacketKind::$kind,
            layout: CigiVersion::$layout,
            size: <$body as PacketBody>::SIZE,
            decode,
            encode,
            template,
        }
    };
    ($id:expr, $kind:ident :: $variant:ident ($body:ty), $layout:ident) => {{
        fn decode(buf: &[u8], version: CigiVersion) -> PacketResult<(Packet, usize)> {
            let (body, used) = decode_body_for::<$body>($id, buf, version)?;
            Ok((Packet::$kind($kind::$variant(body)), used))
        }
        fn encode(packet: &Packet, out: &mut [u8]) -> Option<PacketResult<usize>> {
            match packet {
                Packet::$kind($kind::$variant(body)) => Some(encode_body($id, body, out)),
                _ => None,
            }
        }
        fn template() -> Packet {
            Packet::$kind($kind::$variant(<$body>::default()))
        }
        spec!(@build $id, $kind, $body, $layout)
    }};
    ($id:expr, $kind:ident, $layout:ident) => {{
        fn decode(buf: &[u8], version: CigiVersion) -> PacketResult<(Packet, usize)> {
            let (body, used) = decode_body_for::<$kind>($id, buf, version)?;
            Ok((Packet::$kind(body), used))
        }
        fn encode(packet: &Packet, out: &mut [u8]) -> Option<PacketResult<usize>> {
            match packet {
                Packet::$kind(body) => Some(encode_body($id, body, out)),
                _ => None,
            }
        }
        fn template() -> Packet {
            Packet::$kind($kind::default())
        }
        spec!(@build $id, $kind, $kind, $layout)
    }};
}

static CIGI_1_PACKETS: &[PacketSpec] = &[
    spec!(v1::IG_CONTROL, IgControl::V1(IgControlV1), V1),
    spec!(v1::ENTITY_CONTROL, EntityControl::V1(EntityControlV1), V1),
    spec!(v1::COMPONENT_CONTROL, ComponentControl::V1(ComponentControlV1), V1),
    spec!(v1::ARTICULATED_PART_CONTROL, ArticulatedPartControl::V1(ArticulatedPart), V1),
    spec!(v1::RATE_CONTROL, RateControl::V1(LegacyRateControl), V1),
    spec!(v1::ENVIRONMENT_CONTROL, EnvironmentControl::V1(LegacyEnvironmentControl), V1),
    spec!(v1::WEATHER_CONTROL, WeatherControl::V1(LegacyWeatherControl), V1),
    spec!(v1::VIEW_CONTROL, ViewControl::V1(LegacyViewControl), V1),
    spec!(v1::SENSOR_CONTROL, SensorControl::V1(LegacySensorControl), V1),
    spec!(v1::TRAJECTORY_DEFINITION, TrajectoryDefinition::V1(Trajectory), V1),
    spec!(v1::SPECIAL_EFFECT_DEFINITION, SpecialEffectDefinition::V1(SpecialEffect), V1),
    spec!(v1::VIEW_DEFINITION, ViewDefinition::V1(LegacyViewDefinition), V1),
    spec!(v1::COLLISION_SEGMENT_DEFINITION, CollisionSegmentDefinition::V1(CollisionSegment), V1),
    spec!(v1::HAT_REQUEST, HatHotRequest::V1(HatRequest), V1),
    spec!(v1::LOS_OCCULT_REQUEST, LosSegmentRequest::V1(LosOccultRequest), V1),
    spec!(v1::LOS_RANGE_REQUEST, LosVectorRequest::V1(LosRangeRequest), V1),
    spec!(v1::START_OF_FRAME, StartOfFrame::V1(LegacyStartOfFrame), V1),
    spec!(v1::HAT_RESPONSE, HatHotResponse::V1(HeightResponse), V1),
    spec!(v1::LOS_RESPONSE, LosResponse::V1(LegacyLosResponse), V1),
    spec!(
        v1::COLLISION_SEGMENT_RESPONSE,
        CollisionSegmentNotification::V1(LegacyCollisionSegmentResponse),
        V1
    ),
    spec!(v1::SENSOR_RESPONSE, SensorResponse::V1(SensorResponseV1), V1),
];

static CIGI_2_PACKETS: &[PacketSpec] = &[
    spec!(v2::IG_CONTROL, IgControl::V2(IgControlV2), V2),
    spec!(v2::ENTITY_CONTROL, EntityControl::V2(EntityControlV2), V2),
    spec!(v2::COMPONENT_CONTROL, ComponentControl::V2(ComponentControlV2), V2),
    spec!(v2::ARTICULATED_PART_CONTROL, ArticulatedPartControl::V2(ArticulatedPart), V2),
    spec!(v2::RATE_CONTROL, RateControl::V2(LegacyRateControl), V2),
    spec!(v2::ENVIRONMENT_CONTROL, EnvironmentControl::V2(LegacyEnvironmentControl), V2),
    spec!(v2::WEATHER_CONTROL, WeatherControl::V2(LegacyWeatherControl), V2),
    spec!(v2::VIEW_CONTROL, ViewControl::V2(LegacyViewControl), V2),
    spec!(v2::SENSOR_CONTROL, SensorControl::V2(LegacySensorControl), V2),
    spec!(v2::TRAJECTORY_DEFINITION, TrajectoryDefinition::V2(Trajectory), V2),
    spec!(v2::SPECIAL_EFFECT_DEFINITION, SpecialEffectDefinition::V2(SpecialEffect), V2),
    spec!(v2::VIEW_DEFINITION, ViewDefinition::V2(LegacyViewDefinition), V2),
    spec!(v2::COLLISION_SEGMENT_DEFINITION, CollisionSegmentDefinition::V2(CollisionSegment), V2),
    spec!(v2::COLLISION_VOLUME_DEFINITION, CollisionVolumeDefinition::V2(CollisionVolumeV2), V2),
    spec!(v2::HAT_REQUEST, HatHotRequest::V2Hat(HatRequest), V2),
    spec!(v2::LOS_OCCULT_REQUEST, LosSegmentRequest::V2(LosOccultRequest), V2),
    spec!(v2::LOS_RANGE_REQUEST, LosVectorRequest::V2(LosRangeRequest), V2),
    spec!(v2::HOT_REQUEST, HatHotRequest::V2Hot(HotRequest), V2),
    spec!(v2::START_OF_FRAME, StartOfFrame::V2(LegacyStartOfFrame), V2),
    spec!(v2::HAT_RESPONSE, HatHotResponse::V2Hat(HeightResponse), V2),
    spec!(v2::LOS_RESPONSE, LosResponse::V2(LegacyLosResponse), V2),
    spec!(
        v2::COLLISION_SEGMENT_RESPONSE,
        CollisionSegmentNotification::V2(LegacyCollisionSegmentResponse),
        V2
    ),
    spec!(v2::SENSOR_RESPONSE, SensorResponse::V2(SensorResponseV2), V2),
    spec!(v2::HOT_RESPONSE, HatHotResponse::V2Hot(HeightResponse), V2),
    spec!(
        v2::COLLISION_VOLUME_RESPONSE,
        CollisionVolumeNotification::V2(CollisionVolumeContact),
        V2
    ),
    spec!(v2::IG_MESSAGE, IgMessage::V2(IgMessageText), V2),
];

/// Packets whose layout is the same in every 3.x minor version.
static CIGI_3_COMMON: &[PacketSpec] = &[
    spec!(v3::ENTITY_CONTROL, EntityControl::V3(EntityControlV3), V3),
    spec!(v3::CONFORMAL_CLAMPED_ENTITY_CONTROL, ConformalClampedEntityControl, V3),
    spec!(v3::COMPONENT_CONTROL, ComponentControl::V3(ComponentControlV3), V3),
    spec!(v3::SHORT_COMPONENT_CONTROL, ShortComponentControl, V3),
    spec!(v3::ARTICULATED_PART_CONTROL, ArticulatedPartControl::V3(ArticulatedPart), V3),
    spec!(v3::SHORT_ARTICULATED_PART_CONTROL, ShortArticulatedPartControl, V3),
    spec!(v3::RATE_CONTROL, RateControl::V3(RateControlV3), V3),
    spec!(v3::CELESTIAL_SPHERE_CONTROL, CelestialSphereControl, V3),
    spec!(v3::ATMOSPHERE_CONTROL, AtmosphereControl, V3),
    spec!(v3::ENVIRONMENTAL_REGION_CONTROL, EnvironmentalRegionControl, V3),
    spec!(v3::WEATHER_CONTROL, WeatherControl::V3(WeatherControlV3), V3),
    spec!(v3::MARITIME_SURFACE_CONDITIONS_CONTROL, MaritimeSurfaceConditionsControl, V3),
    spec!(v3::WAVE_CONTROL, WaveControl, V3),
    spec!(v3::TERRESTRIAL_SURFACE_CONDITIONS_CONTROL, TerrestrialSurfaceConditionsControl, V3),
    spec!(v3::VIEW_CONTROL, ViewControl::V3(ViewControlV3), V3),
    spec!(v3::SENSOR_CONTROL, SensorControl::V3(SensorControlV3), V3),
    spec!(v3::MOTION_TRACKER_CONTROL, MotionTrackerControl, V3),
    spec!(v3::EARTH_REFERENCE_MODEL_DEFINITION, EarthReferenceModelDefinition, V3),
    spec!(v3::TRAJECTORY_DEFINITION, TrajectoryDefinition::V3(Trajectory), V3),
    spec!(v3::VIEW_DEFINITION, ViewDefinition::V3(ViewDefinitionV3), V3),
    spec!(v3::COLLISION_SEGMENT_DEFINITION, CollisionSegmentDefinition::V3(CollisionSegment), V3),
    spec!(v3::COLLISION_VOLUME_DEFINITION, CollisionVolumeDefinition::V3(CollisionVolumeV3), V3),
    spec!(v3::HAT_HOT_REQUEST, HatHotRequest::V3(HatHotRequestV3), V3),
    spec!(v3::LOS_VECTOR_REQUEST, LosVectorRequest::V3(LosVectorRequestV3), V3),
    spec!(v3::POSITION_REQUEST, PositionRequest, V3),
    spec!(v3::ENVIRONMENTAL_CONDITIONS_REQUEST, EnvironmentalConditionsRequest, V3),
    spec!(v3::HAT_HOT_RESPONSE, HatHotResponse::V3(HatHotResponseV3), V3),
    spec!(v3::HAT_HOT_EXTENDED_RESPONSE, HatHotExtendedResponse, V3),
    spec!(v3::LOS_RESPONSE, LosResponse::V3(LosResponseV3), V3),
    spec!(v3::LOS_EXTENDED_RESPONSE, LosExtendedResponse, V3),
    spec!(v3::SENSOR_RESPONSE, SensorResponse::V3(SensorResponseV3), V3),
    spec!(v3::SENSOR_EXTENDED_RESPONSE, SensorExtendedResponse, V3),
    spec!(v3::POSITION_RESPONSE, PositionResponse, V3),
    spec!(v3::WEATHER_CONDITIONS_RESPONSE, WeatherConditionsResponse, V3),
    spec!(v3::AEROSOL_CONCENTRATION_RESPONSE, AerosolConcentrationResponse, V3),
    spec!(v3::MARITIME_SURFACE_CONDITIONS_RESPONSE, MaritimeSurfaceConditionsResponse, V3),
    spec!(v3::TERRESTRIAL_SURFACE_CONDITIONS_RESPONSE, TerrestrialSurfaceConditionsResponse, V3),
    spec!(
        v3::COLLISION_SEGMENT_NOTIFICATION,
        CollisionSegmentNotification::V3(CollisionSegmentNotificationV3),
        V3
    ),
    spec!(
        v3::COLLISION_VOLUME_NOTIFICATION,
        CollisionVolumeNotification::V3(CollisionVolumeContact),
        V3
    ),
    spec!(v3::ANIMATION_STOP_NOTIFICATION, AnimationStopNotification, V3),
    spec!(v3::EVENT_NOTIFICATION, EventNotification, V3),
    spec!(v3::IG_MESSAGE, IgMessage::V3(IgMessageText), V3),
];

/// Frame synchronisation and LOS segment layouts of 3.0 and 3.1.
static CIGI_3_0_SYNC: &[PacketSpec] = &[
    spec!(v3::IG_CONTROL, IgControl::V3(IgControlV3), V3),
    spec!(v3::LOS_SEGMENT_REQUEST, LosSegmentRequest::V3(LosSegmentRequestV3), V3),
    spec!(v3::START_OF_FRAME, StartOfFrame::V3(StartOfFrameV3), V3),
];

/// Frame synchronisation and LOS segment layouts from 3.2 on.
static CIGI_3_2_SYNC: &[PacketSpec] = &[
    spec!(v3::IG_CONTROL, IgControl::V3_2(IgControlV3_2), V3_2),
    spec!(v3::LOS_SEGMENT_REQUEST, LosSegmentRequest::V3_2(LosSegmentRequestV3_2), V3_2),
    spec!(v3::START_OF_FRAME, StartOfFrame::V3_2(StartOfFrameV3_2), V3_2),
];

static CIGI_3_3_SYMBOLS: &[PacketSpec] = &[
    spec!(v3::SYMBOL_SURFACE_DEFINITION, SymbolSurfaceDefinition, V3_3),
    spec!(v3::SYMBOL_TEXT_DEFINITION, SymbolTextDefinition, V3_3),
    spec!(v3::SYMBOL_CIRCLE_DEFINITION, SymbolCircleDefinition, V3_3),
    spec!(v3::SYMBOL_LINE_DEFINITION, SymbolLineDefinition, V3_3),
    spec!(v3::SYMBOL_CLONE, SymbolClone, V3_3),
    spec!(v3::SYMBOL_CONTROL, SymbolControl, V3_3),
    spec!(v3::SHORT_SYMBOL_CONTROL, ShortSymbolControl, V3_3),
];

/// The packet set of one CIGI version.
#[derive(Debug)]
pub struct Catalog {
    version: CigiVersion,
    segments: &'static [&'static [PacketSpec]],
}

static CIGI_1: Catalog = Catalog {
    version: CigiVersion::V1,
    segments: &[CIGI_1_PACKETS],
};

static CIGI_2: Catalog = Catalog {
    version: CigiVersion::V2,
    segments: &[CIGI_2_PACKETS],
};

static CIGI_3: Catalog = Catalog {
    version: CigiVersion::V3,
    segments: &[CIGI_3_COMMON, CIGI_3_0_SYNC],
};

static CIGI_3_2: Catalog = Catalog {
    version: CigiVersion::V3_2,
    segments: &[CIGI_3_COMMON, CIGI_3_2_SYNC],
};

static CIGI_3_3: Catalog = Catalog {
    version: CigiVersion::V3_3,
    segments: &[CIGI_3_COMMON, CIGI_3_2_SYNC, CIGI_3_3_SYMBOLS],
};

/// Returns the catalog of `version`.
#[must_use]
pub fn catalog(version: CigiVersion) -> &'static Catalog {
    match version {
        CigiVersion::V1 => &CIGI_1,
        CigiVersion::V2 => &CIGI_2,
        CigiVersion::V3 => &CIGI_3,
        CigiVersion::V3_2 => &CIGI_3_2,
        CigiVersion::V3_3 => &CIGI_3_3,
    }
}

/// Looks up the entry for `id` in the catalog of `version`.
pub fn lookup(version: CigiVersion, id: u8) -> PacketResult<&'static PacketSpec> {
    catalog(version).lookup(id)
}

impl Catalog {
    #[must_use]
    pub const fn version(&self) -> CigiVersion {
        self.version
    }

    /// Entry for `id`, or [`PacketError::UnknownPacketId`].
    pub fn lookup(&self, id: u8) -> PacketResult<&'static PacketSpec> {
        self.entries()
            .find(|spec| spec.id == id)
            .ok_or(PacketError::UnknownPacketId {
                id,
                version: self.version,
            })
    }

    /// All entries, segment by segment.
    pub fn entries(&self) -> impl Iterator<Item = &'static PacketSpec> {
        self.segments.iter().flat_map(|segment| segment.iter())
    }

    /// Decodes the packet at the start of `buf`.
    ///
    /// Returns the packet and the number of bytes it occupied. A packet
    /// holding a value this version does not define, such as a 3.3
    /// component class in a 3.0 datagram, is [`PacketError::InvalidField`].
    pub fn decode(&self, buf: &[u8]) -> PacketResult<(Packet, usize)> {
        let header = PacketHeader::peek(buf)?;
        self.lookup(header.packet_id)?.decode(buf, self.version)
    }

    /// Encodes `packet` for this version.
    ///
    /// Fails with [`PacketError::WrongVersion`] unless this version uses
    /// the packet's layout for its id and defines every value it holds.
    pub fn encode(&self, packet: &Packet, out: &mut [u8]) -> PacketResult<usize> {
        let wrong_version = || PacketError::WrongVersion {
            kind: packet.kind(),
            version: self.version,
        };
        let needs = packet.version();
        if needs.major() != self.version.major() || needs > self.version {
            return Err(wrong_version());
        }
        let spec = self.lookup(packet.packet_id()).map_err(|_| wrong_version())?;
        spec.try_encode(packet, out).unwrap_or_else(|| Err(wrong_version()))
    }

    /// Default-valued packet for `id`.
    pub fn template(&self, id: u8) -> PacketResult<Packet> {
        self.lookup(id).map(PacketSpec::template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ComponentClassV3;

    #[test]
    fn entry_counts() {
        assert_eq!(catalog(CigiVersion::V1).entries().count(), 21);
        assert_eq!(catalog(CigiVersion::V2).entries().count(), 26);
        assert_eq!(catalog(CigiVersion::V3).entries().count(), 45);
        assert_eq!(catalog(CigiVersion::V3_2).entries().count(), 45);
        assert_eq!(catalog(CigiVersion::V3_3).entries().count(), 52);
    }

    #[test]
    fn ids_unique_per_catalog() {
        for version in CigiVersion::ALL {
            let mut ids: Vec<u8> = catalog(version).entries().map(PacketSpec::id).collect();
            let total = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), total, "{version}");
        }
    }

    #[test]
    fn sizes_per_version() {
        assert_eq!(lookup(CigiVersion::V1, 2).unwrap().size(), PacketSize::Fixed(48));
        assert_eq!(lookup(CigiVersion::V2, 2).unwrap().size(), PacketSize::Fixed(56));
        assert_eq!(lookup(CigiVersion::V3, 1).unwrap().size(), PacketSize::Fixed(16));
        assert_eq!(lookup(CigiVersion::V3_2, 1).unwrap().size(), PacketSize::Fixed(24));
        assert_eq!(lookup(CigiVersion::V3_2, 25).unwrap().size(), PacketSize::Fixed(64));
        assert_eq!(
            lookup(CigiVersion::V3_3, 31).unwrap().size(),
            PacketSize::Variable { min: 16, max: 232 }
        );
    }

    #[test]
    fn symbols_only_in_3_3() {
        assert_eq!(
            lookup(CigiVersion::V3_2, 29).unwrap_err(),
            PacketError::UnknownPacketId {
                id: 29,
                version: CigiVersion::V3_2,
            }
        );
        assert_eq!(
            lookup(CigiVersion::V3_3, 29).unwrap().kind(),
            PacketKind::SymbolSurfaceDefinition
        );
    }

    #[test]
    fn same_id_different_messages() {
        assert_eq!(lookup(CigiVersion::V1, 3).unwrap().kind(), PacketKind::ComponentControl);
        assert_eq!(
            lookup(CigiVersion::V3, 3).unwrap().kind(),
            PacketKind::ConformalClampedEntityControl
        );
    }

    #[test]
    fn templates_match_entries() {
        for version in CigiVersion::ALL {
            for spec in catalog(version).entries() {
                let packet = spec.template();
                assert_eq!(packet.kind(), spec.kind());
                assert_eq!(packet.packet_id(), spec.id());
                assert_eq!(packet.version(), spec.layout(), "{:?}", spec);
            }
        }
    }

    #[test]
    fn encode_rejects_other_layout() {
        let legacy = Packet::from(ComponentControl::V1(ComponentControlV1::default()));
        let mut out = [0u8; 64];
        assert_eq!(
            catalog(CigiVersion::V3).encode(&legacy, &mut out),
            Err(PacketError::WrongVersion {
                kind: PacketKind::ComponentControl,
                version: CigiVersion::V3,
            })
        );

        let old_sync = Packet::from(IgControl::V3(IgControlV3::default()));
        assert!(matches!(
            catalog(CigiVersion::V3_2).encode(&old_sync, &mut out),
            Err(PacketError::WrongVersion { .. })
        ));
        assert_eq!(catalog(CigiVersion::V3).encode(&old_sync, &mut out), Ok(16));
    }

    #[test]
    fn encode_rejects_values_newer_than_catalog() {
        let symbol = Packet::from(ShortComponentControl {
            component_class: ComponentClassV3::Symbol,
            ..ShortComponentControl::default()
        });
        let mut out = [0u8; 16];
        assert!(matches!(
            catalog(CigiVersion::V3_2).encode(&symbol, &mut out),
            Err(PacketError::WrongVersion { .. })
        ));
        assert_eq!(catalog(CigiVersion::V3_3).encode(&symbol, &mut out), Ok(16));
    }

    #[test]
    fn decode_dispatches_on_id() {
        let bytes = Packet::from(AnimationStopNotification { entity_id: 9 })
            .to_bytes()
            .unwrap();
        let (packet, used) = catalog(CigiVersion::V3_2).decode(&bytes).unwrap();
        assert_eq!(used, 8);
        assert_eq!(
            packet,
            Packet::AnimationStopNotification(AnimationStopNotification { entity_id: 9 })
        );
        assert!(matches!(
            catalog(CigiVersion::V2).decode(&bytes),
            Err(PacketError::UnknownPacketId { id: 115, .. })
        ));
    }

    #[test]
    fn decode_rejects_values_newer_than_catalog() {
        let bytes = Packet::from(ShortComponentControl {
            component_class: ComponentClassV3::Symbol,
            ..ShortComponentControl::default()
        })
        .to_bytes()
        .unwrap();
        for version in [CigiVersion::V3, CigiVersion::V3_2] {
            assert_eq!(
                catalog(version).decode(&bytes),
                Err(PacketError::InvalidField {
                    packet_id: 5,
                    field: "component_class",
                    value: 15,
                }),
                "{version}"
            );
        }
        let (packet, used) = catalog(CigiVersion::V3_3).decode(&bytes).unwrap();
        assert_eq!(used, 16);
        assert_eq!(packet.version(), CigiVersion::V3_3);
    }

    #[test]
    fn template_for_unknown_id() {
        assert!(catalog(CigiVersion::V1).template(200).is_err());
        assert_eq!(
            catalog(CigiVersion::V2).template(108).unwrap(),
            Packet::IgMessage(IgMessage::V2(IgMessageText::default()))
        );
    }
}
