//! Enumerated field values.
//!
//! Every enumeration is numbered contiguously from zero, so a value's raw
//! wire form doubles as its ordinal in the conversion tables.

/// An enumeration carried on the wire as a small unsigned integer.
pub trait WireEnum: Copy + Sized + 'static {
    /// Type name used in error reports.
    const NAME: &'static str;

    /// Every enumerator, in wire order.
    const ALL: &'static [Self];

    /// Raw wire value (also the ordinal).
    fn raw(self) -> u8;

    /// Parses a raw wire value.
    fn from_raw(raw: u8) -> Option<Self>;
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u8)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant = $value ),+
        }

        impl WireEnum for $name {
            const NAME: &'static str = stringify!($name);
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn raw(self) -> u8 {
                self as u8
            }

            fn from_raw(raw: u8) -> Option<Self> {
                match raw {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

wire_enum! {
    /// IG mode of CIGI 1 and 2.
    pub enum IgModeLegacy {
        #[default]
        Reset = 0,
        Operate = 1,
        Debug = 2,
    }
}

wire_enum! {
    /// IG mode of CIGI 3.
    pub enum IgMode {
        #[default]
        Reset = 0,
        Operate = 1,
        Debug = 2,
        OfflineMaintenance = 3,
    }
}

wire_enum! {
    pub enum EntityState {
        #[default]
        Inactive = 0,
        Active = 1,
        Destroy = 2,
    }
}

wire_enum! {
    /// Special effect animation state of CIGI 1 and 2 entities.
    pub enum EffectAnimationState {
        #[default]
        Stop = 0,
        Play = 1,
        Restart = 2,
    }
}

wire_enum! {
    /// Animation state of CIGI 3 entities.
    pub enum AnimationState {
        #[default]
        Stop = 0,
        Pause = 1,
        Play = 2,
        Continue = 3,
    }
}

wire_enum! {
    pub enum GroundClamp {
        #[default]
        NoClamp = 0,
        NonConformal = 1,
        Conformal = 2,
    }
}

wire_enum! {
    /// Component class of CIGI 1 Component Control.
    pub enum ComponentClassV1 {
        #[default]
        Entity = 0,
        Environment = 1,
        View = 2,
    }
}

wire_enum! {
    /// Component class of CIGI 2 Component Control.
    pub enum ComponentClassV2 {
        #[default]
        Entity = 0,
        Environment = 1,
        View = 2,
        ViewGroup = 3,
        Sensor = 4,
        System = 5,
    }
}

wire_enum! {
    /// Component class of CIGI 3 Component Control.
    ///
    /// `SymbolSurface` and `Symbol` only exist from CIGI 3.3 on.
    pub enum ComponentClassV3 {
        #[default]
        Entity = 0,
        View = 1,
        ViewGroup = 2,
        Sensor = 3,
        RegionalSeaSurface = 4,
        RegionalTerrainSurface = 5,
        RegionalLayeredWeather = 6,
        GlobalSeaSurface = 7,
        GlobalTerrainSurface = 8,
        GlobalLayeredWeather = 9,
        Atmosphere = 10,
        CelestialSphere = 11,
        Event = 12,
        System = 13,
        SymbolSurface = 14,
        Symbol = 15,
    }
}

impl ComponentClassV3 {
    /// Returns `true` for the classes added by CIGI 3.3.
    #[must_use]
    pub const fn is_symbol_class(self) -> bool {
        matches!(self, Self::SymbolSurface | Self::Symbol)
    }
}

wire_enum! {
    /// Degree of freedom driven by a Short Articulated Part Control slot.
    pub enum DofSelect {
        #[default]
        NotUsed = 0,
        X = 1,
        Y = 2,
        Z = 3,
        Yaw = 4,
        Pitch = 5,
        Roll = 6,
    }
}

wire_enum! {
    pub enum RegionState {
        #[default]
        Inactive = 0,
        Active = 1,
        Destroyed = 2,
    }
}

wire_enum! {
    pub enum WeatherScope {
        #[default]
        Global = 0,
        Regional = 1,
        Entity = 2,
    }
}

wire_enum! {
    pub enum CloudType {
        #[default]
        None = 0,
        Altocumulus = 1,
        Altostratus = 2,
        Cirrocumulus = 3,
        Cirrostratus = 4,
        Cirrus = 5,
        Cumulonimbus = 6,
        Cumulus = 7,
        Nimbostratus = 8,
        Stratocumulus = 9,
        Stratus = 10,
        Other1 = 11,
        Other2 = 12,
        Other3 = 13,
        Other4 = 14,
        Other5 = 15,
    }
}

wire_enum! {
    /// Weather phenomenon of CIGI 1 and 2 Weather Control.
    ///
    /// CIGI 3 replaces it with a numeric layer id; see
    /// [`WeatherLayer`].
    pub enum WeatherPhenomenon {
        #[default]
        Default = 0,
        CloudLayer1 = 1,
        CloudLayer2 = 2,
        CloudLayer3 = 3,
        Rain = 4,
        Snow = 5,
        Sleet = 6,
        Hail = 7,
        Sand = 8,
        Dust = 9,
    }
}

wire_enum! {
    /// Predefined CIGI 3 weather layer ids. Ids from 10 up are IG defined.
    pub enum WeatherLayer {
        #[default]
        GroundFog = 0,
        CloudLayer1 = 1,
        CloudLayer2 = 2,
        CloudLayer3 = 3,
        Rain = 4,
        Snow = 5,
        Sleet = 6,
        Hail = 7,
        Sand = 8,
        Dust = 9,
    }
}

wire_enum! {
    pub enum BreakerType {
        #[default]
        Plunging = 0,
        Spilling = 1,
        Surging = 2,
    }
}

wire_enum! {
    pub enum MirrorMode {
        #[default]
        None = 0,
        Horizontal = 1,
        Vertical = 2,
        HorizontalAndVertical = 3,
    }
}

wire_enum! {
    pub enum PixelReplication {
        #[default]
        None = 0,
        OneByTwo = 1,
        TwoByOne = 2,
        TwoByTwo = 3,
    }
}

wire_enum! {
    pub enum ProjectionType {
        #[default]
        Perspective = 0,
        Orthographic = 1,
    }
}

wire_enum! {
    pub enum ReorderMode {
        #[default]
        NoReorder = 0,
        BringToTop = 1,
    }
}

wire_enum! {
    /// Sensor track mode of CIGI 1 and 2.
    pub enum TrackModeLegacy {
        #[default]
        Off = 0,
        ForceCorrelate = 1,
        Scene = 2,
        Target = 3,
        Ship = 4,
    }
}

wire_enum! {
    /// Sensor track mode of CIGI 3.
    pub enum TrackMode {
        #[default]
        Off = 0,
        ForceCorrelate = 1,
        Scene = 2,
        Target = 3,
        Ship = 4,
        IgDefined3 = 5,
        IgDefined2 = 6,
        IgDefined1 = 7,
    }
}

wire_enum! {
    pub enum SensorResponseType {
        #[default]
        GatePosition = 0,
        TargetPosition = 1,
    }
}

wire_enum! {
    /// Sensor status of CIGI 1.
    pub enum SensorStatusV1 {
        #[default]
        Searching = 0,
        Tracking = 1,
        Breaklock = 2,
    }
}

wire_enum! {
    /// Sensor status of CIGI 2 and 3.
    pub enum SensorStatus {
        #[default]
        Searching = 0,
        Tracking = 1,
        ImpendingBreaklock = 2,
        Breaklock = 3,
    }
}

wire_enum! {
    pub enum VolumeType {
        Sphere = 0,
        #[default]
        Cuboid = 1,
    }
}

wire_enum! {
    pub enum HatHotRequestType {
        #[default]
        HeightAboveTerrain = 0,
        HeightOfTerrain = 1,
        Extended = 2,
    }
}

wire_enum! {
    pub enum HatHotResponseType {
        #[default]
        HeightAboveTerrain = 0,
        HeightOfTerrain = 1,
    }
}

wire_enum! {
    /// Terrain query a CIGI 1 or 2 packet stands for.
    pub enum LegacyTerrainQuery {
        #[default]
        HeightAboveTerrain = 0,
        HeightOfTerrain = 1,
    }
}

wire_enum! {
    pub enum QueryCoordinates {
        #[default]
        Geodetic = 0,
        Entity = 1,
    }
}

wire_enum! {
    pub enum LosRequestType {
        #[default]
        Basic = 0,
        Extended = 1,
    }
}

wire_enum! {
    pub enum ObjectClass {
        #[default]
        Entity = 0,
        ArticulatedPart = 1,
        View = 2,
        ViewGroup = 3,
        MotionTracker = 4,
    }
}

wire_enum! {
    pub enum PositionCoordinates {
        #[default]
        Geodetic = 0,
        ParentEntity = 1,
        Submodel = 2,
    }
}

wire_enum! {
    pub enum PositionUpdateMode {
        #[default]
        OneShot = 0,
        Continuous = 1,
    }
}

wire_enum! {
    pub enum CollisionType {
        #[default]
        NonEntity = 0,
        Entity = 1,
    }
}

wire_enum! {
    pub enum EarthReferenceModel {
        #[default]
        Wgs84 = 0,
        HostDefined = 1,
    }
}

wire_enum! {
    pub enum SymbolSurfaceState {
        #[default]
        Active = 0,
        Destroyed = 1,
    }
}

wire_enum! {
    pub enum SymbolAttachType {
        #[default]
        Entity = 0,
        View = 1,
    }
}

wire_enum! {
    pub enum SymbolDrawingStyle {
        #[default]
        Line = 0,
        Fill = 1,
    }
}

wire_enum! {
    pub enum SymbolPrimitive {
        #[default]
        Points = 0,
        Lines = 1,
        LineStrip = 2,
        LineLoop = 3,
        Triangles = 4,
        TriangleStrip = 5,
        TriangleFan = 6,
    }
}

wire_enum! {
    pub enum SymbolTextAlignment {
        #[default]
        TopLeft = 0,
        TopCenter = 1,
        TopRight = 2,
        CenterLeft = 3,
        Center = 4,
        CenterRight = 5,
        BottomLeft = 6,
        BottomCenter = 7,
        BottomRight = 8,
    }
}

wire_enum! {
    pub enum SymbolTextOrientation {
        #[default]
        LeftToRight = 0,
        TopToBottom = 1,
        RightToLeft = 2,
        BottomToTop = 3,
    }
}

wire_enum! {
    pub enum SymbolCloneSource {
        #[default]
        Symbol = 0,
        SymbolTemplate = 1,
    }
}

wire_enum! {
    pub enum SymbolState {
        #[default]
        Hidden = 0,
        Visible = 1,
        Destroyed = 2,
    }
}

wire_enum! {
    /// Attribute slot selector of Short Symbol Control.
    pub enum SymbolAttribute {
        #[default]
        None = 0,
        SurfaceId = 1,
        ParentSymbolId = 2,
        Layer = 3,
        FlashDutyCycle = 4,
        FlashPeriod = 5,
        PositionU = 6,
        PositionV = 7,
        Rotation = 8,
        Color = 9,
        ScaleU = 10,
        ScaleV = 11,
    }
}

wire_enum! {
    pub enum FlashControl {
        #[default]
        ContinueCycle = 0,
        ResetCycle = 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_contiguous<E: WireEnum + PartialEq + std::fmt::Debug>() {
        for (ordinal, value) in E::ALL.iter().enumerate() {
            assert_eq!(usize::from(value.raw()), ordinal, "{}", E::NAME);
            assert_eq!(E::from_raw(value.raw()), Some(*value), "{}", E::NAME);
        }
        let past_end = u8::try_from(E::ALL.len()).unwrap();
        assert_eq!(E::from_raw(past_end), None, "{}", E::NAME);
    }

    #[test]
    fn enums_are_contiguous() {
        assert_contiguous::<IgModeLegacy>();
        assert_contiguous::<IgMode>();
        assert_contiguous::<EntityState>();
        assert_contiguous::<EffectAnimationState>();
        assert_contiguous::<AnimationState>();
        assert_contiguous::<GroundClamp>();
        assert_contiguous::<ComponentClassV1>();
        assert_contiguous::<ComponentClassV2>();
        assert_contiguous::<ComponentClassV3>();
        assert_contiguous::<DofSelect>();
        assert_contiguous::<WeatherScope>();
        assert_contiguous::<CloudType>();
        assert_contiguous::<WeatherPhenomenon>();
        assert_contiguous::<WeatherLayer>();
        assert_contiguous::<TrackModeLegacy>();
        assert_contiguous::<TrackMode>();
        assert_contiguous::<SensorStatusV1>();
        assert_contiguous::<SensorStatus>();
        assert_contiguous::<HatHotRequestType>();
        assert_contiguous::<ObjectClass>();
        assert_contiguous::<SymbolPrimitive>();
        assert_contiguous::<SymbolTextAlignment>();
        assert_contiguous::<SymbolState>();
        assert_contiguous::<SymbolAttribute>();
    }

    #[test]
    fn defaults() {
        assert_eq!(IgMode::default(), IgMode::Reset);
        assert_eq!(VolumeType::default(), VolumeType::Cuboid);
        assert_eq!(ComponentClassV3::default(), ComponentClassV3::Entity);
    }

    #[test]
    fn symbol_classes() {
        assert!(ComponentClassV3::Symbol.is_symbol_class());
        assert!(ComponentClassV3::SymbolSurface.is_symbol_class());
        assert!(!ComponentClassV3::System.is_symbol_class());
    }
}
