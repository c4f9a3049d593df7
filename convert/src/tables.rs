//! Static enumeration conversion tables.
//!
//! Each table maps one enumeration of one CIGI generation onto another. A
//! table holds exactly one entry per source enumerator, indexed by the
//! enumerator's wire value; a source value without a counterpart is an
//! explicit [`Mapping::NoConversion`].

use std::marker::PhantomData;

use wire::{
    AnimationState, CigiVersion, ComponentClassV1, ComponentClassV2, ComponentClassV3,
    ConversionSubject, ConversionTable, EffectAnimationState, HatHotRequestType, IgMode,
    IgModeLegacy, LegacyTerrainQuery, PacketError, PacketResult, SensorStatus, SensorStatusV1,
    TrackMode, TrackModeLegacy, WeatherLayer, WeatherPhenomenon, WireEnum,
};

use Mapping::{NoConversion, To};

/// One table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapping<T> {
    To(T),
    NoConversion,
}

impl<T: Copy> Mapping<T> {
    #[must_use]
    pub fn target(self) -> Option<T> {
        match self {
            Self::To(value) => Some(value),
            Self::NoConversion => None,
        }
    }
}

/// Ordinal-indexed conversion table from `S` to `T`.
pub struct Table<S, T: 'static> {
    kind: ConversionTable,
    entries: &'static [Mapping<T>],
    source: PhantomData<fn(S)>,
}

impl<S, T: 'static> Table<S, T> {
    const fn new(kind: ConversionTable, entries: &'static [Mapping<T>]) -> Self {
        Self {
            kind,
            entries,
            source: PhantomData,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ConversionTable {
        self.kind
    }

    /// Entries in source ordinal order.
    #[must_use]
    pub const fn entries(&self) -> &'static [Mapping<T>] {
        self.entries
    }
}

impl<S: WireEnum, T: WireEnum> Table<S, T> {
    /// Maps `value`, failing with [`PacketError::NoConversionAvailable`]
    /// when it has no counterpart for `target`.
    pub fn map(&self, value: S, target: CigiVersion) -> PacketResult<T> {
        self.entries
            .get(usize::from(value.raw()))
            .and_then(|entry| entry.target())
            .ok_or_else(|| no_enum_conversion(self.kind, value.raw(), target))
    }
}

impl<S, T> std::fmt::Debug for Table<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("kind", &self.kind)
            .field("len", &self.entries.len())
            .finish()
    }
}

/// Type-erased view of a table over raw wire values.
trait RawTable {
    fn map_raw(&self, raw: u8, target: CigiVersion) -> PacketResult<u8>;
}

impl<S: WireEnum, T: WireEnum> RawTable for Table<S, T> {
    fn map_raw(&self, raw: u8, target: CigiVersion) -> PacketResult<u8> {
        let value = S::from_raw(raw).ok_or_else(|| no_enum_conversion(self.kind, raw, target))?;
        self.map(value, target).map(WireEnum::raw)
    }
}

pub(crate) const fn no_enum_conversion(
    table: ConversionTable,
    value: u8,
    target: CigiVersion,
) -> PacketError {
    PacketError::NoConversionAvailable {
        subject: ConversionSubject::Enum { table, value },
        target,
    }
}

macro_rules! table {
    (
        $(#[$meta:meta])*
        $name:ident: $kind:ident, $source:ty => $target:ty, [$($entry:expr),+ $(,)?]
    ) => {
        $(#[$meta])*
        pub static $name: Table<$source, $target> =
            Table::new(ConversionTable::$kind, &[$($entry),+]);
    };
}

table!(COMPONENT_CLASS_V1_TO_V2: ComponentClass, ComponentClassV1 => ComponentClassV2, [
    To(ComponentClassV2::Entity),
    To(ComponentClassV2::Environment),
    To(ComponentClassV2::View),
]);

table!(COMPONENT_CLASS_V1_TO_V3: ComponentClass, ComponentClassV1 => ComponentClassV3, [
    To(ComponentClassV3::Entity),
    To(ComponentClassV3::Atmosphere),
    To(ComponentClassV3::View),
]);

table!(COMPONENT_CLASS_V2_TO_V1: ComponentClass, ComponentClassV2 => ComponentClassV1, [
    To(ComponentClassV1::Entity),
    To(ComponentClassV1::Environment),
    To(ComponentClassV1::View),
    NoConversion,
    NoConversion,
    NoConversion,
]);

table!(COMPONENT_CLASS_V2_TO_V3: ComponentClass, ComponentClassV2 => ComponentClassV3, [
    To(ComponentClassV3::Entity),
    To(ComponentClassV3::Atmosphere),
    To(ComponentClassV3::View),
    To(ComponentClassV3::ViewGroup),
    To(ComponentClassV3::Sensor),
    To(ComponentClassV3::System),
]);

table!(
    /// The global environment classes all collapse onto `Environment`.
    COMPONENT_CLASS_V3_TO_V1: ComponentClass, ComponentClassV3 => ComponentClassV1, [
    To(ComponentClassV1::Entity),
    To(ComponentClassV1::View),
    NoConversion,
    NoConversion,
    NoConversion,
    NoConversion,
    NoConversion,
    To(ComponentClassV1::Environment),
    To(ComponentClassV1::Environment),
    To(ComponentClassV1::Environment),
    To(ComponentClassV1::Environment),
    To(ComponentClassV1::Environment),
    NoConversion,
    NoConversion,
    NoConversion,
    NoConversion,
]);

table!(COMPONENT_CLASS_V3_TO_V2: ComponentClass, ComponentClassV3 => ComponentClassV2, [
    To(ComponentClassV2::Entity),
    To(ComponentClassV2::View),
    To(ComponentClassV2::ViewGroup),
    To(ComponentClassV2::Sensor),
    NoConversion,
    NoConversion,
    NoConversion,
    To(ComponentClassV2::Environment),
    To(ComponentClassV2::Environment),
    To(ComponentClassV2::Environment),
    To(ComponentClassV2::Environment),
    To(ComponentClassV2::Environment),
    NoConversion,
    To(ComponentClassV2::System),
    NoConversion,
    NoConversion,
]);

table!(
    /// 3.3 to 3.0/3.2: the symbol classes have no counterpart.
    COMPONENT_CLASS_V3_3_TO_V3_0: ComponentClass, ComponentClassV3 => ComponentClassV3, [
    To(ComponentClassV3::Entity),
    To(ComponentClassV3::View),
    To(ComponentClassV3::ViewGroup),
    To(ComponentClassV3::Sensor),
    To(ComponentClassV3::RegionalSeaSurface),
    To(ComponentClassV3::RegionalTerrainSurface),
    To(ComponentClassV3::RegionalLayeredWeather),
    To(ComponentClassV3::GlobalSeaSurface),
    To(ComponentClassV3::GlobalTerrainSurface),
    To(ComponentClassV3::GlobalLayeredWeather),
    To(ComponentClassV3::Atmosphere),
    To(ComponentClassV3::CelestialSphere),
    To(ComponentClassV3::Event),
    To(ComponentClassV3::System),
    NoConversion,
    NoConversion,
]);

table!(IG_MODE_LEGACY_TO_V3: IgMode, IgModeLegacy => IgMode, [
    To(IgMode::Reset),
    To(IgMode::Operate),
    To(IgMode::Debug),
]);

table!(IG_MODE_V3_TO_LEGACY: IgMode, IgMode => IgModeLegacy, [
    To(IgModeLegacy::Reset),
    To(IgModeLegacy::Operate),
    To(IgModeLegacy::Debug),
    NoConversion,
]);

table!(
    /// Legacy `Play` resumes, legacy `Restart` starts over.
    ANIMATION_LEGACY_TO_V3: AnimationState, EffectAnimationState => AnimationState, [
    To(AnimationState::Stop),
    To(AnimationState::Continue),
    To(AnimationState::Play),
]);

table!(ANIMATION_V3_TO_LEGACY: AnimationState, AnimationState => EffectAnimationState, [
    To(EffectAnimationState::Stop),
    NoConversion,
    To(EffectAnimationState::Restart),
    To(EffectAnimationState::Play),
]);

table!(SENSOR_STATUS_V1_TO_V2: SensorStatus, SensorStatusV1 => SensorStatus, [
    To(SensorStatus::Searching),
    To(SensorStatus::Tracking),
    To(SensorStatus::Breaklock),
]);

table!(
    /// A sensor about to lose lock is still tracking.
    SENSOR_STATUS_V2_TO_V1: SensorStatus, SensorStatus => SensorStatusV1, [
    To(SensorStatusV1::Searching),
    To(SensorStatusV1::Tracking),
    To(SensorStatusV1::Tracking),
    To(SensorStatusV1::Breaklock),
]);

table!(TRACK_MODE_LEGACY_TO_V3: TrackMode, TrackModeLegacy => TrackMode, [
    To(TrackMode::Off),
    To(TrackMode::ForceCorrelate),
    To(TrackMode::Scene),
    To(TrackMode::Target),
    To(TrackMode::Ship),
]);

table!(TRACK_MODE_V3_TO_LEGACY: TrackMode, TrackMode => TrackModeLegacy, [
    To(TrackModeLegacy::Off),
    To(TrackModeLegacy::ForceCorrelate),
    To(TrackModeLegacy::Scene),
    To(TrackModeLegacy::Target),
    To(TrackModeLegacy::Ship),
    NoConversion,
    NoConversion,
    NoConversion,
]);

table!(
    /// The legacy `Default` phenomenon names no particular layer.
    WEATHER_LEGACY_TO_V3: WeatherLayer, WeatherPhenomenon => WeatherLayer, [
    NoConversion,
    To(WeatherLayer::CloudLayer1),
    To(WeatherLayer::CloudLayer2),
    To(WeatherLayer::CloudLayer3),
    To(WeatherLayer::Rain),
    To(WeatherLayer::Snow),
    To(WeatherLayer::Sleet),
    To(WeatherLayer::Hail),
    To(WeatherLayer::Sand),
    To(WeatherLayer::Dust),
]);

table!(WEATHER_V3_TO_LEGACY: WeatherLayer, WeatherLayer => WeatherPhenomenon, [
    NoConversion,
    To(WeatherPhenomenon::CloudLayer1),
    To(WeatherPhenomenon::CloudLayer2),
    To(WeatherPhenomenon::CloudLayer3),
    To(WeatherPhenomenon::Rain),
    To(WeatherPhenomenon::Snow),
    To(WeatherPhenomenon::Sleet),
    To(WeatherPhenomenon::Hail),
    To(WeatherPhenomenon::Sand),
    To(WeatherPhenomenon::Dust),
]);

table!(
    /// CIGI 1 only knows height above terrain.
    TERRAIN_QUERY_V1_TO_V3: TerrainQuery, LegacyTerrainQuery => HatHotRequestType, [
    To(HatHotRequestType::HeightAboveTerrain),
    NoConversion,
]);

table!(TERRAIN_QUERY_V2_TO_V3: TerrainQuery, LegacyTerrainQuery => HatHotRequestType, [
    To(HatHotRequestType::HeightAboveTerrain),
    To(HatHotRequestType::HeightOfTerrain),
]);

table!(TERRAIN_QUERY_V3_TO_V1: TerrainQuery, HatHotRequestType => LegacyTerrainQuery, [
    To(LegacyTerrainQuery::HeightAboveTerrain),
    NoConversion,
    NoConversion,
]);

table!(TERRAIN_QUERY_V3_TO_V2: TerrainQuery, HatHotRequestType => LegacyTerrainQuery, [
    To(LegacyTerrainQuery::HeightAboveTerrain),
    To(LegacyTerrainQuery::HeightOfTerrain),
    NoConversion,
]);

/// Enumerator set a version uses for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Generation {
    Cigi1,
    Cigi2,
    /// Shared by CIGI 1 and 2.
    Legacy,
    Cigi3,
    Cigi3_3,
}

impl Generation {
    const fn of(table: ConversionTable, version: CigiVersion) -> Self {
        match (table, version) {
            (ConversionTable::ComponentClass, CigiVersion::V3_3) => Self::Cigi3_3,
            (
                ConversionTable::ComponentClass | ConversionTable::TerrainQuery,
                CigiVersion::V1,
            ) => Self::Cigi1,
            (
                ConversionTable::ComponentClass | ConversionTable::TerrainQuery,
                CigiVersion::V2,
            ) => Self::Cigi2,
            (ConversionTable::SensorStatus, CigiVersion::V1) => Self::Cigi1,
            (ConversionTable::SensorStatus, _) => Self::Cigi2,
            (_, CigiVersion::V1 | CigiVersion::V2) => Self::Legacy,
            (_, CigiVersion::V3 | CigiVersion::V3_2 | CigiVersion::V3_3) => Self::Cigi3,
        }
    }
}

/// Number of enumerators `table`'s enumeration has in `generation`.
fn enumerator_count(table: ConversionTable, generation: Generation) -> usize {
    use Generation::{Cigi1, Cigi2, Cigi3};
    match (table, generation) {
        (ConversionTable::ComponentClass, Cigi1) => ComponentClassV1::ALL.len(),
        (ConversionTable::ComponentClass, Cigi2) => ComponentClassV2::ALL.len(),
        (ConversionTable::ComponentClass, Cigi3) => ComponentClassV3::ALL
            .iter()
            .filter(|class| !class.is_symbol_class())
            .count(),
        (ConversionTable::ComponentClass, _) => ComponentClassV3::ALL.len(),
        (ConversionTable::IgMode, Cigi3) => IgMode::ALL.len(),
        (ConversionTable::IgMode, _) => IgModeLegacy::ALL.len(),
        (ConversionTable::AnimationState, Cigi3) => AnimationState::ALL.len(),
        (ConversionTable::AnimationState, _) => EffectAnimationState::ALL.len(),
        (ConversionTable::SensorStatus, Cigi1) => SensorStatusV1::ALL.len(),
        (ConversionTable::SensorStatus, _) => SensorStatus::ALL.len(),
        (ConversionTable::TrackMode, Cigi3) => TrackMode::ALL.len(),
        (ConversionTable::TrackMode, _) => TrackModeLegacy::ALL.len(),
        (ConversionTable::WeatherLayer, Cigi3) => WeatherLayer::ALL.len(),
        (ConversionTable::WeatherLayer, _) => WeatherPhenomenon::ALL.len(),
        // height above terrain only
        (ConversionTable::TerrainQuery, Cigi1) => 1,
        (ConversionTable::TerrainQuery, Cigi2) => LegacyTerrainQuery::ALL.len(),
        (ConversionTable::TerrainQuery, _) => HatHotRequestType::ALL.len(),
    }
}

enum Route {
    Identity,
    Table(&'static dyn RawTable),
}

fn route(table: ConversionTable, from: Generation, to: Generation) -> Option<Route> {
    use ConversionTable as T;
    use Generation::{Cigi1, Cigi2, Cigi3, Cigi3_3, Legacy};

    if from == to {
        return Some(Route::Identity);
    }
    let table: &'static dyn RawTable = match (table, from, to) {
        (T::ComponentClass, Cigi3, Cigi3_3) => return Some(Route::Identity),
        (T::ComponentClass, Cigi1, Cigi2) => &COMPONENT_CLASS_V1_TO_V2,
        (T::ComponentClass, Cigi1, Cigi3 | Cigi3_3) => &COMPONENT_CLASS_V1_TO_V3,
        (T::ComponentClass, Cigi2, Cigi1) => &COMPONENT_CLASS_V2_TO_V1,
        (T::ComponentClass, Cigi2, Cigi3 | Cigi3_3) => &COMPONENT_CLASS_V2_TO_V3,
        (T::ComponentClass, Cigi3 | Cigi3_3, Cigi1) => &COMPONENT_CLASS_V3_TO_V1,
        (T::ComponentClass, Cigi3 | Cigi3_3, Cigi2) => &COMPONENT_CLASS_V3_TO_V2,
        (T::ComponentClass, Cigi3_3, Cigi3) => &COMPONENT_CLASS_V3_3_TO_V3_0,
        (T::IgMode, Legacy, Cigi3) => &IG_MODE_LEGACY_TO_V3,
        (T::IgMode, Cigi3, Legacy) => &IG_MODE_V3_TO_LEGACY,
        (T::AnimationState, Legacy, Cigi3) => &ANIMATION_LEGACY_TO_V3,
        (T::AnimationState, Cigi3, Legacy) => &ANIMATION_V3_TO_LEGACY,
        (T::SensorStatus, Cigi1, Cigi2) => &SENSOR_STATUS_V1_TO_V2,
        (T::SensorStatus, Cigi2, Cigi1) => &SENSOR_STATUS_V2_TO_V1,
        (T::TrackMode, Legacy, Cigi3) => &TRACK_MODE_LEGACY_TO_V3,
        (T::TrackMode, Cigi3, Legacy) => &TRACK_MODE_V3_TO_LEGACY,
        (T::WeatherLayer, Legacy, Cigi3) => &WEATHER_LEGACY_TO_V3,
        (T::WeatherLayer, Cigi3, Legacy) => &WEATHER_V3_TO_LEGACY,
        (T::TerrainQuery, Cigi1, Cigi3) => &TERRAIN_QUERY_V1_TO_V3,
        (T::TerrainQuery, Cigi2, Cigi3) => &TERRAIN_QUERY_V2_TO_V3,
        (T::TerrainQuery, Cigi3, Cigi1) => &TERRAIN_QUERY_V3_TO_V1,
        (T::TerrainQuery, Cigi3, Cigi2) => &TERRAIN_QUERY_V3_TO_V2,
        (T::TerrainQuery, Cigi1, Cigi2) => return Some(Route::Identity),
        (T::TerrainQuery, Cigi2, Cigi1) => &TERRAIN_QUERY_V2_TO_V1,
        _ => return None,
    };
    Some(Route::Table(table))
}

table!(TERRAIN_QUERY_V2_TO_V1: TerrainQuery, LegacyTerrainQuery => LegacyTerrainQuery, [
    To(LegacyTerrainQuery::HeightAboveTerrain),
    NoConversion,
]);

/// Converts the raw enumerator `value` of `table` from `source`'s
/// enumeration to `target`'s.
///
/// Versions sharing an enumeration convert by identity, provided `value`
/// is one of its enumerators.
pub fn convert_enum(
    table: ConversionTable,
    source: CigiVersion,
    target: CigiVersion,
    value: u8,
) -> PacketResult<u8> {
    let from = Generation::of(table, source);
    let to = Generation::of(table, target);
    match route(table, from, to) {
        Some(Route::Identity) if usize::from(value) < enumerator_count(table, from) => Ok(value),
        Some(Route::Table(lookup)) => lookup.map_raw(value, target),
        _ => Err(no_enum_conversion(table, value, target)),
    }
}
