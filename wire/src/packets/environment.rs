//! Environment packets: time of day, atmosphere, weather, sea and terrain
//! surface conditions, plus the environmental condition queries.

use bytecodec::{BitField, Flags8};

use super::GeodeticPoint;
use crate::body::{PacketBody, PacketReader, PacketWriter};
use crate::enums::{BreakerType, CloudType, RegionState, WeatherPhenomenon, WeatherScope, WireEnum};
use crate::error::PacketResult;
use crate::header::PacketSize;
use crate::ids::{v1, v2, v3};

const ENABLED: BitField = BitField::flag(0);

/// Celestial Sphere Control (CIGI 3).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CelestialSphereControl {
    pub hour: u8,
    pub minute: u8,
    pub ephemeris_enabled: bool,
    pub sun_enabled: bool,
    pub moon_enabled: bool,
    pub star_field_enabled: bool,
    pub date_time_valid: bool,
    /// Date as MMDDYYYY.
    pub date: u32,
    pub star_field_intensity: f32,
}

impl PacketBody for CelestialSphereControl {
    const SIZE: PacketSize = PacketSize::Fixed(16);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u8(self.hour)?;
        writer.u8(self.minute)?;
        let mut flags = Flags8::new();
        for (bit, value) in (0u8..).zip([
            self.ephemeris_enabled,
            self.sun_enabled,
            self.moon_enabled,
            self.star_field_enabled,
            self.date_time_valid,
        ]) {
            flags.set_bool(BitField::flag(bit), value);
        }
        writer.flags(flags)?;
        writer.reserved(3)?;
        writer.u32(self.date)?;
        writer.f32(self.star_field_intensity)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let hour = reader.u8()?;
        let minute = reader.u8()?;
        let flags = reader.flags()?;
        reader.skip(3)?;
        Ok(Self {
            hour,
            minute,
            ephemeris_enabled: flags.get_bool(BitField::flag(0)),
            sun_enabled: flags.get_bool(BitField::flag(1)),
            moon_enabled: flags.get_bool(BitField::flag(2)),
            star_field_enabled: flags.get_bool(BitField::flag(3)),
            date_time_valid: flags.get_bool(BitField::flag(4)),
            date: reader.u32()?,
            star_field_intensity: reader.f32()?,
        })
    }
}

single_packet!(CelestialSphereControl => v3::CELESTIAL_SPHERE_CONTROL, V3);

/// Atmosphere Control (CIGI 3): global atmospheric properties.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtmosphereControl {
    pub atmospheric_model_enabled: bool,
    /// Percent.
    pub humidity: u8,
    pub air_temperature: f32,
    pub visibility_range: f32,
    pub horizontal_wind_speed: f32,
    pub vertical_wind_speed: f32,
    pub wind_direction: f32,
    pub barometric_pressure: f32,
}

impl PacketBody for AtmosphereControl {
    const SIZE: PacketSize = PacketSize::Fixed(32);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.flags(Flags8::new().with_bool(ENABLED, self.atmospheric_model_enabled))?;
        writer.u8(self.humidity)?;
        for value in [
            self.air_temperature,
            self.visibility_range,
            self.horizontal_wind_speed,
            self.vertical_wind_speed,
            self.wind_direction,
            self.barometric_pressure,
        ] {
            writer.f32(value)?;
        }
        writer.reserved(4)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let flags = reader.flags()?;
        let packet = Self {
            atmospheric_model_enabled: flags.get_bool(ENABLED),
            humidity: reader.u8()?,
            air_temperature: reader.f32()?,
            visibility_range: reader.f32()?,
            horizontal_wind_speed: reader.f32()?,
            vertical_wind_speed: reader.f32()?,
            wind_direction: reader.f32()?,
            barometric_pressure: reader.f32()?,
        };
        reader.skip(4)?;
        Ok(packet)
    }
}

single_packet!(AtmosphereControl => v3::ATMOSPHERE_CONTROL, V3);

/// Environment Control of CIGI 1 and 2: time of day and atmosphere in one
/// packet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyEnvironmentControl {
    pub hour: u8,
    pub minute: u8,
    pub ephemeris_enabled: bool,
    pub humidity: u8,
    pub date: u32,
    pub air_temperature: f32,
    pub visibility_range: f32,
    pub wind_speed: f32,
    pub wind_direction: f32,
    pub barometric_pressure: f32,
    pub aerosol_concentration: f32,
}

impl PacketBody for LegacyEnvironmentControl {
    const SIZE: PacketSize = PacketSize::Fixed(36);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u8(self.hour)?;
        writer.u8(self.minute)?;
        writer.flags(Flags8::new().with_bool(ENABLED, self.ephemeris_enabled))?;
        writer.u8(self.humidity)?;
        writer.reserved(2)?;
        writer.u32(self.date)?;
        for value in [
            self.air_temperature,
            self.visibility_range,
            self.wind_speed,
            self.wind_direction,
            self.barometric_pressure,
            self.aerosol_concentration,
        ] {
            writer.f32(value)?;
        }
        Ok(())
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let hour = reader.u8()?;
        let minute = reader.u8()?;
        let flags = reader.flags()?;
        let humidity = reader.u8()?;
        reader.skip(2)?;
        Ok(Self {
            hour,
            minute,
            ephemeris_enabled: flags.get_bool(ENABLED),
            humidity,
            date: reader.u32()?,
            air_temperature: reader.f32()?,
            visibility_range: reader.f32()?,
            wind_speed: reader.f32()?,
            wind_direction: reader.f32()?,
            barometric_pressure: reader.f32()?,
            aerosol_concentration: reader.f32()?,
        })
    }
}

packet_family! {
    EnvironmentControl {
        V1(LegacyEnvironmentControl) => v1::ENVIRONMENT_CONTROL, V1;
        V2(LegacyEnvironmentControl) => v2::ENVIRONMENT_CONTROL, V2;
    }
}

/// Environmental Region Control (CIGI 3): a rounded rectangle to which
/// regional weather and surface conditions apply.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvironmentalRegionControl {
    pub region_id: u16,
    pub region_state: RegionState,
    pub merge_weather: bool,
    pub merge_aerosol: bool,
    pub merge_maritime: bool,
    pub merge_terrestrial: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub size_x: f32,
    pub size_y: f32,
    pub corner_radius: f32,
    pub rotation: f32,
    pub transition_perimeter: f32,
}

impl EnvironmentalRegionControl {
    const STATE: BitField = BitField::new(0, 2);
    const MERGE_WEATHER: BitField = BitField::flag(2);
    const MERGE_AEROSOL: BitField = BitField::flag(3);
    const MERGE_MARITIME: BitField = BitField::flag(4);
    const MERGE_TERRESTRIAL: BitField = BitField::flag(5);
}

impl PacketBody for EnvironmentalRegionControl {
    const SIZE: PacketSize = PacketSize::Fixed(48);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.region_id)?;
        let flags = Flags8::new()
            .with(Self::STATE, self.region_state.raw())?
            .with_bool(Self::MERGE_WEATHER, self.merge_weather)
            .with_bool(Self::MERGE_AEROSOL, self.merge_aerosol)
            .with_bool(Self::MERGE_MARITIME, self.merge_maritime)
            .with_bool(Self::MERGE_TERRESTRIAL, self.merge_terrestrial);
        writer.flags(flags)?;
        writer.reserved(3)?;
        writer.f64(self.latitude)?;
        writer.f64(self.longitude)?;
        for value in [
            self.size_x,
            self.size_y,
            self.corner_radius,
            self.rotation,
            self.transition_perimeter,
        ] {
            writer.f32(value)?;
        }
        writer.reserved(4)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let region_id = reader.u16()?;
        let flags = reader.flags()?;
        reader.skip(3)?;
        let packet = Self {
            region_id,
            region_state: reader.enum_bits(flags, Self::STATE, "region_state")?,
            merge_weather: flags.get_bool(Self::MERGE_WEATHER),
            merge_aerosol: flags.get_bool(Self::MERGE_AEROSOL),
            merge_maritime: flags.get_bool(Self::MERGE_MARITIME),
            merge_terrestrial: flags.get_bool(Self::MERGE_TERRESTRIAL),
            latitude: reader.f64()?,
            longitude: reader.f64()?,
            size_x: reader.f32()?,
            size_y: reader.f32()?,
            corner_radius: reader.f32()?,
            rotation: reader.f32()?,
            transition_perimeter: reader.f32()?,
        };
        reader.skip(4)?;
        Ok(packet)
    }
}

single_packet!(EnvironmentalRegionControl => v3::ENVIRONMENTAL_REGION_CONTROL, V3);

const SCUD_ENABLED: BitField = BitField::flag(1);
const RANDOM_WINDS: BitField = BitField::flag(2);

/// Weather Control of CIGI 1 and 2.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyWeatherControl {
    /// Entity the weather follows; 0 for global weather.
    pub entity_id: u16,
    pub weather_enabled: bool,
    pub scud_enabled: bool,
    pub random_winds: bool,
    /// 0 (least) to 5 (most severe).
    pub severity: u8,
    pub phenomenon: WeatherPhenomenon,
    pub air_temperature: f32,
    pub visibility_range: f32,
    pub scud_frequency: f32,
    pub coverage: f32,
    pub base_elevation: f32,
    pub thickness: f32,
    pub transition_band: f32,
    pub wind_speed: f32,
    pub wind_direction: f32,
}

impl LegacyWeatherControl {
    const SEVERITY: BitField = BitField::new(3, 3);
}

impl PacketBody for LegacyWeatherControl {
    const SIZE: PacketSize = PacketSize::Fixed(44);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.entity_id)?;
        let flags = Flags8::new()
            .with_bool(ENABLED, self.weather_enabled)
            .with_bool(SCUD_ENABLED, self.scud_enabled)
            .with_bool(RANDOM_WINDS, self.random_winds)
            .with(Self::SEVERITY, self.severity)?;
        writer.flags(flags)?;
        writer.enum_u8(self.phenomenon)?;
        writer.reserved(2)?;
        for value in [
            self.air_temperature,
            self.visibility_range,
            self.scud_frequency,
            self.coverage,
            self.base_elevation,
            self.thickness,
            self.transition_band,
            self.wind_speed,
            self.wind_direction,
        ] {
            writer.f32(value)?;
        }
        Ok(())
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let entity_id = reader.u16()?;
        let flags = reader.flags()?;
        let phenomenon = reader.enum_u8("phenomenon")?;
        reader.skip(2)?;
        Ok(Self {
            entity_id,
            weather_enabled: flags.get_bool(ENABLED),
            scud_enabled: flags.get_bool(SCUD_ENABLED),
            random_winds: flags.get_bool(RANDOM_WINDS),
            severity: flags.get(Self::SEVERITY),
            phenomenon,
            air_temperature: reader.f32()?,
            visibility_range: reader.f32()?,
            scud_frequency: reader.f32()?,
            coverage: reader.f32()?,
            base_elevation: reader.f32()?,
            thickness: reader.f32()?,
            transition_band: reader.f32()?,
            wind_speed: reader.f32()?,
            wind_direction: reader.f32()?,
        })
    }
}

/// Weather Control of CIGI 3.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherControlV3 {
    /// Entity or region id; ignored for global weather.
    pub entity_region_id: u16,
    /// Predefined ids are listed by [`WeatherLayer`](crate::WeatherLayer).
    pub layer_id: u8,
    pub humidity: u8,
    pub weather_enabled: bool,
    pub scud_enabled: bool,
    pub random_winds: bool,
    pub random_lightning: bool,
    pub cloud_type: CloudType,
    pub scope: WeatherScope,
    pub severity: u8,
    pub air_temperature: f32,
    pub visibility_range: f32,
    pub scud_frequency: f32,
    pub coverage: f32,
    pub base_elevation: f32,
    pub thickness: f32,
    pub transition_band: f32,
    pub horizontal_wind_speed: f32,
    pub vertical_wind_speed: f32,
    pub wind_direction: f32,
    pub barometric_pressure: f32,
    pub aerosol_concentration: f32,
}

impl WeatherControlV3 {
    const RANDOM_LIGHTNING: BitField = BitField::flag(3);
    const CLOUD_TYPE: BitField = BitField::new(4, 4);
    const SCOPE: BitField = BitField::new(0, 2);
    const SEVERITY: BitField = BitField::new(2, 3);
}

impl PacketBody for WeatherControlV3 {
    const SIZE: PacketSize = PacketSize::Fixed(56);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.entity_region_id)?;
        writer.u8(self.layer_id)?;
        writer.u8(self.humidity)?;
        let toggles = Flags8::new()
            .with_bool(ENABLED, self.weather_enabled)
            .with_bool(SCUD_ENABLED, self.scud_enabled)
            .with_bool(RANDOM_WINDS, self.random_winds)
            .with_bool(Self::RANDOM_LIGHTNING, self.random_lightning)
            .with(Self::CLOUD_TYPE, self.cloud_type.raw())?;
        let scope = Flags8::new()
            .with(Self::SCOPE, self.scope.raw())?
            .with(Self::SEVERITY, self.severity)?;
        writer.flags(toggles)?;
        writer.flags(scope)?;
        for value in [
            self.air_temperature,
            self.visibility_range,
            self.scud_frequency,
            self.coverage,
            self.base_elevation,
            self.thickness,
            self.transition_band,
            self.horizontal_wind_speed,
            self.vertical_wind_speed,
            self.wind_direction,
            self.barometric_pressure,
            self.aerosol_concentration,
        ] {
            writer.f32(value)?;
        }
        Ok(())
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let entity_region_id = reader.u16()?;
        let layer_id = reader.u8()?;
        let humidity = reader.u8()?;
        let toggles = reader.flags()?;
        let scope = reader.flags()?;
        Ok(Self {
            entity_region_id,
            layer_id,
            humidity,
            weather_enabled: toggles.get_bool(ENABLED),
            scud_enabled: toggles.get_bool(SCUD_ENABLED),
            random_winds: toggles.get_bool(RANDOM_WINDS),
            random_lightning: toggles.get_bool(Self::RANDOM_LIGHTNING),
            cloud_type: reader.enum_bits(toggles, Self::CLOUD_TYPE, "cloud_type")?,
            scope: reader.enum_bits(scope, Self::SCOPE, "scope")?,
            severity: scope.get(Self::SEVERITY),
            air_temperature: reader.f32()?,
            visibility_range: reader.f32()?,
            scud_frequency: reader.f32()?,
            coverage: reader.f32()?,
            base_elevation: reader.f32()?,
            thickness: reader.f32()?,
            transition_band: reader.f32()?,
            horizontal_wind_speed: reader.f32()?,
            vertical_wind_speed: reader.f32()?,
            wind_direction: reader.f32()?,
            barometric_pressure: reader.f32()?,
            aerosol_concentration: reader.f32()?,
        })
    }
}

packet_family! {
    /// Weather Control: one weather layer, globally, regionally or around an
    /// entity.
    WeatherControl {
        V1(LegacyWeatherControl) => v1::WEATHER_CONTROL, V1;
        V2(LegacyWeatherControl) => v2::WEATHER_CONTROL, V2;
        V3(WeatherControlV3) => v3::WEATHER_CONTROL, V3;
    }
}

/// Maritime Surface Conditions Control (CIGI 3).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaritimeSurfaceConditionsControl {
    pub entity_region_id: u16,
    pub surface_conditions_enabled: bool,
    pub whitecap_enabled: bool,
    pub scope: WeatherScope,
    pub sea_surface_height: f32,
    pub surface_water_temperature: f32,
    pub surface_clarity: f32,
}

impl MaritimeSurfaceConditionsControl {
    const WHITECAP: BitField = BitField::flag(1);
    const SCOPE: BitField = BitField::new(2, 2);
}

impl PacketBody for MaritimeSurfaceConditionsControl {
    const SIZE: PacketSize = PacketSize::Fixed(24);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.entity_region_id)?;
        let flags = Flags8::new()
            .with_bool(ENABLED, self.surface_conditions_enabled)
            .with_bool(Self::WHITECAP, self.whitecap_enabled)
            .with(Self::SCOPE, self.scope.raw())?;
        writer.flags(flags)?;
        writer.reserved(3)?;
        writer.f32(self.sea_surface_height)?;
        writer.f32(self.surface_water_temperature)?;
        writer.f32(self.surface_clarity)?;
        writer.reserved(4)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let entity_region_id = reader.u16()?;
        let flags = reader.flags()?;
        reader.skip(3)?;
        let packet = Self {
            entity_region_id,
            surface_conditions_enabled: flags.get_bool(ENABLED),
            whitecap_enabled: flags.get_bool(Self::WHITECAP),
            scope: reader.enum_bits(flags, Self::SCOPE, "scope")?,
            sea_surface_height: reader.f32()?,
            surface_water_temperature: reader.f32()?,
            surface_clarity: reader.f32()?,
        };
        reader.skip(4)?;
        Ok(packet)
    }
}

single_packet!(MaritimeSurfaceConditionsControl => v3::MARITIME_SURFACE_CONDITIONS_CONTROL, V3);

/// Wave Control (CIGI 3).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveControl {
    pub entity_region_id: u16,
    pub wave_id: u8,
    pub wave_enabled: bool,
    pub scope: WeatherScope,
    pub breaker_type: BreakerType,
    pub height: f32,
    pub wavelength: f32,
    pub period: f32,
    pub direction: f32,
    pub phase_offset: f32,
    pub leading: f32,
}

impl WaveControl {
    const SCOPE: BitField = BitField::new(1, 2);
    const BREAKER: BitField = BitField::new(3, 2);
}

impl PacketBody for WaveControl {
    const SIZE: PacketSize = PacketSize::Fixed(32);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.entity_region_id)?;
        writer.u8(self.wave_id)?;
        let flags = Flags8::new()
            .with_bool(ENABLED, self.wave_enabled)
            .with(Self::SCOPE, self.scope.raw())?
            .with(Self::BREAKER, self.breaker_type.raw())?;
        writer.flags(flags)?;
        writer.reserved(2)?;
        for value in [
            self.height,
            self.wavelength,
            self.period,
            self.direction,
            self.phase_offset,
            self.leading,
        ] {
            writer.f32(value)?;
        }
        Ok(())
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let entity_region_id = reader.u16()?;
        let wave_id = reader.u8()?;
        let flags = reader.flags()?;
        reader.skip(2)?;
        Ok(Self {
            entity_region_id,
            wave_id,
            wave_enabled: flags.get_bool(ENABLED),
            scope: reader.enum_bits(flags, Self::SCOPE, "scope")?,
            breaker_type: reader.enum_bits(flags, Self::BREAKER, "breaker_type")?,
            height: reader.f32()?,
            wavelength: reader.f32()?,
            period: reader.f32()?,
            direction: reader.f32()?,
            phase_offset: reader.f32()?,
            leading: reader.f32()?,
        })
    }
}

single_packet!(WaveControl => v3::WAVE_CONTROL, V3);

/// Terrestrial Surface Conditions Control (CIGI 3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrestrialSurfaceConditionsControl {
    pub entity_region_id: u16,
    pub surface_condition_id: u16,
    pub surface_condition_enabled: bool,
    pub scope: WeatherScope,
    /// 0 to 31.
    pub severity: u8,
    /// Percent.
    pub coverage: u8,
}

impl TerrestrialSurfaceConditionsControl {
    const SCOPE: BitField = BitField::new(1, 2);
    const SEVERITY: BitField = BitField::new(3, 5);
}

impl PacketBody for TerrestrialSurfaceConditionsControl {
    const SIZE: PacketSize = PacketSize::Fixed(8);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.entity_region_id)?;
        writer.u16(self.surface_condition_id)?;
        let flags = Flags8::new()
            .with_bool(ENABLED, self.surface_condition_enabled)
            .with(Self::SCOPE, self.scope.raw())?
            .with(Self::SEVERITY, self.severity)?;
        writer.flags(flags)?;
        writer.u8(self.coverage)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let entity_region_id = reader.u16()?;
        let surface_condition_id = reader.u16()?;
        let flags = reader.flags()?;
        Ok(Self {
            entity_region_id,
            surface_condition_id,
            surface_condition_enabled: flags.get_bool(ENABLED),
            scope: reader.enum_bits(flags, Self::SCOPE, "scope")?,
            severity: flags.get(Self::SEVERITY),
            coverage: reader.u8()?,
        })
    }
}

single_packet!(
    TerrestrialSurfaceConditionsControl => v3::TERRESTRIAL_SURFACE_CONDITIONS_CONTROL,
    V3
);

/// Earth Reference Model Definition (CIGI 3).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EarthReferenceModelDefinition {
    pub custom_erm_enabled: bool,
    /// Meters.
    pub equatorial_radius: f64,
    pub flattening: f64,
}

impl PacketBody for EarthReferenceModelDefinition {
    const SIZE: PacketSize = PacketSize::Fixed(24);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.flags(Flags8::new().with_bool(ENABLED, self.custom_erm_enabled))?;
        writer.reserved(5)?;
        writer.f64(self.equatorial_radius)?;
        writer.f64(self.flattening)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let flags = reader.flags()?;
        reader.skip(5)?;
        Ok(Self {
            custom_erm_enabled: flags.get_bool(ENABLED),
            equatorial_radius: reader.f64()?,
            flattening: reader.f64()?,
        })
    }
}

single_packet!(EarthReferenceModelDefinition => v3::EARTH_REFERENCE_MODEL_DEFINITION, V3);

/// Environmental Conditions Request (CIGI 3).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvironmentalConditionsRequest {
    pub maritime_surface: bool,
    pub terrestrial_surface: bool,
    pub weather: bool,
    pub aerosol: bool,
    pub request_id: u8,
    pub position: GeodeticPoint,
}

impl PacketBody for EnvironmentalConditionsRequest {
    const SIZE: PacketSize = PacketSize::Fixed(32);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        let mut flags = Flags8::new();
        for (bit, value) in (0u8..).zip([
            self.maritime_surface,
            self.terrestrial_surface,
            self.weather,
            self.aerosol,
        ]) {
            flags.set_bool(BitField::flag(bit), value);
        }
        writer.flags(flags)?;
        writer.u8(self.request_id)?;
        writer.reserved(4)?;
        self.position.write(writer)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let flags = reader.flags()?;
        let request_id = reader.u8()?;
        reader.skip(4)?;
        Ok(Self {
            maritime_surface: flags.get_bool(BitField::flag(0)),
            terrestrial_surface: flags.get_bool(BitField::flag(1)),
            weather: flags.get_bool(BitField::flag(2)),
            aerosol: flags.get_bool(BitField::flag(3)),
            request_id,
            position: GeodeticPoint::read(reader)?,
        })
    }
}

single_packet!(EnvironmentalConditionsRequest => v3::ENVIRONMENTAL_CONDITIONS_REQUEST, V3);

/// Weather Conditions Response (CIGI 3).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherConditionsResponse {
    pub request_id: u8,
    pub humidity: u8,
    pub air_temperature: f32,
    pub visibility_range: f32,
    pub horizontal_wind_speed: f32,
    pub vertical_wind_speed: f32,
    pub wind_direction: f32,
    pub barometric_pressure: f32,
}

impl PacketBody for WeatherConditionsResponse {
    const SIZE: PacketSize = PacketSize::Fixed(32);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u8(self.request_id)?;
        writer.u8(self.humidity)?;
        for value in [
            self.air_temperature,
            self.visibility_range,
            self.horizontal_wind_speed,
            self.vertical_wind_speed,
            self.wind_direction,
            self.barometric_pressure,
        ] {
            writer.f32(value)?;
        }
        writer.reserved(4)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let packet = Self {
            request_id: reader.u8()?,
            humidity: reader.u8()?,
            air_temperature: reader.f32()?,
            visibility_range: reader.f32()?,
            horizontal_wind_speed: reader.f32()?,
            vertical_wind_speed: reader.f32()?,
            wind_direction: reader.f32()?,
            barometric_pressure: reader.f32()?,
        };
        reader.skip(4)?;
        Ok(packet)
    }
}

single_packet!(WeatherConditionsResponse => v3::WEATHER_CONDITIONS_RESPONSE, V3);

/// Aerosol Concentration Response (CIGI 3).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AerosolConcentrationResponse {
    pub request_id: u8,
    pub layer_id: u8,
    /// Grams per cubic meter.
    pub aerosol_concentration: f32,
}

impl PacketBody for AerosolConcentrationResponse {
    const SIZE: PacketSize = PacketSize::Fixed(8);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u8(self.request_id)?;
        writer.u8(self.layer_id)?;
        writer.f32(self.aerosol_concentration)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        Ok(Self {
            request_id: reader.u8()?,
            layer_id: reader.u8()?,
            aerosol_concentration: reader.f32()?,
        })
    }
}

single_packet!(AerosolConcentrationResponse => v3::AEROSOL_CONCENTRATION_RESPONSE, V3);

/// Maritime Surface Conditions Response (CIGI 3).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaritimeSurfaceConditionsResponse {
    pub request_id: u8,
    pub sea_surface_height: f32,
    pub surface_water_temperature: f32,
    pub surface_clarity: f32,
}

impl PacketBody for MaritimeSurfaceConditionsResponse {
    const SIZE: PacketSize = PacketSize::Fixed(16);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u8(self.request_id)?;
        writer.reserved(1)?;
        writer.f32(self.sea_surface_height)?;
        writer.f32(self.surface_water_temperature)?;
        writer.f32(self.surface_clarity)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let request_id = reader.u8()?;
        reader.skip(1)?;
        Ok(Self {
            request_id,
            sea_surface_height: reader.f32()?,
            surface_water_temperature: reader.f32()?,
            surface_clarity: reader.f32()?,
        })
    }
}

single_packet!(MaritimeSurfaceConditionsResponse => v3::MARITIME_SURFACE_CONDITIONS_RESPONSE, V3);

/// Terrestrial Surface Conditions Response (CIGI 3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrestrialSurfaceConditionsResponse {
    pub request_id: u8,
    pub surface_condition_id: u32,
}

impl PacketBody for TerrestrialSurfaceConditionsResponse {
    const SIZE: PacketSize = PacketSize::Fixed(8);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u8(self.request_id)?;
        writer.reserved(1)?;
        writer.u32(self.surface_condition_id)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let request_id = reader.u8()?;
        reader.skip(1)?;
        Ok(Self {
            request_id,
            surface_condition_id: reader.u32()?,
        })
    }
}

single_packet!(
    TerrestrialSurfaceConditionsResponse => v3::TERRESTRIAL_SURFACE_CONDITIONS_RESPONSE,
    V3
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::decode_body;
    use crate::error::PacketError;
    use crate::packet::CigiMessage;

    #[test]
    fn weather_v3_flag_bytes() {
        let packet = WeatherControlV3 {
            entity_region_id: 3,
            layer_id: 1,
            humidity: 80,
            weather_enabled: true,
            random_lightning: true,
            cloud_type: CloudType::Cumulonimbus,
            scope: WeatherScope::Regional,
            severity: 4,
            aerosol_concentration: 0.5,
            ..WeatherControlV3::default()
        };
        let bytes = WeatherControl::V3(packet).to_bytes().unwrap();
        assert_eq!(bytes.len(), 56);
        assert_eq!(&bytes[..8], &[12, 56, 0, 3, 1, 80, 0b0110_1001, 0b1_0001]);
        assert_eq!(&bytes[52..], &0.5f32.to_be_bytes());
        let (decoded, _) = decode_body::<WeatherControlV3>(12, &bytes).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn legacy_weather_severity_out_of_range() {
        let packet = LegacyWeatherControl {
            severity: 8,
            ..LegacyWeatherControl::default()
        };
        assert_eq!(
            WeatherControl::V1(packet).to_bytes(),
            Err(PacketError::FieldOutOfRange { value: 8, bits: 3 })
        );
    }

    #[test]
    fn legacy_weather_phenomenon_is_validated() {
        let mut bytes = WeatherControl::V2(LegacyWeatherControl::default())
            .to_bytes()
            .unwrap();
        bytes[5] = 10;
        assert!(matches!(
            decode_body::<LegacyWeatherControl>(7, &bytes),
            Err(PacketError::InvalidField {
                field: "phenomenon",
                value: 10,
                ..
            })
        ));
    }

    #[test]
    fn terrestrial_packs_severity_in_high_bits() {
        let packet = TerrestrialSurfaceConditionsControl {
            entity_region_id: 1,
            surface_condition_id: 2,
            surface_condition_enabled: true,
            scope: WeatherScope::Entity,
            severity: 31,
            coverage: 50,
        };
        let bytes = packet.to_bytes().unwrap();
        assert_eq!(bytes, vec![15, 8, 0, 1, 0, 2, 0b1111_1101, 50]);
        let (decoded, used) =
            decode_body::<TerrestrialSurfaceConditionsControl>(15, &bytes).unwrap();
        assert_eq!(decoded, packet);
        assert_eq!(used, 8);
    }

    #[test]
    fn celestial_sphere_roundtrip() {
        let packet = CelestialSphereControl {
            hour: 13,
            minute: 45,
            sun_enabled: true,
            date_time_valid: true,
            date: 6_152_024,
            star_field_intensity: 25.0,
            ..CelestialSphereControl::default()
        };
        let bytes = packet.to_bytes().unwrap();
        assert_eq!(bytes[4], 0b1_0010);
        let (decoded, _) = decode_body::<CelestialSphereControl>(9, &bytes).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn responses_have_catalog_sizes() {
        assert_eq!(CigiMessage::encoded_len(&AerosolConcentrationResponse::default()), 8);
        assert_eq!(CigiMessage::encoded_len(&MaritimeSurfaceConditionsResponse::default()), 16);
        assert_eq!(CigiMessage::encoded_len(&WeatherConditionsResponse::default()), 32);
        assert_eq!(CigiMessage::encoded_len(&EnvironmentalConditionsRequest::default()), 32);
        assert_eq!(
            EnvironmentControl::V1(LegacyEnvironmentControl::default()).encoded_len(),
            36
        );
    }
}
