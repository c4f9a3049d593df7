//! Environment, atmosphere and weather conversion.
//!
//! CIGI 3 split the legacy Environment Control into Celestial Sphere and
//! Atmosphere Control; the atmospheric half is the one carried across.
//! Time of day and date do not survive the trip into CIGI 3.

use wire::{
    AtmosphereControl, CigiVersion, ConversionTable, EnvironmentControl,
    LegacyEnvironmentControl, LegacyWeatherControl, Packet, PacketKind, PacketResult,
    WeatherControl, WeatherControlV3, WeatherLayer, WeatherScope, WireEnum,
};

use crate::packet::{no_field, Era};
use crate::tables::{no_enum_conversion, WEATHER_LEGACY_TO_V3, WEATHER_V3_TO_LEGACY};

fn atmosphere_from_legacy(env: &LegacyEnvironmentControl) -> AtmosphereControl {
    AtmosphereControl {
        atmospheric_model_enabled: false,
        humidity: env.humidity,
        air_temperature: env.air_temperature,
        visibility_range: env.visibility_range,
        horizontal_wind_speed: env.wind_speed,
        vertical_wind_speed: 0.0,
        wind_direction: env.wind_direction,
        barometric_pressure: env.barometric_pressure,
    }
}

fn legacy_from_atmosphere(atmosphere: &AtmosphereControl) -> LegacyEnvironmentControl {
    LegacyEnvironmentControl {
        hour: 0,
        minute: 0,
        ephemeris_enabled: false,
        humidity: atmosphere.humidity,
        date: 0,
        air_temperature: atmosphere.air_temperature,
        visibility_range: atmosphere.visibility_range,
        wind_speed: atmosphere.horizontal_wind_speed,
        wind_direction: atmosphere.wind_direction,
        barometric_pressure: atmosphere.barometric_pressure,
        aerosol_concentration: 0.0,
    }
}

pub(crate) fn environment_control(
    packet: &EnvironmentControl,
    target: CigiVersion,
) -> PacketResult<Packet> {
    let env = match packet {
        EnvironmentControl::V1(p) | EnvironmentControl::V2(p) => *p,
    };
    Ok(match Era::of(target) {
        Era::Cigi1 => Packet::from(EnvironmentControl::V1(env)),
        Era::Cigi2 => Packet::from(EnvironmentControl::V2(env)),
        Era::Cigi3 => Packet::from(atmosphere_from_legacy(&env)),
    })
}

pub(crate) fn atmosphere_control(
    packet: &AtmosphereControl,
    target: CigiVersion,
) -> PacketResult<Packet> {
    Ok(match Era::of(target) {
        Era::Cigi1 => Packet::from(EnvironmentControl::V1(legacy_from_atmosphere(packet))),
        Era::Cigi2 => Packet::from(EnvironmentControl::V2(legacy_from_atmosphere(packet))),
        Era::Cigi3 => Packet::from(*packet),
    })
}

fn weather_from_legacy(
    weather: &LegacyWeatherControl,
    target: CigiVersion,
) -> PacketResult<WeatherControlV3> {
    let layer = WEATHER_LEGACY_TO_V3.map(weather.phenomenon, target)?;
    let scope = if weather.entity_id == 0 {
        WeatherScope::Global
    } else {
        WeatherScope::Entity
    };
    Ok(WeatherControlV3 {
        entity_region_id: weather.entity_id,
        layer_id: layer.raw(),
        weather_enabled: weather.weather_enabled,
        scud_enabled: weather.scud_enabled,
        random_winds: weather.random_winds,
        scope,
        severity: weather.severity,
        air_temperature: weather.air_temperature,
        visibility_range: weather.visibility_range,
        scud_frequency: weather.scud_frequency,
        coverage: weather.coverage,
        base_elevation: weather.base_elevation,
        thickness: weather.thickness,
        transition_band: weather.transition_band,
        horizontal_wind_speed: weather.wind_speed,
        wind_direction: weather.wind_direction,
        ..WeatherControlV3::default()
    })
}

fn weather_to_legacy(
    weather: &WeatherControlV3,
    target: CigiVersion,
) -> PacketResult<LegacyWeatherControl> {
    let entity_id = match weather.scope {
        WeatherScope::Global => 0,
        WeatherScope::Entity => weather.entity_region_id,
        WeatherScope::Regional => {
            return Err(no_field(PacketKind::WeatherControl, "scope", target));
        }
    };
    // Layer ids from 10 up are IG defined.
    let layer = WeatherLayer::from_raw(weather.layer_id).ok_or_else(|| {
        no_enum_conversion(ConversionTable::WeatherLayer, weather.layer_id, target)
    })?;
    Ok(LegacyWeatherControl {
        entity_id,
        weather_enabled: weather.weather_enabled,
        scud_enabled: weather.scud_enabled,
        random_winds: weather.random_winds,
        severity: weather.severity,
        phenomenon: WEATHER_V3_TO_LEGACY.map(layer, target)?,
        air_temperature: weather.air_temperature,
        visibility_range: weather.visibility_range,
        scud_frequency: weather.scud_frequency,
        coverage: weather.coverage,
        base_elevation: weather.base_elevation,
        thickness: weather.thickness,
        transition_band: weather.transition_band,
        wind_speed: weather.horizontal_wind_speed,
        wind_direction: weather.wind_direction,
    })
}

pub(crate) fn weather_control(
    packet: &WeatherControl,
    target: CigiVersion,
) -> PacketResult<Packet> {
    let converted = match (packet, Era::of(target)) {
        (WeatherControl::V1(p) | WeatherControl::V2(p), Era::Cigi1) => WeatherControl::V1(*p),
        (WeatherControl::V1(p) | WeatherControl::V2(p), Era::Cigi2) => WeatherControl::V2(*p),
        (WeatherControl::V1(p) | WeatherControl::V2(p), Era::Cigi3) => {
            WeatherControl::V3(weather_from_legacy(p, target)?)
        }
        (WeatherControl::V3(p), Era::Cigi1) => WeatherControl::V1(weather_to_legacy(p, target)?),
        (WeatherControl::V3(p), Era::Cigi2) => WeatherControl::V2(weather_to_legacy(p, target)?),
        (WeatherControl::V3(p), Era::Cigi3) => WeatherControl::V3(*p),
    };
    Ok(Packet::from(converted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire::{ConversionSubject, PacketError, WeatherPhenomenon};

    fn legacy_environment() -> LegacyEnvironmentControl {
        LegacyEnvironmentControl {
            hour: 14,
            minute: 30,
            ephemeris_enabled: true,
            humidity: 40,
            date: 6_152_004,
            air_temperature: 21.5,
            visibility_range: 12_000.0,
            wind_speed: 5.0,
            wind_direction: 270.0,
            barometric_pressure: 1013.0,
            aerosol_concentration: 0.2,
        }
    }

    #[test]
    fn environment_becomes_atmosphere() {
        let packet = environment_control(
            &EnvironmentControl::V2(legacy_environment()),
            CigiVersion::V3,
        )
        .unwrap();
        let Packet::AtmosphereControl(atmosphere) = packet else {
            panic!("expected an Atmosphere Control");
        };
        assert_eq!(atmosphere.humidity, 40);
        assert!((atmosphere.horizontal_wind_speed - 5.0).abs() < f32::EPSILON);
        assert!(atmosphere.vertical_wind_speed.abs() < f32::EPSILON);
    }

    #[test]
    fn atmosphere_becomes_environment_without_time_of_day() {
        let atmosphere = AtmosphereControl {
            humidity: 80,
            horizontal_wind_speed: 3.0,
            vertical_wind_speed: 1.0,
            ..AtmosphereControl::default()
        };
        let packet = atmosphere_control(&atmosphere, CigiVersion::V1).unwrap();
        let Packet::EnvironmentControl(EnvironmentControl::V1(env)) = packet else {
            panic!("expected a CIGI 1 Environment Control");
        };
        assert_eq!((env.hour, env.minute, env.date), (0, 0, 0));
        assert!(!env.ephemeris_enabled);
        assert_eq!(env.humidity, 80);
        assert!((env.wind_speed - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn legacy_environment_moves_between_legacy_versions() {
        let packet =
            environment_control(&EnvironmentControl::V1(legacy_environment()), CigiVersion::V2)
                .unwrap();
        assert_eq!(packet, Packet::from(EnvironmentControl::V2(legacy_environment())));
    }

    #[test]
    fn weather_follows_entity_scope() {
        let legacy = WeatherControl::V2(LegacyWeatherControl {
            entity_id: 12,
            phenomenon: WeatherPhenomenon::Rain,
            severity: 3,
            ..LegacyWeatherControl::default()
        });
        let Packet::WeatherControl(WeatherControl::V3(weather)) =
            weather_control(&legacy, CigiVersion::V3_3).unwrap()
        else {
            panic!("expected a CIGI 3 Weather Control");
        };
        assert_eq!(weather.scope, WeatherScope::Entity);
        assert_eq!(weather.entity_region_id, 12);
        assert_eq!(weather.layer_id, WeatherLayer::Rain.raw());

        let back = weather_control(&WeatherControl::V3(weather), CigiVersion::V2).unwrap();
        assert_eq!(back, Packet::from(legacy));
    }

    #[test]
    fn default_phenomenon_has_no_layer() {
        let legacy = WeatherControl::V1(LegacyWeatherControl::default());
        assert_eq!(
            weather_control(&legacy, CigiVersion::V3),
            Err(PacketError::NoConversionAvailable {
                subject: ConversionSubject::Enum {
                    table: ConversionTable::WeatherLayer,
                    value: WeatherPhenomenon::Default.raw(),
                },
                target: CigiVersion::V3,
            })
        );
    }

    #[test]
    fn regional_and_custom_layers_stay_in_cigi_3() {
        let regional = WeatherControl::V3(WeatherControlV3 {
            scope: WeatherScope::Regional,
            layer_id: WeatherLayer::Snow.raw(),
            ..WeatherControlV3::default()
        });
        assert_eq!(
            weather_control(&regional, CigiVersion::V1),
            Err(no_field(PacketKind::WeatherControl, "scope", CigiVersion::V1))
        );

        let custom = WeatherControl::V3(WeatherControlV3 {
            layer_id: 20,
            ..WeatherControlV3::default()
        });
        assert!(weather_control(&custom, CigiVersion::V2).is_err());
        assert!(weather_control(&custom, CigiVersion::V3_2).is_ok());

        let fog = WeatherControl::V3(WeatherControlV3::default());
        assert!(weather_control(&fog, CigiVersion::V2).is_err());
    }
}
