use convert::convert_packet;
use proptest::prelude::*;
use wire::{
    CigiMessage, CigiVersion, ComponentClassV1, ComponentClassV3, ComponentControl,
    LegacyComponentControl, LegacySensorControl, Packet, PacketError, SensorControl,
    SensorSettings, ShortComponentControl, TrackModeLegacy, WireEnum,
};

fn enumerator<E: WireEnum + std::fmt::Debug>() -> impl Strategy<Value = E> {
    proptest::sample::select(E::ALL)
}

fn version() -> impl Strategy<Value = CigiVersion> {
    proptest::sample::select(CigiVersion::ALL.to_vec())
}

fn v1_component() -> impl Strategy<Value = Packet> {
    (
        any::<u16>(),
        enumerator::<ComponentClassV1>(),
        any::<u8>(),
        any::<u16>(),
        any::<[u32; 3]>(),
    )
        .prop_map(|(instance_id, component_class, component_state, component_id, data)| {
            Packet::from(ComponentControl::V1(LegacyComponentControl {
                instance_id,
                component_class,
                component_state,
                component_id,
                data,
            }))
        })
}

fn v1_sensor() -> impl Strategy<Value = Packet> {
    (
        any::<u8>(),
        any::<u8>(),
        any::<bool>(),
        enumerator::<TrackModeLegacy>(),
        -100.0f32..100.0,
    )
        .prop_map(|(view_id, sensor_id, sensor_on, track_mode, gain)| {
            Packet::from(SensorControl::V1(LegacySensorControl {
                view_id,
                sensor_id,
                sensor_on,
                track_mode,
                settings: SensorSettings {
                    gain,
                    ..SensorSettings::default()
                },
                ..LegacySensorControl::default()
            }))
        })
}

fn short_component() -> impl Strategy<Value = Packet> {
    (any::<u16>(), enumerator::<ComponentClassV3>(), any::<[u32; 2]>()).prop_map(
        |(component_id, component_class, data)| {
            Packet::from(ShortComponentControl {
                component_id,
                component_class,
                data,
                ..ShortComponentControl::default()
            })
        },
    )
}

proptest! {
    #[test]
    fn prop_v1_packets_survive_a_trip_through_cigi_3(
        packet in prop_oneof![v1_component(), v1_sensor()],
        via in prop_oneof![Just(CigiVersion::V3), Just(CigiVersion::V3_2), Just(CigiVersion::V3_3)],
    ) {
        let there = convert_packet(&packet, via).unwrap();
        prop_assert_eq!(there.version().major(), 3);
        let back = convert_packet(&there, CigiVersion::V1).unwrap();
        prop_assert_eq!(back, packet);
    }

    #[test]
    fn prop_conversion_never_exceeds_target(packet in short_component(), target in version()) {
        match convert_packet(&packet, target) {
            Ok(converted) => {
                prop_assert!(converted.version() <= target);
                prop_assert_eq!(converted.version().major(), target.major());
            }
            Err(PacketError::NoConversionAvailable { target: refused, .. }) => {
                prop_assert_eq!(refused, target);
            }
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }

    #[test]
    fn prop_conversion_is_deterministic(packet in short_component(), target in version()) {
        prop_assert_eq!(convert_packet(&packet, target), convert_packet(&packet, target));
    }
}
