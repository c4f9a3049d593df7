use convert::{convert_all, convert_enum, convert_packet};
use wire::{
    catalog, scan, CigiMessage, CigiVersion, ComponentClassV1, ComponentClassV3, ComponentControl,
    ComponentControlV1, ComponentControlV3, ConversionSubject, ConversionTable, EntityControl,
    EntityControlV3, IgControl, IgControlV3_2, LegacyComponentControl, MessageBuilder, Packet,
    PacketError, PacketKind, ShortComponentControl, WireEnum,
};

const TABLES: [ConversionTable; 7] = [
    ConversionTable::ComponentClass,
    ConversionTable::IgMode,
    ConversionTable::AnimationState,
    ConversionTable::SensorStatus,
    ConversionTable::TrackMode,
    ConversionTable::WeatherLayer,
    ConversionTable::TerrainQuery,
];

#[test]
fn v1_environment_component_becomes_v3_atmosphere() {
    let source = Packet::from(ComponentControl::V1(ComponentControlV1 {
        instance_id: 0,
        component_class: ComponentClassV1::Environment,
        component_state: 2,
        component_id: 11,
        data: [0xAA, 0, 0],
    }));
    let converted = convert_packet(&source, CigiVersion::V3).unwrap();
    let Packet::ComponentControl(ComponentControl::V3(control)) = &converted else {
        panic!("expected a CIGI 3 Component Control, got {converted:?}");
    };
    assert_eq!(control.component_class, ComponentClassV3::Atmosphere);
    assert_eq!(control.component_state, 2);
    assert_eq!(control.data[0], 0xAA);
    assert_eq!(converted.version(), CigiVersion::V3);
}

#[test]
fn v3_short_sensor_component_to_v1_is_refused() {
    let source = Packet::from(ShortComponentControl {
        component_class: ComponentClassV3::Sensor,
        ..ShortComponentControl::default()
    });
    assert_eq!(
        convert_packet(&source, CigiVersion::V1),
        Err(PacketError::NoConversionAvailable {
            subject: ConversionSubject::Enum {
                table: ConversionTable::ComponentClass,
                value: ComponentClassV3::Sensor.raw(),
            },
            target: CigiVersion::V1,
        })
    );
}

#[test]
fn converting_to_own_version_is_identity() {
    for version in CigiVersion::ALL {
        for spec in catalog(version).entries() {
            let packet = spec.template();
            let own = packet.version();
            assert_eq!(
                convert_packet(&packet, own),
                Ok(packet.clone()),
                "{version} {}",
                spec.kind()
            );
        }
    }
}

#[test]
fn every_template_converts_or_is_refused() {
    for source in CigiVersion::ALL {
        for spec in catalog(source).entries() {
            let packet = spec.template();
            for target in CigiVersion::ALL {
                match convert_packet(&packet, target) {
                    Ok(converted) => {
                        assert!(
                            converted.version() <= target,
                            "{source} {} -> {target}: {:?}",
                            spec.kind(),
                            converted
                        );
                        assert_eq!(converted.version().major(), target.major());
                        let bytes = converted.to_bytes().unwrap();
                        let (decoded, _) = catalog(target).decode(&bytes).unwrap();
                        assert_eq!(decoded, converted);
                    }
                    Err(PacketError::NoConversionAvailable { target: t, .. }) => {
                        assert_eq!(t, target);
                    }
                    Err(other) => panic!("{source} {} -> {target}: {other}", spec.kind()),
                }
            }
        }
    }
}

#[test]
fn enum_conversion_is_total() {
    for table in TABLES {
        for source in CigiVersion::ALL {
            for target in CigiVersion::ALL {
                for value in 0..=u8::MAX {
                    match convert_enum(table, source, target, value) {
                        Ok(_) => {}
                        Err(err) => assert_eq!(
                            err,
                            PacketError::NoConversionAvailable {
                                subject: ConversionSubject::Enum { table, value },
                                target,
                            }
                        ),
                    }
                }
            }
        }
    }
}

#[test]
fn enum_conversion_is_deterministic() {
    for table in TABLES {
        for source in CigiVersion::ALL {
            for target in CigiVersion::ALL {
                for value in 0..16 {
                    assert_eq!(
                        convert_enum(table, source, target, value),
                        convert_enum(table, source, target, value)
                    );
                }
            }
        }
    }
}

#[test]
fn v1_classes_survive_every_target() {
    for class in ComponentClassV1::ALL {
        for target in CigiVersion::ALL {
            assert!(
                convert_enum(ConversionTable::ComponentClass, CigiVersion::V1, target, class.raw())
                    .is_ok(),
                "{class:?} -> {target}"
            );
        }
    }
}

#[test]
fn host_frame_converts_from_3_3_to_2() {
    let mut builder = MessageBuilder::new(CigiVersion::V3_3);
    builder
        .push(&Packet::from(IgControl::V3_2(IgControlV3_2 {
            minor_version: 3,
            host_frame_number: 42,
            ..IgControlV3_2::default()
        })))
        .unwrap();
    builder
        .push(&Packet::from(EntityControl::V3(EntityControlV3 {
            entity_id: 7,
            alpha: 255,
            ..EntityControlV3::default()
        })))
        .unwrap();
    builder
        .push(&Packet::from(ComponentControl::V3(ComponentControlV3 {
            component_class: ComponentClassV3::Atmosphere,
            ..ComponentControlV3::default()
        })))
        .unwrap();
    let datagram = builder.finish();

    let packets: Vec<Packet> = scan(&datagram, CigiVersion::V3_3)
        .collect::<Result<_, _>>()
        .unwrap();
    let converted = convert_all(&packets, CigiVersion::V2).unwrap();
    assert_eq!(converted.len(), 3);
    assert!(converted.iter().all(|p| p.version() == CigiVersion::V2));

    let mut out = MessageBuilder::new(CigiVersion::V2);
    for packet in &converted {
        out.push(packet).unwrap();
    }
    let rescanned: Vec<Packet> = scan(out.as_bytes(), CigiVersion::V2)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rescanned, converted);
    let Packet::ComponentControl(ComponentControl::V2(control)) = &rescanned[2] else {
        panic!("expected a CIGI 2 Component Control");
    };
    assert_eq!(control.component_class, wire::ComponentClassV2::Environment);
}

#[test]
fn cigi_3_only_packets_are_refused_below_3() {
    for spec in catalog(CigiVersion::V3_3).entries() {
        let packet = spec.template();
        if matches!(
            spec.kind(),
            PacketKind::ConformalClampedEntityControl
                | PacketKind::CelestialSphereControl
                | PacketKind::PositionRequest
                | PacketKind::SymbolClone
        ) {
            assert_eq!(
                convert_packet(&packet, CigiVersion::V2),
                Err(PacketError::NoConversionAvailable {
                    subject: ConversionSubject::Packet { kind: spec.kind() },
                    target: CigiVersion::V2,
                })
            );
        }
    }
}

#[test]
fn legacy_component_between_1_and_2() {
    let source = Packet::from(ComponentControl::V2(LegacyComponentControl {
        component_class: wire::ComponentClassV2::ViewGroup,
        ..LegacyComponentControl::default()
    }));
    assert!(convert_packet(&source, CigiVersion::V1).is_err());
    assert!(convert_packet(&source, CigiVersion::V3).is_ok());
}
