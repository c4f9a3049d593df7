mod common;

use common::{animation_stop, datagram, ig_control_v3, trajectory_v3, v3_3_samples};
use wire::{
    catalog, scan, scan_all, scan_with_limits, CigiMessage, CigiVersion, ComponentClassV3,
    IgControl, IgControlV3_2, LimitKind, Limits, MessageBuilder, Packet, PacketError, PacketKind,
    ShortComponentControl,
};

#[test]
fn truncated_declared_size_is_buffer_too_small() {
    for version in CigiVersion::ALL {
        assert_eq!(
            catalog(version).decode(&[0x04, 0x08]),
            Err(PacketError::BufferTooSmall {
                needed: 8,
                available: 2,
            }),
            "{version}"
        );
    }
}

#[test]
fn two_packets_scan_in_order() {
    let first = ig_control_v3(77);
    let second = trajectory_v3(5);
    let buf = datagram(&[first.clone(), second.clone()]);
    assert_eq!(buf.len(), 40);

    let mut scanner = scan(&buf, CigiVersion::V3);
    assert_eq!(scanner.next(), Some(Ok(first)));
    assert_eq!(scanner.position(), 16);
    assert_eq!(scanner.next(), Some(Ok(second)));
    assert_eq!(scanner.next(), None);
    assert_eq!(scanner.position(), 40);
    assert_eq!(scanner.count(), 2);
}

#[test]
fn same_bytes_differ_by_version() {
    let buf = datagram(&[trajectory_v3(5)]);
    // id 20 is Trajectory Definition in CIGI 3 only
    assert!(matches!(
        scan_all(&buf, CigiVersion::V2),
        Err(PacketError::UnknownPacketId { id: 20, .. })
    ));
    assert_eq!(scan_all(&buf, CigiVersion::V3_2).unwrap().len(), 1);
}

#[test]
fn mixed_datagram_roundtrips() {
    let samples = v3_3_samples();
    let buf = datagram(&samples);
    assert_eq!(scan_all(&buf, CigiVersion::V3_3).unwrap(), samples);
}

#[test]
fn builder_output_scans_back() {
    let mut builder = MessageBuilder::new(CigiVersion::V3_3);
    for packet in v3_3_samples() {
        builder.push(&packet).unwrap();
    }
    let count = builder.packet_count();
    let bytes = builder.finish();
    assert_eq!(scan_all(&bytes, CigiVersion::V3_3).unwrap().len(), count);
}

#[test]
fn symbol_packets_need_3_3() {
    let buf = datagram(&v3_3_samples());
    let kinds: Vec<PacketKind> = scan(&buf, CigiVersion::V3_2)
        .map_while(Result::ok)
        .map(|packet| packet.kind())
        .collect();
    assert_eq!(kinds, vec![PacketKind::EntityControl, PacketKind::TrajectoryDefinition]);
}

#[test]
fn symbol_component_class_needs_3_3() {
    let symbol = Packet::from(ShortComponentControl {
        component_id: 4,
        component_class: ComponentClassV3::Symbol,
        ..ShortComponentControl::default()
    });
    let buf = datagram(&[animation_stop(1), symbol.clone(), animation_stop(2)]);

    let results: Vec<_> = scan(&buf, CigiVersion::V3).collect();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0], Ok(animation_stop(1)));
    assert_eq!(
        results[1],
        Err(PacketError::InvalidField {
            packet_id: 5,
            field: "component_class",
            value: 15,
        })
    );

    let packets = scan_all(&buf, CigiVersion::V3_3).unwrap();
    assert_eq!(packets, vec![animation_stop(1), symbol, animation_stop(2)]);
}

#[test]
fn minor_version_3_needs_3_3_catalog() {
    let control = Packet::from(IgControl::V3_2(IgControlV3_2 {
        minor_version: 3,
        host_frame_number: 12,
        ..IgControlV3_2::default()
    }));
    let buf = datagram(&[control.clone()]);
    assert_eq!(
        scan_all(&buf, CigiVersion::V3_2),
        Err(PacketError::InvalidField {
            packet_id: 1,
            field: "minor_version",
            value: 3,
        })
    );
    assert_eq!(scan_all(&buf, CigiVersion::V3_3).unwrap(), vec![control]);
}

#[test]
fn error_ends_scan_after_valid_prefix() {
    let mut buf = datagram(&[animation_stop(1), animation_stop(2)]);
    // Declare the second packet one byte longer than the buffer holds.
    buf[9] = 9;
    let results: Vec<_> = scan(&buf, CigiVersion::V3).collect();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0], Ok(animation_stop(1)));
    assert_eq!(
        results[1],
        Err(PacketError::BufferTooSmall {
            needed: 9,
            available: 8,
        })
    );
}

#[test]
fn wrong_declared_size_is_size_mismatch() {
    let mut buf = datagram(&[animation_stop(1), animation_stop(2)]);
    buf[1] = 16;
    assert!(matches!(
        scan_all(&buf, CigiVersion::V3),
        Err(PacketError::SizeMismatch {
            declared: 16,
            expected: 8,
            ..
        })
    ));
}

#[test]
fn packet_limit_applies_across_datagram() {
    let packets: Vec<Packet> = (0..10).map(animation_stop).collect();
    let buf = datagram(&packets);
    let limits = Limits {
        max_packets: 4,
        ..Limits::for_testing()
    };
    let results: Vec<_> = scan_with_limits(&buf, CigiVersion::V3, &limits).collect();
    assert_eq!(results.len(), 5);
    assert_eq!(
        results[4],
        Err(PacketError::LimitsExceeded {
            kind: LimitKind::PacketCount,
            limit: 4,
            actual: 5,
        })
    );
}
