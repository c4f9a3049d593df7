#![allow(dead_code)]

use wire::{
    AnimationStopNotification, CigiMessage, CigiVersion, ComponentClassV1, ComponentControl,
    ComponentControlV1, EntityControl, EntityControlV3, EntityPose, EntityState, GeodeticPoint,
    IgControl, IgControlV3, IgMessage, IgMessageText, LineStyle, Packet, SymbolLineDefinition,
    SymbolPrimitive, Trajectory, TrajectoryDefinition, Vertex,
};

pub fn ig_control_v3(frame_counter: u32) -> Packet {
    Packet::from(IgControl::V3(IgControlV3 {
        database_number: 3,
        frame_counter,
        timestamp: 1_000,
        timestamp_valid: true,
        ..IgControlV3::default()
    }))
}

pub fn trajectory_v3(entity_id: u16) -> Packet {
    Packet::from(TrajectoryDefinition::V3(Trajectory {
        entity_id,
        acceleration_z: -9.81,
        retardation_rate: 0.5,
        terminal_velocity: 120.0,
        ..Trajectory::default()
    }))
}

pub fn entity_v3(entity_id: u16) -> Packet {
    Packet::from(EntityControl::V3(EntityControlV3 {
        entity_id,
        entity_state: EntityState::Active,
        alpha: 200,
        entity_type: 42,
        pose: EntityPose {
            yaw: 90.0,
            position: GeodeticPoint {
                latitude: 37.5,
                longitude: -122.25,
                altitude: 1_500.0,
            },
            ..EntityPose::default()
        },
        ..EntityControlV3::default()
    }))
}

pub fn component_v1() -> Packet {
    Packet::from(ComponentControl::V1(ComponentControlV1 {
        instance_id: 1,
        component_class: ComponentClassV1::Environment,
        component_state: 2,
        component_id: 7,
        data: [1, 2, 3],
    }))
}

pub fn symbol_line(vertices: usize) -> Packet {
    Packet::from(SymbolLineDefinition {
        symbol_id: 12,
        primitive: SymbolPrimitive::LineStrip,
        style: LineStyle {
            stipple_pattern: 0xF0F0,
            line_width: 2.0,
            stipple_length: 8.0,
        },
        vertices: (0..vertices)
            .map(|i| Vertex {
                u: i as f32,
                v: -(i as f32),
            })
            .collect(),
    })
}

pub fn ig_message_v3(text: &str) -> Packet {
    Packet::from(IgMessage::V3(IgMessageText::new(9, text)))
}

pub fn animation_stop(entity_id: u16) -> Packet {
    Packet::from(AnimationStopNotification { entity_id })
}

/// One sample per CIGI 3.3 layout family used by the integration tests.
pub fn v3_3_samples() -> Vec<Packet> {
    vec![
        entity_v3(1),
        trajectory_v3(1),
        symbol_line(3),
        ig_message_v3("ready"),
        animation_stop(1),
    ]
}

pub fn datagram(packets: &[Packet]) -> Vec<u8> {
    packets
        .iter()
        .flat_map(|packet| packet.to_bytes().unwrap())
        .collect()
}

pub fn assert_version(packet: &Packet, version: CigiVersion) {
    assert_eq!(packet.version(), version, "{:?}", packet.kind());
}
