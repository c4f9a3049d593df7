//! Collision detection conversion.

use wire::{
    CigiVersion, CollisionSegmentDefinition, CollisionSegmentNotification,
    CollisionVolumeDefinition, CollisionVolumeNotification, CollisionVolumeV2, CollisionVolumeV3,
    Packet, PacketKind, PacketResult, VolumeType,
};

use crate::packet::{no_field, no_packet, Era};

pub(crate) fn segment_definition(
    packet: &CollisionSegmentDefinition,
    target: CigiVersion,
) -> PacketResult<Packet> {
    let segment = match packet {
        CollisionSegmentDefinition::V1(p)
        | CollisionSegmentDefinition::V2(p)
        | CollisionSegmentDefinition::V3(p) => *p,
    };
    Ok(Packet::from(match Era::of(target) {
        Era::Cigi1 => CollisionSegmentDefinition::V1(segment),
        Era::Cigi2 => CollisionSegmentDefinition::V2(segment),
        Era::Cigi3 => CollisionSegmentDefinition::V3(segment),
    }))
}

/// CIGI 2 volumes are unrotated cuboids; orientation is dropped on the way
/// down.
pub(crate) fn volume_definition(
    packet: &CollisionVolumeDefinition,
    target: CigiVersion,
) -> PacketResult<Packet> {
    let converted = match (packet, Era::of(target)) {
        (_, Era::Cigi1) => return Err(no_packet(PacketKind::CollisionVolumeDefinition, target)),
        (CollisionVolumeDefinition::V2(p), Era::Cigi2) => CollisionVolumeDefinition::V2(*p),
        (CollisionVolumeDefinition::V2(p), Era::Cigi3) => {
            CollisionVolumeDefinition::V3(CollisionVolumeV3 {
                entity_id: p.entity_id,
                volume_id: p.volume_id,
                enabled: p.enabled,
                volume_type: VolumeType::Cuboid,
                x: p.x,
                y: p.y,
                z: p.z,
                radius_height: p.height,
                width: p.width,
                depth: p.depth,
                roll: 0.0,
                pitch: 0.0,
                yaw: 0.0,
            })
        }
        (CollisionVolumeDefinition::V3(p), Era::Cigi2) => {
            if p.volume_type == VolumeType::Sphere {
                return Err(no_field(
                    PacketKind::CollisionVolumeDefinition,
                    "volume_type",
                    target,
                ));
            }
            CollisionVolumeDefinition::V2(CollisionVolumeV2 {
                entity_id: p.entity_id,
                volume_id: p.volume_id,
                enabled: p.enabled,
                x: p.x,
                y: p.y,
                z: p.z,
                height: p.radius_height,
                width: p.width,
                depth: p.depth,
            })
        }
        (CollisionVolumeDefinition::V3(p), Era::Cigi3) => CollisionVolumeDefinition::V3(*p),
    };
    Ok(Packet::from(converted))
}

/// A CIGI 3 notification carries a distance along the segment where CIGI 1
/// and 2 carry the contact point; neither can be rebuilt from the other.
pub(crate) fn segment_notification(
    packet: &CollisionSegmentNotification,
    target: CigiVersion,
) -> PacketResult<Packet> {
    let converted = match (packet, Era::of(target)) {
        (CollisionSegmentNotification::V1(p) | CollisionSegmentNotification::V2(p), era) => {
            match era {
                Era::Cigi1 => CollisionSegmentNotification::V1(*p),
                Era::Cigi2 => CollisionSegmentNotification::V2(*p),
                Era::Cigi3 => {
                    return Err(no_packet(PacketKind::CollisionSegmentNotification, target));
                }
            }
        }
        (CollisionSegmentNotification::V3(p), Era::Cigi3) => CollisionSegmentNotification::V3(*p),
        (CollisionSegmentNotification::V3(_), _) => {
            return Err(no_packet(PacketKind::CollisionSegmentNotification, target));
        }
    };
    Ok(Packet::from(converted))
}

pub(crate) fn volume_notification(
    packet: &CollisionVolumeNotification,
    target: CigiVersion,
) -> PacketResult<Packet> {
    let contact = match packet {
        CollisionVolumeNotification::V2(p) | CollisionVolumeNotification::V3(p) => *p,
    };
    match Era::of(target) {
        Era::Cigi1 => Err(no_packet(PacketKind::CollisionVolumeNotification, target)),
        Era::Cigi2 => Ok(Packet::from(CollisionVolumeNotification::V2(contact))),
        Era::Cigi3 => Ok(Packet::from(CollisionVolumeNotification::V3(contact))),
    }
}
