//! Packet-level conversion.

use wire::{
    CigiMessage, CigiVersion, ConversionSubject, Packet, PacketError, PacketKind, PacketResult,
};

use crate::{collision, control, entity, environment, query, view};

/// Protocol generation a target version belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Era {
    Cigi1,
    Cigi2,
    Cigi3,
}

impl Era {
    pub(crate) const fn of(version: CigiVersion) -> Self {
        match version {
            CigiVersion::V1 => Self::Cigi1,
            CigiVersion::V2 => Self::Cigi2,
            CigiVersion::V3 | CigiVersion::V3_2 | CigiVersion::V3_3 => Self::Cigi3,
        }
    }
}

pub(crate) const fn no_packet(kind: PacketKind, target: CigiVersion) -> PacketError {
    PacketError::NoConversionAvailable {
        subject: ConversionSubject::Packet { kind },
        target,
    }
}

pub(crate) const fn no_field(
    kind: PacketKind,
    field: &'static str,
    target: CigiVersion,
) -> PacketError {
    PacketError::NoConversionAvailable {
        subject: ConversionSubject::Field { kind, field },
        target,
    }
}

/// Narrows a CIGI 3 16-bit id to the 8 bits CIGI 1 and 2 carry.
pub(crate) fn narrow_id(
    kind: PacketKind,
    field: &'static str,
    id: u16,
    target: CigiVersion,
) -> PacketResult<u8> {
    u8::try_from(id).map_err(|_| no_field(kind, field, target))
}

/// Re-expresses `packet` in `target`'s layout.
///
/// Returns the packet unchanged when it already is in `target`'s layout.
/// Fails with [`PacketError::NoConversionAvailable`] when the message, or
/// any value it carries, has no counterpart in `target`; no partially
/// converted packet is ever returned.
pub fn convert_packet(packet: &Packet, target: CigiVersion) -> PacketResult<Packet> {
    if packet.version() == target {
        return Ok(packet.clone());
    }
    match packet {
        Packet::IgControl(p) => control::ig_control(p, target),
        Packet::StartOfFrame(p) => control::start_of_frame(p, target),
        Packet::EntityControl(p) => entity::entity_control(p, target),
        Packet::ComponentControl(p) => entity::component_control(p, target),
        Packet::ShortComponentControl(p) => entity::short_component_control(p, target),
        Packet::ArticulatedPartControl(p) => entity::articulated_part(p, target),
        Packet::RateControl(p) => entity::rate_control(p, target),
        Packet::TrajectoryDefinition(p) => entity::trajectory(p, target),
        Packet::SpecialEffectDefinition(p) => entity::special_effect(p, target),
        Packet::EnvironmentControl(p) => environment::environment_control(p, target),
        Packet::AtmosphereControl(p) => environment::atmosphere_control(p, target),
        Packet::WeatherControl(p) => environment::weather_control(p, target),
        Packet::ViewControl(p) => view::view_control(p, target),
        Packet::SensorControl(p) => view::sensor_control(p, target),
        Packet::ViewDefinition(p) => view::view_definition(p, target),
        Packet::SensorResponse(p) => view::sensor_response(p, target),
        Packet::HatHotRequest(p) => query::hat_hot_request(p, target),
        Packet::HatHotResponse(p) => query::hat_hot_response(p, target),
        Packet::LosSegmentRequest(p) => query::los_segment_request(p, target),
        Packet::LosVectorRequest(p) => query::los_vector_request(p, target),
        Packet::LosResponse(p) => query::los_response(p, target),
        Packet::CollisionSegmentDefinition(p) => collision::segment_definition(p, target),
        Packet::CollisionVolumeDefinition(p) => collision::volume_definition(p, target),
        Packet::CollisionSegmentNotification(p) => collision::segment_notification(p, target),
        Packet::CollisionVolumeNotification(p) => collision::volume_notification(p, target),
        Packet::IgMessage(p) => control::ig_message(p, target),
        other => cigi_3_only(other, target),
    }
}

/// Messages that exist in one CIGI 3 layout only.
fn cigi_3_only(packet: &Packet, target: CigiVersion) -> PacketResult<Packet> {
    if Era::of(target) == Era::Cigi3 && packet.version() <= target {
        Ok(packet.clone())
    } else {
        Err(no_packet(packet.kind(), target))
    }
}

/// Converts every packet, failing on the first that cannot be converted.
pub fn convert_all(packets: &[Packet], target: CigiVersion) -> PacketResult<Vec<Packet>> {
    packets
        .iter()
        .map(|packet| convert_packet(packet, target))
        .collect()
}
