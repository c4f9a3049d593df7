//! View and sensor conversion.
//!
//! CIGI 3 widened view ids to 16 bits; a view id above 255 has no CIGI 1
//! or 2 counterpart.

use wire::{
    CigiVersion, LegacySensorControl, LegacySensorResponse, LegacyViewControl,
    LegacyViewDefinition, Packet, PacketKind, PacketResult, ProjectionType, ReorderMode,
    SensorControl, SensorControlV3, SensorGate, SensorResponse, SensorResponseType,
    SensorResponseV3, SensorStatus, SensorStatusV1, ViewControl, ViewControlV3, ViewDefinition,
    ViewDefinitionV3,
};

use crate::packet::{narrow_id, Era};
use crate::tables::{
    SENSOR_STATUS_V1_TO_V2, SENSOR_STATUS_V2_TO_V1, TRACK_MODE_LEGACY_TO_V3,
    TRACK_MODE_V3_TO_LEGACY,
};

pub(crate) fn view_control(packet: &ViewControl, target: CigiVersion) -> PacketResult<Packet> {
    let view = match packet {
        ViewControl::V1(p) | ViewControl::V2(p) => ViewControlV3 {
            view_id: u16::from(p.view_id),
            group_id: p.group_id,
            enables: p.enables,
            entity_id: p.entity_id,
            offset: p.offset,
        },
        ViewControl::V3(p) => *p,
    };
    let legacy = || -> PacketResult<LegacyViewControl> {
        Ok(LegacyViewControl {
            entity_id: view.entity_id,
            view_id: narrow_id(PacketKind::ViewControl, "view_id", view.view_id, target)?,
            group_id: view.group_id,
            enables: view.enables,
            offset: view.offset,
        })
    };
    Ok(Packet::from(match Era::of(target) {
        Era::Cigi1 => ViewControl::V1(legacy()?),
        Era::Cigi2 => ViewControl::V2(legacy()?),
        Era::Cigi3 => ViewControl::V3(view),
    }))
}

fn sensor_control_v3(
    sensor: &LegacySensorControl,
    target: CigiVersion,
) -> PacketResult<SensorControlV3> {
    Ok(SensorControlV3 {
        view_id: u16::from(sensor.view_id),
        sensor_id: sensor.sensor_id,
        sensor_on: sensor.sensor_on,
        black_hot: sensor.black_hot,
        line_dropout: sensor.line_dropout,
        auto_gain: sensor.auto_gain,
        track_black: sensor.track_black,
        track_mode: TRACK_MODE_LEGACY_TO_V3.map(sensor.track_mode, target)?,
        response_type: SensorResponseType::GatePosition,
        settings: sensor.settings,
    })
}

fn legacy_sensor_control(
    sensor: &SensorControlV3,
    target: CigiVersion,
) -> PacketResult<LegacySensorControl> {
    Ok(LegacySensorControl {
        view_id: narrow_id(PacketKind::SensorControl, "view_id", sensor.view_id, target)?,
        sensor_id: sensor.sensor_id,
        sensor_on: sensor.sensor_on,
        black_hot: sensor.black_hot,
        line_dropout: sensor.line_dropout,
        track_mode: TRACK_MODE_V3_TO_LEGACY.map(sensor.track_mode, target)?,
        track_black: sensor.track_black,
        auto_gain: sensor.auto_gain,
        settings: sensor.settings,
    })
}

pub(crate) fn sensor_control(packet: &SensorControl, target: CigiVersion) -> PacketResult<Packet> {
    let converted = match (packet, Era::of(target)) {
        (SensorControl::V1(p) | SensorControl::V2(p), Era::Cigi1) => SensorControl::V1(*p),
        (SensorControl::V1(p) | SensorControl::V2(p), Era::Cigi2) => SensorControl::V2(*p),
        (SensorControl::V1(p) | SensorControl::V2(p), Era::Cigi3) => {
            SensorControl::V3(sensor_control_v3(p, target)?)
        }
        (SensorControl::V3(p), Era::Cigi1) => {
            SensorControl::V1(legacy_sensor_control(p, target)?)
        }
        (SensorControl::V3(p), Era::Cigi2) => {
            SensorControl::V2(legacy_sensor_control(p, target)?)
        }
        (SensorControl::V3(p), Era::Cigi3) => SensorControl::V3(*p),
    };
    Ok(Packet::from(converted))
}

pub(crate) fn view_definition(
    packet: &ViewDefinition,
    target: CigiVersion,
) -> PacketResult<Packet> {
    let converted = match (packet, Era::of(target)) {
        (ViewDefinition::V1(p) | ViewDefinition::V2(p), Era::Cigi1) => ViewDefinition::V1(*p),
        (ViewDefinition::V1(p) | ViewDefinition::V2(p), Era::Cigi2) => ViewDefinition::V2(*p),
        (ViewDefinition::V1(p) | ViewDefinition::V2(p), Era::Cigi3) => {
            ViewDefinition::V3(ViewDefinitionV3 {
                view_id: u16::from(p.view_id),
                group_id: p.group_id,
                enables: p.enables,
                mirror_mode: p.mirror_mode,
                pixel_replication: p.pixel_replication,
                projection_type: ProjectionType::Perspective,
                reorder: ReorderMode::NoReorder,
                view_type: p.view_type,
                frustum: p.frustum,
            })
        }
        (ViewDefinition::V3(p), era) => {
            let legacy = LegacyViewDefinition {
                view_id: narrow_id(PacketKind::ViewDefinition, "view_id", p.view_id, target)?,
                group_id: p.group_id,
                enables: p.enables,
                mirror_mode: p.mirror_mode,
                pixel_replication: p.pixel_replication,
                view_type: p.view_type,
                tracker_assigned: false,
                frustum: p.frustum,
            };
            match era {
                Era::Cigi1 => ViewDefinition::V1(legacy),
                Era::Cigi2 => ViewDefinition::V2(legacy),
                Era::Cigi3 => ViewDefinition::V3(*p),
            }
        }
    };
    Ok(Packet::from(converted))
}

/// The fields every Sensor Response layout shares, status in the CIGI 2
/// enumeration.
struct ResponseFields {
    view_id: u16,
    sensor_id: u8,
    status: SensorStatus,
    gate: SensorGate,
    frame: u32,
}

impl ResponseFields {
    fn lift(packet: &SensorResponse, target: CigiVersion) -> PacketResult<Self> {
        Ok(match packet {
            SensorResponse::V1(p) => Self {
                view_id: u16::from(p.view_id),
                sensor_id: p.sensor_id,
                status: SENSOR_STATUS_V1_TO_V2.map(p.status, target)?,
                gate: p.gate,
                frame: p.frame_counter,
            },
            SensorResponse::V2(p) => Self {
                view_id: u16::from(p.view_id),
                sensor_id: p.sensor_id,
                status: p.status,
                gate: p.gate,
                frame: p.frame_counter,
            },
            SensorResponse::V3(p) => Self {
                view_id: p.view_id,
                sensor_id: p.sensor_id,
                status: p.status,
                gate: p.gate,
                frame: p.host_frame_number,
            },
        })
    }

    fn legacy<S>(&self, status: S, target: CigiVersion) -> PacketResult<LegacySensorResponse<S>> {
        Ok(LegacySensorResponse {
            view_id: narrow_id(PacketKind::SensorResponse, "view_id", self.view_id, target)?,
            sensor_id: self.sensor_id,
            status,
            gate: self.gate,
            frame_counter: self.frame,
        })
    }

    fn lower(&self, target: CigiVersion) -> PacketResult<SensorResponse> {
        Ok(match Era::of(target) {
            Era::Cigi1 => {
                let status: SensorStatusV1 = SENSOR_STATUS_V2_TO_V1.map(self.status, target)?;
                SensorResponse::V1(self.legacy(status, target)?)
            }
            Era::Cigi2 => SensorResponse::V2(self.legacy(self.status, target)?),
            Era::Cigi3 => SensorResponse::V3(SensorResponseV3 {
                view_id: self.view_id,
                sensor_id: self.sensor_id,
                status: self.status,
                gate: self.gate,
                host_frame_number: self.frame,
            }),
        })
    }
}

pub(crate) fn sensor_response(
    packet: &SensorResponse,
    target: CigiVersion,
) -> PacketResult<Packet> {
    ResponseFields::lift(packet, target)?
        .lower(target)
        .map(Packet::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::no_field;
    use wire::{TrackMode, TrackModeLegacy};

    #[test]
    fn wide_view_ids_stay_in_cigi_3() {
        let view = ViewControl::V3(ViewControlV3 {
            view_id: 300,
            ..ViewControlV3::default()
        });
        assert_eq!(
            view_control(&view, CigiVersion::V2),
            Err(no_field(PacketKind::ViewControl, "view_id", CigiVersion::V2))
        );
        let narrow = ViewControl::V3(ViewControlV3 {
            view_id: 200,
            entity_id: 4,
            ..ViewControlV3::default()
        });
        assert_eq!(
            view_control(&narrow, CigiVersion::V1),
            Ok(Packet::from(ViewControl::V1(LegacyViewControl {
                view_id: 200,
                entity_id: 4,
                ..LegacyViewControl::default()
            })))
        );
    }

    #[test]
    fn sensor_track_modes() {
        let legacy = SensorControl::V1(LegacySensorControl {
            sensor_on: true,
            track_mode: TrackModeLegacy::Ship,
            ..LegacySensorControl::default()
        });
        let Packet::SensorControl(SensorControl::V3(sensor)) =
            sensor_control(&legacy, CigiVersion::V3).unwrap()
        else {
            panic!("expected a CIGI 3 Sensor Control");
        };
        assert_eq!(sensor.track_mode, TrackMode::Ship);
        assert!(sensor.sensor_on);

        let custom = SensorControl::V3(SensorControlV3 {
            track_mode: TrackMode::IgDefined1,
            ..SensorControlV3::default()
        });
        assert!(sensor_control(&custom, CigiVersion::V2).is_err());
    }

    #[test]
    fn view_definition_defaults() {
        let legacy = ViewDefinition::V2(LegacyViewDefinition {
            view_id: 3,
            tracker_assigned: true,
            view_type: 2,
            ..LegacyViewDefinition::default()
        });
        let Packet::ViewDefinition(ViewDefinition::V3(view)) =
            view_definition(&legacy, CigiVersion::V3_2).unwrap()
        else {
            panic!("expected a CIGI 3 View Definition");
        };
        assert_eq!(view.view_id, 3);
        assert_eq!(view.projection_type, ProjectionType::Perspective);
        assert_eq!(view.view_type, 2);
    }

    #[test]
    fn sensor_status_between_1_and_3() {
        let v3 = SensorResponse::V3(SensorResponseV3 {
            view_id: 1,
            status: SensorStatus::ImpendingBreaklock,
            gate: SensorGate {
                x_size: 10,
                ..SensorGate::default()
            },
            host_frame_number: 55,
            ..SensorResponseV3::default()
        });
        let Packet::SensorResponse(SensorResponse::V1(response)) =
            sensor_response(&v3, CigiVersion::V1).unwrap()
        else {
            panic!("expected a CIGI 1 Sensor Response");
        };
        assert_eq!(response.status, SensorStatusV1::Tracking);
        assert_eq!(response.frame_counter, 55);
        assert_eq!(response.gate.x_size, 10);

        let v1 = SensorResponse::V1(LegacySensorResponse {
            status: SensorStatusV1::Breaklock,
            ..LegacySensorResponse::default()
        });
        let Packet::SensorResponse(SensorResponse::V2(response)) =
            sensor_response(&v1, CigiVersion::V2).unwrap()
        else {
            panic!("expected a CIGI 2 Sensor Response");
        };
        assert_eq!(response.status, SensorStatus::Breaklock);
    }
}
