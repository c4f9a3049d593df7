//! IG Control, Start Of Frame and IG Message conversion.
//!
//! Both frame packets are lifted into a superset of every layout's fields
//! and lowered into the target layout. Fields the target lacks are
//! dropped; fields the source lacks take their zero value, with timestamps
//! marked invalid.

use wire::{
    CigiVersion, EarthReferenceModel, IgControl, IgControlV3, IgControlV3_2, IgMessage, IgMode,
    LegacyIgControl, LegacyStartOfFrame, Packet, PacketKind, PacketResult, StartOfFrame,
    StartOfFrameV3, StartOfFrameV3_2,
};

use crate::packet::{no_packet, Era};
use crate::tables::{IG_MODE_LEGACY_TO_V3, IG_MODE_V3_TO_LEGACY};

#[derive(Debug, Default)]
struct IgControlFields {
    database_number: i8,
    ig_mode: IgMode,
    timestamp_valid: bool,
    timestamp: u32,
    host_frame: u32,
    last_ig_frame: u32,
    smoothing_enabled: bool,
    tracking_enabled: bool,
    boresight: bool,
    timing_value: f32,
}

impl IgControlFields {
    fn from_legacy<const MAJOR: u8>(
        packet: &LegacyIgControl<MAJOR>,
        target: CigiVersion,
    ) -> PacketResult<Self> {
        Ok(Self {
            database_number: packet.database_number,
            ig_mode: IG_MODE_LEGACY_TO_V3.map(packet.ig_mode, target)?,
            host_frame: packet.frame_counter,
            tracking_enabled: packet.tracking_enabled,
            boresight: packet.boresight,
            timing_value: packet.timing_value,
            ..Self::default()
        })
    }

    fn lift(packet: &IgControl, target: CigiVersion) -> PacketResult<Self> {
        match packet {
            IgControl::V1(p) => Self::from_legacy(p, target),
            IgControl::V2(p) => Self::from_legacy(p, target),
            IgControl::V3(p) => Ok(Self {
                database_number: p.database_number,
                ig_mode: p.ig_mode,
                timestamp_valid: p.timestamp_valid,
                timestamp: p.timestamp,
                host_frame: p.frame_counter,
                ..Self::default()
            }),
            IgControl::V3_2(p) => Ok(Self {
                database_number: p.database_number,
                ig_mode: p.ig_mode,
                timestamp_valid: p.timestamp_valid,
                timestamp: p.timestamp,
                host_frame: p.host_frame_number,
                last_ig_frame: p.last_ig_frame_number,
                smoothing_enabled: p.smoothing_enabled,
                ..Self::default()
            }),
        }
    }

    fn to_legacy<const MAJOR: u8>(
        &self,
        target: CigiVersion,
    ) -> PacketResult<LegacyIgControl<MAJOR>> {
        Ok(LegacyIgControl {
            database_number: self.database_number,
            ig_mode: IG_MODE_V3_TO_LEGACY.map(self.ig_mode, target)?,
            tracking_enabled: self.tracking_enabled,
            boresight: self.boresight,
            frame_counter: self.host_frame,
            timing_value: self.timing_value,
        })
    }

    fn lower(&self, target: CigiVersion) -> PacketResult<IgControl> {
        Ok(match target {
            CigiVersion::V1 => IgControl::V1(self.to_legacy(target)?),
            CigiVersion::V2 => IgControl::V2(self.to_legacy(target)?),
            CigiVersion::V3 => IgControl::V3(IgControlV3 {
                database_number: self.database_number,
                ig_mode: self.ig_mode,
                timestamp_valid: self.timestamp_valid,
                frame_counter: self.host_frame,
                timestamp: self.timestamp,
            }),
            CigiVersion::V3_2 | CigiVersion::V3_3 => IgControl::V3_2(IgControlV3_2 {
                minor_version: target.minor(),
                database_number: self.database_number,
                ig_mode: self.ig_mode,
                timestamp_valid: self.timestamp_valid,
                smoothing_enabled: self.smoothing_enabled,
                host_frame_number: self.host_frame,
                timestamp: self.timestamp,
                last_ig_frame_number: self.last_ig_frame,
            }),
        })
    }
}

pub(crate) fn ig_control(packet: &IgControl, target: CigiVersion) -> PacketResult<Packet> {
    let fields = IgControlFields::lift(packet, target)?;
    fields.lower(target).map(Packet::from)
}

#[derive(Debug, Default)]
struct StartOfFrameFields {
    database_number: i8,
    ig_status: u8,
    ig_mode: IgMode,
    timestamp_valid: bool,
    timestamp: u32,
    earth_reference_model: EarthReferenceModel,
    ig_frame: u32,
    last_host_frame: u32,
    timing_value: f32,
}

impl StartOfFrameFields {
    fn lift(packet: &StartOfFrame, target: CigiVersion) -> PacketResult<Self> {
        match packet {
            StartOfFrame::V1(p) | StartOfFrame::V2(p) => Ok(Self {
                database_number: p.database_number,
                ig_status: p.ig_status,
                ig_mode: IG_MODE_LEGACY_TO_V3.map(p.ig_mode, target)?,
                ig_frame: p.frame_counter,
                timing_value: p.timing_value,
                ..Self::default()
            }),
            StartOfFrame::V3(p) => Ok(Self {
                database_number: p.database_number,
                ig_status: p.ig_status,
                ig_mode: p.ig_mode,
                timestamp_valid: p.timestamp_valid,
                timestamp: p.timestamp,
                earth_reference_model: p.earth_reference_model,
                ig_frame: p.frame_counter,
                ..Self::default()
            }),
            StartOfFrame::V3_2(p) => Ok(Self {
                database_number: p.database_number,
                ig_status: p.ig_status,
                ig_mode: p.ig_mode,
                timestamp_valid: p.timestamp_valid,
                timestamp: p.timestamp,
                earth_reference_model: p.earth_reference_model,
                ig_frame: p.ig_frame_number,
                last_host_frame: p.last_host_frame_number,
                ..Self::default()
            }),
        }
    }

    fn lower(&self, target: CigiVersion) -> PacketResult<StartOfFrame> {
        Ok(match target {
            CigiVersion::V1 | CigiVersion::V2 => {
                let legacy = LegacyStartOfFrame {
                    database_number: self.database_number,
                    ig_status: self.ig_status,
                    ig_mode: IG_MODE_V3_TO_LEGACY.map(self.ig_mode, target)?,
                    frame_counter: self.ig_frame,
                    timing_value: self.timing_value,
                };
                if target == CigiVersion::V1 {
                    StartOfFrame::V1(legacy)
                } else {
                    StartOfFrame::V2(legacy)
                }
            }
            CigiVersion::V3 => StartOfFrame::V3(StartOfFrameV3 {
                database_number: self.database_number,
                ig_status: self.ig_status,
                ig_mode: self.ig_mode,
                timestamp_valid: self.timestamp_valid,
                earth_reference_model: self.earth_reference_model,
                frame_counter: self.ig_frame,
                timestamp: self.timestamp,
            }),
            CigiVersion::V3_2 | CigiVersion::V3_3 => StartOfFrame::V3_2(StartOfFrameV3_2 {
                minor_version: target.minor(),
                database_number: self.database_number,
                ig_status: self.ig_status,
                ig_mode: self.ig_mode,
                timestamp_valid: self.timestamp_valid,
                earth_reference_model: self.earth_reference_model,
                ig_frame_number: self.ig_frame,
                timestamp: self.timestamp,
                last_host_frame_number: self.last_host_frame,
            }),
        })
    }
}

pub(crate) fn start_of_frame(packet: &StartOfFrame, target: CigiVersion) -> PacketResult<Packet> {
    let fields = StartOfFrameFields::lift(packet, target)?;
    fields.lower(target).map(Packet::from)
}

pub(crate) fn ig_message(packet: &IgMessage, target: CigiVersion) -> PacketResult<Packet> {
    let text = match packet {
        IgMessage::V2(text) | IgMessage::V3(text) => text.clone(),
    };
    match Era::of(target) {
        Era::Cigi1 => Err(no_packet(PacketKind::IgMessage, target)),
        Era::Cigi2 => Ok(Packet::from(IgMessage::V2(text))),
        Era::Cigi3 => Ok(Packet::from(IgMessage::V3(text))),
    }
}
