//! Height-of-terrain and line-of-sight query conversion.
//!
//! CIGI 1 and 2 use one packet per query kind (HAT, HOT, LOS occult, LOS
//! range); CIGI 3 folds them into typed HAT/HOT and LOS segment/vector
//! packets. Entity-relative coordinates exist in CIGI 3 only.

use wire::{
    CigiVersion, ConversionTable, GeodeticPoint, HatHotRequest, HatHotRequestType,
    HatHotRequestV3, HatHotResponse, HatHotResponseType, HatHotResponseV3, HatRequest,
    HeightResponse, HotRequest, LegacyLosResponse, LegacyTerrainQuery, LosOccultRequest,
    LosRangeRequest, LosResponse, LosResponseV3, LosSegmentRequest, LosSegmentRequestV3,
    LosSegmentRequestV3_2, LosVectorRequest, LosVectorRequestV3, Packet, PacketKind, PacketResult,
    QueryCoordinates, WireEnum,
};

use crate::packet::{no_field, Era};
use crate::tables::{
    no_enum_conversion, TERRAIN_QUERY_V1_TO_V3, TERRAIN_QUERY_V2_TO_V3, TERRAIN_QUERY_V3_TO_V1,
    TERRAIN_QUERY_V3_TO_V2,
};

/// Legacy query kind a CIGI 3 query type maps to in `target`.
fn legacy_query(
    query: HatHotRequestType,
    target: CigiVersion,
) -> PacketResult<LegacyTerrainQuery> {
    if target == CigiVersion::V1 {
        TERRAIN_QUERY_V3_TO_V1.map(query, target)
    } else {
        TERRAIN_QUERY_V3_TO_V2.map(query, target)
    }
}

fn require_geodetic(
    kind: PacketKind,
    field: &'static str,
    coordinates: QueryCoordinates,
    target: CigiVersion,
) -> PacketResult<()> {
    match coordinates {
        QueryCoordinates::Geodetic => Ok(()),
        QueryCoordinates::Entity => Err(no_field(kind, field, target)),
    }
}

fn lift_hat_hot_request(
    packet: &HatHotRequest,
    target: CigiVersion,
) -> PacketResult<HatHotRequestV3> {
    let (request_id, request_type, position) = match packet {
        HatHotRequest::V1(p) => (
            p.request_id,
            TERRAIN_QUERY_V1_TO_V3.map(LegacyTerrainQuery::HeightAboveTerrain, target)?,
            p.position,
        ),
        HatHotRequest::V2Hat(p) => (
            p.request_id,
            TERRAIN_QUERY_V2_TO_V3.map(LegacyTerrainQuery::HeightAboveTerrain, target)?,
            p.position,
        ),
        HatHotRequest::V2Hot(p) => (
            p.request_id,
            TERRAIN_QUERY_V2_TO_V3.map(LegacyTerrainQuery::HeightOfTerrain, target)?,
            GeodeticPoint {
                latitude: p.latitude,
                longitude: p.longitude,
                altitude: 0.0,
            },
        ),
        HatHotRequest::V3(p) => return Ok(*p),
    };
    Ok(HatHotRequestV3 {
        request_id,
        request_type,
        coordinates: QueryCoordinates::Geodetic,
        entity_id: 0,
        position,
    })
}

pub(crate) fn hat_hot_request(
    packet: &HatHotRequest,
    target: CigiVersion,
) -> PacketResult<Packet> {
    let request = lift_hat_hot_request(packet, target)?;
    if Era::of(target) == Era::Cigi3 {
        return Ok(Packet::from(HatHotRequest::V3(request)));
    }
    require_geodetic(
        PacketKind::HatHotRequest,
        "coordinates",
        request.coordinates,
        target,
    )?;
    let hat = HatRequest {
        request_id: request.request_id,
        position: request.position,
    };
    let converted = match (legacy_query(request.request_type, target)?, target) {
        (_, CigiVersion::V1) => HatHotRequest::V1(hat),
        (LegacyTerrainQuery::HeightAboveTerrain, _) => HatHotRequest::V2Hat(hat),
        (LegacyTerrainQuery::HeightOfTerrain, _) => HatHotRequest::V2Hot(HotRequest {
            request_id: request.request_id,
            latitude: request.position.latitude,
            longitude: request.position.longitude,
        }),
    };
    Ok(Packet::from(converted))
}

/// Query kind, height and validity shared by every HAT/HOT response.
struct HeightFields {
    request_id: u16,
    valid: bool,
    query: HatHotRequestType,
    height: f64,
    material_code: u32,
}

impl HeightFields {
    fn legacy(response: &HeightResponse, query: HatHotRequestType) -> Self {
        Self {
            request_id: response.request_id,
            valid: response.valid,
            query,
            height: response.height,
            material_code: response.material_code,
        }
    }

    fn lift(packet: &HatHotResponse, target: CigiVersion) -> PacketResult<Self> {
        Ok(match packet {
            HatHotResponse::V1(p) => Self::legacy(
                p,
                TERRAIN_QUERY_V1_TO_V3.map(LegacyTerrainQuery::HeightAboveTerrain, target)?,
            ),
            HatHotResponse::V2Hat(p) => Self::legacy(
                p,
                TERRAIN_QUERY_V2_TO_V3.map(LegacyTerrainQuery::HeightAboveTerrain, target)?,
            ),
            HatHotResponse::V2Hot(p) => Self::legacy(
                p,
                TERRAIN_QUERY_V2_TO_V3.map(LegacyTerrainQuery::HeightOfTerrain, target)?,
            ),
            HatHotResponse::V3(p) => Self {
                request_id: p.request_id,
                valid: p.valid,
                query: match p.response_type {
                    HatHotResponseType::HeightAboveTerrain => HatHotRequestType::HeightAboveTerrain,
                    HatHotResponseType::HeightOfTerrain => HatHotRequestType::HeightOfTerrain,
                },
                height: p.height,
                material_code: 0,
            },
        })
    }

    fn lower(&self, target: CigiVersion) -> PacketResult<HatHotResponse> {
        if Era::of(target) == Era::Cigi3 {
            let response_type = match self.query {
                HatHotRequestType::HeightAboveTerrain => HatHotResponseType::HeightAboveTerrain,
                HatHotRequestType::HeightOfTerrain => HatHotResponseType::HeightOfTerrain,
                HatHotRequestType::Extended => {
                    return Err(no_enum_conversion(
                        ConversionTable::TerrainQuery,
                        self.query.raw(),
                        target,
                    ));
                }
            };
            return Ok(HatHotResponse::V3(HatHotResponseV3 {
                request_id: self.request_id,
                valid: self.valid,
                response_type,
                height: self.height,
            }));
        }
        let response = HeightResponse {
            request_id: self.request_id,
            valid: self.valid,
            height: self.height,
            material_code: self.material_code,
        };
        Ok(match (legacy_query(self.query, target)?, target) {
            (_, CigiVersion::V1) => HatHotResponse::V1(response),
            (LegacyTerrainQuery::HeightAboveTerrain, _) => HatHotResponse::V2Hat(response),
            (LegacyTerrainQuery::HeightOfTerrain, _) => HatHotResponse::V2Hot(response),
        })
    }
}

pub(crate) fn hat_hot_response(
    packet: &HatHotResponse,
    target: CigiVersion,
) -> PacketResult<Packet> {
    HeightFields::lift(packet, target)?
        .lower(target)
        .map(Packet::from)
}

fn segment_from_occult(request: &LosOccultRequest) -> LosSegmentRequestV3_2 {
    LosSegmentRequestV3_2 {
        segment: LosSegmentRequestV3 {
            request_id: request.request_id,
            source: request.source,
            destination: request.destination,
            ..LosSegmentRequestV3::default()
        },
        ..LosSegmentRequestV3_2::default()
    }
}

fn occult_from_segment(
    request: &LosSegmentRequestV3_2,
    target: CigiVersion,
) -> PacketResult<LosOccultRequest> {
    let segment = &request.segment;
    let kind = PacketKind::LosSegmentRequest;
    require_geodetic(kind, "source_coordinates", segment.source_coordinates, target)?;
    require_geodetic(
        kind,
        "destination_coordinates",
        segment.destination_coordinates,
        target,
    )?;
    require_geodetic(kind, "response_coordinates", segment.response_coordinates, target)?;
    if request.destination_entity_valid {
        return Err(no_field(kind, "destination_entity_id", target));
    }
    Ok(LosOccultRequest {
        request_id: segment.request_id,
        source: segment.source,
        destination: segment.destination,
    })
}

pub(crate) fn los_segment_request(
    packet: &LosSegmentRequest,
    target: CigiVersion,
) -> PacketResult<Packet> {
    let request = match packet {
        LosSegmentRequest::V1(p) | LosSegmentRequest::V2(p) => segment_from_occult(p),
        LosSegmentRequest::V3(p) => LosSegmentRequestV3_2 {
            segment: *p,
            ..LosSegmentRequestV3_2::default()
        },
        LosSegmentRequest::V3_2(p) => *p,
    };
    let converted = match target {
        CigiVersion::V1 => LosSegmentRequest::V1(occult_from_segment(&request, target)?),
        CigiVersion::V2 => LosSegmentRequest::V2(occult_from_segment(&request, target)?),
        CigiVersion::V3 => LosSegmentRequest::V3(request.segment),
        CigiVersion::V3_2 | CigiVersion::V3_3 => LosSegmentRequest::V3_2(request),
    };
    Ok(Packet::from(converted))
}

fn range_from_vector(
    request: &LosVectorRequestV3,
    target: CigiVersion,
) -> PacketResult<LosRangeRequest> {
    let kind = PacketKind::LosVectorRequest;
    require_geodetic(kind, "source_coordinates", request.source_coordinates, target)?;
    require_geodetic(kind, "response_coordinates", request.response_coordinates, target)?;
    Ok(LosRangeRequest {
        request_id: request.request_id,
        azimuth: request.azimuth,
        elevation: request.elevation,
        min_range: request.min_range,
        max_range: request.max_range,
        source: request.source,
    })
}

pub(crate) fn los_vector_request(
    packet: &LosVectorRequest,
    target: CigiVersion,
) -> PacketResult<Packet> {
    let request = match packet {
        LosVectorRequest::V1(p) | LosVectorRequest::V2(p) => LosVectorRequestV3 {
            request_id: p.request_id,
            azimuth: p.azimuth,
            elevation: p.elevation,
            min_range: p.min_range,
            max_range: p.max_range,
            source: p.source,
            ..LosVectorRequestV3::default()
        },
        LosVectorRequest::V3(p) => *p,
    };
    Ok(Packet::from(match Era::of(target) {
        Era::Cigi1 => LosVectorRequest::V1(range_from_vector(&request, target)?),
        Era::Cigi2 => LosVectorRequest::V2(range_from_vector(&request, target)?),
        Era::Cigi3 => LosVectorRequest::V3(request),
    }))
}

pub(crate) fn los_response(packet: &LosResponse, target: CigiVersion) -> PacketResult<Packet> {
    let converted = match (packet, Era::of(target)) {
        (LosResponse::V1(p) | LosResponse::V2(p), Era::Cigi1) => LosResponse::V1(*p),
        (LosResponse::V1(p) | LosResponse::V2(p), Era::Cigi2) => LosResponse::V2(*p),
        (LosResponse::V1(p) | LosResponse::V2(p), Era::Cigi3) => LosResponse::V3(LosResponseV3 {
            request_id: p.request_id,
            valid: p.valid,
            entity_id_valid: p.entity_id != 0,
            visible: false,
            response_count: 1,
            entity_id: p.entity_id,
            range: p.range,
        }),
        (LosResponse::V3(p), era) => {
            let legacy = LegacyLosResponse {
                request_id: p.request_id,
                valid: p.valid,
                entity_id: if p.entity_id_valid { p.entity_id } else { 0 },
                range: p.range,
                intersection: GeodeticPoint::default(),
            };
            match era {
                Era::Cigi1 => LosResponse::V1(legacy),
                Era::Cigi2 => LosResponse::V2(legacy),
                Era::Cigi3 => LosResponse::V3(*p),
            }
        }
    };
    Ok(Packet::from(converted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire::{ConversionSubject, PacketError};

    fn point() -> GeodeticPoint {
        GeodeticPoint {
            latitude: 37.5,
            longitude: -122.25,
            altitude: 120.0,
        }
    }

    #[test]
    fn hot_request_becomes_typed_v3_request() {
        let source = HatHotRequest::V2Hot(HotRequest {
            request_id: 8,
            latitude: 37.5,
            longitude: -122.25,
        });
        let packet = hat_hot_request(&source, CigiVersion::V3).unwrap();
        assert_eq!(
            packet,
            Packet::from(HatHotRequest::V3(HatHotRequestV3 {
                request_id: 8,
                request_type: HatHotRequestType::HeightOfTerrain,
                position: GeodeticPoint {
                    altitude: 0.0,
                    ..point()
                },
                ..HatHotRequestV3::default()
            }))
        );
        let Packet::HatHotRequest(request) = &packet else {
            panic!("unexpected {packet:?}");
        };
        let back = hat_hot_request(request, CigiVersion::V2).unwrap();
        assert_eq!(back, Packet::from(source));
    }

    #[test]
    fn hot_request_has_no_cigi_1_form() {
        let source = HatHotRequest::V2Hot(HotRequest::default());
        assert_eq!(
            hat_hot_request(&source, CigiVersion::V1),
            Err(PacketError::NoConversionAvailable {
                subject: ConversionSubject::Enum {
                    table: ConversionTable::TerrainQuery,
                    value: HatHotRequestType::HeightOfTerrain.raw(),
                },
                target: CigiVersion::V1,
            })
        );
        let hat = HatHotRequest::V2Hat(HatRequest {
            request_id: 1,
            position: point(),
        });
        assert_eq!(
            hat_hot_request(&hat, CigiVersion::V1),
            Ok(Packet::from(HatHotRequest::V1(HatRequest {
                request_id: 1,
                position: point(),
            })))
        );
    }

    #[test]
    fn entity_relative_request_stays_in_cigi_3() {
        let source = HatHotRequest::V3(HatHotRequestV3 {
            coordinates: QueryCoordinates::Entity,
            entity_id: 4,
            ..HatHotRequestV3::default()
        });
        assert_eq!(
            hat_hot_request(&source, CigiVersion::V2),
            Err(no_field(PacketKind::HatHotRequest, "coordinates", CigiVersion::V2))
        );
    }

    #[test]
    fn height_response_keeps_query_kind() {
        let source = HatHotResponse::V3(HatHotResponseV3 {
            request_id: 2,
            valid: true,
            response_type: HatHotResponseType::HeightOfTerrain,
            height: 512.0,
        });
        let packet = hat_hot_response(&source, CigiVersion::V2).unwrap();
        assert_eq!(
            packet,
            Packet::from(HatHotResponse::V2Hot(HeightResponse {
                request_id: 2,
                valid: true,
                height: 512.0,
                material_code: 0,
            }))
        );
        assert!(hat_hot_response(&source, CigiVersion::V1).is_err());
    }

    #[test]
    fn occult_request_roundtrips_through_segment() {
        let source = LosSegmentRequest::V1(LosOccultRequest {
            request_id: 3,
            source: point(),
            destination: GeodeticPoint::default(),
        });
        let Packet::LosSegmentRequest(segment) =
            los_segment_request(&source, CigiVersion::V3_3).unwrap()
        else {
            panic!("expected a LOS Segment Request");
        };
        assert!(matches!(segment, LosSegmentRequest::V3_2(_)));
        assert_eq!(
            los_segment_request(&segment, CigiVersion::V1),
            Ok(Packet::from(source))
        );
    }

    #[test]
    fn entity_relative_segment_stays_in_cigi_3() {
        let source = LosSegmentRequest::V3(LosSegmentRequestV3 {
            destination_coordinates: QueryCoordinates::Entity,
            ..LosSegmentRequestV3::default()
        });
        assert_eq!(
            los_segment_request(&source, CigiVersion::V2),
            Err(no_field(
                PacketKind::LosSegmentRequest,
                "destination_coordinates",
                CigiVersion::V2
            ))
        );
    }

    #[test]
    fn range_request_and_vector_request() {
        let source = LosVectorRequest::V2(LosRangeRequest {
            request_id: 6,
            azimuth: 45.0,
            max_range: 1000.0,
            ..LosRangeRequest::default()
        });
        let Packet::LosVectorRequest(LosVectorRequest::V3(vector)) =
            los_vector_request(&source, CigiVersion::V3).unwrap()
        else {
            panic!("expected a LOS Vector Request");
        };
        assert_eq!(vector.response_coordinates, QueryCoordinates::Geodetic);
        assert!((vector.azimuth - 45.0).abs() < f32::EPSILON);
        assert_eq!(
            los_vector_request(&LosVectorRequest::V3(vector), CigiVersion::V2),
            Ok(Packet::from(source))
        );
    }

    #[test]
    fn los_response_defaults() {
        let source = LosResponse::V2(LegacyLosResponse {
            request_id: 1,
            valid: true,
            entity_id: 9,
            range: 250.0,
            intersection: point(),
        });
        let Packet::LosResponse(LosResponse::V3(response)) =
            los_response(&source, CigiVersion::V3).unwrap()
        else {
            panic!("expected a CIGI 3 LOS Response");
        };
        assert!(response.entity_id_valid);
        assert_eq!(response.response_count, 1);

        let Packet::LosResponse(LosResponse::V1(legacy)) =
            los_response(&LosResponse::V3(response), CigiVersion::V1).unwrap()
        else {
            panic!("expected a CIGI 1 LOS Response");
        };
        assert_eq!(legacy.entity_id, 9);
        assert_eq!(legacy.intersection, GeodeticPoint::default());
    }
}
