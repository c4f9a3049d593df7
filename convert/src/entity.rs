//! Entity and component conversion.

use wire::{
    AnimationState, ArticulatedPart, ArticulatedPartControl, CigiVersion, ComponentClassV1,
    ComponentClassV2, ComponentClassV3, ComponentControl, ComponentControlV3, EntityControl,
    EntityControlV1, EntityControlV2, EntityControlV3, EntityPose, EntityState, GroundClamp,
    LegacyComponentControl, LegacyRateControl, Packet, PacketKind, PacketResult, RateControl,
    RateControlV3, ShortComponentControl, SpecialEffectDefinition, TrajectoryDefinition,
};

use crate::packet::{no_field, no_packet, Era};
use crate::tables::{
    ANIMATION_LEGACY_TO_V3, ANIMATION_V3_TO_LEGACY, COMPONENT_CLASS_V1_TO_V2,
    COMPONENT_CLASS_V1_TO_V3, COMPONENT_CLASS_V2_TO_V1, COMPONENT_CLASS_V2_TO_V3,
    COMPONENT_CLASS_V3_3_TO_V3_0, COMPONENT_CLASS_V3_TO_V1, COMPONENT_CLASS_V3_TO_V2,
};

/// CIGI 3 alpha for a CIGI 2 opacity percentage.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn opacity_to_alpha(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 100.0) * 255.0 / 100.0).round() as u8
}

/// CIGI 2 opacity percentage for a CIGI 3 alpha.
fn alpha_to_opacity(alpha: u8) -> f32 {
    f32::from(alpha) * 100.0 / 255.0
}

#[derive(Debug, Default)]
struct EntityFields {
    entity_id: u16,
    entity_state: EntityState,
    attached: bool,
    collision_detection: bool,
    animation_state: AnimationState,
    inherit_alpha: bool,
    ground_clamp: GroundClamp,
    animation_backward: bool,
    animation_looping: bool,
    extrapolation: bool,
    alpha: u8,
    opacity: f32,
    internal_temperature: f32,
    entity_type: u16,
    parent_id: u16,
    pose: EntityPose,
}

impl EntityFields {
    fn lift(packet: &EntityControl, target: CigiVersion) -> PacketResult<Self> {
        Ok(match packet {
            EntityControl::V1(p) => Self {
                entity_id: p.entity_id,
                entity_state: p.entity_state,
                attached: p.attached,
                collision_detection: p.collision_detection,
                animation_state: ANIMATION_LEGACY_TO_V3.map(p.effect_state, target)?,
                alpha: u8::MAX,
                opacity: 100.0,
                entity_type: p.entity_type,
                parent_id: p.parent_id,
                pose: p.pose,
                ..Self::default()
            },
            EntityControl::V2(p) => Self {
                entity_id: p.entity_id,
                entity_state: p.entity_state,
                attached: p.attached,
                collision_detection: p.collision_detection,
                animation_state: ANIMATION_LEGACY_TO_V3.map(p.effect_state, target)?,
                alpha: opacity_to_alpha(p.opacity),
                opacity: p.opacity,
                internal_temperature: p.internal_temperature,
                entity_type: p.entity_type,
                parent_id: p.parent_id,
                pose: p.pose,
                ..Self::default()
            },
            EntityControl::V3(p) => Self {
                entity_id: p.entity_id,
                entity_state: p.entity_state,
                attached: p.attached,
                collision_detection: p.collision_detection,
                animation_state: p.animation_state,
                inherit_alpha: p.inherit_alpha,
                ground_clamp: p.ground_clamp,
                animation_backward: p.animation_backward,
                animation_looping: p.animation_looping,
                extrapolation: p.extrapolation,
                alpha: p.alpha,
                opacity: alpha_to_opacity(p.alpha),
                entity_type: p.entity_type,
                parent_id: p.parent_id,
                pose: p.pose,
                ..Self::default()
            },
        })
    }

    fn lower(&self, target: CigiVersion) -> PacketResult<EntityControl> {
        Ok(match Era::of(target) {
            Era::Cigi1 => EntityControl::V1(EntityControlV1 {
                entity_id: self.entity_id,
                entity_state: self.entity_state,
                attached: self.attached,
                collision_detection: self.collision_detection,
                effect_state: ANIMATION_V3_TO_LEGACY.map(self.animation_state, target)?,
                entity_type: self.entity_type,
                parent_id: self.parent_id,
                pose: self.pose,
            }),
            Era::Cigi2 => EntityControl::V2(EntityControlV2 {
                entity_id: self.entity_id,
                entity_state: self.entity_state,
                attached: self.attached,
                collision_detection: self.collision_detection,
                effect_state: ANIMATION_V3_TO_LEGACY.map(self.animation_state, target)?,
                entity_type: self.entity_type,
                parent_id: self.parent_id,
                opacity: self.opacity,
                internal_temperature: self.internal_temperature,
                pose: self.pose,
            }),
            Era::Cigi3 => EntityControl::V3(EntityControlV3 {
                entity_id: self.entity_id,
                entity_state: self.entity_state,
                attached: self.attached,
                collision_detection: self.collision_detection,
                inherit_alpha: self.inherit_alpha,
                ground_clamp: self.ground_clamp,
                animation_backward: self.animation_backward,
                animation_looping: self.animation_looping,
                animation_state: self.animation_state,
                extrapolation: self.extrapolation,
                alpha: self.alpha,
                entity_type: self.entity_type,
                parent_id: self.parent_id,
                pose: self.pose,
            }),
        })
    }
}

pub(crate) fn entity_control(packet: &EntityControl, target: CigiVersion) -> PacketResult<Packet> {
    EntityFields::lift(packet, target)?
        .lower(target)
        .map(Packet::from)
}

/// A component class in the enumeration of the layout it was read from.
#[derive(Debug, Clone, Copy)]
enum Class {
    V1(ComponentClassV1),
    V2(ComponentClassV2),
    V3(ComponentClassV3),
}

impl Class {
    fn to_v1(self, target: CigiVersion) -> PacketResult<ComponentClassV1> {
        match self {
            Self::V1(class) => Ok(class),
            Self::V2(class) => COMPONENT_CLASS_V2_TO_V1.map(class, target),
            Self::V3(class) => COMPONENT_CLASS_V3_TO_V1.map(class, target),
        }
    }

    fn to_v2(self, target: CigiVersion) -> PacketResult<ComponentClassV2> {
        match self {
            Self::V1(class) => COMPONENT_CLASS_V1_TO_V2.map(class, target),
            Self::V2(class) => Ok(class),
            Self::V3(class) => COMPONENT_CLASS_V3_TO_V2.map(class, target),
        }
    }

    fn to_v3(self, target: CigiVersion) -> PacketResult<ComponentClassV3> {
        match self {
            Self::V1(class) => COMPONENT_CLASS_V1_TO_V3.map(class, target),
            Self::V2(class) => COMPONENT_CLASS_V2_TO_V3.map(class, target),
            Self::V3(class) if target < CigiVersion::V3_3 => {
                COMPONENT_CLASS_V3_3_TO_V3_0.map(class, target)
            }
            Self::V3(class) => Ok(class),
        }
    }
}

#[derive(Debug)]
struct ComponentFields {
    component_id: u16,
    instance_id: u16,
    class: Class,
    state: u8,
    data: [u32; 6],
}

impl ComponentFields {
    fn from_legacy<C: Copy>(
        packet: &LegacyComponentControl<C>,
        class: fn(C) -> Class,
    ) -> Self {
        let [a, b, c] = packet.data;
        Self {
            component_id: packet.component_id,
            instance_id: packet.instance_id,
            class: class(packet.component_class),
            state: packet.component_state,
            data: [a, b, c, 0, 0, 0],
        }
    }

    fn lift(packet: &ComponentControl) -> Self {
        match packet {
            ComponentControl::V1(p) => Self::from_legacy(p, Class::V1),
            ComponentControl::V2(p) => Self::from_legacy(p, Class::V2),
            ComponentControl::V3(p) => Self {
                component_id: p.component_id,
                instance_id: p.instance_id,
                class: Class::V3(p.component_class),
                state: p.component_state,
                data: p.data,
            },
        }
    }

    fn lift_short(packet: &ShortComponentControl) -> Self {
        let [a, b] = packet.data;
        Self {
            component_id: packet.component_id,
            instance_id: packet.instance_id,
            class: Class::V3(packet.component_class),
            state: packet.component_state,
            data: [a, b, 0, 0, 0, 0],
        }
    }

    fn legacy<C>(&self, component_class: C) -> LegacyComponentControl<C> {
        LegacyComponentControl {
            instance_id: self.instance_id,
            component_class,
            component_state: self.state,
            component_id: self.component_id,
            data: [self.data[0], self.data[1], self.data[2]],
        }
    }

    fn lower(&self, target: CigiVersion) -> PacketResult<ComponentControl> {
        Ok(match Era::of(target) {
            Era::Cigi1 => ComponentControl::V1(self.legacy(self.class.to_v1(target)?)),
            Era::Cigi2 => ComponentControl::V2(self.legacy(self.class.to_v2(target)?)),
            Era::Cigi3 => ComponentControl::V3(ComponentControlV3 {
                component_id: self.component_id,
                instance_id: self.instance_id,
                component_class: self.class.to_v3(target)?,
                component_state: self.state,
                data: self.data,
            }),
        })
    }
}

pub(crate) fn component_control(
    packet: &ComponentControl,
    target: CigiVersion,
) -> PacketResult<Packet> {
    ComponentFields::lift(packet)
        .lower(target)
        .map(Packet::from)
}

/// CIGI 3 short form; CIGI 1 and 2 receive the full Component Control.
pub(crate) fn short_component_control(
    packet: &ShortComponentControl,
    target: CigiVersion,
) -> PacketResult<Packet> {
    let fields = ComponentFields::lift_short(packet);
    if Era::of(target) == Era::Cigi3 {
        return Ok(Packet::from(ShortComponentControl {
            component_class: fields.class.to_v3(target)?,
            ..*packet
        }));
    }
    fields.lower(target).map(Packet::from)
}

fn part_in(part: ArticulatedPart, target: CigiVersion) -> ArticulatedPartControl {
    match Era::of(target) {
        Era::Cigi1 => ArticulatedPartControl::V1(part),
        Era::Cigi2 => ArticulatedPartControl::V2(part),
        Era::Cigi3 => ArticulatedPartControl::V3(part),
    }
}

pub(crate) fn articulated_part(
    packet: &ArticulatedPartControl,
    target: CigiVersion,
) -> PacketResult<Packet> {
    let part = match packet {
        ArticulatedPartControl::V1(p)
        | ArticulatedPartControl::V2(p)
        | ArticulatedPartControl::V3(p) => *p,
    };
    Ok(Packet::from(part_in(part, target)))
}

pub(crate) fn rate_control(packet: &RateControl, target: CigiVersion) -> PacketResult<Packet> {
    let rates = match packet {
        RateControl::V1(p) | RateControl::V2(p) => RateControlV3 {
            entity_id: p.entity_id,
            part_id: p.part_id,
            apply_to_part: p.apply_to_part,
            local_coordinates: false,
            rates: p.rates,
        },
        RateControl::V3(p) => *p,
    };
    let legacy = || -> PacketResult<LegacyRateControl> {
        if rates.local_coordinates {
            return Err(no_field(PacketKind::RateControl, "local_coordinates", target));
        }
        Ok(LegacyRateControl {
            entity_id: rates.entity_id,
            part_id: rates.part_id,
            apply_to_part: rates.apply_to_part,
            rates: rates.rates,
        })
    };
    Ok(Packet::from(match Era::of(target) {
        Era::Cigi1 => RateControl::V1(legacy()?),
        Era::Cigi2 => RateControl::V2(legacy()?),
        Era::Cigi3 => RateControl::V3(rates),
    }))
}

pub(crate) fn trajectory(
    packet: &TrajectoryDefinition,
    target: CigiVersion,
) -> PacketResult<Packet> {
    let trajectory = match packet {
        TrajectoryDefinition::V1(p)
        | TrajectoryDefinition::V2(p)
        | TrajectoryDefinition::V3(p) => *p,
    };
    Ok(Packet::from(match Era::of(target) {
        Era::Cigi1 => TrajectoryDefinition::V1(trajectory),
        Era::Cigi2 => TrajectoryDefinition::V2(trajectory),
        Era::Cigi3 => TrajectoryDefinition::V3(trajectory),
    }))
}

/// CIGI 3 dropped Special Effect Definition.
pub(crate) fn special_effect(
    packet: &SpecialEffectDefinition,
    target: CigiVersion,
) -> PacketResult<Packet> {
    let effect = match packet {
        SpecialEffectDefinition::V1(p) | SpecialEffectDefinition::V2(p) => *p,
    };
    match Era::of(target) {
        Era::Cigi1 => Ok(Packet::from(SpecialEffectDefinition::V1(effect))),
        Era::Cigi2 => Ok(Packet::from(SpecialEffectDefinition::V2(effect))),
        Era::Cigi3 => Err(no_packet(PacketKind::SpecialEffectDefinition, target)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire::{
        CigiMessage, ConversionSubject, ConversionTable, EffectAnimationState, Offset6,
        PacketError, Trajectory, WireEnum,
    };

    #[test]
    fn environment_component_becomes_atmosphere() {
        let source = ComponentControl::V1(LegacyComponentControl {
            instance_id: 2,
            component_class: ComponentClassV1::Environment,
            component_state: 1,
            component_id: 40,
            data: [1, 2, 3],
        });
        let packet = component_control(&source, CigiVersion::V3).unwrap();
        assert_eq!(
            packet,
            Packet::from(ComponentControl::V3(ComponentControlV3 {
                component_id: 40,
                instance_id: 2,
                component_class: ComponentClassV3::Atmosphere,
                component_state: 1,
                data: [1, 2, 3, 0, 0, 0],
            }))
        );
    }

    #[test]
    fn short_sensor_component_has_no_cigi_1_class() {
        let source = ShortComponentControl {
            component_class: ComponentClassV3::Sensor,
            ..ShortComponentControl::default()
        };
        assert_eq!(
            short_component_control(&source, CigiVersion::V1),
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
    fn short_component_expands_for_cigi_2() {
        let source = ShortComponentControl {
            component_id: 7,
            component_class: ComponentClassV3::Sensor,
            data: [10, 20],
            ..ShortComponentControl::default()
        };
        let packet = short_component_control(&source, CigiVersion::V2).unwrap();
        let Packet::ComponentControl(ComponentControl::V2(control)) = packet else {
            panic!("expected a CIGI 2 Component Control");
        };
        assert_eq!(control.component_class, ComponentClassV2::Sensor);
        assert_eq!(control.data, [10, 20, 0]);
        assert_eq!(control.component_id, 7);
    }

    #[test]
    fn symbol_component_needs_3_3() {
        let source = ComponentControl::V3(ComponentControlV3 {
            component_class: ComponentClassV3::SymbolSurface,
            ..ComponentControlV3::default()
        });
        assert_eq!(source.version(), CigiVersion::V3_3);
        assert!(component_control(&source, CigiVersion::V3_2).is_err());
        assert!(component_control(&source, CigiVersion::V2).is_err());
    }

    #[test]
    fn entity_opacity_and_alpha() {
        let source = EntityControl::V2(EntityControlV2 {
            entity_id: 3,
            opacity: 50.0,
            effect_state: EffectAnimationState::Restart,
            ..EntityControlV2::default()
        });
        let packet = entity_control(&source, CigiVersion::V3).unwrap();
        let Packet::EntityControl(EntityControl::V3(entity)) = packet else {
            panic!("expected a CIGI 3 Entity Control");
        };
        assert_eq!(entity.alpha, 128);
        assert_eq!(entity.animation_state, AnimationState::Play);

        let v1 = EntityControl::V1(EntityControlV1::default());
        let Packet::EntityControl(EntityControl::V3(entity)) =
            entity_control(&v1, CigiVersion::V3_3).unwrap()
        else {
            panic!("expected a CIGI 3 Entity Control");
        };
        assert_eq!(entity.alpha, 255);
        assert_eq!(entity.ground_clamp, GroundClamp::NoClamp);

        let Packet::EntityControl(EntityControl::V2(entity)) =
            entity_control(&v1, CigiVersion::V2).unwrap()
        else {
            panic!("expected a CIGI 2 Entity Control");
        };
        assert!((entity.opacity - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn paused_entity_has_no_legacy_state() {
        let source = EntityControl::V3(EntityControlV3 {
            animation_state: AnimationState::Pause,
            ..EntityControlV3::default()
        });
        assert!(entity_control(&source, CigiVersion::V1).is_err());
        assert!(entity_control(&source, CigiVersion::V3_2).is_ok());
    }

    #[test]
    fn local_rates_stay_in_cigi_3() {
        let source = RateControl::V3(RateControlV3 {
            local_coordinates: true,
            rates: Offset6 {
                yaw: 3.0,
                ..Offset6::default()
            },
            ..RateControlV3::default()
        });
        assert_eq!(
            rate_control(&source, CigiVersion::V2),
            Err(no_field(PacketKind::RateControl, "local_coordinates", CigiVersion::V2))
        );
        let world = RateControl::V3(RateControlV3::default());
        assert_eq!(
            rate_control(&world, CigiVersion::V1),
            Ok(Packet::from(RateControl::V1(LegacyRateControl::default())))
        );
    }

    #[test]
    fn trajectory_and_effects() {
        let source = TrajectoryDefinition::V1(Trajectory {
            entity_id: 9,
            acceleration_z: -9.8,
            ..Trajectory::default()
        });
        assert_eq!(
            trajectory(&source, CigiVersion::V3_3).unwrap().version(),
            CigiVersion::V3
        );
        let effect = SpecialEffectDefinition::V2(wire::SpecialEffect::default());
        assert!(special_effect(&effect, CigiVersion::V1).is_ok());
        assert_eq!(
            special_effect(&effect, CigiVersion::V3),
            Err(no_packet(PacketKind::SpecialEffectDefinition, CigiVersion::V3))
        );
    }
}
