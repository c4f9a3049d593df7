//! Packet ids per CIGI version.
//!
//! Ids are only meaningful together with a version: the same byte names
//! different packets in CIGI 1/2 and CIGI 3.

/// CIGI 1 packet ids.
pub mod v1 {
    pub const IG_CONTROL: u8 = 1;
    pub const ENTITY_CONTROL: u8 = 2;
    pub const COMPONENT_CONTROL: u8 = 3;
    pub const ARTICULATED_PART_CONTROL: u8 = 4;
    pub const RATE_CONTROL: u8 = 5;
    pub const ENVIRONMENT_CONTROL: u8 = 6;
    pub const WEATHER_CONTROL: u8 = 7;
    pub const VIEW_CONTROL: u8 = 8;
    pub const SENSOR_CONTROL: u8 = 9;
    pub const TRAJECTORY_DEFINITION: u8 = 10;
    pub const SPECIAL_EFFECT_DEFINITION: u8 = 11;
    pub const VIEW_DEFINITION: u8 = 12;
    pub const COLLISION_SEGMENT_DEFINITION: u8 = 13;
    pub const HAT_REQUEST: u8 = 15;
    pub const LOS_OCCULT_REQUEST: u8 = 16;
    pub const LOS_RANGE_REQUEST: u8 = 17;

    pub const START_OF_FRAME: u8 = 101;
    pub const HAT_RESPONSE: u8 = 102;
    pub const LOS_RESPONSE: u8 = 103;
    pub const COLLISION_SEGMENT_RESPONSE: u8 = 104;
    pub const SENSOR_RESPONSE: u8 = 105;
}

/// CIGI 2 packet ids: every CIGI 1 id plus the packets CIGI 2 added.
pub mod v2 {
    pub use super::v1::*;

    pub const COLLISION_VOLUME_DEFINITION: u8 = 14;
    pub const HOT_REQUEST: u8 = 18;

    pub const HOT_RESPONSE: u8 = 106;
    pub const COLLISION_VOLUME_RESPONSE: u8 = 107;
    pub const IG_MESSAGE: u8 = 108;
}

/// CIGI 3.x packet ids.
pub mod v3 {
    pub const IG_CONTROL: u8 = 1;
    pub const ENTITY_CONTROL: u8 = 2;
    pub const CONFORMAL_CLAMPED_ENTITY_CONTROL: u8 = 3;
    pub const COMPONENT_CONTROL: u8 = 4;
    pub const SHORT_COMPONENT_CONTROL: u8 = 5;
    pub const ARTICULATED_PART_CONTROL: u8 = 6;
    pub const SHORT_ARTICULATED_PART_CONTROL: u8 = 7;
    pub const RATE_CONTROL: u8 = 8;
    pub const CELESTIAL_SPHERE_CONTROL: u8 = 9;
    pub const ATMOSPHERE_CONTROL: u8 = 10;
    pub const ENVIRONMENTAL_REGION_CONTROL: u8 = 11;
    pub const WEATHER_CONTROL: u8 = 12;
    pub const MARITIME_SURFACE_CONDITIONS_CONTROL: u8 = 13;
    pub const WAVE_CONTROL: u8 = 14;
    pub const TERRESTRIAL_SURFACE_CONDITIONS_CONTROL: u8 = 15;
    pub const VIEW_CONTROL: u8 = 16;
    pub const SENSOR_CONTROL: u8 = 17;
    pub const MOTION_TRACKER_CONTROL: u8 = 18;
    pub const EARTH_REFERENCE_MODEL_DEFINITION: u8 = 19;
    pub const TRAJECTORY_DEFINITION: u8 = 20;
    pub const VIEW_DEFINITION: u8 = 21;
    pub const COLLISION_SEGMENT_DEFINITION: u8 = 22;
    pub const COLLISION_VOLUME_DEFINITION: u8 = 23;
    pub const HAT_HOT_REQUEST: u8 = 24;
    pub const LOS_SEGMENT_REQUEST: u8 = 25;
    pub const LOS_VECTOR_REQUEST: u8 = 26;
    pub const POSITION_REQUEST: u8 = 27;
    pub const ENVIRONMENTAL_CONDITIONS_REQUEST: u8 = 28;
    pub const SYMBOL_SURFACE_DEFINITION: u8 = 29;
    pub const SYMBOL_TEXT_DEFINITION: u8 = 30;
    pub const SYMBOL_CIRCLE_DEFINITION: u8 = 31;
    pub const SYMBOL_LINE_DEFINITION: u8 = 32;
    pub const SYMBOL_CLONE: u8 = 33;
    pub const SYMBOL_CONTROL: u8 = 34;
    pub const SHORT_SYMBOL_CONTROL: u8 = 35;

    pub const START_OF_FRAME: u8 = 101;
    pub const HAT_HOT_RESPONSE: u8 = 102;
    pub const HAT_HOT_EXTENDED_RESPONSE: u8 = 103;
    pub const LOS_RESPONSE: u8 = 104;
    pub const LOS_EXTENDED_RESPONSE: u8 = 105;
    pub const SENSOR_RESPONSE: u8 = 106;
    pub const SENSOR_EXTENDED_RESPONSE: u8 = 107;
    pub const POSITION_RESPONSE: u8 = 108;
    pub const WEATHER_CONDITIONS_RESPONSE: u8 = 109;
    pub const AEROSOL_CONCENTRATION_RESPONSE: u8 = 110;
    pub const MARITIME_SURFACE_CONDITIONS_RESPONSE: u8 = 111;
    pub const TERRESTRIAL_SURFACE_CONDITIONS_RESPONSE: u8 = 112;
    pub const COLLISION_SEGMENT_NOTIFICATION: u8 = 113;
    pub const COLLISION_VOLUME_NOTIFICATION: u8 = 114;
    pub const ANIMATION_STOP_NOTIFICATION: u8 = 115;
    pub const EVENT_NOTIFICATION: u8 = 116;
    pub const IG_MESSAGE: u8 = 117;
}
