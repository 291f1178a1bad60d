//! Map configuration
//!
//! `MapConfig` is constructed once per viewer and passed explicitly to every
//! coordinate component.

mod map_config;
mod loader;

pub use self::map_config::{
    HemisphereConvention, LongitudeMode, MapConfig, FALLBACK_RAW_HEIGHT, FALLBACK_RAW_WIDTH,
};
pub use self::loader::{ConfigLoader, DEFAULT_CONFIG};
