pub mod errors;
pub mod config;
pub mod coordinate;
pub mod viewport;
pub mod grid;
pub mod overlay;
pub mod distance;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::{EventOutcome, IxMaps, MapEvent};
pub use crate::errors::{MapError, MapResult};

pub use config::{ConfigLoader, MapConfig, DEFAULT_CONFIG};
pub use coordinate::{DisplayPoint, DisplayScaleAdapter, DisplaySize, GeoPoint, GeoTransform, RawPoint, ScreenPoint};
pub use distance::{Distance, DistanceCalculator};
pub use grid::{GridRenderer, PrimeMeridianRenderer};
pub use overlay::{OverlayGroup, SvgWriter};
pub use viewport::{PanAction, Viewport, WrapPolicy};
