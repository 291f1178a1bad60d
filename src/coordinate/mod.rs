//! Coordinate handling for the map engine
//!
//! This module provides the point types for each coordinate space, the
//! visible latitude window, and the transformations between raw, display and
//! geographic coordinates.

mod bounds;
mod display;
mod point;
mod transform;

// Re-export key types
pub use self::bounds::{PrimeMeridianRef, RawWindow, VisibleBounds};
pub use self::display::DisplayScaleAdapter;
pub use self::point::{DisplayPoint, DisplaySize, GeoPoint, RawPoint, ScreenPoint};
pub use self::transform::{normalize_longitude, shortest_wrap_delta, wrap_x, GeoTransform};
