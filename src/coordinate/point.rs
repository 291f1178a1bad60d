//! Point structures for the three coordinate spaces
//!
//! Raw points live in the authoring-time SVG space, display points in the
//! fitted (but unzoomed) viewport space, and screen points in container
//! pixels at the current zoom. Keeping them as distinct types stops a raw
//! coordinate from being fed where a screen coordinate is expected.

/// A geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoPoint {
    /// Latitude, positive north
    pub lat: f64,
    /// Longitude, positive east
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new geographic point
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }
}

/// A pixel coordinate in the authoring-time SVG space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawPoint {
    pub x: f64,
    pub y: f64,
}

impl RawPoint {
    /// Create a new raw point
    pub fn new(x: f64, y: f64) -> Self {
        RawPoint { x, y }
    }
}

/// A pixel coordinate in the fitted display space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayPoint {
    pub x: f64,
    pub y: f64,
}

impl DisplayPoint {
    /// Create a new display point
    pub fn new(x: f64, y: f64) -> Self {
        DisplayPoint { x, y }
    }

    /// Euclidean distance to another display point
    pub fn distance_to(&self, other: &DisplayPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A pixel coordinate relative to the top-left corner of the map container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    /// Create a new screen point
    pub fn new(x: f64, y: f64) -> Self {
        ScreenPoint { x, y }
    }
}

/// Pixel size of the on-screen map container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

impl DisplaySize {
    /// Create a new display size
    pub fn new(width: f64, height: f64) -> Self {
        DisplaySize { width, height }
    }

    /// Whether both dimensions are finite and positive
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}
