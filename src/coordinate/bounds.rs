//! Latitude windows and raw-space rectangles

use super::point::GeoPoint;
use crate::errors::{MapError, MapResult};

/// The latitude band the map renders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleBounds {
    /// Northern edge in degrees
    pub north: f64,
    /// Southern edge in degrees
    pub south: f64,
}

impl VisibleBounds {
    /// Create a validated latitude window
    ///
    /// # Arguments
    /// * `north` - Northern edge, must be greater than `south`
    /// * `south` - Southern edge
    ///
    /// # Returns
    /// The bounds, or `MapError::InvalidBounds` when the window is empty,
    /// inverted or reaches past the poles
    pub fn new(north: f64, south: f64) -> MapResult<Self> {
        let bounds = VisibleBounds { north, south };
        if bounds.is_valid() {
            Ok(bounds)
        } else {
            Err(MapError::InvalidBounds { north, south })
        }
    }

    /// Whether the window is non-empty and within [-90, 90]
    pub fn is_valid(&self) -> bool {
        self.north.is_finite()
            && self.south.is_finite()
            && self.north > self.south
            && self.north <= 90.0
            && self.south >= -90.0
    }

    /// Latitude span in degrees
    pub fn span(&self) -> f64 {
        self.north - self.south
    }

    /// Clamp a latitude into the window
    pub fn clamp(&self, lat: f64) -> f64 {
        lat.max(self.south).min(self.north)
    }

    /// Check if a latitude lies inside the window
    pub fn contains(&self, lat: f64) -> bool {
        lat >= self.south && lat <= self.north
    }
}

impl Default for VisibleBounds {
    fn default() -> Self {
        VisibleBounds { north: 70.0, south: -70.0 }
    }
}

/// Geographic point chosen as the map's longitude-0 reference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimeMeridianRef {
    pub lat: f64,
    pub lng: f64,
}

impl PrimeMeridianRef {
    /// Create a new reference point
    pub fn new(lat: f64, lng: f64) -> Self {
        PrimeMeridianRef { lat, lng }
    }
}

impl From<PrimeMeridianRef> for GeoPoint {
    fn from(reference: PrimeMeridianRef) -> Self {
        GeoPoint::new(reference.lat, reference.lng)
    }
}

/// An axis-aligned rectangle in raw pixel space
///
/// Horizontal extents may run past `[0, raw_width]` when the view straddles
/// the wraparound seam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawWindow {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl RawWindow {
    /// Create a new raw window
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        RawWindow { min_x, min_y, max_x, max_y }
    }

    /// Get the width of the window
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Get the height of the window
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if a horizontal position lies inside the window
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.min_x && x <= self.max_x
    }

    /// Check if a vertical position lies inside the window
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.min_y && y <= self.max_y
    }

    /// Grow the window on every side by a fraction of its own size
    ///
    /// # Arguments
    /// * `fraction` - Share of width (and height) added to each side
    pub fn buffered(&self, fraction: f64) -> Self {
        let dx = self.width() * fraction;
        let dy = self.height() * fraction;
        RawWindow::new(self.min_x - dx, self.min_y - dy, self.max_x + dx, self.max_y + dy)
    }
}
