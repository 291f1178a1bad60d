//! Raw pixel <-> geographic coordinate transformation
//!
//! Latitude is spread linearly over the raw height between the visible
//! bounds. Longitude is either spread over the raw width (standard mode) or
//! measured from the prime meridian with the shorter wraparound distance
//! (meridian-relative mode). Both directions are total: out-of-range input is
//! clamped or wrapped, never rejected.

use super::bounds::VisibleBounds;
use super::point::{GeoPoint, RawPoint};
use crate::config::{HemisphereConvention, LongitudeMode, MapConfig, FALLBACK_RAW_HEIGHT, FALLBACK_RAW_WIDTH};

/// Values this close to ±180° are treated as the antimeridian
const ANTIMERIDIAN_EPSILON: f64 = 1e-9;

/// Normalize a longitude into `[-180, 180)`
///
/// Rounding noise on either side of the antimeridian folds onto -180, so it
/// has a single representation.
pub fn normalize_longitude(lng: f64) -> f64 {
    if !lng.is_finite() {
        return 0.0;
    }
    let normalized = (lng + 180.0).rem_euclid(360.0) - 180.0;
    if normalized >= 180.0 - ANTIMERIDIAN_EPSILON || normalized < -180.0 + ANTIMERIDIAN_EPSILON {
        -180.0
    } else {
        normalized
    }
}

/// Wrap a raw X position into `[0, width)`
pub fn wrap_x(x: f64, width: f64) -> f64 {
    let wrapped = x.rem_euclid(width);
    if wrapped >= width {
        0.0
    } else {
        wrapped
    }
}

/// Shortest signed horizontal distance for a wrapping world
///
/// # Arguments
/// * `dx` - Literal distance, any magnitude
/// * `width` - World width
///
/// # Returns
/// The equivalent distance in `(-width/2, width/2]`
pub fn shortest_wrap_delta(dx: f64, width: f64) -> f64 {
    let d = dx.rem_euclid(width);
    if d > width / 2.0 {
        d - width
    } else {
        d
    }
}

/// Stateless converter between raw pixels and geographic coordinates
#[derive(Debug, Clone, Copy)]
pub struct GeoTransform<'a> {
    config: &'a MapConfig,
}

impl<'a> GeoTransform<'a> {
    /// Create a transformer over a configuration
    pub fn new(config: &'a MapConfig) -> Self {
        GeoTransform { config }
    }

    /// Raw width, falling back when the configured one is unusable
    pub fn width(&self) -> f64 {
        if self.config.has_valid_dimensions() {
            self.config.raw_width
        } else {
            FALLBACK_RAW_WIDTH
        }
    }

    /// Raw height, falling back when the configured one is unusable
    pub fn height(&self) -> f64 {
        if self.config.has_valid_dimensions() {
            self.config.raw_height
        } else {
            FALLBACK_RAW_HEIGHT
        }
    }

    /// Convert a raw pixel position to a geographic coordinate
    pub fn raw_to_geo(&self, x: f64, y: f64) -> GeoPoint {
        GeoPoint::new(self.y_to_latitude(y), self.x_to_longitude(x))
    }

    /// Convert a geographic coordinate to a raw pixel position
    ///
    /// Latitudes outside the visible bounds land on the nearest edge; the
    /// resulting X is always within `[0, raw_width)`.
    pub fn geo_to_raw(&self, lat: f64, lng: f64) -> RawPoint {
        RawPoint::new(self.longitude_to_x(lng), self.latitude_to_y(lat))
    }

    /// Convert a raw point to a geographic coordinate
    pub fn raw_point_to_geo(&self, point: &RawPoint) -> GeoPoint {
        self.raw_to_geo(point.x, point.y)
    }

    /// Convert a geographic point to a raw point
    pub fn geo_point_to_raw(&self, point: &GeoPoint) -> RawPoint {
        self.geo_to_raw(point.lat, point.lng)
    }

    /// Latitude at a raw Y position
    pub fn y_to_latitude(&self, y: f64) -> f64 {
        let y = if y.is_finite() { y } else { 0.0 };
        let bounds = self.bounds();
        let t = y / self.height();
        match self.config.hemisphere {
            HemisphereConvention::NorthUp => bounds.north - t * bounds.span(),
            HemisphereConvention::SouthUp => bounds.south + t * bounds.span(),
        }
    }

    /// Raw Y position of a latitude, clamped to the visible bounds
    pub fn latitude_to_y(&self, lat: f64) -> f64 {
        let bounds = self.bounds();
        let lat = bounds.clamp(if lat.is_finite() { lat } else { 0.0 });
        let t = match self.config.hemisphere {
            HemisphereConvention::NorthUp => (bounds.north - lat) / bounds.span(),
            HemisphereConvention::SouthUp => (lat - bounds.south) / bounds.span(),
        };
        t * self.height()
    }

    /// Longitude at a raw X position, in `[-180, 180)`
    pub fn x_to_longitude(&self, x: f64) -> f64 {
        let x = if x.is_finite() { x } else { 0.0 };
        match self.config.longitude_mode {
            LongitudeMode::Standard => self.standard_x_to_longitude(x),
            LongitudeMode::MeridianRelative => {
                let width = self.width();
                let offset = shortest_wrap_delta(x - self.config.prime_meridian_x, width);
                normalize_longitude(self.reference_longitude() + offset * 360.0 / width)
            },
        }
    }

    /// Raw X position of a longitude, in `[0, raw_width)`
    pub fn longitude_to_x(&self, lng: f64) -> f64 {
        match self.config.longitude_mode {
            LongitudeMode::Standard => self.standard_longitude_to_x(lng),
            LongitudeMode::MeridianRelative => {
                let width = self.width();
                let offset = normalize_longitude(lng - self.reference_longitude());
                wrap_x(self.config.prime_meridian_x + offset * width / 360.0, width)
            },
        }
    }

    /// Longitude at a raw X position ignoring the prime meridian
    pub fn standard_x_to_longitude(&self, x: f64) -> f64 {
        normalize_longitude(x / self.width() * 360.0 - 180.0)
    }

    /// Raw X position of a longitude ignoring the prime meridian
    pub fn standard_longitude_to_x(&self, lng: f64) -> f64 {
        let width = self.width();
        wrap_x((normalize_longitude(lng) + 180.0) / 360.0 * width, width)
    }

    /// Raw X of the prime meridian
    pub fn prime_meridian_x(&self) -> f64 {
        match self.config.longitude_mode {
            LongitudeMode::Standard => self.standard_longitude_to_x(0.0),
            LongitudeMode::MeridianRelative => wrap_x(self.config.prime_meridian_x, self.width()),
        }
    }

    /// Horizontal raw pixels per degree of longitude
    pub fn pixels_per_degree_x(&self) -> f64 {
        self.width() / 360.0
    }

    fn reference_longitude(&self) -> f64 {
        self.config.prime_meridian_ref.map(|r| r.lng).unwrap_or(0.0)
    }

    fn bounds(&self) -> VisibleBounds {
        if self.config.visible_bounds.is_valid() {
            self.config.visible_bounds
        } else {
            VisibleBounds::default()
        }
    }
}
