//! Map configuration shared by every coordinate component

use log::warn;

use crate::coordinate::{DisplaySize, GeoTransform, PrimeMeridianRef, VisibleBounds};

/// Raw width used when the configured one cannot describe a map
pub const FALLBACK_RAW_WIDTH: f64 = 8202.0;
/// Raw height used when the configured one cannot describe a map
pub const FALLBACK_RAW_HEIGHT: f64 = 4900.0;

/// How raw X positions translate to longitudes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongitudeMode {
    /// `[0, raw_width]` spans `[-180, 180]`
    Standard,
    /// Longitudes are measured from the prime meridian with shortest wraparound
    MeridianRelative,
}

impl LongitudeMode {
    /// Parse a mode name as written in configuration files
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "standard" => Some(LongitudeMode::Standard),
            "meridian-relative" | "meridian_relative" | "relative" => Some(LongitudeMode::MeridianRelative),
            _ => None,
        }
    }
}

/// Which latitude sits at the top of the raw image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HemisphereConvention {
    /// `y = 0` is the northern edge; latitude falls as `y` grows
    NorthUp,
    /// `y = 0` is the southern edge; latitude rises as `y` grows
    SouthUp,
}

impl HemisphereConvention {
    /// Parse a convention name as written in configuration files
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "north-up" | "north_up" | "inverted" => Some(HemisphereConvention::NorthUp),
            "south-up" | "south_up" | "natural" => Some(HemisphereConvention::SouthUp),
            _ => None,
        }
    }
}

/// Process-wide map configuration
///
/// Built once at start-up and owned by a single viewer. Only the display
/// size changes afterwards (on container resize).
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Width of the authoring-time SVG in pixels
    pub raw_width: f64,
    /// Height of the authoring-time SVG in pixels
    pub raw_height: f64,
    /// Current size of the viewport, `None` until it is attached
    pub display: Option<DisplaySize>,
    /// Raw pixels per degree of longitude
    pub pixels_per_longitude_degree: f64,
    /// Raw pixels per degree of latitude
    pub pixels_per_latitude_degree: f64,
    /// Raw Y of latitude 0
    pub equator_y: f64,
    /// Raw X of the prime meridian
    pub prime_meridian_x: f64,
    /// Raw Y of the prime meridian reference point
    pub prime_meridian_y: f64,
    /// Recompute `prime_meridian_x` from the reference at init
    pub derive_prime_meridian_x: bool,
    /// Geographic point treated as longitude 0
    pub prime_meridian_ref: Option<PrimeMeridianRef>,
    /// Rendered latitude window
    pub visible_bounds: VisibleBounds,
    pub longitude_mode: LongitudeMode,
    pub hemisphere: HemisphereConvention,
    /// Ground miles covered by one display pixel at zoom 0
    pub miles_per_pixel: f64,
    /// Ground kilometres covered by one display pixel at zoom 0
    pub km_per_pixel: f64,
}

impl MapConfig {
    /// Build a configuration whose calibration constants agree with its dimensions
    ///
    /// # Arguments
    /// * `raw_width` - Width of the authoring-time SVG
    /// * `raw_height` - Height of the authoring-time SVG
    /// * `bounds` - Latitude window spread over the raw height
    ///
    /// # Returns
    /// A standard-mode configuration with the prime meridian at the centre
    pub fn calibrated(raw_width: f64, raw_height: f64, bounds: VisibleBounds) -> Self {
        let mut config = MapConfig {
            raw_width,
            raw_height,
            display: None,
            pixels_per_longitude_degree: 0.0,
            pixels_per_latitude_degree: 0.0,
            equator_y: 0.0,
            prime_meridian_x: raw_width / 2.0,
            prime_meridian_y: 0.0,
            derive_prime_meridian_x: false,
            prime_meridian_ref: None,
            visible_bounds: bounds,
            longitude_mode: LongitudeMode::Standard,
            hemisphere: HemisphereConvention::NorthUp,
            miles_per_pixel: 3.2,
            km_per_pixel: 5.15,
        };
        config.recalibrate();
        config
    }

    /// Recompute the derived calibration constants from dimensions and bounds
    pub fn recalibrate(&mut self) {
        self.pixels_per_longitude_degree = self.raw_width / 360.0;
        self.pixels_per_latitude_degree = self.raw_height / self.visible_bounds.span();
        self.equator_y = GeoTransform::new(self).latitude_to_y(0.0);
        self.prime_meridian_y = self.equator_y;
    }

    /// Attach the configuration to a viewport of the given size
    pub fn with_display(mut self, size: DisplaySize) -> Self {
        self.display = Some(size);
        self
    }

    /// Set the prime meridian reference point and switch to meridian-relative mode
    pub fn with_prime_meridian(mut self, reference: PrimeMeridianRef) -> Self {
        self.prime_meridian_ref = Some(reference);
        self.longitude_mode = LongitudeMode::MeridianRelative;
        self
    }

    /// Record a container resize
    pub fn resize(&mut self, size: DisplaySize) {
        self.display = Some(size);
    }

    /// Mark the viewport as detached
    pub fn detach(&mut self) {
        self.display = None;
    }

    /// Whether the raw dimensions can describe a map
    pub fn has_valid_dimensions(&self) -> bool {
        self.raw_width.is_finite() && self.raw_height.is_finite() && self.raw_width > 0.0 && self.raw_height > 0.0
    }

    /// Resolve and cache the prime meridian position
    ///
    /// When `derive_prime_meridian_x` is set, the X position is taken from the
    /// standard-mode transform of the reference point. The Y position always
    /// comes from the reference latitude. Without a reference the meridian
    /// stays where it is and sits on the equator.
    pub fn resolve_prime_meridian(&mut self) {
        let Some(reference) = self.prime_meridian_ref else {
            self.prime_meridian_y = self.equator_y;
            return;
        };

        let transform = GeoTransform::new(self);
        let y = transform.latitude_to_y(reference.lat);
        let x = if self.derive_prime_meridian_x {
            transform.standard_longitude_to_x(reference.lng)
        } else {
            self.prime_meridian_x
        };

        self.prime_meridian_x = x;
        self.prime_meridian_y = y;
        self.derive_prime_meridian_x = false;
    }

    /// Return a copy with unusable values replaced by safe defaults
    ///
    /// A broken coordinate system should still render something plausible,
    /// so nothing here fails. Every replacement is logged.
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();
        let mut recalibrate = false;

        if !config.has_valid_dimensions() {
            warn!("Raw dimensions {}x{} are unusable, falling back to {}x{}",
                  config.raw_width, config.raw_height, FALLBACK_RAW_WIDTH, FALLBACK_RAW_HEIGHT);
            config.raw_width = FALLBACK_RAW_WIDTH;
            config.raw_height = FALLBACK_RAW_HEIGHT;
            config.prime_meridian_x = FALLBACK_RAW_WIDTH / 2.0;
            recalibrate = true;
        }

        if !config.visible_bounds.is_valid() {
            warn!("Visible bounds north={} south={} are unusable, falling back to defaults",
                  config.visible_bounds.north, config.visible_bounds.south);
            config.visible_bounds = VisibleBounds::default();
            recalibrate = true;
        }

        if !config.prime_meridian_x.is_finite() {
            warn!("Prime meridian X is not finite, centring it");
            config.prime_meridian_x = config.raw_width / 2.0;
        }

        if let Some(display) = config.display {
            if !display.is_usable() {
                warn!("Display size {}x{} is unusable, treating viewport as detached",
                      display.width, display.height);
                config.display = None;
            }
        }

        if !(config.miles_per_pixel.is_finite() && config.miles_per_pixel > 0.0) {
            warn!("miles_per_pixel={} is unusable, falling back to 3.2", config.miles_per_pixel);
            config.miles_per_pixel = 3.2;
        }
        if !(config.km_per_pixel.is_finite() && config.km_per_pixel > 0.0) {
            warn!("km_per_pixel={} is unusable, falling back to 5.15", config.km_per_pixel);
            config.km_per_pixel = 5.15;
        }

        if recalibrate {
            config.recalibrate();
        }

        config
    }

    /// Report calibration inconsistencies without changing anything
    ///
    /// # Returns
    /// Human-readable warnings; empty when the configuration is consistent
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.has_valid_dimensions() {
            warnings.push(format!("raw dimensions {}x{} must be positive", self.raw_width, self.raw_height));
            return warnings;
        }
        if !self.visible_bounds.is_valid() {
            warnings.push(format!("visible bounds north={} south={} are invalid",
                                  self.visible_bounds.north, self.visible_bounds.south));
            return warnings;
        }

        let expected_lon = self.raw_width / 360.0;
        if relative_gap(self.pixels_per_longitude_degree, expected_lon) > 0.01 {
            warnings.push(format!("pixels_per_longitude_degree={:.4} disagrees with raw width (expected {:.4})",
                                  self.pixels_per_longitude_degree, expected_lon));
        }

        let expected_lat = self.raw_height / self.visible_bounds.span();
        if relative_gap(self.pixels_per_latitude_degree, expected_lat) > 0.01 {
            warnings.push(format!("pixels_per_latitude_degree={:.4} disagrees with raw height (expected {:.4})",
                                  self.pixels_per_latitude_degree, expected_lat));
        }

        let expected_equator = GeoTransform::new(self).latitude_to_y(0.0);
        if (self.equator_y - expected_equator).abs() > 0.01 * self.raw_height {
            warnings.push(format!("equator_y={:.2} disagrees with the visible bounds (expected {:.2})",
                                  self.equator_y, expected_equator));
        }

        if self.prime_meridian_x < 0.0 || self.prime_meridian_x >= self.raw_width {
            warnings.push(format!("prime meridian X {} lies outside [0, {})", self.prime_meridian_x, self.raw_width));
        }

        if self.longitude_mode == LongitudeMode::MeridianRelative && self.prime_meridian_ref.is_none() {
            warnings.push("meridian-relative mode without a prime meridian reference".to_string());
        }

        if let Some(reference) = self.prime_meridian_ref {
            if !self.visible_bounds.contains(reference.lat) {
                warnings.push(format!("prime meridian reference latitude {} lies outside the visible bounds",
                                      reference.lat));
            }
        }

        warnings
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig::calibrated(FALLBACK_RAW_WIDTH, FALLBACK_RAW_HEIGHT, VisibleBounds::default())
            .with_prime_meridian(PrimeMeridianRef::new(-14.08, 26.22))
    }
}

fn relative_gap(actual: f64, expected: f64) -> f64 {
    if expected == 0.0 {
        return actual.abs();
    }
    ((actual - expected) / expected).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibrated_constants() {
        let config = MapConfig::calibrated(3600.0, 1400.0, VisibleBounds::default());
        assert_eq!(config.pixels_per_longitude_degree, 10.0);
        assert_eq!(config.pixels_per_latitude_degree, 10.0);
        assert_eq!(config.equator_y, 700.0);
        assert_eq!(config.prime_meridian_x, 1800.0);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_sanitized_replaces_zero_dimensions() {
        let mut config = MapConfig::default();
        config.raw_width = 0.0;
        let fixed = config.sanitized();
        assert_eq!(fixed.raw_width, FALLBACK_RAW_WIDTH);
        assert_eq!(fixed.raw_height, FALLBACK_RAW_HEIGHT);
        assert!(fixed.has_valid_dimensions());
    }

    #[test]
    fn test_sanitized_detaches_unusable_display() {
        let config = MapConfig::default().with_display(DisplaySize::new(0.0, 600.0));
        assert!(config.sanitized().display.is_none());
    }

    #[test]
    fn test_resolve_keeps_configured_meridian_x() {
        let mut config = MapConfig::default();
        config.resolve_prime_meridian();
        assert_eq!(config.prime_meridian_x, 4101.0);
        // -14.08 sits 84.08 degrees below the northern edge of a 140 degree window
        let expected_y = 84.08 / 140.0 * 4900.0;
        assert!((config.prime_meridian_y - expected_y).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_derives_meridian_x_from_reference() {
        let mut config = MapConfig::calibrated(3600.0, 1400.0, VisibleBounds::default())
            .with_prime_meridian(PrimeMeridianRef::new(0.0, 90.0));
        config.derive_prime_meridian_x = true;
        config.resolve_prime_meridian();
        assert!((config.prime_meridian_x - 2700.0).abs() < 1e-9);
        assert!((config.prime_meridian_y - 700.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_flags_stale_calibration() {
        let mut config = MapConfig::calibrated(3600.0, 1400.0, VisibleBounds::default());
        config.pixels_per_longitude_degree = 12.0;
        let warnings = config.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("pixels_per_longitude_degree"));
    }

    #[test]
    fn test_validate_flags_misplaced_equator() {
        let mut config = MapConfig::default();
        assert!(config.validate().is_empty());
        config.equator_y = 1000.0;
        let warnings = config.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("equator_y"));
        assert!(warnings[0].contains("2450.00"));
    }
}
