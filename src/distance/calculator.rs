//! On-screen distance to ground distance conversion
//!
//! Points are measured in container pixels as they appear at the given zoom.
//! The map is a flat (non-Mercator) projection, so distance is pixel length
//! times a calibrated ground size per pixel, halved for every zoom level. An
//! optional correction divides by `max(0.5, cos(lat))` to partly offset the
//! stretching away from the equator.

use std::iter::Sum;
use std::ops::Add;

use crate::config::MapConfig;
use crate::coordinate::DisplayPoint;

/// Lower limit of the latitude correction factor
pub const MIN_LATITUDE_FACTOR: f64 = 0.5;

/// A ground distance in both unit systems
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Distance {
    pub miles: f64,
    pub km: f64,
}

impl Distance {
    /// Format as e.g. `320.0 mi (515.0 km)`
    pub fn format(&self) -> String {
        format!("{:.1} mi ({:.1} km)", self.miles, self.km)
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, other: Distance) -> Distance {
        Distance {
            miles: self.miles + other.miles,
            km: self.km + other.km,
        }
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Distance>>(iter: I) -> Distance {
        iter.fold(Distance::default(), |acc, d| acc + d)
    }
}

/// Converts display-pixel distances to miles and kilometres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceCalculator {
    miles_per_pixel: f64,
    km_per_pixel: f64,
}

impl DistanceCalculator {
    /// Create a calculator with explicit calibration
    pub fn new(miles_per_pixel: f64, km_per_pixel: f64) -> Self {
        DistanceCalculator { miles_per_pixel, km_per_pixel }
    }

    /// Create a calculator from a map configuration
    pub fn from_config(config: &MapConfig) -> Self {
        DistanceCalculator::new(config.miles_per_pixel, config.km_per_pixel)
    }

    /// Latitude correction divisor for a view centred at `center_lat`
    pub fn latitude_factor(center_lat: f64) -> f64 {
        center_lat.abs().to_radians().cos().max(MIN_LATITUDE_FACTOR)
    }

    /// Ground distance between two display points
    ///
    /// # Arguments
    /// * `a`, `b` - Display points
    /// * `zoom` - Current zoom level
    /// * `center_lat` - View centre latitude; `None` skips the correction
    pub fn distance(&self, a: &DisplayPoint, b: &DisplayPoint, zoom: f64, center_lat: Option<f64>) -> Distance {
        let pixels = a.distance_to(b);
        let zoom_scale = if zoom.is_finite() { 2f64.powf(zoom) } else { 1.0 };

        let mut miles = pixels * self.miles_per_pixel / zoom_scale;
        if let Some(lat) = center_lat {
            miles /= Self::latitude_factor(lat);
        }

        Distance {
            miles,
            km: miles * (self.km_per_pixel / self.miles_per_pixel),
        }
    }

    /// Total length of a path through consecutive display points
    ///
    /// Fewer than two points measure zero.
    pub fn path_distance(&self, points: &[DisplayPoint], zoom: f64, center_lat: Option<f64>) -> Distance {
        points
            .windows(2)
            .map(|pair| self.distance(&pair[0], &pair[1], zoom, center_lat))
            .sum()
    }
}

impl Default for DistanceCalculator {
    fn default() -> Self {
        DistanceCalculator::new(3.2, 5.15)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!((actual - expected).abs() < tolerance, "expected {} got {}", expected, actual);
    }

    #[test]
    fn test_hundred_pixels_at_zoom_zero() {
        let calculator = DistanceCalculator::default();
        let d = calculator.distance(&DisplayPoint::new(0.0, 0.0), &DisplayPoint::new(60.0, 80.0), 0.0, None);
        assert_close(d.miles, 320.0, 1e-9);
        assert_close(d.km, 515.0, 1e-9);
        assert_eq!(d.format(), "320.0 mi (515.0 km)");
    }

    #[test]
    fn test_each_zoom_level_halves_distance() {
        let calculator = DistanceCalculator::default();
        let a = DisplayPoint::new(0.0, 0.0);
        let b = DisplayPoint::new(100.0, 0.0);
        assert_close(calculator.distance(&a, &b, 1.0, None).miles, 160.0, 1e-9);
        assert_close(calculator.distance(&a, &b, 3.0, None).miles, 40.0, 1e-9);
    }

    #[test]
    fn test_latitude_correction_is_floored() {
        assert_close(DistanceCalculator::latitude_factor(0.0), 1.0, 1e-12);
        assert_close(DistanceCalculator::latitude_factor(-60.0), 0.5, 1e-12);
        assert_eq!(DistanceCalculator::latitude_factor(80.0), MIN_LATITUDE_FACTOR);

        let calculator = DistanceCalculator::default();
        let a = DisplayPoint::new(0.0, 0.0);
        let b = DisplayPoint::new(100.0, 0.0);
        assert_close(calculator.distance(&a, &b, 0.0, Some(85.0)).miles, 640.0, 1e-9);
    }

    #[test]
    fn test_path_distance_sums_segments() {
        let calculator = DistanceCalculator::default();
        let path = [
            DisplayPoint::new(0.0, 0.0),
            DisplayPoint::new(100.0, 0.0),
            DisplayPoint::new(100.0, 50.0),
        ];
        let total = calculator.path_distance(&path, 0.0, None);
        assert_close(total.miles, 480.0, 1e-9);
        assert_eq!(calculator.path_distance(&path[..1], 0.0, None), Distance::default());
    }
}
