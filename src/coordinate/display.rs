//! Raw <-> display pixel scaling
//!
//! The authoring SVG is fitted into the viewport with its aspect ratio
//! preserved, so a single uniform factor maps raw pixels to display pixels.

use super::point::{DisplayPoint, RawPoint};
use crate::config::MapConfig;

/// Scales between raw and display pixel space for the current viewport size
#[derive(Debug, Clone, Copy)]
pub struct DisplayScaleAdapter<'a> {
    config: &'a MapConfig,
}

impl<'a> DisplayScaleAdapter<'a> {
    /// Create an adapter over a configuration
    pub fn new(config: &'a MapConfig) -> Self {
        DisplayScaleAdapter { config }
    }

    /// Uniform raw-to-display factor
    ///
    /// Recomputed on every call because the display size changes on resize.
    /// Returns exactly `1.0` when the raw dimensions are unusable or no
    /// viewport is attached.
    pub fn scale_factor(&self) -> f64 {
        if !self.config.has_valid_dimensions() {
            return 1.0;
        }
        let Some(display) = self.config.display else {
            return 1.0;
        };
        if !display.is_usable() {
            return 1.0;
        }

        let factor = (display.width / self.config.raw_width).min(display.height / self.config.raw_height);
        if factor.is_finite() && factor > 0.0 {
            factor
        } else {
            1.0
        }
    }

    /// Convert a raw point to display space
    pub fn raw_to_display(&self, point: &RawPoint) -> DisplayPoint {
        let scale = self.scale_factor();
        DisplayPoint::new(point.x * scale, point.y * scale)
    }

    /// Convert a display point to raw space
    pub fn display_to_raw(&self, point: &DisplayPoint) -> RawPoint {
        let scale = self.scale_factor();
        RawPoint::new(point.x / scale, point.y / scale)
    }

    /// Convert a display length to raw pixels
    pub fn display_length_to_raw(&self, length: f64) -> f64 {
        length / self.scale_factor()
    }
}
