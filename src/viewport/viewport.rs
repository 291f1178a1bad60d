//! Viewport state and screen projection
//!
//! Screen pixels are display pixels scaled by `2^zoom`, measured from the
//! top-left corner of the map container.

use crate::config::MapConfig;
use crate::coordinate::{DisplayScaleAdapter, DisplaySize, RawPoint, RawWindow, ScreenPoint};
use crate::errors::{MapError, MapResult};

/// The visible part of the map: centre, zoom and container size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Raw-space point at the middle of the container
    pub center: RawPoint,
    /// Zoom level; each step doubles the on-screen size
    pub zoom: f64,
}

impl Viewport {
    /// Create a new viewport
    pub fn new(center: RawPoint, zoom: f64) -> Self {
        Viewport { center, zoom }
    }

    /// Create a viewport centred on the map at zoom 0
    pub fn centered(config: &MapConfig) -> Self {
        Viewport::new(RawPoint::new(config.raw_width / 2.0, config.raw_height / 2.0), 0.0)
    }

    /// Screen pixels per display pixel at the current zoom
    pub fn zoom_scale(&self) -> f64 {
        if self.zoom.is_finite() {
            2f64.powf(self.zoom)
        } else {
            1.0
        }
    }

    /// Screen pixels per raw pixel
    pub fn raw_to_screen_scale(&self, config: &MapConfig) -> f64 {
        DisplayScaleAdapter::new(config).scale_factor() * self.zoom_scale()
    }

    /// Project a raw point into container pixels
    ///
    /// # Returns
    /// The screen position, or `MapError::ViewportDetached` when no container
    /// size is known
    pub fn project(&self, config: &MapConfig, raw: &RawPoint) -> MapResult<ScreenPoint> {
        let size = Self::attached_size(config)?;
        let scale = self.raw_to_screen_scale(config);
        Ok(ScreenPoint::new(
            (raw.x - self.center.x) * scale + size.width / 2.0,
            (raw.y - self.center.y) * scale + size.height / 2.0,
        ))
    }

    /// Map a container pixel back to raw space
    pub fn unproject(&self, config: &MapConfig, screen: &ScreenPoint) -> MapResult<RawPoint> {
        let size = Self::attached_size(config)?;
        let scale = self.raw_to_screen_scale(config);
        Ok(RawPoint::new(
            self.center.x + (screen.x - size.width / 2.0) / scale,
            self.center.y + (screen.y - size.height / 2.0) / scale,
        ))
    }

    /// Raw-space rectangle currently covered by the container
    ///
    /// The horizontal extent is not wrapped and may run past the world edges.
    pub fn visible_window(&self, config: &MapConfig) -> MapResult<RawWindow> {
        let size = Self::attached_size(config)?;
        let scale = self.raw_to_screen_scale(config);
        let half_w = size.width / 2.0 / scale;
        let half_h = size.height / 2.0 / scale;
        Ok(RawWindow::new(
            self.center.x - half_w,
            self.center.y - half_h,
            self.center.x + half_w,
            self.center.y + half_h,
        ))
    }

    /// Convert a screen-space drag into a raw-space offset
    pub fn screen_delta_to_raw(&self, config: &MapConfig, dx: f64, dy: f64) -> (f64, f64) {
        let adapter = DisplayScaleAdapter::new(config);
        let zoom = self.zoom_scale();
        (adapter.display_length_to_raw(dx / zoom), adapter.display_length_to_raw(dy / zoom))
    }

    fn attached_size(config: &MapConfig) -> MapResult<DisplaySize> {
        match config.display {
            Some(size) if size.is_usable() => Ok(size),
            _ => Err(MapError::ViewportDetached),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attached() -> MapConfig {
        // Scale factor 0.1 in both axes
        MapConfig::default().with_display(DisplaySize::new(820.2, 490.0))
    }

    #[test]
    fn test_project_centre_lands_mid_container() {
        let config = attached();
        let viewport = Viewport::centered(&config);
        let screen = viewport.project(&config, &viewport.center).unwrap();
        assert!((screen.x - 410.1).abs() < 1e-9);
        assert!((screen.y - 245.0).abs() < 1e-9);
    }

    #[test]
    fn test_unproject_inverts_project_at_zoom() {
        let config = attached();
        let viewport = Viewport::new(RawPoint::new(1000.0, 2000.0), 3.0);
        let raw = RawPoint::new(1030.0, 1985.0);
        let screen = viewport.project(&config, &raw).unwrap();
        let back = viewport.unproject(&config, &screen).unwrap();
        assert!((back.x - raw.x).abs() < 1e-9);
        assert!((back.y - raw.y).abs() < 1e-9);
    }

    #[test]
    fn test_visible_window_shrinks_with_zoom() {
        let config = attached();
        let viewport = Viewport::new(RawPoint::new(4101.0, 2450.0), 1.0);
        let window = viewport.visible_window(&config).unwrap();
        assert!((window.width() - 4101.0).abs() < 1e-6);
        assert!((window.height() - 2450.0).abs() < 1e-6);
    }

    #[test]
    fn test_screen_drag_scales_with_zoom() {
        let config = attached();
        let viewport = Viewport::new(RawPoint::new(4101.0, 2450.0), 2.0);
        // 0.1 display px per raw px, 4 screen px per display px
        let (dx, dy) = viewport.screen_delta_to_raw(&config, 40.0, -8.0);
        assert!((dx - 100.0).abs() < 1e-9);
        assert!((dy + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_detached_viewport_is_an_error() {
        let config = MapConfig::default();
        let viewport = Viewport::centered(&config);
        assert!(matches!(viewport.project(&config, &viewport.center), Err(MapError::ViewportDetached)));
        assert!(viewport.visible_window(&config).is_err());
    }
}
