//! Horizontal wraparound and vertical clamping for panning
//!
//! The world repeats east/west every `raw_width` pixels. When the view
//! centre leaves `[0, raw_width]` it is moved back by whole world widths
//! without animation, so the jump is invisible. Vertically the map is hard
//! bounded: there is no pole-to-pole wrap.

use log::debug;

use super::viewport::Viewport;
use crate::config::MapConfig;
use crate::coordinate::{shortest_wrap_delta, GeoTransform, RawPoint};

/// Re-centring instruction produced by the wrap policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanAction {
    /// Where the view centre should be
    pub target: RawPoint,
    /// Always false for wrap jumps; the user must not see a snap
    pub animate: bool,
    /// Whether the target differs from the requested centre horizontally
    pub wrapped: bool,
}

/// Owned wraparound policy for a map of fixed raw size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapPolicy {
    world_width: f64,
    world_height: f64,
}

impl WrapPolicy {
    /// Create a policy for the configured world size
    pub fn new(config: &MapConfig) -> Self {
        let transform = GeoTransform::new(config);
        WrapPolicy {
            world_width: transform.width(),
            world_height: transform.height(),
        }
    }

    /// Width of one world copy in raw pixels
    pub fn world_width(&self) -> f64 {
        self.world_width
    }

    /// Bring a centre that left `[0, world_width]` back into range
    pub fn wrap_center(&self, center: &RawPoint) -> PanAction {
        if center.x >= 0.0 && center.x <= self.world_width {
            return PanAction { target: *center, animate: false, wrapped: false };
        }

        let x = center.x.rem_euclid(self.world_width);
        debug!("Wrapping view centre from x={:.2} to x={:.2}", center.x, x);
        PanAction {
            target: RawPoint::new(x, center.y),
            animate: false,
            wrapped: true,
        }
    }

    /// Horizontal offset to travel from `current_x` to `target_x`
    ///
    /// When the literal distance exceeds half a world the other direction
    /// around the seam is shorter, and that one is returned.
    pub fn pan_offset(&self, current_x: f64, target_x: f64) -> f64 {
        let literal = target_x - current_x;
        if literal.abs() > self.world_width / 2.0 {
            shortest_wrap_delta(literal, self.world_width)
        } else {
            literal
        }
    }

    /// Keep the view inside the map vertically
    ///
    /// # Arguments
    /// * `center` - Requested view centre
    /// * `view_height` - Height of the visible area in raw pixels
    ///
    /// # Returns
    /// The centre with its Y limited so the view does not leave `[0, world_height]`;
    /// a view taller than the map is centred on it
    pub fn clamp_vertical(&self, center: &RawPoint, view_height: f64) -> RawPoint {
        let half = (view_height / 2.0).max(0.0);
        if 2.0 * half >= self.world_height {
            return RawPoint::new(center.x, self.world_height / 2.0);
        }
        RawPoint::new(center.x, center.y.max(half).min(self.world_height - half))
    }

    /// Apply wraparound and vertical clamping for one pan tick
    pub fn on_pan_tick(&self, center: &RawPoint, view_height: f64) -> PanAction {
        let wrapped = self.wrap_center(center);
        PanAction {
            target: self.clamp_vertical(&wrapped.target, view_height),
            ..wrapped
        }
    }

    /// Move a viewport by a screen-space drag and apply the policy
    pub fn pan_by(&self, viewport: &mut Viewport, config: &MapConfig, dx: f64, dy: f64) -> PanAction {
        let (raw_dx, raw_dy) = viewport.screen_delta_to_raw(config, dx, dy);
        let requested = RawPoint::new(viewport.center.x + raw_dx, viewport.center.y + raw_dy);
        self.apply(viewport, config, &requested)
    }

    /// Move a viewport towards a raw target along the shorter direction
    pub fn pan_to(&self, viewport: &mut Viewport, config: &MapConfig, target: &RawPoint) -> PanAction {
        let dx = self.pan_offset(viewport.center.x, target.x);
        let requested = RawPoint::new(viewport.center.x + dx, target.y);
        self.apply(viewport, config, &requested)
    }

    fn apply(&self, viewport: &mut Viewport, config: &MapConfig, requested: &RawPoint) -> PanAction {
        let view_height = viewport
            .visible_window(config)
            .map(|window| window.height())
            .unwrap_or(0.0);
        let action = self.on_pan_tick(requested, view_height);
        viewport.center = action.target;
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::DisplaySize;

    #[test]
    fn test_crossing_the_east_seam_wraps_to_start() {
        let policy = WrapPolicy::new(&MapConfig::default());
        let action = policy.wrap_center(&RawPoint::new(8202.0 - 1.0 + 2.0, 100.0));
        assert!(action.wrapped);
        assert!(!action.animate);
        assert!((action.target.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_crossing_the_west_seam_wraps_to_end() {
        let policy = WrapPolicy::new(&MapConfig::default());
        let action = policy.wrap_center(&RawPoint::new(-5.0, 100.0));
        assert!((action.target.x - 8197.0).abs() < 1e-9);
    }

    #[test]
    fn test_centre_inside_world_is_untouched() {
        let policy = WrapPolicy::new(&MapConfig::default());
        let action = policy.wrap_center(&RawPoint::new(8202.0, 100.0));
        assert!(!action.wrapped);
        assert_eq!(action.target.x, 8202.0);
    }

    #[test]
    fn test_pan_offset_takes_short_way() {
        let policy = WrapPolicy::new(&MapConfig::default());
        assert!((policy.pan_offset(8000.0, 200.0) - 402.0).abs() < 1e-9);
        assert!((policy.pan_offset(200.0, 8000.0) + 402.0).abs() < 1e-9);
        assert_eq!(policy.pan_offset(1000.0, 3000.0), 2000.0);
    }

    #[test]
    fn test_clamp_vertical() {
        let policy = WrapPolicy::new(&MapConfig::default());
        assert_eq!(policy.clamp_vertical(&RawPoint::new(10.0, 50.0), 1000.0).y, 500.0);
        assert_eq!(policy.clamp_vertical(&RawPoint::new(10.0, 4800.0), 1000.0).y, 4400.0);
        assert_eq!(policy.clamp_vertical(&RawPoint::new(10.0, 100.0), 6000.0).y, 2450.0);
    }

    #[test]
    fn test_drag_across_seam_keeps_moving_east() {
        // Scale factor 1: one screen pixel is one raw pixel at zoom 0
        let config = MapConfig::default().with_display(DisplaySize::new(8202.0, 4900.0));
        let policy = WrapPolicy::new(&config);
        let mut viewport = Viewport::new(RawPoint::new(8201.0, 2450.0), 0.0);
        let action = policy.pan_by(&mut viewport, &config, 2.0, 0.0);
        assert!(action.wrapped);
        assert!((viewport.center.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pan_to_uses_shortest_direction() {
        let config = MapConfig::default().with_display(DisplaySize::new(820.2, 490.0));
        let policy = WrapPolicy::new(&config);
        let mut viewport = Viewport::new(RawPoint::new(8100.0, 2450.0), 2.0);
        policy.pan_to(&mut viewport, &config, &RawPoint::new(100.0, 2450.0));
        assert!((viewport.center.x - 100.0).abs() < 1e-9);
    }
}
