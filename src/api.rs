use log::{debug, info, warn};

use crate::config::{ConfigLoader, MapConfig, DEFAULT_CONFIG};
use crate::coordinate::{
    wrap_x, DisplayPoint, DisplayScaleAdapter, DisplaySize, GeoPoint, GeoTransform, RawPoint, ScreenPoint,
};
use crate::distance::{Distance, DistanceCalculator};
use crate::errors::{MapError, MapResult};
use crate::grid::{GridRenderReport, GridRenderer, MeridianRenderReport, PrimeMeridianRenderer};
use crate::overlay::{OverlayGroup, SvgWriter, GRID_GROUP, MERIDIAN_GROUP};
use crate::utils::format_utils::format_readout;
use crate::utils::notifier::{LogNotifier, NoticeLevel, Notifier};
use crate::viewport::{PanAction, Viewport, WrapPolicy};

/// Input events delivered by the hosting viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    /// Pointer moved over the map
    PointerMove(ScreenPoint),
    /// Pointer clicked on the map
    Click(ScreenPoint),
    /// Pan tick with the requested view centre; never redraws
    Move(RawPoint),
    /// Zoom animation finished at the given level
    ZoomEnd(f64),
    /// Pan finished
    MoveEnd,
    /// Map container changed size
    Resize(DisplaySize),
    /// "Show labels" control toggled
    ToggleLabels(bool),
}

/// Result of handling one event
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Coordinate readout text for a pointer move
    Readout(String),
    /// Position of a click
    Clicked { raw: RawPoint, geo: GeoPoint },
    /// The view centre was moved back across the wraparound seam
    Recentered(PanAction),
    /// Overlays were rebuilt
    Redrawn,
    /// Nothing to do
    Ignored,
}

/// Main interface to the IxMaps coordinate engine
///
/// Owns one map's configuration, viewport and overlay groups. Coordinate
/// functions are handed this configuration explicitly; there is no ambient
/// global map state.
pub struct IxMaps {
    config: MapConfig,
    viewport: Viewport,
    wrap: WrapPolicy,
    grid: OverlayGroup,
    meridian: OverlayGroup,
    show_labels: bool,
    initialized: bool,
    notifier: Box<dyn Notifier>,
}

impl IxMaps {
    /// Create a viewer that reports notices to the log
    pub fn new(config: MapConfig) -> Self {
        Self::with_notifier(config, Box::new(LogNotifier))
    }

    /// Create a viewer with a custom notifier
    pub fn with_notifier(config: MapConfig, notifier: Box<dyn Notifier>) -> Self {
        let viewport = Viewport::centered(&config);
        let wrap = WrapPolicy::new(&config);
        IxMaps {
            config,
            viewport,
            wrap,
            grid: OverlayGroup::new(GRID_GROUP),
            meridian: OverlayGroup::new(MERIDIAN_GROUP),
            show_labels: true,
            initialized: false,
            notifier,
        }
    }

    /// Create a viewer from a TOML file, or from the bundled defaults
    ///
    /// # Arguments
    /// * `path` - Optional configuration file
    ///
    /// # Returns
    /// A viewer, not yet initialized, or an error when the file cannot be
    /// read or parsed
    pub fn from_config_file(path: Option<&str>) -> MapResult<Self> {
        let config = match path {
            Some(p) => {
                info!("Loading map configuration from {}", p);
                ConfigLoader::from_file(p)?
            },
            None => DEFAULT_CONFIG.clone(),
        };
        Ok(Self::new(config))
    }

    /// Set up the coordinate system and draw the overlays
    ///
    /// Calling this again after it succeeded does nothing, since the hosting
    /// page may call it from more than one place.
    ///
    /// # Returns
    /// `true` when this call performed the initialization, `false` when it
    /// had already been done
    pub fn initialize(&mut self) -> MapResult<bool> {
        if self.initialized {
            debug!("Coordinate system already initialized");
            return Ok(false);
        }

        self.config = self.config.sanitized();
        self.config.resolve_prime_meridian();
        self.wrap = WrapPolicy::new(&self.config);
        self.viewport = Viewport::centered(&self.config);

        let warnings = self.config.validate();
        for warning in &warnings {
            warn!("Configuration: {}", warning);
        }
        if !warnings.is_empty() {
            self.notifier.notify(
                NoticeLevel::Warning,
                &format!("Map configuration has {} calibration warning(s)", warnings.len()),
            );
        }

        match self.draw_overlays() {
            Ok(()) => {},
            Err(MapError::ViewportDetached) => {
                debug!("Viewport not attached yet, overlays deferred until resize");
                self.notifier.notify(NoticeLevel::Info, "Overlays will be drawn once the map is attached");
            },
            Err(e) => {
                self.notifier.notify(NoticeLevel::Error, &format!("Failed to initialize coordinate system: {}", e));
                return Err(e);
            },
        }

        self.initialized = true;
        info!("Coordinate system initialized: raw {}x{}, prime meridian at x={:.1}",
              self.config.raw_width, self.config.raw_height, self.config.prime_meridian_x);
        self.notifier.notify(NoticeLevel::Success, "Coordinate system initialized");
        Ok(true)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn wrap_policy(&self) -> &WrapPolicy {
        &self.wrap
    }

    /// Raw <-> geographic transformer for this map
    pub fn transform(&self) -> GeoTransform<'_> {
        GeoTransform::new(&self.config)
    }

    /// Raw <-> display scaler for this map
    pub fn display_scale(&self) -> DisplayScaleAdapter<'_> {
        DisplayScaleAdapter::new(&self.config)
    }

    /// Distance calculator calibrated for this map
    pub fn distance_calculator(&self) -> DistanceCalculator {
        DistanceCalculator::from_config(&self.config)
    }

    pub fn labels_visible(&self) -> bool {
        self.show_labels
    }

    /// Set the label toggle without redrawing
    pub fn set_labels_visible(&mut self, show: bool) {
        self.show_labels = show;
    }

    /// Move the view, applying wraparound and vertical clamping
    pub fn set_view(&mut self, center: RawPoint, zoom: f64) -> PanAction {
        self.viewport.zoom = zoom;
        let view_height = self.view_height();
        let action = self.wrap.on_pan_tick(&center, view_height);
        self.viewport.center = action.target;
        action
    }

    /// Convert a container pixel to raw space
    ///
    /// Falls back to the origin (and logs) when the viewport is not attached,
    /// so a single bad frame never stops event handling.
    pub fn screen_to_raw(&self, screen: &ScreenPoint) -> RawPoint {
        self.viewport.unproject(&self.config, screen).unwrap_or_else(|e| {
            warn!("Screen to raw conversion failed: {}", e);
            RawPoint::default()
        })
    }

    /// Convert a container pixel to a geographic coordinate
    pub fn screen_to_geo(&self, screen: &ScreenPoint) -> GeoPoint {
        match self.viewport.unproject(&self.config, screen) {
            Ok(raw) => self.transform().raw_point_to_geo(&raw),
            Err(e) => {
                warn!("Screen to geographic conversion failed: {}", e);
                GeoPoint::default()
            },
        }
    }

    /// Ground length of a path drawn on screen
    ///
    /// The latitude correction uses the latitude at the view centre.
    pub fn measure(&self, points: &[ScreenPoint], latitude_correction: bool) -> Distance {
        let display: Vec<DisplayPoint> = points.iter().map(|p| DisplayPoint::new(p.x, p.y)).collect();
        let center_lat = if latitude_correction {
            Some(self.transform().raw_point_to_geo(&self.viewport.center).lat)
        } else {
            None
        };
        self.distance_calculator().path_distance(&display, self.viewport.zoom, center_lat)
    }

    /// Dispatch one viewport event
    pub fn handle_event(&mut self, event: MapEvent) -> EventOutcome {
        match event {
            MapEvent::PointerMove(screen) => {
                let raw = self.screen_to_raw(&screen);
                let geo = self.transform().raw_point_to_geo(&raw);
                let shown = RawPoint::new(wrap_x(raw.x, self.transform().width()), raw.y);
                EventOutcome::Readout(format_readout(&shown, &geo))
            },
            MapEvent::Click(screen) => {
                let raw = self.screen_to_raw(&screen);
                let geo = self.transform().raw_point_to_geo(&raw);
                debug!("Click at raw ({:.1}, {:.1}) -> {:?}", raw.x, raw.y, geo);
                EventOutcome::Clicked { raw, geo }
            },
            MapEvent::Move(center) => {
                let action = self.set_view(center, self.viewport.zoom);
                if action.wrapped {
                    EventOutcome::Recentered(action)
                } else {
                    EventOutcome::Ignored
                }
            },
            MapEvent::ZoomEnd(zoom) => {
                self.viewport.zoom = zoom;
                self.redraw_or_ignore()
            },
            MapEvent::MoveEnd => self.redraw_or_ignore(),
            MapEvent::Resize(size) => {
                self.config.resize(size);
                self.redraw_or_ignore()
            },
            MapEvent::ToggleLabels(show) => {
                self.set_labels_visible(show);
                self.redraw_or_ignore()
            },
        }
    }

    /// Rebuild both overlay groups for the current view
    pub fn redraw(&mut self) -> MapResult<(GridRenderReport, MeridianRenderReport)> {
        let grid = GridRenderer::new(&self.config, self.show_labels).render(&self.viewport, &mut self.grid)?;
        let meridian = PrimeMeridianRenderer::new(&self.config).render(&self.viewport, &mut self.meridian)?;
        Ok((grid, meridian))
    }

    /// Look up an overlay group by name
    pub fn overlay(&self, name: &str) -> Option<&OverlayGroup> {
        match name {
            GRID_GROUP => Some(&self.grid),
            MERIDIAN_GROUP => Some(&self.meridian),
            _ => None,
        }
    }

    /// Show or hide an overlay group
    ///
    /// # Returns
    /// `false` when no group has that name
    pub fn set_group_visible(&mut self, name: &str, visible: bool) -> bool {
        match name {
            GRID_GROUP => self.grid.visible = visible,
            MERIDIAN_GROUP => self.meridian.visible = visible,
            _ => return false,
        }
        true
    }

    /// Render the visible overlay groups to an SVG document
    pub fn to_svg(&self) -> MapResult<String> {
        SvgWriter::new(&self.config, &self.viewport).render(&[&self.grid, &self.meridian])
    }

    /// Render the visible overlay groups to an SVG file
    pub fn write_svg(&self, path: &str) -> MapResult<()> {
        SvgWriter::new(&self.config, &self.viewport).write_to_file(&[&self.grid, &self.meridian], path)
    }

    fn draw_overlays(&mut self) -> MapResult<()> {
        self.redraw().map(|_| ())
    }

    fn redraw_or_ignore(&mut self) -> EventOutcome {
        if !self.initialized {
            return EventOutcome::Ignored;
        }
        match self.draw_overlays() {
            Ok(()) => EventOutcome::Redrawn,
            Err(e) => {
                warn!("Overlay redraw skipped: {}", e);
                EventOutcome::Ignored
            },
        }
    }

    fn view_height(&self) -> f64 {
        self.viewport
            .visible_window(&self.config)
            .map(|window| window.height())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct RecordingNotifier {
        notices: Rc<RefCell<Vec<(NoticeLevel, String)>>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, level: NoticeLevel, message: &str) {
            self.notices.borrow_mut().push((level, message.to_string()));
        }
    }

    fn attached_viewer() -> IxMaps {
        IxMaps::new(MapConfig::default().with_display(DisplaySize::new(1200.0, 700.0)))
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let notices = Rc::new(RefCell::new(Vec::new()));
        let mut viewer = IxMaps::with_notifier(
            MapConfig::default().with_display(DisplaySize::new(1200.0, 700.0)),
            Box::new(RecordingNotifier { notices: Rc::clone(&notices) }),
        );

        assert!(viewer.initialize().unwrap());
        let drawn = viewer.overlay(GRID_GROUP).unwrap().len();
        assert!(!viewer.initialize().unwrap());
        assert_eq!(viewer.overlay(GRID_GROUP).unwrap().len(), drawn);
        assert_eq!(notices.borrow().len(), 1);
        assert_eq!(notices.borrow()[0].0, NoticeLevel::Success);
    }

    #[test]
    fn test_initialize_reports_deferral_and_warnings() {
        let notices = Rc::new(RefCell::new(Vec::new()));
        let mut config = MapConfig::default();
        config.equator_y = 1000.0;
        let mut viewer = IxMaps::with_notifier(config, Box::new(RecordingNotifier { notices: Rc::clone(&notices) }));
        viewer.initialize().unwrap();

        let levels: Vec<NoticeLevel> = notices.borrow().iter().map(|(level, _)| *level).collect();
        assert_eq!(levels, vec![NoticeLevel::Warning, NoticeLevel::Info, NoticeLevel::Success]);
    }

    #[test]
    fn test_initialize_without_viewport_defers_overlays() {
        let mut viewer = IxMaps::new(MapConfig::default());
        assert!(viewer.initialize().unwrap());
        assert!(viewer.overlay(GRID_GROUP).unwrap().is_empty());

        let outcome = viewer.handle_event(MapEvent::Resize(DisplaySize::new(1200.0, 700.0)));
        assert_eq!(outcome, EventOutcome::Redrawn);
        assert!(!viewer.overlay(GRID_GROUP).unwrap().is_empty());
    }

    #[test]
    fn test_pointer_readout_at_reference_point() {
        let mut viewer = attached_viewer();
        viewer.initialize().unwrap();
        let reference = RawPoint::new(viewer.config().prime_meridian_x, viewer.config().prime_meridian_y);
        let screen = viewer.viewport().project(viewer.config(), &reference).unwrap();
        match viewer.handle_event(MapEvent::PointerMove(screen)) {
            EventOutcome::Readout(text) => assert!(text.starts_with("14.08°S, 26.22°E"), "{}", text),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_detached_pointer_falls_back_to_origin() {
        let viewer = IxMaps::new(MapConfig::default());
        assert_eq!(viewer.screen_to_raw(&ScreenPoint::new(10.0, 10.0)), RawPoint::default());
        assert_eq!(viewer.screen_to_geo(&ScreenPoint::new(10.0, 10.0)), GeoPoint::default());
    }

    #[test]
    fn test_move_across_seam_recentres() {
        let mut viewer = attached_viewer();
        viewer.initialize().unwrap();
        match viewer.handle_event(MapEvent::Move(RawPoint::new(8203.0, 2450.0))) {
            EventOutcome::Recentered(action) => {
                assert!(!action.animate);
                assert!((action.target.x - 1.0).abs() < 1e-9);
            },
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!((viewer.viewport().center.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_vertical_clamp_alone_is_not_a_recentre() {
        let mut viewer = attached_viewer();
        viewer.initialize().unwrap();
        viewer.set_view(RawPoint::new(4101.0, 2450.0), 3.0);
        let outcome = viewer.handle_event(MapEvent::Move(RawPoint::new(4000.0, -500.0)));
        assert_eq!(outcome, EventOutcome::Ignored);
        assert!(viewer.viewport().center.y > 0.0);
        assert_eq!(viewer.viewport().center.x, 4000.0);
    }

    #[test]
    fn test_pan_ticks_do_not_redraw() {
        let mut viewer = attached_viewer();
        viewer.initialize().unwrap();
        let before = viewer.overlay(GRID_GROUP).unwrap().clone();
        viewer.handle_event(MapEvent::Move(RawPoint::new(3000.0, 2450.0)));
        assert_eq!(viewer.overlay(GRID_GROUP).unwrap(), &before);
        assert_eq!(viewer.handle_event(MapEvent::MoveEnd), EventOutcome::Redrawn);
        assert_ne!(viewer.overlay(GRID_GROUP).unwrap(), &before);
    }

    #[test]
    fn test_toggle_labels() {
        let mut viewer = attached_viewer();
        viewer.initialize().unwrap();
        assert!(viewer.overlay(GRID_GROUP).unwrap().labels().count() > 0);
        viewer.handle_event(MapEvent::ToggleLabels(false));
        assert!(!viewer.labels_visible());
        assert_eq!(viewer.overlay(GRID_GROUP).unwrap().labels().count(), 0);
    }

    #[test]
    fn test_group_visibility() {
        let mut viewer = attached_viewer();
        viewer.initialize().unwrap();
        assert!(viewer.set_group_visible(MERIDIAN_GROUP, false));
        assert!(!viewer.set_group_visible("labels", false));
        let svg = viewer.to_svg().unwrap();
        assert!(svg.contains("id=\"grid\""));
        assert!(!svg.contains("id=\"prime-meridian\""));
    }

    #[test]
    fn test_measure_uses_zoom() {
        let mut viewer = attached_viewer();
        viewer.initialize().unwrap();
        viewer.set_view(RawPoint::new(4101.0, 2450.0), 1.0);
        let d = viewer.measure(&[ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 0.0)], false);
        assert!((d.miles - 160.0).abs() < 1e-9);
    }
}
