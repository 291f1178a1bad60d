//! Lat/lon grid overlay rendering
//!
//! Every pass rebuilds the grid from scratch for the current zoom and view.
//! Each longitude line is also drawn one world width to either side so the
//! grid stays continuous across the wraparound seam. Lines outside the view
//! (plus a 10% buffer) are skipped, which keeps the work proportional to
//! what is on screen.

use log::debug;

use super::labels::{LabeledPositions, MIN_LABEL_SEPARATION};
use super::spacing::{grid_spacing, is_major, latitude_values, longitude_offsets, GridLine, GridLineKind};
use crate::config::MapConfig;
use crate::coordinate::{wrap_x, GeoTransform, RawPoint, RawWindow, ScreenPoint};
use crate::errors::MapResult;
use crate::overlay::{LabelKind, LineStyle, OverlayElement, OverlayGroup, OverlayLabel, OverlayLine};
use crate::utils::format_utils::{format_latitude_label, format_longitude_label};
use crate::viewport::Viewport;

/// Share of the visible width added on each side before culling
pub const CULL_BUFFER: f64 = 0.1;

/// Screen distance of longitude labels from the top of the container
const LONGITUDE_LABEL_TOP: f64 = 16.0;
/// Screen distance of latitude labels from the left of the container
const LATITUDE_LABEL_LEFT: f64 = 6.0;

/// What a grid pass produced
#[derive(Debug, Clone, Default)]
pub struct GridRenderReport {
    /// Degrees between lines for this pass
    pub spacing: f64,
    /// Every line copy that was drawn
    pub lines: Vec<GridLine>,
    /// Longitude labels, left to right in placement order
    pub longitude_labels: Vec<OverlayLabel>,
    /// Latitude labels, including the equator
    pub latitude_labels: Vec<OverlayLabel>,
}

/// Draws the lat/lon grid into an overlay group
pub struct GridRenderer<'a> {
    config: &'a MapConfig,
    show_labels: bool,
}

impl<'a> GridRenderer<'a> {
    /// Create a renderer over a configuration
    pub fn new(config: &'a MapConfig, show_labels: bool) -> Self {
        GridRenderer { config, show_labels }
    }

    /// Clear `group` and fill it with the grid for `viewport`
    ///
    /// # Arguments
    /// * `viewport` - Current centre and zoom
    /// * `group` - Target overlay group, emptied first
    ///
    /// # Returns
    /// A report of the drawn lines and placed labels, or
    /// `MapError::ViewportDetached` when the container size is unknown
    pub fn render(&self, viewport: &Viewport, group: &mut OverlayGroup) -> MapResult<GridRenderReport> {
        group.clear();

        let window = viewport.visible_window(self.config)?;
        let cull = window.buffered(CULL_BUFFER);
        let spacing = grid_spacing(viewport.zoom);

        let mut report = GridRenderReport {
            spacing,
            ..GridRenderReport::default()
        };
        let mut elements = Vec::new();

        self.draw_longitudes(viewport, &window, &cull, &mut report, &mut elements)?;
        self.draw_latitudes(viewport, &window, &cull, &mut report, &mut elements)?;

        debug!("Grid pass at zoom {:.2}: spacing {}°, {} lines, {} labels",
               viewport.zoom, spacing, report.lines.len(),
               report.longitude_labels.len() + report.latitude_labels.len());

        group.replace(elements);
        Ok(report)
    }

    fn draw_longitudes(&self,
                       viewport: &Viewport,
                       window: &RawWindow,
                       cull: &RawWindow,
                       report: &mut GridRenderReport,
                       elements: &mut Vec<OverlayElement>) -> MapResult<()> {
        let transform = GeoTransform::new(self.config);
        let width = transform.width();
        let height = transform.height();
        let meridian_x = transform.prime_meridian_x();
        let per_degree = transform.pixels_per_degree_x();

        let mut labeled = LabeledPositions::new(MIN_LABEL_SEPARATION);

        for offset in longitude_offsets(report.spacing) {
            let primary = wrap_x(meridian_x + offset * per_degree, width);
            let major = is_major(offset);
            let style = if major { LineStyle::major_grid() } else { LineStyle::minor_grid() };

            // Primary, left copy, right copy: also the label priority order
            let copies = [primary, primary - width, primary + width];

            for &x in copies.iter().filter(|&&x| cull.contains_x(x)) {
                elements.push(OverlayElement::Line(OverlayLine {
                    from: RawPoint::new(x, 0.0),
                    to: RawPoint::new(x, height),
                    style: style.clone(),
                }));
                report.lines.push(GridLine {
                    kind: GridLineKind::Longitude,
                    value: offset,
                    is_major: major,
                    raw_position: x,
                });
            }

            if !self.show_labels || !major {
                continue;
            }

            let mut screen_xs = [0.0; 3];
            for (slot, x) in screen_xs.iter_mut().zip(copies.iter()) {
                *slot = viewport.project(self.config, &RawPoint::new(*x, window.min_y))?.x;
            }

            if let Some(index) = labeled.place(&screen_xs, |i| window.contains_x(copies[i])) {
                let label = OverlayLabel {
                    text: format_longitude_label(offset),
                    kind: LabelKind::Longitude,
                    anchor: RawPoint::new(copies[index], window.min_y),
                    screen: ScreenPoint::new(screen_xs[index], LONGITUDE_LABEL_TOP),
                };
                elements.push(OverlayElement::Label(label.clone()));
                report.longitude_labels.push(label);
            }
        }

        Ok(())
    }

    fn draw_latitudes(&self,
                      viewport: &Viewport,
                      window: &RawWindow,
                      cull: &RawWindow,
                      report: &mut GridRenderReport,
                      elements: &mut Vec<OverlayElement>) -> MapResult<()> {
        let transform = GeoTransform::new(self.config);
        let bounds = self.config.visible_bounds;
        let mut labeled = LabeledPositions::new(MIN_LABEL_SEPARATION);

        for lat in latitude_values(report.spacing, bounds.south, bounds.north) {
            let y = transform.latitude_to_y(lat);
            if !cull.contains_y(y) {
                continue;
            }

            let major = is_major(lat);
            let style = if lat == 0.0 {
                LineStyle::equator()
            } else if major {
                LineStyle::major_grid()
            } else {
                LineStyle::minor_grid()
            };

            elements.push(OverlayElement::Line(OverlayLine {
                from: RawPoint::new(cull.min_x, y),
                to: RawPoint::new(cull.max_x, y),
                style,
            }));
            report.lines.push(GridLine {
                kind: GridLineKind::Latitude,
                value: lat,
                is_major: major,
                raw_position: y,
            });

            if !self.show_labels || !major || !window.contains_y(y) {
                continue;
            }

            let screen_y = viewport.project(self.config, &RawPoint::new(window.min_x, y))?.y;
            if labeled.place(&[screen_y], |_| true).is_some() {
                let label = OverlayLabel {
                    text: format_latitude_label(lat),
                    kind: LabelKind::Latitude,
                    anchor: RawPoint::new(window.min_x, y),
                    screen: ScreenPoint::new(LATITUDE_LABEL_LEFT, screen_y),
                };
                elements.push(OverlayElement::Label(label.clone()));
                report.latitude_labels.push(label);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::DisplaySize;
    use crate::overlay::GRID_GROUP;

    fn config() -> MapConfig {
        let mut config = MapConfig::default().with_display(DisplaySize::new(1200.0, 700.0));
        config.resolve_prime_meridian();
        config
    }

    fn assert_no_overlap(labels: &[OverlayLabel]) {
        for (i, a) in labels.iter().enumerate() {
            for b in &labels[i + 1..] {
                assert!((a.screen.x - b.screen.x).abs() >= MIN_LABEL_SEPARATION,
                        "{} at {} overlaps {} at {}", a.text, a.screen.x, b.text, b.screen.x);
            }
        }
    }

    #[test]
    fn test_crowded_latitude_labels_are_thinned() {
        // 150 px tall: major latitudes are about 32 px apart on screen
        let mut config = MapConfig::default().with_display(DisplaySize::new(300.0, 150.0));
        config.resolve_prime_meridian();
        let viewport = Viewport::centered(&config);
        let mut group = OverlayGroup::new(GRID_GROUP);
        let report = GridRenderer::new(&config, true).render(&viewport, &mut group).unwrap();

        let texts: Vec<&str> = report.latitude_labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["60°N", "Equator", "60°S"]);
        for pair in report.latitude_labels.windows(2) {
            assert!(pair[1].screen.y - pair[0].screen.y >= MIN_LABEL_SEPARATION);
        }

        let drawn = report.lines.iter().filter(|l| l.kind == GridLineKind::Latitude && l.is_major).count();
        assert_eq!(drawn, 5);
    }

    #[test]
    fn test_whole_world_at_zoom_zero() {
        let config = config();
        let viewport = Viewport::centered(&config);
        let mut group = OverlayGroup::new(GRID_GROUP);
        let report = GridRenderer::new(&config, true).render(&viewport, &mut group).unwrap();

        assert_eq!(report.spacing, 30.0);
        let longitudes: Vec<_> = report.lines.iter().filter(|l| l.kind == GridLineKind::Longitude).collect();
        assert!(longitudes.iter().any(|l| l.value == 0.0 && (l.raw_position - 4101.0).abs() < 1e-9));
        // Every one of the 12 meridians is visible somewhere in a full-world view
        for offset in longitude_offsets(30.0) {
            assert!(longitudes.iter().any(|l| l.value == offset), "missing {}", offset);
        }
        assert_eq!(report.lines.iter().filter(|l| l.kind == GridLineKind::Latitude).count(), 5);
        assert!(!report.longitude_labels.is_empty());
        assert_no_overlap(&report.longitude_labels);
        assert!(report.latitude_labels.iter().any(|l| l.text == "Equator"));
        assert_eq!(group.lines().count(), report.lines.len());
    }

    #[test]
    fn test_labels_never_overlap_at_any_zoom() {
        let config = config();
        let mut group = OverlayGroup::new(GRID_GROUP);
        for zoom in [0.0, 0.5, 1.0, 2.0, 3.0, 3.5, 4.0, 5.0, 6.0] {
            for centre_x in [0.0, 1500.0, 4101.0, 8100.0] {
                let viewport = Viewport::new(RawPoint::new(centre_x, 2450.0), zoom);
                let report = GridRenderer::new(&config, true).render(&viewport, &mut group).unwrap();
                assert_no_overlap(&report.longitude_labels);
            }
        }
    }

    #[test]
    fn test_seam_view_draws_wrapped_copies() {
        let config = config();
        let viewport = Viewport::new(RawPoint::new(0.0, 2450.0), 3.0);
        let mut group = OverlayGroup::new(GRID_GROUP);
        let report = GridRenderer::new(&config, false).render(&viewport, &mut group).unwrap();

        // The view straddles x = 0 so some lines sit left of the seam
        assert!(report.lines.iter().any(|l| l.kind == GridLineKind::Longitude && l.raw_position < 0.0));
        assert!(report.lines.iter().any(|l| l.kind == GridLineKind::Longitude && l.raw_position > 0.0));
        assert_eq!(group.labels().count(), 0);
    }

    #[test]
    fn test_culling_bounds_line_count() {
        let config = config();
        let viewport = Viewport::new(RawPoint::new(4101.0, 2450.0), 6.0);
        let window = viewport.visible_window(&config).unwrap().buffered(CULL_BUFFER);
        let mut group = OverlayGroup::new(GRID_GROUP);
        let report = GridRenderer::new(&config, true).render(&viewport, &mut group).unwrap();

        assert_eq!(report.spacing, 5.0);
        for line in report.lines.iter().filter(|l| l.kind == GridLineKind::Longitude) {
            assert!(window.contains_x(line.raw_position));
        }
        assert!(report.lines.len() < 20);
    }

    #[test]
    fn test_redraw_replaces_previous_generation() {
        let config = config();
        let mut group = OverlayGroup::new(GRID_GROUP);
        let renderer = GridRenderer::new(&config, true);
        renderer.render(&Viewport::centered(&config), &mut group).unwrap();
        let first = group.len();
        renderer.render(&Viewport::centered(&config), &mut group).unwrap();
        assert_eq!(group.len(), first);
    }
}
