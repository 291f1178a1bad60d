//! Prime meridian highlight
//!
//! Draws the reference meridian (and its wraparound copies) in its own style,
//! with a fixed label and a marker on the reference point whose popup shows
//! the geographic coordinate the reference corresponds to.

use log::debug;

use super::renderer::CULL_BUFFER;
use crate::config::MapConfig;
use crate::coordinate::{GeoPoint, GeoTransform, RawPoint, ScreenPoint};
use crate::errors::MapResult;
use crate::overlay::{LabelKind, LineStyle, OverlayElement, OverlayGroup, OverlayLabel, OverlayLine, OverlayMarker};
use crate::utils::format_utils::format_geo;
use crate::viewport::Viewport;

/// Text of the meridian label
pub const PRIME_MERIDIAN_LABEL: &str = "Prime Meridian (0°)";

/// Screen offset of the label above the reference point
const LABEL_LIFT: f64 = 14.0;

/// What a meridian pass produced
#[derive(Debug, Clone, Default)]
pub struct MeridianRenderReport {
    /// Raw X of every drawn meridian copy
    pub instances: Vec<f64>,
    /// The placed label, if any copy was on screen
    pub label: Option<OverlayLabel>,
    /// Position of the reference marker
    pub marker: Option<RawPoint>,
}

/// Draws the prime meridian overlay
pub struct PrimeMeridianRenderer<'a> {
    config: &'a MapConfig,
}

impl<'a> PrimeMeridianRenderer<'a> {
    /// Create a renderer over a configuration
    pub fn new(config: &'a MapConfig) -> Self {
        PrimeMeridianRenderer { config }
    }

    /// Geographic coordinate shown in the reference popup
    pub fn reference_geo(&self) -> GeoPoint {
        match self.config.prime_meridian_ref {
            Some(reference) => reference.into(),
            None => {
                let transform = GeoTransform::new(self.config);
                transform.raw_to_geo(transform.prime_meridian_x(), self.config.prime_meridian_y)
            },
        }
    }

    /// Clear `group` and draw the meridian for `viewport`
    pub fn render(&self, viewport: &Viewport, group: &mut OverlayGroup) -> MapResult<MeridianRenderReport> {
        group.clear();

        let window = viewport.visible_window(self.config)?;
        let cull = window.buffered(CULL_BUFFER);
        let transform = GeoTransform::new(self.config);
        let width = transform.width();
        let height = transform.height();
        let meridian_x = transform.prime_meridian_x();
        let reference_y = self.config.prime_meridian_y;

        let mut report = MeridianRenderReport::default();
        let mut elements = Vec::new();

        let copies = [meridian_x, meridian_x - width, meridian_x + width];
        for &x in copies.iter().filter(|&&x| cull.contains_x(x)) {
            elements.push(OverlayElement::Line(OverlayLine {
                from: RawPoint::new(x, 0.0),
                to: RawPoint::new(x, height),
                style: LineStyle::prime_meridian(),
            }));
            report.instances.push(x);
        }

        // Label and marker go on the first copy that is actually on screen
        let shown = copies.iter().copied().find(|&x| window.contains_x(x));
        if let Some(x) = shown {
            let anchor = RawPoint::new(x, reference_y);
            let at = viewport.project(self.config, &anchor)?;
            let label = OverlayLabel {
                text: PRIME_MERIDIAN_LABEL.to_string(),
                kind: LabelKind::Meridian,
                anchor,
                screen: ScreenPoint::new(at.x, at.y - LABEL_LIFT),
            };
            elements.push(OverlayElement::Label(label.clone()));
            report.label = Some(label);

            elements.push(OverlayElement::Marker(OverlayMarker {
                position: anchor,
                popup: format!("Reference point: {}", format_geo(&self.reference_geo())),
            }));
            report.marker = Some(anchor);
        }

        debug!("Prime meridian pass: {} copies drawn, label {}",
               report.instances.len(),
               if report.label.is_some() { "placed" } else { "off screen" });

        group.replace(elements);
        Ok(report)
    }
}
