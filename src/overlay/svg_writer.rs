//! SVG export of overlay groups
//!
//! Writes the visible groups as a standalone SVG document sized to the
//! attached container, with every element projected through the viewport.

use std::fs;
use log::{debug, info};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::element::{LabelKind, OverlayElement, OverlayLabel, OverlayLine, OverlayMarker};
use super::group::OverlayGroup;
use crate::config::MapConfig;
use crate::errors::{MapError, MapResult};
use crate::viewport::Viewport;

/// Serializes overlay groups to SVG
pub struct SvgWriter<'a> {
    config: &'a MapConfig,
    viewport: &'a Viewport,
}

impl<'a> SvgWriter<'a> {
    /// Create a writer for a configuration and viewport
    pub fn new(config: &'a MapConfig, viewport: &'a Viewport) -> Self {
        SvgWriter { config, viewport }
    }

    /// Render the visible groups into an SVG document
    ///
    /// # Arguments
    /// * `groups` - Groups in paint order; hidden groups are skipped
    ///
    /// # Returns
    /// The document text, or `MapError::ViewportDetached` when there is no
    /// container size to draw into
    pub fn render(&self, groups: &[&OverlayGroup]) -> MapResult<String> {
        let size = self.config.display.ok_or(MapError::ViewportDetached)?;
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("svg");
        root.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
        root.push_attribute(("width", fmt(size.width).as_str()));
        root.push_attribute(("height", fmt(size.height).as_str()));
        root.push_attribute(("viewBox", format!("0 0 {} {}", fmt(size.width), fmt(size.height)).as_str()));
        writer.write_event(Event::Start(root))?;

        for group in groups.iter().filter(|g| g.visible) {
            debug!("Writing overlay group '{}' ({} elements)", group.name(), group.len());
            let mut g = BytesStart::new("g");
            g.push_attribute(("id", group.name()));
            writer.write_event(Event::Start(g))?;

            for element in group.elements() {
                match element {
                    OverlayElement::Line(line) => self.write_line(&mut writer, line)?,
                    OverlayElement::Label(label) => Self::write_label(&mut writer, label)?,
                    OverlayElement::Marker(marker) => self.write_marker(&mut writer, marker)?,
                }
            }

            writer.write_event(Event::End(BytesEnd::new("g")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("svg")))?;

        String::from_utf8(writer.into_inner())
            .map_err(|e| MapError::GenericError(format!("SVG output is not UTF-8: {}", e)))
    }

    /// Render the visible groups and save them to a file
    pub fn write_to_file(&self, groups: &[&OverlayGroup], path: &str) -> MapResult<()> {
        let document = self.render(groups)?;
        fs::write(path, document)?;
        info!("Wrote overlay SVG to {}", path);
        Ok(())
    }

    fn write_line(&self, writer: &mut Writer<Vec<u8>>, line: &OverlayLine) -> MapResult<()> {
        let from = self.viewport.project(self.config, &line.from)?;
        let to = self.viewport.project(self.config, &line.to)?;

        let mut element = BytesStart::new("line");
        element.push_attribute(("x1", fmt(from.x).as_str()));
        element.push_attribute(("y1", fmt(from.y).as_str()));
        element.push_attribute(("x2", fmt(to.x).as_str()));
        element.push_attribute(("y2", fmt(to.y).as_str()));
        element.push_attribute(("stroke", line.style.color.as_str()));
        element.push_attribute(("stroke-width", fmt(line.style.weight).as_str()));
        element.push_attribute(("stroke-opacity", fmt(line.style.opacity).as_str()));
        if let Some(dash) = &line.style.dash {
            element.push_attribute(("stroke-dasharray", dash.as_str()));
        }
        writer.write_event(Event::Empty(element))?;
        Ok(())
    }

    fn write_label(writer: &mut Writer<Vec<u8>>, label: &OverlayLabel) -> MapResult<()> {
        let class = match label.kind {
            LabelKind::Longitude => "grid-label longitude",
            LabelKind::Latitude => "grid-label latitude",
            LabelKind::Meridian => "meridian-label",
        };
        let anchor = match label.kind {
            LabelKind::Latitude => "start",
            _ => "middle",
        };

        let mut element = BytesStart::new("text");
        element.push_attribute(("x", fmt(label.screen.x).as_str()));
        element.push_attribute(("y", fmt(label.screen.y).as_str()));
        element.push_attribute(("class", class));
        element.push_attribute(("text-anchor", anchor));
        element.push_attribute(("font-size", "11"));
        writer.write_event(Event::Start(element))?;
        writer.write_event(Event::Text(BytesText::new(&label.text)))?;
        writer.write_event(Event::End(BytesEnd::new("text")))?;
        Ok(())
    }

    fn write_marker(&self, writer: &mut Writer<Vec<u8>>, marker: &OverlayMarker) -> MapResult<()> {
        let at = self.viewport.project(self.config, &marker.position)?;

        let mut element = BytesStart::new("circle");
        element.push_attribute(("cx", fmt(at.x).as_str()));
        element.push_attribute(("cy", fmt(at.y).as_str()));
        element.push_attribute(("r", "6"));
        element.push_attribute(("fill", "#cc3333"));
        writer.write_event(Event::Start(element))?;
        writer.write_event(Event::Start(BytesStart::new("title")))?;
        writer.write_event(Event::Text(BytesText::new(&marker.popup)))?;
        writer.write_event(Event::End(BytesEnd::new("title")))?;
        writer.write_event(Event::End(BytesEnd::new("circle")))?;
        Ok(())
    }
}

fn fmt(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::{DisplaySize, RawPoint, ScreenPoint};
    use crate::overlay::{LineStyle, GRID_GROUP, MERIDIAN_GROUP};

    fn sample_config() -> MapConfig {
        MapConfig::default().with_display(DisplaySize::new(820.2, 490.0))
    }

    #[test]
    fn test_render_writes_visible_groups_only() {
        let config = sample_config();
        let viewport = Viewport::centered(&config);

        let mut grid = OverlayGroup::new(GRID_GROUP);
        grid.push(OverlayElement::Line(OverlayLine {
            from: RawPoint::new(4101.0, 0.0),
            to: RawPoint::new(4101.0, 4900.0),
            style: LineStyle::major_grid(),
        }));
        grid.push(OverlayElement::Label(OverlayLabel {
            text: "0°".to_string(),
            kind: LabelKind::Longitude,
            anchor: RawPoint::new(4101.0, 0.0),
            screen: ScreenPoint::new(410.1, 16.0),
        }));

        let mut meridian = OverlayGroup::new(MERIDIAN_GROUP);
        meridian.visible = false;
        meridian.push(OverlayElement::Marker(OverlayMarker {
            position: RawPoint::new(4101.0, 2450.0),
            popup: "Reference point".to_string(),
        }));

        let svg = SvgWriter::new(&config, &viewport).render(&[&grid, &meridian]).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<g id=\"grid\">"));
        assert!(svg.contains("x1=\"410.10\""));
        assert!(svg.contains("0°"));
        assert!(!svg.contains("prime-meridian"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_render_requires_attached_viewport() {
        let config = MapConfig::default();
        let viewport = Viewport::centered(&config);
        let grid = OverlayGroup::new(GRID_GROUP);
        let result = SvgWriter::new(&config, &viewport).render(&[&grid]);
        assert!(matches!(result, Err(MapError::ViewportDetached)));
    }

    #[test]
    fn test_popup_text_is_escaped() {
        let config = sample_config();
        let viewport = Viewport::centered(&config);
        let mut group = OverlayGroup::new(MERIDIAN_GROUP);
        group.push(OverlayElement::Marker(OverlayMarker {
            position: RawPoint::new(4101.0, 2450.0),
            popup: "a < b".to_string(),
        }));
        let svg = SvgWriter::new(&config, &viewport).render(&[&group]).unwrap();
        assert!(svg.contains("a &lt; b"));
    }
}
