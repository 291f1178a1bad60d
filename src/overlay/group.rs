//! Named overlay groups

use super::element::{OverlayElement, OverlayLabel, OverlayLine, OverlayMarker};

/// Name of the lat/lon grid group
pub const GRID_GROUP: &str = "grid";
/// Name of the prime meridian group
pub const MERIDIAN_GROUP: &str = "prime-meridian";

/// A named layer of overlay elements that the viewer shows or hides as a unit
///
/// Each redraw clears the group and repopulates it, so at most one
/// generation of elements is alive at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayGroup {
    name: String,
    pub visible: bool,
    elements: Vec<OverlayElement>,
}

impl OverlayGroup {
    /// Create an empty, visible group
    pub fn new(name: &str) -> Self {
        OverlayGroup {
            name: name.to_string(),
            visible: true,
            elements: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Drop every element
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Add an element
    pub fn push(&mut self, element: OverlayElement) {
        self.elements.push(element);
    }

    /// Replace the group contents with a freshly rendered generation
    pub fn replace(&mut self, elements: Vec<OverlayElement>) {
        self.elements = elements;
    }

    pub fn elements(&self) -> &[OverlayElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over the line elements
    pub fn lines(&self) -> impl Iterator<Item = &OverlayLine> {
        self.elements.iter().filter_map(|e| match e {
            OverlayElement::Line(line) => Some(line),
            _ => None,
        })
    }

    /// Iterate over the label elements
    pub fn labels(&self) -> impl Iterator<Item = &OverlayLabel> {
        self.elements.iter().filter_map(|e| match e {
            OverlayElement::Label(label) => Some(label),
            _ => None,
        })
    }

    /// Iterate over the marker elements
    pub fn markers(&self) -> impl Iterator<Item = &OverlayMarker> {
        self.elements.iter().filter_map(|e| match e {
            OverlayElement::Marker(marker) => Some(marker),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::RawPoint;
    use crate::overlay::LineStyle;

    #[test]
    fn test_group_filters_by_kind() {
        let mut group = OverlayGroup::new(GRID_GROUP);
        group.push(OverlayElement::Line(OverlayLine {
            from: RawPoint::new(0.0, 0.0),
            to: RawPoint::new(0.0, 10.0),
            style: LineStyle::minor_grid(),
        }));
        group.push(OverlayElement::Marker(OverlayMarker {
            position: RawPoint::new(5.0, 5.0),
            popup: "here".to_string(),
        }));
        assert_eq!(group.len(), 2);
        assert_eq!(group.lines().count(), 1);
        assert_eq!(group.markers().count(), 1);
        assert_eq!(group.labels().count(), 0);

        group.clear();
        assert!(group.is_empty());
        assert_eq!(group.name(), "grid");
    }
}
