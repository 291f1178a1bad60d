//! Vector overlay primitives
//!
//! Geometry is kept in raw pixels so one overlay can be projected into any
//! viewport; labels additionally remember the screen anchor they were placed
//! at, since overlap avoidance happens in screen space.

use crate::coordinate::{RawPoint, ScreenPoint};

/// Stroke style for overlay lines
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    /// SVG dash pattern, solid when `None`
    pub dash: Option<String>,
}

impl LineStyle {
    /// Unlabelled grid line
    pub fn minor_grid() -> Self {
        LineStyle {
            color: "#888888".to_string(),
            weight: 0.5,
            opacity: 0.4,
            dash: Some("2,4".to_string()),
        }
    }

    /// Grid line at a multiple of 30 degrees
    pub fn major_grid() -> Self {
        LineStyle {
            color: "#666666".to_string(),
            weight: 1.0,
            opacity: 0.6,
            dash: None,
        }
    }

    /// Equator
    pub fn equator() -> Self {
        LineStyle {
            color: "#3366cc".to_string(),
            weight: 1.5,
            opacity: 0.8,
            dash: None,
        }
    }

    /// Prime meridian highlight
    pub fn prime_meridian() -> Self {
        LineStyle {
            color: "#cc3333".to_string(),
            weight: 2.0,
            opacity: 0.9,
            dash: Some("10,6".to_string()),
        }
    }
}

/// A straight line segment
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLine {
    pub from: RawPoint,
    pub to: RawPoint,
    pub style: LineStyle,
}

/// Which axis a label annotates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Longitude,
    Latitude,
    Meridian,
}

/// A text label
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLabel {
    pub text: String,
    pub kind: LabelKind,
    /// Raw position of the annotated line copy
    pub anchor: RawPoint,
    /// Container position the label was placed at
    pub screen: ScreenPoint,
}

/// An interactive point marker with popup text
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayMarker {
    pub position: RawPoint,
    pub popup: String,
}

/// Anything that can be drawn in an overlay group
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayElement {
    Line(OverlayLine),
    Label(OverlayLabel),
    Marker(OverlayMarker),
}
